//! window.rs
//!
//! The commit listing is bounded server-side by a `since` instant. This module
//! computes that instant as "now minus N days" and formats it the way the
//! GitHub API expects: an ISO-8601 UTC timestamp with millisecond precision
//! and a `Z` suffix, e.g. `2024-01-01T12:30:00.000Z`.
//!
//! The subtraction is by whole days of 24 hours in UTC, so the time of day is
//! preserved across month and year boundaries.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Start of the trailing window ending at `now`.
pub fn since(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

/// `since` formatted for the `since` query parameter.
pub fn since_param(now: DateTime<Utc>, days: u32) -> String {
    since(now, days).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Chart caption for a window length.
pub fn window_label(days: u32) -> String {
    format!("last {} day{}", days, plural(days))
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}
