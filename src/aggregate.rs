use std::collections::BTreeMap;

use crate::models::{CommitDayCount, CommitRecord};

/// Length of the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
const DATE_PREFIX_LEN: usize = 10;

/// Group commits by the literal date prefix of their author timestamp.
///
/// The time of day and any offset in the timestamp are ignored, so two
/// commits land on the same day only if their strings share the same first
/// ten characters. Output is sorted ascending by date string.
pub fn commits_per_day(commits: &[CommitRecord]) -> Vec<CommitDayCount> {
    let mut by_date: BTreeMap<&str, u32> = BTreeMap::new();

    for commit in commits {
        *by_date.entry(date_key(commit.author_date())).or_insert(0) += 1;
    }

    by_date
        .into_iter()
        .map(|(date, count)| CommitDayCount::new(date, count))
        .collect()
}

fn date_key(timestamp: &str) -> &str {
    // Shorter (malformed) timestamps are grouped as-is.
    timestamp.get(..DATE_PREFIX_LEN).unwrap_or(timestamp)
}
