use anyhow::{Context, Result};
use std::fs;

use crate::chart;
use crate::config::Config;
use crate::state::{CommitPhase, LookupState};
use crate::view;

/// Write the commit chart for the current selection to `config.chart_path`.
///
/// Returns `Ok(false)` when there is nothing to draw (no selection, still
/// loading, failed, or no commits in the window).
pub fn export_chart(state: &LookupState, window_days: u32, config: &Config) -> Result<bool> {
    let (Some(repo), CommitPhase::Success(data)) = (state.selected_repo(), state.commit_phase())
    else {
        return Ok(false);
    };
    if data.is_empty() {
        return Ok(false);
    }

    let title = view::chart_title(repo, window_days);
    let svg = chart::generate_svg(data, &title, config.theme);
    fs::write(&config.chart_path, svg)
        .with_context(|| format!("Failed to write chart to {}", config.chart_path.display()))?;

    Ok(true)
}
