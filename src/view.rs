//! What the rendering surface should show for a given [`LookupState`].
//!
//! Nothing here draws; the front end matches on these values.

use crate::models::{CommitDayCount, Repository};
use crate::state::{CommitPhase, LookupState};
use crate::window;

pub const SKELETON_CARDS: usize = 5;
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_REPOSITORIES: &str = "This user has no public repositories.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCard {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl From<&Repository> for RepoCard {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            title: repo.name.clone(),
            description: repo
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            url: repo.html_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoPanel {
    Blank,
    /// Placeholder cards while the listing is in flight.
    Skeleton(usize),
    Error(String),
    Cards(Vec<RepoCard>),
    NoRepositories,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitBody {
    Loading,
    Error(String),
    Empty(String),
    Chart(Vec<CommitDayCount>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPanel {
    pub title: String,
    pub body: CommitBody,
}

pub fn repo_panel(state: &LookupState) -> RepoPanel {
    if let Some(err) = state.repos_error() {
        return RepoPanel::Error(err.to_string());
    }
    if state.repos_loading() {
        return RepoPanel::Skeleton(SKELETON_CARDS);
    }
    if !state.repos().is_empty() {
        return RepoPanel::Cards(state.repos().iter().map(RepoCard::from).collect());
    }
    if !state.username().is_empty() && state.repos_owner().is_some() {
        return RepoPanel::NoRepositories;
    }
    RepoPanel::Blank
}

/// `None` until a repository has been selected.
pub fn commit_panel(state: &LookupState, window_days: u32) -> Option<CommitPanel> {
    let repo = state.selected_repo()?;
    let label = window::window_label(window_days);

    let body = match state.commit_phase() {
        CommitPhase::Idle | CommitPhase::Loading => CommitBody::Loading,
        CommitPhase::Error(err) => CommitBody::Error(err.to_string()),
        CommitPhase::Success([]) => CommitBody::Empty(format!("No commits found in the {label}.")),
        CommitPhase::Success(data) => CommitBody::Chart(data.to_vec()),
    };

    Some(CommitPanel {
        title: chart_title(repo, window_days),
        body,
    })
}

pub fn chart_title(repo: &str, window_days: u32) -> String {
    format!("Commits in \"{repo}\" ({})", window::window_label(window_days))
}
