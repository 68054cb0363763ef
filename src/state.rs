//! Lookup state and its transitions.
//!
//! Every outbound request takes a [`Ticket`] when it starts. A completion is
//! applied only while its ticket is still the most recent one issued for that
//! flow; anything older is discarded, so the last request started always
//! wins regardless of the order responses arrive in.

use crate::github::FetchError;
use crate::models::{CommitDayCount, Repository};

pub const USER_NOT_FOUND: &str = "User not found";
pub const RATE_LIMITED: &str = "API rate limit exceeded";
pub const SEARCH_FAILED: &str = "Something went wrong";
pub const COMMITS_FAILED: &str = "Failed to fetch commits";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Repos,
    Commits,
}

/// Identifies one started request: which flow, its sequence number within
/// that flow, and the input that triggered it (username or repository name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    flow: Flow,
    seq: u64,
    input: String,
}

impl Ticket {
    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Where the commit view is for the current selection.
#[derive(Debug, PartialEq, Eq)]
pub enum CommitPhase<'a> {
    Idle,
    Loading,
    Error(&'a str),
    Success(&'a [CommitDayCount]),
}

#[derive(Debug, Clone, Default)]
pub struct LookupState {
    username: String,
    repos: Vec<Repository>,
    repos_owner: Option<String>,
    repos_loading: bool,
    repos_error: Option<String>,
    selected_repo: Option<String>,
    selected_owner: Option<String>,
    commits: Vec<CommitDayCount>,
    commits_loading: bool,
    commits_error: Option<String>,
    repos_seq: u64,
    commits_seq: u64,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn repos(&self) -> &[Repository] {
        &self.repos
    }

    /// Login whose repositories are currently listed.
    pub fn repos_owner(&self) -> Option<&str> {
        self.repos_owner.as_deref()
    }

    pub fn repos_loading(&self) -> bool {
        self.repos_loading
    }

    pub fn repos_error(&self) -> Option<&str> {
        self.repos_error.as_deref()
    }

    pub fn selected_repo(&self) -> Option<&str> {
        self.selected_repo.as_deref()
    }

    pub fn commits(&self) -> &[CommitDayCount] {
        &self.commits
    }

    pub fn commits_loading(&self) -> bool {
        self.commits_loading
    }

    pub fn commits_error(&self) -> Option<&str> {
        self.commits_error.as_deref()
    }

    pub fn commit_phase(&self) -> CommitPhase<'_> {
        if self.selected_repo.is_none() {
            CommitPhase::Idle
        } else if self.commits_loading {
            CommitPhase::Loading
        } else if let Some(err) = &self.commits_error {
            CommitPhase::Error(err)
        } else {
            CommitPhase::Success(&self.commits)
        }
    }

    /// Owner to scope a commit listing to: the login of the last successful
    /// search, or the typed username if nothing has been listed yet.
    pub fn commits_owner(&self) -> &str {
        self.repos_owner.as_deref().unwrap_or(&self.username)
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        match ticket.flow {
            Flow::Repos => ticket.seq == self.repos_seq,
            Flow::Commits => {
                ticket.seq == self.commits_seq
                    && self.selected_repo.as_deref() == Some(ticket.input.as_str())
            }
        }
    }

    pub fn set_username(&mut self, text: impl Into<String>) {
        self.username = text.into();
    }

    pub fn search_started(&mut self, username: &str) -> Ticket {
        self.repos_seq += 1;
        self.repos_loading = true;
        self.repos_error = None;

        Ticket {
            flow: Flow::Repos,
            seq: self.repos_seq,
            input: username.to_string(),
        }
    }

    /// Returns `false` if the ticket was stale and nothing changed.
    pub fn search_succeeded(&mut self, ticket: &Ticket, repos: Vec<Repository>) -> bool {
        if ticket.flow != Flow::Repos || !self.is_current(ticket) {
            return false;
        }

        // A chart belongs to the owner it was fetched for.
        if self
            .selected_owner
            .as_deref()
            .is_some_and(|owner| owner != ticket.input)
        {
            self.clear_selection();
        }

        self.repos = repos;
        self.repos_owner = Some(ticket.input.clone());
        self.repos_error = None;
        self.repos_loading = false;
        true
    }

    /// Returns `false` if the ticket was stale and nothing changed.
    pub fn search_failed(&mut self, ticket: &Ticket, err: &FetchError) -> bool {
        if ticket.flow != Flow::Repos || !self.is_current(ticket) {
            return false;
        }

        self.repos.clear();
        self.repos_owner = None;
        self.repos_error = Some(search_error_message(err).to_string());
        self.repos_loading = false;
        true
    }

    pub fn commits_started(&mut self, repo: &str) -> Ticket {
        self.commits_seq += 1;
        self.selected_owner = Some(self.commits_owner().to_string());
        self.selected_repo = Some(repo.to_string());
        self.commits.clear();
        self.commits_error = None;
        self.commits_loading = true;

        Ticket {
            flow: Flow::Commits,
            seq: self.commits_seq,
            input: repo.to_string(),
        }
    }

    /// Returns `false` if the ticket was stale and nothing changed.
    pub fn commits_succeeded(&mut self, ticket: &Ticket, data: Vec<CommitDayCount>) -> bool {
        if ticket.flow != Flow::Commits || !self.is_current(ticket) {
            return false;
        }

        self.commits = data;
        self.commits_error = None;
        self.commits_loading = false;
        true
    }

    /// Returns `false` if the ticket was stale and nothing changed.
    pub fn commits_failed(&mut self, ticket: &Ticket, _err: &FetchError) -> bool {
        if ticket.flow != Flow::Commits || !self.is_current(ticket) {
            return false;
        }

        self.commits.clear();
        self.commits_error = Some(COMMITS_FAILED.to_string());
        self.commits_loading = false;
        true
    }

    /// Back to `Idle`; any commit fetch still in flight becomes stale.
    fn clear_selection(&mut self) {
        self.commits_seq += 1;
        self.selected_repo = None;
        self.selected_owner = None;
        self.commits.clear();
        self.commits_error = None;
        self.commits_loading = false;
    }
}

/// User-facing message for a failed repository lookup.
pub fn search_error_message(err: &FetchError) -> &'static str {
    match err {
        FetchError::NotFound => USER_NOT_FOUND,
        FetchError::RateLimited => RATE_LIMITED,
        FetchError::Status(_) | FetchError::Transport(_) | FetchError::Decode(_) => SEARCH_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(id: u64, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/someone/{name}"),
        }
    }

    #[test]
    fn new_state_is_idle() {
        let state = LookupState::new();
        assert_eq!(state.username(), "");
        assert!(state.repos().is_empty());
        assert!(!state.repos_loading());
        assert_eq!(state.repos_error(), None);
        assert_eq!(state.commit_phase(), CommitPhase::Idle);
    }

    #[test]
    fn search_success_replaces_repos_wholesale() {
        let mut state = LookupState::new();
        let first = state.search_started("alice");
        assert!(state.repos_loading());
        assert!(state.search_succeeded(&first, vec![repo(1, "a"), repo(2, "b")]));

        let second = state.search_started("bob");
        assert!(state.search_succeeded(&second, vec![repo(3, "c")]));

        assert_eq!(state.repos(), &[repo(3, "c")]);
        assert_eq!(state.repos_owner(), Some("bob"));
        assert!(!state.repos_loading());
    }

    #[test]
    fn search_start_clears_previous_error() {
        let mut state = LookupState::new();
        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "a")]);

        let t = state.search_started("ghost");
        state.search_failed(&t, &FetchError::NotFound);
        assert_eq!(state.repos_error(), Some(USER_NOT_FOUND));

        state.search_started("alice");
        assert_eq!(state.repos_error(), None);
        assert!(state.repos_loading());
    }

    #[test]
    fn search_failure_clears_repos() {
        let mut state = LookupState::new();
        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "a")]);

        let t = state.search_started("alice");
        assert!(state.search_failed(&t, &FetchError::RateLimited));

        assert_eq!(state.repos_error(), Some(RATE_LIMITED));
        assert!(state.repos().is_empty());
        assert_eq!(state.repos_owner(), None);
        assert!(!state.repos_loading());
    }

    #[test]
    fn error_messages() {
        assert_eq!(search_error_message(&FetchError::NotFound), USER_NOT_FOUND);
        assert_eq!(search_error_message(&FetchError::RateLimited), RATE_LIMITED);
        assert_eq!(search_error_message(&FetchError::Status(500)), SEARCH_FAILED);
    }

    #[test]
    fn listing_another_owner_clears_commit_view() {
        let mut state = LookupState::new();
        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "dotfiles")]);
        let c = state.commits_started("dotfiles");
        state.commits_succeeded(&c, vec![CommitDayCount::new("2024-01-01", 3)]);

        let t = state.search_started("bob");
        assert!(state.search_succeeded(&t, vec![repo(2, "dotfiles")]));

        assert_eq!(state.selected_repo(), None);
        assert!(state.commits().is_empty());
        assert_eq!(state.commit_phase(), CommitPhase::Idle);
    }

    #[test]
    fn listing_another_owner_discards_inflight_commits() {
        let mut state = LookupState::new();
        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "dotfiles")]);
        let c = state.commits_started("dotfiles");

        let t = state.search_started("bob");
        state.search_succeeded(&t, vec![repo(2, "dotfiles")]);

        assert!(!state.commits_succeeded(&c, vec![CommitDayCount::new("2024-01-01", 3)]));
        assert!(!state.commits_loading());
        assert_eq!(state.selected_repo(), None);
    }

    #[test]
    fn relisting_same_owner_keeps_commit_view() {
        let mut state = LookupState::new();
        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "dotfiles")]);
        let c = state.commits_started("dotfiles");
        state.commits_succeeded(&c, vec![CommitDayCount::new("2024-01-01", 3)]);

        let t = state.search_started("alice");
        state.search_succeeded(&t, vec![repo(1, "dotfiles")]);

        assert_eq!(state.selected_repo(), Some("dotfiles"));
        assert_eq!(state.commits(), &[CommitDayCount::new("2024-01-01", 3)]);
    }

    #[test]
    fn stale_search_is_discarded() {
        let mut state = LookupState::new();
        let a = state.search_started("a");
        let b = state.search_started("b");

        assert!(state.search_succeeded(&b, vec![repo(2, "from-b")]));
        assert!(!state.search_succeeded(&a, vec![repo(1, "from-a")]));
        assert!(!state.search_failed(&a, &FetchError::NotFound));

        assert_eq!(state.repos(), &[repo(2, "from-b")]);
        assert_eq!(state.repos_owner(), Some("b"));
        assert_eq!(state.repos_error(), None);
    }

    #[test]
    fn selecting_repo_resets_commit_view() {
        let mut state = LookupState::new();
        let t = state.commits_started("linux");
        state.commits_failed(&t, &FetchError::Status(500));
        assert_eq!(state.commit_phase(), CommitPhase::Error(COMMITS_FAILED));

        let t = state.commits_started("git");
        assert_eq!(state.selected_repo(), Some("git"));
        assert_eq!(state.commits_error(), None);
        assert!(state.commits().is_empty());
        assert_eq!(state.commit_phase(), CommitPhase::Loading);

        let data = vec![CommitDayCount::new("2024-01-01", 4)];
        assert!(state.commits_succeeded(&t, data.clone()));
        assert_eq!(state.commit_phase(), CommitPhase::Success(&data));
    }

    #[test]
    fn stale_commits_are_discarded() {
        let mut state = LookupState::new();
        let a = state.commits_started("a");
        let b = state.commits_started("b");

        assert!(state.commits_succeeded(&b, vec![CommitDayCount::new("2024-01-02", 1)]));
        assert!(!state.commits_succeeded(&a, vec![CommitDayCount::new("2024-01-01", 9)]));
        assert!(!state.commits_failed(&a, &FetchError::NotFound));

        assert_eq!(state.selected_repo(), Some("b"));
        assert_eq!(state.commits(), &[CommitDayCount::new("2024-01-02", 1)]);
        assert_eq!(state.commits_error(), None);
    }

    #[test]
    fn tickets_do_not_cross_flows() {
        let mut state = LookupState::new();
        let search = state.search_started("alice");
        let commits = state.commits_started("alice");

        assert!(!state.commits_succeeded(&search, vec![]));
        assert!(!state.search_succeeded(&commits, vec![]));
        assert!(state.repos_loading());
        assert!(state.commits_loading());
    }

    #[test]
    fn search_error_leaves_commit_view_alone() {
        let mut state = LookupState::new();
        let c = state.commits_started("linux");
        state.commits_succeeded(&c, vec![CommitDayCount::new("2024-01-01", 2)]);

        let s = state.search_started("ghost");
        state.search_failed(&s, &FetchError::NotFound);

        assert_eq!(state.selected_repo(), Some("linux"));
        assert_eq!(state.commits().len(), 1);
    }

    #[test]
    fn commits_owner_prefers_listed_owner() {
        let mut state = LookupState::new();
        state.set_username("torvalds");
        assert_eq!(state.commits_owner(), "torvalds");

        let t = state.search_started("torvalds");
        state.search_succeeded(&t, vec![repo(1, "linux")]);
        state.set_username("someone-else");
        assert_eq!(state.commits_owner(), "torvalds");
    }
}
