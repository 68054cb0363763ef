use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::aggregate::commits_per_day;
use crate::github::GithubApi;
use crate::state::{LookupState, Ticket};
use crate::window;

/// Drives the repository and commit lookups against a [`GithubApi`] and owns
/// the resulting [`LookupState`].
///
/// The state lock is only ever taken between awaits, so overlapping calls on
/// a shared controller interleave at the two fetches and nowhere else.
pub struct LookupController<A> {
    api: A,
    window_days: u32,
    state: Mutex<LookupState>,
}

impl<A: GithubApi> LookupController<A> {
    pub fn new(api: A, window_days: u32) -> Self {
        Self {
            api,
            window_days,
            state: Mutex::new(LookupState::new()),
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Copy of the current state for rendering.
    pub fn snapshot(&self) -> LookupState {
        self.state().clone()
    }

    pub fn set_username(&self, text: impl Into<String>) {
        self.state().set_username(text);
    }

    /// Search for whatever username text is currently entered.
    pub async fn search(&self) {
        let username = self.state().username().to_string();
        self.lookup_repos(username).await;
    }

    /// Enter `username` and search for it.
    pub async fn search_user(&self, username: &str) {
        self.set_username(username);
        self.lookup_repos(username.to_string()).await;
    }

    async fn lookup_repos(&self, username: String) {
        let ticket = self.state().search_started(&username);
        info!(%username, "listing repositories");

        let result = self.api.list_repos(&username).await;

        let applied = match result {
            Ok(repos) => {
                info!(%username, count = repos.len(), "repositories listed");
                self.state().search_succeeded(&ticket, repos)
            }
            Err(e) => {
                warn!(%username, error = %e, "repository lookup failed");
                self.state().search_failed(&ticket, &e)
            }
        };
        log_discarded(&ticket, applied);
    }

    /// Select `repo` and chart its commits over the trailing window.
    pub async fn view_commits(&self, repo: &str) {
        self.view_commits_at(repo, Utc::now()).await;
    }

    /// [`view_commits`](Self::view_commits) with an explicit clock.
    pub async fn view_commits_at(&self, repo: &str, now: DateTime<Utc>) {
        let (ticket, owner) = {
            let mut state = self.state();
            let ticket = state.commits_started(repo);
            (ticket, state.commits_owner().to_string())
        };
        let since = window::since_param(now, self.window_days);
        info!(%owner, %repo, %since, "listing commits");

        let result = self.api.list_commits(&owner, repo, &since).await;

        let applied = match result {
            Ok(commits) => {
                let per_day = commits_per_day(&commits);
                info!(%repo, commits = commits.len(), days = per_day.len(), "commits aggregated");
                self.state().commits_succeeded(&ticket, per_day)
            }
            Err(e) => {
                warn!(%owner, %repo, error = %e, "commit lookup failed");
                self.state().commits_failed(&ticket, &e)
            }
        };
        log_discarded(&ticket, applied);
    }

    fn state(&self) -> MutexGuard<'_, LookupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn log_discarded(ticket: &Ticket, applied: bool) {
    if !applied {
        debug!(
            flow = ?ticket.flow(),
            input = ticket.input(),
            "discarding superseded response"
        );
    }
}
