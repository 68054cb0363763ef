//! # commitpulse
//!
//! Looks up a GitHub user's public repositories and charts the commit
//! activity of a selected repository over the trailing week.
//!
//! The [`LookupController`] runs the two lookups against any [`GithubApi`]
//! and keeps the [`LookupState`] a front end renders from. Commit lists are
//! grouped per day by [`commits_per_day`] and drawn with
//! [`chart::generate_svg`].

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod controller;
pub mod export;
pub mod github;
pub mod models;
pub mod state;
pub mod view;
pub mod window;

pub use aggregate::commits_per_day;
pub use config::Config;
pub use controller::LookupController;
pub use github::{FetchError, GithubApi, GithubClient};
pub use models::{CommitDayCount, CommitRecord, Repository};
pub use state::LookupState;
