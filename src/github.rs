use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::{CommitRecord, Repository};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("not found")]
    NotFound,

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type FetchResult<T> = Result<T, FetchError>;

/// The two read-only GitHub REST calls the lookup flows depend on.
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// `GET /users/{username}/repos`
    async fn list_repos(&self, username: &str) -> FetchResult<Vec<Repository>>;

    /// `GET /repos/{owner}/{repo}/commits?since={since}`
    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: &str,
    ) -> FetchResult<Vec<CommitRecord>>;
}

#[async_trait]
impl<T: GithubApi + ?Sized> GithubApi for Arc<T> {
    async fn list_repos(&self, username: &str) -> FetchResult<Vec<Repository>> {
        (**self).list_repos(username).await
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: &str,
    ) -> FetchResult<Vec<CommitRecord>> {
        (**self).list_commits(owner, repo, since).await
    }
}

#[derive(Clone)]
pub struct GithubClient {
    base_url: Arc<String>,
    http: Arc<Client>,
}

impl GithubClient {
    /// Create an unauthenticated REST client for `config.api_url`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: Arc::new(config.api_url.trim_end_matches('/').to_string()),
            http: Arc::new(http),
        })
    }

    /// Low-level GET returning the decoded JSON body, with status mapping.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> FetchResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = resp.status();
        debug!(%url, status = status.as_u16(), "response");
        check_status(status)?;

        resp.json::<T>().await.map_err(FetchError::Decode)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn list_repos(&self, username: &str) -> FetchResult<Vec<Repository>> {
        let path = format!("/users/{}/repos", encode_segment(username));
        self.get_json(&path, &[]).await
    }

    async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        since: &str,
    ) -> FetchResult<Vec<CommitRecord>> {
        let path = format!(
            "/repos/{}/{}/commits",
            encode_segment(owner),
            encode_segment(repo)
        );
        self.get_json(&path, &[("since", since)]).await
    }
}

/// Map a response status onto the error taxonomy; 2xx passes through.
pub fn check_status(status: StatusCode) -> FetchResult<()> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound),
        StatusCode::FORBIDDEN => Err(FetchError::RateLimited),
        s => Err(FetchError::Status(s.as_u16())),
    }
}

/// Percent-encode a single URL path segment.
fn encode_segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            b => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
