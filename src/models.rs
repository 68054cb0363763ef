use serde::Deserialize;

/// A repository entry from the `/users/{username}/repos` listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
}

/// A single item from `/repos/{owner}/{repo}/commits`.
///
/// Only the author date is read; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitAuthor {
    pub date: String,
}

impl CommitRecord {
    pub fn authored_at(date: impl Into<String>) -> Self {
        Self {
            commit: CommitDetail {
                author: CommitAuthor { date: date.into() },
            },
        }
    }

    pub fn author_date(&self) -> &str {
        &self.commit.author.date
    }
}

/// Number of commits authored on one calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDayCount {
    pub date: String,
    pub count: u32,
}

impl CommitDayCount {
    pub fn new(date: impl Into<String>, count: u32) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}
