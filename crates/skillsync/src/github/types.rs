//! Hosting API data types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository metadata used by a resync.
#[derive(Debug, Clone)]
pub struct RepoInfo {
    pub default_branch: String,
    pub stars: i64,
    pub owner_login: String,
    pub owner_avatar_url: String,
}

/// Owner display info; the display name is frequently unset.
#[derive(Debug, Clone)]
pub struct OwnerInfo {
    pub display_name: Option<String>,
}

/// Most recent commit touching a path; both fields absent when the branch
/// has no matching history.
#[derive(Debug, Clone, Default)]
pub struct CommitInfo {
    pub sha: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

// ---------- Wire payloads ----------

#[derive(Debug, Deserialize)]
pub(crate) struct RepoPayload {
    pub default_branch: String,
    #[serde(default)]
    pub stargazers_count: i64,
    pub owner: RepoOwnerPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepoOwnerPayload {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl From<RepoPayload> for RepoInfo {
    fn from(payload: RepoPayload) -> Self {
        RepoInfo {
            default_branch: payload.default_branch,
            stars: payload.stargazers_count,
            owner_login: payload.owner.login,
            owner_avatar_url: payload.owner.avatar_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitPayload {
    pub sha: String,
    pub commit: CommitDetailPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetailPayload {
    #[serde(default)]
    pub committer: Option<CommitSignaturePayload>,
    #[serde(default)]
    pub author: Option<CommitSignaturePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitSignaturePayload {
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl CommitPayload {
    /// Commit timestamp, preferring the committer date over the author date.
    pub(crate) fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.commit
            .committer
            .as_ref()
            .and_then(|sig| sig.date)
            .or_else(|| self.commit.author.as_ref().and_then(|sig| sig.date))
    }
}
