//! Hosting API client for skill source repositories.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::error::GitHubError;
use super::types::{CommitInfo, CommitPayload, OwnerInfo, RepoInfo, RepoPayload, UserPayload};
use super::{ACCEPT_JSON, ACCEPT_RAW, request_headers};
use crate::config::SourceConfig;
use crate::http::{HttpRequest, HttpTransport};

/// Name of the document a skill repository describes itself with.
pub const SKILL_DOCUMENT: &str = "SKILL.md";

/// Read-only client for the hosting API.
///
/// Stateless and cheap to clone; all I/O goes through the injected
/// transport, so tests drive it with an in-memory mock.
#[derive(Clone)]
pub struct GitHubClient {
    config: SourceConfig,
    transport: Arc<dyn HttpTransport>,
}

impl GitHubClient {
    pub fn new(config: SourceConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Repository metadata: default branch, stars, owner login and avatar.
    pub async fn get_repo_info(&self, owner: &str, repo: &str) -> Result<RepoInfo, GitHubError> {
        let url = format!("{}/repos/{}/{}", self.config.api_base, owner, repo);
        let payload: RepoPayload = self.get_json(&url).await?;
        Ok(payload.into())
    }

    /// Owner display info. A missing display name is not an error; callers
    /// fall back to the login.
    pub async fn get_owner_info(&self, login: &str) -> Result<OwnerInfo, GitHubError> {
        let url = format!("{}/users/{}", self.config.api_base, login);
        let payload: UserPayload = self.get_json(&url).await?;
        Ok(OwnerInfo {
            display_name: payload.name.filter(|n| !n.is_empty()),
        })
    }

    /// Most recent commit on `branch`, filtered to `path` when present.
    ///
    /// An empty commit list is not an error; both fields come back absent.
    pub async fn get_latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: Option<&str>,
    ) -> Result<CommitInfo, GitHubError> {
        let mut url = format!(
            "{}/repos/{}/{}/commits?sha={}&per_page=1",
            self.config.api_base, owner, repo, branch
        );
        if let Some(path) = path {
            url.push_str("&path=");
            url.push_str(path);
        }

        let commits: Vec<CommitPayload> = self.get_json(&url).await?;
        Ok(match commits.first() {
            Some(commit) => CommitInfo {
                sha: Some(commit.sha.clone()),
                date: commit.timestamp(),
            },
            None => CommitInfo::default(),
        })
    }

    /// Fetch the skill document at `<path>/SKILL.md`, or `SKILL.md` at the
    /// repository root when no path is tracked.
    ///
    /// Every failure is swallowed to `None`: the source repository may
    /// legitimately lack the file, and its absence must not abort a resync.
    pub async fn get_skill_document(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        path: Option<&str>,
    ) -> Option<String> {
        let document_path = match path {
            Some(dir) => format!("{}/{}", dir.trim_matches('/'), SKILL_DOCUMENT),
            None => SKILL_DOCUMENT.to_string(),
        };
        let url = format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            self.config.api_base, owner, repo, document_path, branch
        );

        let request = HttpRequest {
            url: url.clone(),
            headers: request_headers(&self.config, ACCEPT_RAW),
        };
        match self.transport.get(request).await {
            Ok(resp) if resp.is_success() => Some(resp.body_text()),
            Ok(resp) => {
                tracing::debug!(
                    "skill document fetch for {}/{} returned {}",
                    owner,
                    repo,
                    resp.status
                );
                None
            }
            Err(e) => {
                tracing::debug!("skill document fetch for {}/{} failed: {}", owner, repo, e);
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GitHubError> {
        let request = HttpRequest {
            url: url.to_string(),
            headers: request_headers(&self.config, ACCEPT_JSON),
        };
        let resp = self.transport.get(request).await?;

        if !resp.is_success() {
            return Err(GitHubError::from_status(resp.status, url, resp.body_text()));
        }

        serde_json::from_slice(&resp.body).map_err(|e| GitHubError::Api {
            status: resp.status,
            message: format!("JSON parse error: {e}"),
        })
    }
}
