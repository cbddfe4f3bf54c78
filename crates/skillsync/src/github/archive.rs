//! Whole-repository archive download.

use std::sync::Arc;

use super::{ACCEPT_JSON, request_headers};
use crate::archive::ArchiveError;
use crate::config::SourceConfig;
use crate::http::{HttpRequest, HttpTransport};

/// Downloads a repository zipball for a given branch.
///
/// Single-shot and fully buffered: repository archives here are source
/// trees, small enough to hold in memory, and the repackager needs random
/// access to the bytes anyway.
#[derive(Clone)]
pub struct ArchiveFetcher {
    config: SourceConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ArchiveFetcher {
    pub fn new(config: SourceConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Fetch the zipball of `owner/repo` at `branch`.
    pub async fn fetch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<u8>, ArchiveError> {
        let url = format!(
            "{}/repos/{}/{}/zipball/{}",
            self.config.api_base, owner, repo, branch
        );
        let request = HttpRequest {
            url,
            headers: request_headers(&self.config, ACCEPT_JSON),
        };

        let resp = self
            .transport
            .get(request)
            .await
            .map_err(|e| ArchiveError::Transport(e.to_string()))?;

        if !resp.is_success() {
            return Err(ArchiveError::DownloadFailed {
                status: resp.status,
                body: resp.body_text(),
            });
        }

        tracing::debug!(
            "fetched archive for {}/{}@{} ({} bytes)",
            owner,
            repo,
            branch,
            resp.body.len()
        );
        Ok(resp.body)
    }
}
