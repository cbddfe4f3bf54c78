//! Bounded-latency resync of a skill record against its source repository.

use std::time::Duration;

use tokio::time::timeout;

use super::types::{Provenance, SyncError, SyncOutcome};
use crate::github::GitHubClient;
use crate::rank::heat_score;
use crate::record::{SkillPatch, SkillRecord};
use crate::reference::SourceReference;
use crate::render::RenderMode;

/// Orchestrates a live refresh of one record.
#[derive(Clone)]
pub struct SyncEngine {
    client: GitHubClient,
    budget: Duration,
}

impl SyncEngine {
    pub fn new(client: GitHubClient, budget: Duration) -> Self {
        Self { client, budget }
    }

    /// Fast path: serve the cached record without touching the network.
    #[must_use]
    pub fn read_cached(record: SkillRecord) -> SyncOutcome {
        SyncOutcome {
            record,
            provenance: Provenance::Cache,
        }
    }

    /// Attempt a live refresh, racing the whole fetch sequence against the
    /// configured budget.
    ///
    /// On expiry the in-flight future is dropped, cancelling the underlying
    /// calls, and [`SyncError::Timeout`] is returned. No partial patch is
    /// ever produced: either every step succeeded or the caller keeps its
    /// cached record.
    pub async fn resync(
        &self,
        record: &SkillRecord,
        practice_count: i64,
    ) -> Result<SkillPatch, SyncError> {
        let reference = SourceReference::parse(&record.source_url)?;

        match timeout(self.budget, self.refresh(&reference, practice_count)).await {
            Ok(result) => result,
            Err(_) => Err(SyncError::Timeout {
                budget_ms: self.budget.as_millis() as u64,
            }),
        }
    }

    async fn refresh(
        &self,
        reference: &SourceReference,
        practice_count: i64,
    ) -> Result<SkillPatch, SyncError> {
        let repo = self
            .client
            .get_repo_info(&reference.owner, &reference.repo)
            .await?;

        // A reference without a pinned ref tracks the default branch.
        let branch = reference
            .ref_name
            .as_deref()
            .unwrap_or(&repo.default_branch);
        let path = reference.path.as_deref();

        // The remaining reads only depend on the repo info, not each other.
        let (owner, commit, document) = tokio::join!(
            self.client.get_owner_info(&repo.owner_login),
            self.client
                .get_latest_commit(&reference.owner, &reference.repo, branch, path),
            self.client
                .get_skill_document(&reference.owner, &reference.repo, branch, path),
        );
        let owner = owner?;
        let commit = commit?;

        let markdown_render_mode = document
            .as_deref()
            .map(RenderMode::classify)
            .unwrap_or(RenderMode::Plain);

        Ok(SkillPatch {
            repo_stars: repo.stars,
            repo_owner_name: owner.display_name.unwrap_or_else(|| repo.owner_login.clone()),
            repo_owner_avatar_url: repo.owner_avatar_url,
            updated_at: commit.date,
            markdown: document,
            markdown_render_mode,
            heat_score: heat_score(practice_count, repo.stars),
        })
    }
}
