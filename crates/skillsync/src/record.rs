//! The persisted skill record and its resync patch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::render::RenderMode;

/// The subset of the persisted skill row this core reads and patches.
///
/// Owned by the external persistence collaborator; snapshot fields are
/// only ever overwritten by a successful resync, never by the cache fast
/// path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: i64,
    /// URL of the source repository (and optional sub-path) this record
    /// tracks. Must parse as a source reference or every sync operation
    /// for this record fails.
    pub source_url: String,
    /// Last-known star count of the source repository.
    pub repo_stars: i64,
    /// Last-known owner display name (falls back to the login on fetch).
    pub repo_owner_name: Option<String>,
    /// Last-known owner avatar URL.
    pub repo_owner_avatar_url: Option<String>,
    /// Timestamp of the latest commit touching the tracked path.
    pub updated_at: Option<DateTime<Utc>>,
    /// Last-fetched skill document body.
    pub markdown: Option<String>,
    /// Classifier hint cached at fetch time, not recomputed on read.
    pub markdown_render_mode: RenderMode,
    /// Derived ranking value; recomputed on every resync.
    pub heat_score: f64,
    /// When false, the archive download path must not run for this record.
    pub supports_download_zip: bool,
}

/// The field set a successful resync persists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillPatch {
    pub repo_stars: i64,
    pub repo_owner_name: String,
    pub repo_owner_avatar_url: String,
    /// Latest commit date; `None` when the branch has no commit history,
    /// in which case the record keeps its previous timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    pub markdown: Option<String>,
    pub markdown_render_mode: RenderMode,
    pub heat_score: f64,
}

impl SkillRecord {
    /// Fold a resync patch into this record, producing the refreshed copy
    /// the caller hands back to the requester.
    #[must_use]
    pub fn apply(&self, patch: &SkillPatch) -> SkillRecord {
        SkillRecord {
            id: self.id,
            source_url: self.source_url.clone(),
            repo_stars: patch.repo_stars,
            repo_owner_name: Some(patch.repo_owner_name.clone()),
            repo_owner_avatar_url: Some(patch.repo_owner_avatar_url.clone()),
            updated_at: patch.updated_at.or(self.updated_at),
            markdown: patch.markdown.clone(),
            markdown_render_mode: patch.markdown_render_mode,
            heat_score: patch.heat_score,
            supports_download_zip: self.supports_download_zip,
        }
    }
}
