//! Skillsync - skill-record synchronization and archive repackaging.
//!
//! This library keeps cached skill records in step with the source
//! repositories they track. A record points at a repository (or a
//! sub-directory of one) on GitHub; resyncing refreshes its star count,
//! owner info, latest-commit timestamp, skill document and derived heat
//! score, falling back to the cached snapshot whenever the source cannot
//! be reached within the configured budget. Records that allow it can
//! also be downloaded as a zip archive scoped to their sub-directory.
//!
//! The persisted record store and the practice counter are external
//! collaborators, reached through the traits in [`store`]. All HTTP I/O
//! goes through the [`http::HttpTransport`] seam, which keeps every
//! client fully testable without a network.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use skillsync::{SkillService, SourceConfig};
//! use skillsync::http::ReqwestTransport;
//!
//! let config = SourceConfig::from_env();
//! let transport = Arc::new(ReqwestTransport::new(reqwest::Client::new()));
//! let service = SkillService::new(store, practices, config, transport);
//!
//! // Fast path serves the cache; refresh races the source against the budget.
//! let outcome = service.resync(skill_id, refresh).await?;
//! let (archive, filename) = service.download(skill_id).await?;
//! ```

pub mod archive;
pub mod config;
pub mod github;
pub mod http;
pub mod rank;
pub mod record;
pub mod reference;
pub mod render;
pub mod service;
pub mod store;
pub mod sync;

pub use archive::{ArchiveError, RepackagedArchive, repackage};
pub use config::SourceConfig;
pub use github::{ArchiveFetcher, GitHubClient, GitHubError};
pub use rank::heat_score;
pub use record::{SkillPatch, SkillRecord};
pub use reference::{ReferenceError, SourceReference};
pub use render::RenderMode;
pub use service::{ServiceError, SkillService};
pub use store::{PracticeCounter, RecordStore, StoreError};
pub use sync::{Provenance, SyncEngine, SyncError, SyncOutcome};
