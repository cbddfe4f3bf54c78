//! Collaborator-facing operations: resync and download.
//!
//! This is the surface the route layer calls. It owns the fallback
//! policy: a resync that fails for any transient reason serves the cached
//! record with provenance `cache` instead of surfacing an error, because
//! stale data beats a visible failure on this read path. Downloads have
//! nothing cached to fall back to, so their failures surface directly.

use std::sync::Arc;

use thiserror::Error;

use crate::archive::{ArchiveError, RepackagedArchive, repackage};
use crate::config::SourceConfig;
use crate::github::{ArchiveFetcher, GitHubClient, GitHubError};
use crate::http::HttpTransport;
use crate::reference::{ReferenceError, SourceReference};
use crate::store::{PracticeCounter, RecordStore, StoreError};
use crate::sync::{Provenance, SyncEngine, SyncError, SyncOutcome};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The record's `source_url` is malformed. A data problem, not a
    /// transient one; there is no point serving the cache for it.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The record does not allow archive downloads.
    #[error("download is not enabled for skill {id}")]
    DownloadUnsupported { id: i64 },

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Api(#[from] GitHubError),
}

/// Skill-record service composing the store, the hosting client, the sync
/// engine and the archive pipeline.
pub struct SkillService<S, P> {
    store: S,
    practices: P,
    client: GitHubClient,
    fetcher: ArchiveFetcher,
    engine: SyncEngine,
}

impl<S: RecordStore, P: PracticeCounter> SkillService<S, P> {
    pub fn new(
        store: S,
        practices: P,
        config: SourceConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let client = GitHubClient::new(config.clone(), Arc::clone(&transport));
        let fetcher = ArchiveFetcher::new(config.clone(), transport);
        let engine = SyncEngine::new(client.clone(), config.resync_timeout);
        Self {
            store,
            practices,
            client,
            fetcher,
            engine,
        }
    }

    /// Return the record for `id`, live-refreshed when `refresh` is set.
    ///
    /// With `refresh` false this never touches the network. With it set,
    /// a successful fetch is persisted and returned with provenance
    /// `source`; any transient failure (network, API, timeout) returns the
    /// unmodified cached record with provenance `cache`.
    pub async fn resync(&self, id: i64, refresh: bool) -> Result<SyncOutcome, ServiceError> {
        let record = self.store.get(id).await?;
        if !refresh {
            return Ok(SyncEngine::read_cached(record));
        }

        let practice_count = self.practices.count_listed_practices(id).await?.max(0);

        match self.engine.resync(&record, practice_count).await {
            Ok(patch) => {
                let refreshed = record.apply(&patch);
                if let Err(e) = self.store.patch(id, &patch).await {
                    // The fresh data is still the answer for this caller;
                    // the next read simply won't see the update.
                    tracing::warn!("failed to persist resync for skill {}: {}", id, e);
                }
                Ok(SyncOutcome {
                    record: refreshed,
                    provenance: Provenance::Source,
                })
            }
            Err(SyncError::Reference(e)) => Err(ServiceError::Reference(e)),
            Err(e) => {
                tracing::debug!("resync for skill {} fell back to cache: {}", id, e);
                Ok(SyncOutcome {
                    record,
                    provenance: Provenance::Cache,
                })
            }
        }
    }

    /// Download the record's tracked sub-directory as a zip archive.
    ///
    /// Returns the repackaged archive and a suggested filename. Must only
    /// be reached for records with `supports_download_zip`; the flag is
    /// re-checked here as the last line of defense.
    pub async fn download(&self, id: i64) -> Result<(RepackagedArchive, String), ServiceError> {
        let record = self.store.get(id).await?;
        if !record.supports_download_zip {
            return Err(ServiceError::DownloadUnsupported { id });
        }

        let reference = SourceReference::parse(&record.source_url)?;
        let branch = match &reference.ref_name {
            Some(ref_name) => ref_name.clone(),
            None => {
                self.client
                    .get_repo_info(&reference.owner, &reference.repo)
                    .await?
                    .default_branch
            }
        };

        let target = reference.path.as_deref().unwrap_or("");
        let output_name = target
            .trim_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(&reference.repo)
            .to_string();

        let bytes = self
            .fetcher
            .fetch(&reference.owner, &reference.repo, &branch)
            .await?;
        let archive = repackage(&bytes, target, &output_name)?;
        let filename = format!("{output_name}.zip");

        Ok((archive, filename))
    }
}
