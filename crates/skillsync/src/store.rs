//! External persistence collaborators.
//!
//! The relational store that owns skill rows and the practice-count query
//! live outside this crate; these traits are the seam the route layer's
//! adapters implement. In-memory implementations are provided for tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::{SkillPatch, SkillRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("skill record not found: {id}")]
    NotFound { id: i64 },

    #[error("store error: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// Create a backend error.
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Read/patch access to persisted skill records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, id: i64) -> Result<SkillRecord, StoreError>;

    /// Persist the fields of a successful resync. Last-write-wins; the
    /// store adds no locking across concurrent resyncs of the same record.
    async fn patch(&self, id: i64, patch: &SkillPatch) -> Result<(), StoreError>;
}

/// Count of practices listed against a skill, used for ranking.
#[async_trait]
pub trait PracticeCounter: Send + Sync {
    async fn count_listed_practices(&self, skill_id: i64) -> Result<i64, StoreError>;
}

// ---------- Test-only in-memory implementations ----------

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory record store for tests. Records patches applied to it and
    /// can be told to fail all patch calls.
    #[derive(Default)]
    pub struct MemoryStore {
        records: Mutex<HashMap<i64, SkillRecord>>,
        patches: Mutex<Vec<(i64, SkillPatch)>>,
        pub fail_patches: bool,
    }

    impl MemoryStore {
        pub fn with_record(record: SkillRecord) -> Self {
            let store = Self::default();
            store
                .records
                .lock()
                .expect("memory store lock should not be poisoned")
                .insert(record.id, record);
            store
        }

        pub fn patches(&self) -> Vec<(i64, SkillPatch)> {
            self.patches
                .lock()
                .expect("memory store lock should not be poisoned")
                .clone()
        }

        pub fn record(&self, id: i64) -> Option<SkillRecord> {
            self.records
                .lock()
                .expect("memory store lock should not be poisoned")
                .get(&id)
                .cloned()
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn get(&self, id: i64) -> Result<SkillRecord, StoreError> {
            self.record(id).ok_or(StoreError::NotFound { id })
        }

        async fn patch(&self, id: i64, patch: &SkillPatch) -> Result<(), StoreError> {
            if self.fail_patches {
                return Err(StoreError::backend("patch rejected"));
            }
            let mut records = self
                .records
                .lock()
                .expect("memory store lock should not be poisoned");
            let record = records.get_mut(&id).ok_or(StoreError::NotFound { id })?;
            *record = record.apply(patch);
            self.patches
                .lock()
                .expect("memory store lock should not be poisoned")
                .push((id, patch.clone()));
            Ok(())
        }
    }

    /// Fixed practice counts per skill id; missing ids count zero.
    #[derive(Default)]
    pub struct FixedPractices {
        counts: HashMap<i64, i64>,
    }

    impl FixedPractices {
        pub fn with_count(skill_id: i64, count: i64) -> Self {
            let mut counts = HashMap::new();
            counts.insert(skill_id, count);
            Self { counts }
        }
    }

    #[async_trait]
    impl PracticeCounter for FixedPractices {
        async fn count_listed_practices(&self, skill_id: i64) -> Result<i64, StoreError> {
            Ok(self.counts.get(&skill_id).copied().unwrap_or(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{FixedPractices, MemoryStore};
    use super::*;
    use crate::render::RenderMode;

    fn record(id: i64) -> SkillRecord {
        SkillRecord {
            id,
            source_url: "https://github.com/o/r".to_string(),
            repo_stars: 1,
            repo_owner_name: None,
            repo_owner_avatar_url: None,
            updated_at: None,
            markdown: None,
            markdown_render_mode: RenderMode::Plain,
            heat_score: 0.0,
            supports_download_zip: false,
        }
    }

    #[tokio::test]
    async fn memory_store_gets_and_patches() {
        let store = MemoryStore::with_record(record(1));

        let fetched = store.get(1).await.expect("record exists");
        assert_eq!(fetched.id, 1);

        let patch = SkillPatch {
            repo_stars: 9,
            repo_owner_name: "o".to_string(),
            repo_owner_avatar_url: "https://a".to_string(),
            updated_at: None,
            markdown: None,
            markdown_render_mode: RenderMode::Plain,
            heat_score: 1.35,
        };
        store.patch(1, &patch).await.expect("patch applies");

        assert_eq!(store.record(1).expect("still present").repo_stars, 9);
        assert_eq!(store.patches().len(), 1);
    }

    #[tokio::test]
    async fn memory_store_reports_missing_records() {
        let store = MemoryStore::default();
        let err = store.get(99).await.expect_err("missing record");
        assert!(matches!(err, StoreError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn fixed_practices_defaults_to_zero() {
        let practices = FixedPractices::with_count(1, 3);
        assert_eq!(
            practices.count_listed_practices(1).await.expect("count"),
            3
        );
        assert_eq!(
            practices.count_listed_practices(2).await.expect("count"),
            0
        );
    }
}
