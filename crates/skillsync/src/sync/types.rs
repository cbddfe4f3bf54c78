//! Sync outcome types.

use serde::Serialize;
use thiserror::Error;

use crate::github::GitHubError;
use crate::record::SkillRecord;
use crate::reference::ReferenceError;

/// Where a returned record's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Fresh data from a live fetch against the source repository.
    Source,
    /// The existing cached snapshot, possibly stale.
    Cache,
}

/// A record together with the provenance of its data.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub record: SkillRecord,
    pub provenance: Provenance,
}

/// Errors from a resync attempt.
///
/// Reference failures are data problems (the record's `source_url` is
/// malformed) and have no meaningful cache fallback; everything else is
/// transient and degrades to the cached snapshot at the service layer.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("resync timed out after {budget_ms} ms")]
    Timeout { budget_ms: u64 },

    #[error(transparent)]
    Api(#[from] GitHubError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_serializes_to_lowercase_wire_form() {
        assert_eq!(
            serde_json::to_string(&Provenance::Source).expect("serialize"),
            "\"source\""
        );
        assert_eq!(
            serde_json::to_string(&Provenance::Cache).expect("serialize"),
            "\"cache\""
        );
    }

    #[test]
    fn sync_error_messages_name_the_failure() {
        let timeout = SyncError::Timeout { budget_ms: 5000 };
        assert!(timeout.to_string().contains("5000"));

        let reference: SyncError = ReferenceError::InvalidHost {
            host: "gitlab.com".to_string(),
        }
        .into();
        assert!(reference.to_string().contains("gitlab.com"));
    }
}
