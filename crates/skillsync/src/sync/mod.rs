//! Stale-tolerant record synchronization.
//!
//! The engine composes the reference parser, the hosting client, the
//! render classifier and the rank calculator into one "resync a record"
//! operation bounded by a timeout budget. Fallback to the cached record is
//! owned by the caller (see [`crate::service`]): the engine reports what
//! happened, it never fabricates stale data itself.

pub mod engine;
mod types;

pub use engine::SyncEngine;
pub use types::{Provenance, SyncError, SyncOutcome};
