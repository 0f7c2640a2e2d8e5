#![forbid(unsafe_code)]
//! Flat-file persistence for timer records.
//!
//! The whole collection is one JSON blob behind a [`PersistenceBackend`].
//! Reads that fail for any reason degrade to an empty collection; writes
//! surface their errors.

mod backend;
mod store;

pub use backend::{InMemoryBackend, JsonFileBackend, PersistenceBackend, StoreError, StoreErrorCode};
pub use store::{find_by_id, find_by_id_mut, insert, remove_by_id, TimerStore};

pub const CRATE_NAME: &str = "tickd-store";
