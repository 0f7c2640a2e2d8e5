// SPDX-License-Identifier: Apache-2.0

use crate::{PersistenceBackend, StoreError, StoreErrorCode};
use std::sync::Arc;
use tickd_model::{Timer, TimerId};
use tracing::warn;

/// Whole-collection load/save over a [`PersistenceBackend`].
///
/// Record order in the blob is creation order and is preserved verbatim.
pub struct TimerStore {
    backend: Arc<dyn PersistenceBackend>,
}

impl TimerStore {
    #[must_use]
    pub fn new(backend: Arc<dyn PersistenceBackend>) -> Self {
        Self { backend }
    }

    /// Reads every persisted timer.
    ///
    /// A missing, unreadable, or malformed blob yields an empty collection:
    /// the service degrades to "no timers" rather than refusing to serve.
    #[must_use]
    pub fn load_all(&self) -> Vec<Timer> {
        let blob = match self.backend.read_blob() {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "timer blob unreadable; treating store as empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(timers) => timers,
            Err(err) => {
                warn!(error = %err, "timer blob malformed; treating store as empty");
                Vec::new()
            }
        }
    }

    /// Replaces the persisted collection with `timers`, pretty-printed.
    ///
    /// Write-side failures propagate; they mean the environment is broken.
    pub fn save_all(&self, timers: &[Timer]) -> Result<(), StoreError> {
        let blob = serde_json::to_string_pretty(timers)
            .map_err(|err| StoreError::new(StoreErrorCode::Serialization, err.to_string()))?;
        self.backend.write_blob(&blob)
    }
}

#[must_use]
pub fn find_by_id(timers: &[Timer], id: TimerId) -> Option<&Timer> {
    timers.iter().find(|timer| timer.id == id)
}

pub fn find_by_id_mut(timers: &mut [Timer], id: TimerId) -> Option<&mut Timer> {
    timers.iter_mut().find(|timer| timer.id == id)
}

/// Appends; insertion order acts as creation order.
pub fn insert(timers: &mut Vec<Timer>, timer: Timer) {
    timers.push(timer);
}

/// Removes and returns the first record matching `id`.
pub fn remove_by_id(timers: &mut Vec<Timer>, id: TimerId) -> Option<Timer> {
    let index = timers.iter().position(|timer| timer.id == id)?;
    Some(timers.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryBackend;
    use std::sync::atomic::Ordering;
    use tempfile::tempdir;
    use tickd_model::TimerStatus;

    fn timer(id: i64, label: &str) -> Timer {
        Timer::started(
            TimerId(id),
            Some(label.to_string()),
            id,
            "2026-01-01T00:00:00Z".to_string(),
        )
    }

    #[test]
    fn missing_blob_loads_empty() {
        let store = TimerStore::new(Arc::new(InMemoryBackend::default()));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn malformed_blob_loads_empty() {
        let backend = Arc::new(InMemoryBackend::default());
        *backend.blob.lock().expect("lock") = Some("not json {{{".to_string());
        let store = TimerStore::new(backend);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let store = TimerStore::new(Arc::new(InMemoryBackend::default()));
        let timers = vec![timer(3, "c"), timer(1, "a"), timer(2, "b")];
        store.save_all(&timers).expect("save");
        let loaded = store.load_all();
        assert_eq!(loaded, timers);
    }

    #[test]
    fn saved_blob_is_pretty_printed() {
        let backend = Arc::new(InMemoryBackend::default());
        let store = TimerStore::new(backend.clone());
        store.save_all(&[timer(1, "a")]).expect("save");
        let blob = backend.blob.lock().expect("lock").clone().expect("blob written");
        assert!(blob.contains('\n'), "expected indented output, got {blob}");
    }

    #[test]
    fn write_failure_propagates() {
        let backend = Arc::new(InMemoryBackend::default());
        backend.fail_writes.store(true, Ordering::Relaxed);
        let store = TimerStore::new(backend);
        let err = store.save_all(&[timer(1, "a")]).expect_err("write should fail");
        assert_eq!(err.code, StoreErrorCode::Io);
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("data").join("timers.json");
        let store = TimerStore::new(Arc::new(crate::JsonFileBackend::new(path.clone())));
        assert!(store.load_all().is_empty(), "fresh file reads as empty");
        store.save_all(&[timer(1, "a"), timer(2, "b")]).expect("save");
        let reopened = TimerStore::new(Arc::new(crate::JsonFileBackend::new(path)));
        let loaded = reopened.load_all();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].label, "a");
        assert_eq!(loaded[0].status, TimerStatus::Running);
    }

    #[test]
    fn remove_by_id_returns_removed_record() {
        let mut timers = vec![timer(1, "a"), timer(2, "b")];
        let removed = remove_by_id(&mut timers, TimerId(1)).expect("present");
        assert_eq!(removed.label, "a");
        assert_eq!(timers.len(), 1);
        assert!(remove_by_id(&mut timers, TimerId(99)).is_none());
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn find_by_id_misses_unknown_ids() {
        let timers = vec![timer(1, "a")];
        assert!(find_by_id(&timers, TimerId(1)).is_some());
        assert!(find_by_id(&timers, TimerId(2)).is_none());
    }
}
