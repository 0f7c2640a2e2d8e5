// SPDX-License-Identifier: Apache-2.0

use crate::clock::Clock;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tickd_model::{ElapsedTime, Timer, TimerId, TimerStatus};
use tickd_store::{find_by_id, find_by_id_mut, insert, remove_by_id, StoreError, TimerStore};

/// Expected, reportable lifecycle outcomes plus the one fatal case.
#[derive(Debug)]
pub enum EngineError {
    NotFound {
        id: TimerId,
    },
    /// Stop on a stopped timer. Carries the previously computed elapsed time
    /// so callers can read the result without retrying.
    AlreadyStopped {
        id: TimerId,
        elapsed: Option<ElapsedTime>,
    },
    Persistence(StoreError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "no timer found with id {id}"),
            Self::AlreadyStopped { id, .. } => write!(f, "timer {id} was already stopped"),
            Self::Persistence(err) => write!(f, "persistence failure: {err}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err)
    }
}

/// Applies start/stop/reset transitions and computes elapsed views.
///
/// Every mutating operation is a full load-mutate-save cycle against the
/// store. There is no locking; concurrent callers race last-writer-wins,
/// which is acceptable for the single-process deployments this serves.
pub struct LifecycleEngine {
    store: TimerStore,
    clock: Arc<dyn Clock>,
}

impl LifecycleEngine {
    #[must_use]
    pub fn new(store: TimerStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Creates and persists a new running timer.
    ///
    /// The id is the creation instant in epoch milliseconds; two starts in
    /// the same millisecond collide. Known weakness, kept for compatibility
    /// with existing data files.
    pub fn start(&self, label: Option<String>) -> Result<Timer, EngineError> {
        let mut timers = self.store.load_all();
        let now = self.clock.now_millis();
        let timer = Timer::started(TimerId(now), label, now, self.clock.now_rfc3339());
        insert(&mut timers, timer.clone());
        self.store.save_all(&timers)?;
        Ok(timer)
    }

    pub fn stop(&self, id: TimerId) -> Result<Timer, EngineError> {
        let mut timers = self.store.load_all();
        let timer = find_by_id_mut(&mut timers, id).ok_or(EngineError::NotFound { id })?;
        if timer.status == TimerStatus::Stopped {
            return Err(EngineError::AlreadyStopped {
                id,
                elapsed: timer.elapsed_time.clone(),
            });
        }
        let now = self.clock.now_millis();
        timer.end_time = Some(now);
        timer.status = TimerStatus::Stopped;
        timer.elapsed_time = Some(elapsed_between(timer.start_time, now));
        let stopped = timer.clone();
        self.store.save_all(&timers)?;
        Ok(stopped)
    }

    /// Restarts the clock unconditionally: a running timer loses its progress,
    /// a stopped timer starts a fresh run.
    pub fn reset(&self, id: TimerId) -> Result<Timer, EngineError> {
        let mut timers = self.store.load_all();
        let timer = find_by_id_mut(&mut timers, id).ok_or(EngineError::NotFound { id })?;
        timer.start_time = self.clock.now_millis();
        timer.end_time = None;
        timer.elapsed_time = None;
        timer.status = TimerStatus::Running;
        let reset = timer.clone();
        self.store.save_all(&timers)?;
        Ok(reset)
    }

    pub fn remove(&self, id: TimerId) -> Result<Timer, EngineError> {
        let mut timers = self.store.load_all();
        let removed = remove_by_id(&mut timers, id).ok_or(EngineError::NotFound { id })?;
        self.store.save_all(&timers)?;
        Ok(removed)
    }

    pub fn get(&self, id: TimerId) -> Result<(Timer, Option<ElapsedTime>), EngineError> {
        let timers = self.store.load_all();
        let timer = find_by_id(&timers, id)
            .cloned()
            .ok_or(EngineError::NotFound { id })?;
        let elapsed = self.display_elapsed(&timer);
        Ok((timer, elapsed))
    }

    /// Every timer with its display elapsed, in creation order.
    #[must_use]
    pub fn list(&self) -> Vec<(Timer, Option<ElapsedTime>)> {
        self.store
            .load_all()
            .into_iter()
            .map(|timer| {
                let elapsed = self.display_elapsed(&timer);
                (timer, elapsed)
            })
            .collect()
    }

    /// Live elapsed for running timers, the persisted value for stopped ones.
    ///
    /// Recomputed on every call; never written back.
    #[must_use]
    pub fn display_elapsed(&self, timer: &Timer) -> Option<ElapsedTime> {
        match timer.status {
            TimerStatus::Running => Some(elapsed_between(
                timer.start_time,
                self.clock.now_millis(),
            )),
            TimerStatus::Stopped => timer.elapsed_time.clone(),
        }
    }
}

fn elapsed_between(start_ms: i64, end_ms: i64) -> ElapsedTime {
    let delta = end_ms.saturating_sub(start_ms).max(0);
    ElapsedTime::from_millis(delta.unsigned_abs())
}
