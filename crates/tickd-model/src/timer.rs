// SPDX-License-Identifier: Apache-2.0

use crate::ElapsedTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Label applied when a start request carries none.
pub const DEFAULT_LABEL: &str = "Unnamed Timer";

/// Timer identifier, derived from the creation instant in epoch milliseconds.
///
/// Two timers created within the same millisecond collide; the persisted
/// format has always worked this way and callers treat ids as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub i64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Stopped,
}

/// One persisted timer record.
///
/// Field names and value shapes match the flat-file format: epoch-millisecond
/// instants for `startTime`/`endTime`, an RFC 3339 string for `createdAt`,
/// explicit `null` for the absent stop-side fields of a running timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: TimerId,
    pub label: String,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub elapsed_time: Option<ElapsedTime>,
    pub status: TimerStatus,
    pub created_at: String,
}

impl Timer {
    /// A freshly started timer: running, no end or elapsed yet.
    #[must_use]
    pub fn started(id: TimerId, label: Option<String>, start_ms: i64, created_at: String) -> Self {
        Self {
            id,
            label: label.unwrap_or_else(|| DEFAULT_LABEL.to_string()),
            start_time: start_ms,
            end_time: None,
            elapsed_time: None,
            status: TimerStatus::Running,
            created_at,
        }
    }
}

/// Renders an epoch-millisecond instant as an RFC 3339 string.
#[must_use]
pub fn epoch_ms_to_rfc3339(ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|instant| instant.format(&Rfc3339).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn started_timer_defaults() {
        let timer = Timer::started(TimerId(1), None, 1_000, "2026-01-01T00:00:00Z".to_string());
        assert_eq!(timer.label, DEFAULT_LABEL);
        assert_eq!(timer.status, TimerStatus::Running);
        assert!(timer.end_time.is_none());
        assert!(timer.elapsed_time.is_none());
    }

    #[test]
    fn wire_shape_matches_persisted_format() {
        let timer = Timer::started(
            TimerId(1_700_000_000_000),
            Some("Work".to_string()),
            1_700_000_000_000,
            "2023-11-14T22:13:20Z".to_string(),
        );
        let value = serde_json::to_value(&timer).expect("serialize");
        assert_eq!(value["id"], 1_700_000_000_000_i64);
        assert_eq!(value["label"], "Work");
        assert_eq!(value["startTime"], 1_700_000_000_000_i64);
        assert_eq!(value["endTime"], serde_json::Value::Null);
        assert_eq!(value["elapsedTime"], serde_json::Value::Null);
        assert_eq!(value["status"], "running");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn round_trips_a_stopped_record() {
        let raw = r#"{
            "id": 42,
            "label": "Build",
            "startTime": 1000,
            "endTime": 4000,
            "elapsedTime": {
                "formatted": "00:00:03",
                "totalSeconds": 3,
                "hours": 0,
                "minutes": 0,
                "seconds": 3
            },
            "status": "stopped",
            "createdAt": "2026-01-01T00:00:01Z"
        }"#;
        let timer: Timer = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(timer.id, TimerId(42));
        assert_eq!(timer.status, TimerStatus::Stopped);
        assert_eq!(timer.end_time, Some(4000));
        let elapsed = timer.elapsed_time.as_ref().expect("elapsed present");
        assert_eq!(elapsed.total_seconds, 3);
    }

    #[test]
    fn epoch_ms_renders_rfc3339() {
        assert_eq!(epoch_ms_to_rfc3339(0), "1970-01-01T00:00:00Z");
        let with_fraction = epoch_ms_to_rfc3339(1_500);
        assert!(with_fraction.starts_with("1970-01-01T00:00:01"));
        assert!(with_fraction.ends_with('Z'));
    }
}
