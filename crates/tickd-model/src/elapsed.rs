// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Structured `HH:MM:SS` breakdown of a millisecond duration.
///
/// Hours are unbounded: a 30-hour duration renders as `30:00:00`, never
/// wrapped at 24.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedTime {
    pub formatted: String,
    pub total_seconds: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ElapsedTime {
    #[must_use]
    pub fn from_millis(duration_ms: u64) -> Self {
        let total_seconds = duration_ms / 1000;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        Self {
            formatted: format!("{hours:02}:{minutes:02}:{seconds:02}"),
            total_seconds,
            hours,
            minutes,
            seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hour_one_minute_five_seconds() {
        let elapsed = ElapsedTime::from_millis(3_665_000);
        assert_eq!(elapsed.formatted, "01:01:05");
        assert_eq!(elapsed.total_seconds, 3665);
        assert_eq!(elapsed.hours, 1);
        assert_eq!(elapsed.minutes, 1);
        assert_eq!(elapsed.seconds, 5);
    }

    #[test]
    fn zero_duration() {
        let elapsed = ElapsedTime::from_millis(0);
        assert_eq!(elapsed.formatted, "00:00:00");
        assert_eq!(elapsed.total_seconds, 0);
    }

    #[test]
    fn sub_second_durations_floor_to_zero() {
        assert_eq!(ElapsedTime::from_millis(999).total_seconds, 0);
        assert_eq!(ElapsedTime::from_millis(1_000).total_seconds, 1);
    }

    #[test]
    fn hours_do_not_wrap_at_twenty_four() {
        let elapsed = ElapsedTime::from_millis(30 * 3600 * 1000);
        assert_eq!(elapsed.formatted, "30:00:00");
        assert_eq!(elapsed.hours, 30);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let value = serde_json::to_value(ElapsedTime::from_millis(61_000)).expect("serialize");
        assert_eq!(value["formatted"], "00:01:01");
        assert_eq!(value["totalSeconds"], 61);
        assert_eq!(value["minutes"], 1);
    }
}
