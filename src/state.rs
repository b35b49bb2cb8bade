use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SchedulerConfig;
use crate::scheduler::{Quality, ScheduleError};

/// Per-word scheduling record.
///
/// Created with [`Default`] (or [`WordMemoryState::fresh`]) when a word is
/// added, mutated exactly once per review by applying the scheduler's output.
/// A fresh state has no `next_review`, which makes the word due immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordMemoryState {
    /// Successful consecutive reviews since the last lapse.
    pub repetitions: u32,
    /// Whole days until the next scheduled review.
    pub interval_days: i64,
    /// Multiplier controlling how fast the interval grows.
    pub ease_factor: f64,
    pub last_studied: Option<DateTime<Utc>>,
    pub next_review: Option<DateTime<Utc>>,
    /// Analytics counters, not consumed by the scheduler.
    pub times_studied: u32,
    pub times_correct: u32,
}

impl Default for WordMemoryState {
    fn default() -> Self {
        Self {
            repetitions: 0,
            interval_days: 0,
            ease_factor: 2.5,
            last_studied: None,
            next_review: None,
            times_studied: 0,
            times_correct: 0,
        }
    }
}

impl WordMemoryState {
    /// Never-studied state seeded with the configured initial ease.
    pub fn fresh(config: &SchedulerConfig) -> Self {
        Self {
            ease_factor: config.initial_ease,
            ..Self::default()
        }
    }

    /// A word is due when it has never been scheduled or its review time
    /// has passed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(true, |at| at <= now)
    }

    /// Lifetime recall accuracy, 0.0 for never-studied words.
    pub fn accuracy(&self) -> f64 {
        if self.times_studied == 0 {
            0.0
        } else {
            f64::from(self.times_correct) / f64::from(self.times_studied)
        }
    }

    /// Reject malformed states instead of repairing them, so storage-layer
    /// bugs surface at the boundary rather than being masked.
    pub fn validate(&self, config: &SchedulerConfig) -> Result<(), ScheduleError> {
        if self.interval_days < 0 {
            return Err(ScheduleError::InvalidState(format!(
                "negative interval {}",
                self.interval_days
            )));
        }
        if !self.ease_factor.is_finite() || self.ease_factor < config.ease_floor {
            return Err(ScheduleError::InvalidState(format!(
                "ease factor {} below floor {}",
                self.ease_factor, config.ease_floor
            )));
        }
        if self.next_review.is_some() && self.last_studied.is_none() {
            return Err(ScheduleError::InvalidState(
                "nextReview set on a never-studied word".to_string(),
            ));
        }
        if self.times_correct > self.times_studied {
            return Err(ScheduleError::InvalidState(format!(
                "timesCorrect {} exceeds timesStudied {}",
                self.times_correct, self.times_studied
            )));
        }
        Ok(())
    }
}

/// Append-only audit record of a single review.
///
/// Written by review intake after each scheduler invocation; never mutated
/// or read back by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEvent {
    pub id: Uuid,
    pub word_id: String,
    pub quality: u8,
    pub reviewed_at: DateTime<Utc>,
    /// Snapshot of the scheduling result at review time.
    pub ease_factor: f64,
    pub interval_days: i64,
    pub next_review: Option<DateTime<Utc>>,
}

impl ReviewEvent {
    pub fn record(
        word_id: &str,
        quality: Quality,
        reviewed_at: DateTime<Utc>,
        result: &WordMemoryState,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            word_id: word_id.to_string(),
            quality: quality.value(),
            reviewed_at,
            ease_factor: result.ease_factor,
            interval_days: result.interval_days,
            next_review: result.next_review,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    #[test]
    fn fresh_state_is_due_immediately() {
        let state = WordMemoryState::default();
        assert!(state.is_due(day(0)));
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.interval_days, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert!(state.next_review.is_none());
    }

    #[test]
    fn due_follows_next_review() {
        let state = WordMemoryState {
            last_studied: Some(day(0)),
            next_review: Some(day(5)),
            ..WordMemoryState::default()
        };
        assert!(!state.is_due(day(4)));
        assert!(state.is_due(day(5)));
        assert!(state.is_due(day(6)));
    }

    #[test]
    fn accuracy_handles_zero_reviews() {
        let mut state = WordMemoryState::default();
        assert_eq!(state.accuracy(), 0.0);
        state.times_studied = 4;
        state.times_correct = 3;
        assert!((state.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_malformed_states() {
        let config = SchedulerConfig::default();

        let state = WordMemoryState {
            interval_days: -1,
            ..WordMemoryState::default()
        };
        assert!(state.validate(&config).is_err());

        let state = WordMemoryState {
            ease_factor: 1.0,
            ..WordMemoryState::default()
        };
        assert!(state.validate(&config).is_err());

        let state = WordMemoryState {
            ease_factor: f64::NAN,
            ..WordMemoryState::default()
        };
        assert!(state.validate(&config).is_err());

        let state = WordMemoryState {
            next_review: Some(day(1)),
            ..WordMemoryState::default()
        };
        assert!(state.validate(&config).is_err());

        let state = WordMemoryState {
            times_studied: 1,
            times_correct: 2,
            ..WordMemoryState::default()
        };
        assert!(state.validate(&config).is_err());
    }

    #[test]
    fn state_serializes_camel_case() {
        let state = WordMemoryState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("easeFactor").is_some());
        assert!(json.get("intervalDays").is_some());
        assert!(json.get("timesStudied").is_some());
        assert!(json.get("nextReview").is_some());
    }

    #[test]
    fn event_snapshots_scheduling_result() {
        let result = WordMemoryState {
            repetitions: 1,
            interval_days: 1,
            ease_factor: 2.5,
            last_studied: Some(day(3)),
            next_review: Some(day(4)),
            times_studied: 1,
            times_correct: 1,
        };
        let quality = Quality::new(4).unwrap();
        let event = ReviewEvent::record("w1", quality, day(3), &result);
        assert_eq!(event.word_id, "w1");
        assert_eq!(event.quality, 4);
        assert_eq!(event.interval_days, 1);
        assert_eq!(event.next_review, Some(day(4)));
    }
}
