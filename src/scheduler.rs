use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulerConfig;
use crate::state::WordMemoryState;

pub const MAX_QUALITY: u8 = 5;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("quality rating {0} outside 0-{MAX_QUALITY}")]
    InvalidQuality(i32),
    #[error("invalid memory state: {0}")]
    InvalidState(String),
}

/// Validated 0-5 recall quality rating.
///
/// Out-of-range values are a caller error and are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i32) -> Result<Self, ScheduleError> {
        if (0..=i32::from(MAX_QUALITY)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ScheduleError::InvalidQuality(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self, config: &SchedulerConfig) -> bool {
        self.0 >= config.passing_quality
    }
}

/// Compute the post-review memory state.
///
/// Pure and deterministic: no clock, no I/O, the input state is untouched.
/// `now` is the instant treated as the time of review.
///
/// The update follows the classical SM-2 scheme:
/// `EF' = max(floor, EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02)))`, a lapse
/// (quality below passing) resets repetitions and drops the interval back to
/// one day, and successful recalls walk the 1-day / 6-day bootstrap before
/// intervals grow by the ease factor.
pub fn compute_next_state(
    state: &WordMemoryState,
    quality: Quality,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<WordMemoryState, ScheduleError> {
    state.validate(config)?;

    let q = f64::from(quality.value());
    let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    let ease_factor = (state.ease_factor + ease_delta).max(config.ease_floor);

    let passing = quality.is_passing(config);
    let (repetitions, interval_days) = if passing {
        let repetitions = state.repetitions + 1;
        let interval_days = match repetitions {
            1 => config.first_interval_days,
            2 => config.second_interval_days,
            _ => {
                let grown = (state.interval_days as f64 * ease_factor).round() as i64;
                grown.max(config.min_interval_days)
            }
        };
        (repetitions, interval_days)
    } else {
        (0, config.min_interval_days)
    };

    Ok(WordMemoryState {
        repetitions,
        interval_days,
        ease_factor,
        last_studied: Some(now),
        next_review: Some(now + Duration::days(interval_days)),
        times_studied: state.times_studied + 1,
        times_correct: state.times_correct + u32::from(passing),
    })
}
