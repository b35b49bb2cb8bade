use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid scheduler tuning: {0}")]
    Invalid(String),
}

/// Tuning constants for the scheduler.
///
/// Passed explicitly into [`crate::scheduler::compute_next_state`] so tests
/// can run alternate tunings without touching process-wide state. The SM-2
/// ease-update polynomial itself is not configurable; swapping it out is a
/// versioned algorithm change, not a tuning knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// Lower bound for the ease factor.
    pub ease_floor: f64,
    /// Ease factor assigned to freshly created words.
    pub initial_ease: f64,
    /// Lowest quality rating that counts as a successful recall.
    pub passing_quality: u8,
    /// Interval after the first successful repetition.
    pub first_interval_days: i64,
    /// Interval after the second successful repetition.
    pub second_interval_days: i64,
    /// Floor for every computed interval, also the lapse interval.
    pub min_interval_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ease_floor: 1.3,
            initial_ease: 2.5,
            passing_quality: 3,
            first_interval_days: 1,
            second_interval_days: 6,
            min_interval_days: 1,
        }
    }
}

impl SchedulerConfig {
    /// Build a config from environment overrides, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ease_floor: env_parse("EASE_FLOOR", defaults.ease_floor),
            initial_ease: env_parse("INITIAL_EASE", defaults.initial_ease),
            passing_quality: env_parse("PASSING_QUALITY", defaults.passing_quality),
            first_interval_days: env_parse("FIRST_INTERVAL_DAYS", defaults.first_interval_days),
            second_interval_days: env_parse("SECOND_INTERVAL_DAYS", defaults.second_interval_days),
            min_interval_days: env_parse("MIN_INTERVAL_DAYS", defaults.min_interval_days),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ease_floor.is_finite() || self.ease_floor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "easeFloor must be positive, got {}",
                self.ease_floor
            )));
        }
        if !self.initial_ease.is_finite() || self.initial_ease < self.ease_floor {
            return Err(ConfigError::Invalid(format!(
                "initialEase {} below easeFloor {}",
                self.initial_ease, self.ease_floor
            )));
        }
        if self.passing_quality > 5 {
            return Err(ConfigError::Invalid(format!(
                "passingQuality must be 0-5, got {}",
                self.passing_quality
            )));
        }
        if self.first_interval_days < 1 || self.second_interval_days < 1 || self.min_interval_days < 1
        {
            return Err(ConfigError::Invalid(
                "interval tunings must be at least 1 day".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}
