use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SchedulerConfig;
use crate::scheduler::{compute_next_state, Quality, ScheduleError};
use crate::state::{ReviewEvent, WordMemoryState};

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("word not found: {0}")]
    WordNotFound(String),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("store error: {0}")]
    Store(String),
}

/// Boundary request: which word was reviewed and how well it was recalled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub word_id: String,
    pub quality: i32,
}

/// What the caller persists and displays after a review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub state: WordMemoryState,
    pub event: ReviewEvent,
}

/// Storage boundary for review intake.
///
/// `commit` must persist the updated state and append the event as a single
/// atomic unit per word; two racing reviews for the same word must not lose
/// an update. Implementations (database, in-memory) own that guarantee.
pub trait ReviewStore {
    fn load(&self, word_id: &str) -> Result<Option<WordMemoryState>, IntakeError>;

    fn commit(
        &mut self,
        word_id: &str,
        state: &WordMemoryState,
        event: &ReviewEvent,
    ) -> Result<(), IntakeError>;
}

/// Run one review: load the word's state, schedule, persist, and return the
/// outcome. Any failure leaves the store untouched; there is no partial
/// update to roll back.
pub fn review<S: ReviewStore>(
    store: &mut S,
    request: &ReviewRequest,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Result<ReviewOutcome, IntakeError> {
    let quality = Quality::new(request.quality)?;

    let current = store
        .load(&request.word_id)?
        .ok_or_else(|| IntakeError::WordNotFound(request.word_id.clone()))?;

    let state = compute_next_state(&current, quality, now, config)?;
    let event = ReviewEvent::record(&request.word_id, quality, now, &state);

    if let Err(err) = store.commit(&request.word_id, &state, &event) {
        tracing::warn!(error = %err, word_id = %request.word_id, "review commit failed");
        return Err(err);
    }

    tracing::debug!(
        word_id = %request.word_id,
        quality = quality.value(),
        interval_days = state.interval_days,
        "review scheduled"
    );

    Ok(ReviewOutcome { state, event })
}
