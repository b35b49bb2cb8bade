use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::WordMemoryState;

pub const DEFAULT_WORDS_PER_DAY: usize = 20;

/// Daily study-plan target: how many due words to surface per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyPlan {
    pub words_per_day: usize,
}

impl Default for DailyPlan {
    fn default() -> Self {
        Self {
            words_per_day: DEFAULT_WORDS_PER_DAY,
        }
    }
}

impl DailyPlan {
    pub fn new(words_per_day: usize) -> Self {
        Self { words_per_day }
    }

    pub fn from_env() -> Self {
        let words_per_day = std::env::var("WORDS_PER_DAY")
            .ok()
            .and_then(|value| usize::from_str(&value).ok())
            .unwrap_or(DEFAULT_WORDS_PER_DAY);
        Self { words_per_day }
    }
}

/// Anything carrying a next-review timestamp can enter the study queue.
pub trait DueItem {
    fn next_review(&self) -> Option<DateTime<Utc>>;
}

impl DueItem for WordMemoryState {
    fn next_review(&self) -> Option<DateTime<Utc>> {
        self.next_review
    }
}

impl<T: DueItem> DueItem for (String, T) {
    fn next_review(&self) -> Option<DateTime<Utc>> {
        self.1.next_review()
    }
}

/// Select up to `limit` items due at `now`, oldest overdue first.
///
/// Never-studied items (no `next_review`) sort ahead of review-due items,
/// matching `ORDER BY next_review ASC NULLS FIRST` in the word-state query
/// this mirrors. The sort is stable, so input order breaks ties.
pub fn select_due<'a, T: DueItem>(
    items: &'a [T],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&'a T> {
    let mut due: Vec<&T> = items
        .iter()
        .filter(|item| item.next_review().map_or(true, |at| at <= now))
        .collect();
    // Option<DateTime> orders None first, exactly the NULLS FIRST contract.
    due.sort_by_key(|item| item.next_review());
    due.truncate(limit);
    due
}
