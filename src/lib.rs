//! # wordmem-core
//!
//! Spaced-repetition scheduling core for a vocabulary memorizer.
//!
//! The crate is the algorithmic heart of the application: given a word's
//! current memory state and a 0-5 quality rating for the latest review, it
//! computes the updated state and the next review date. Persistence, HTTP
//! surfaces, and import/export live in the surrounding application; they
//! talk to this crate through [`intake::review`] and the [`intake::ReviewStore`]
//! trait.
//!
//! - [`scheduler`] - the pure SM-2-family scheduling function
//! - [`state`] - per-word memory state and the append-only review event
//! - [`queue`] - due-word selection for the daily study queue
//! - [`intake`] - review orchestration over a storage boundary
//! - [`config`] - scheduler tuning constants
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use wordmem_core::{compute_next_state, Quality, SchedulerConfig, WordMemoryState};
//!
//! let config = SchedulerConfig::default();
//! let state = WordMemoryState::default();
//! let quality = Quality::new(4)?;
//! let next = compute_next_state(&state, quality, Utc::now(), &config)?;
//! assert_eq!(next.repetitions, 1);
//! assert_eq!(next.interval_days, 1);
//! # Ok::<(), wordmem_core::ScheduleError>(())
//! ```

pub mod config;
pub mod intake;
pub mod queue;
pub mod scheduler;
pub mod state;

pub use config::SchedulerConfig;
pub use intake::{review, IntakeError, ReviewOutcome, ReviewRequest, ReviewStore};
pub use queue::{select_due, DailyPlan, DueItem};
pub use scheduler::{compute_next_state, Quality, ScheduleError};
pub use state::{ReviewEvent, WordMemoryState};
