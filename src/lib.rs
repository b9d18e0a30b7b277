//! Spaced repetition scheduling and study progression for flashcard apps.
//!
//! - [`srs`] advances a card's SM-2 review state for a rating.
//! - [`progression`] folds finished sessions into XP, levels, streaks,
//!   unlocks and daily goals.
//! - [`session::StudyService`] wires both to persistence, a clock and a
//!   seasonal multiplier source.

pub mod clock;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod logging;
pub mod progression;
pub mod session;
pub mod srs;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{EngineError, Result};
