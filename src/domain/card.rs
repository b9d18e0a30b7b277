use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Starting ease factor for a card that has never been reviewed
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Ease factor never drops below this value
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// SM-2 scheduling state embedded in a flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
  /// Days until the next due date, as of the last computation
  pub interval_days: u32,
  /// Consecutive non-"again" reviews
  pub repetition_count: u32,
  pub ease_factor: f64,
  pub due_at: DateTime<Utc>,
}

impl Default for ReviewState {
  /// State assumed for a card that has never been scheduled: due immediately.
  fn default() -> Self {
    Self {
      interval_days: 0,
      repetition_count: 0,
      ease_factor: DEFAULT_EASE_FACTOR,
      due_at: DateTime::<Utc>::UNIX_EPOCH,
    }
  }
}

impl ReviewState {
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.due_at <= now
  }
}

/// A flashcard owned by a deck.
///
/// Only `review` is ever touched by the scheduler; the content fields are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
  pub id: String,
  pub deck_id: String,
  pub front: String,
  pub back: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub review: Option<ReviewState>,
}

impl Flashcard {
  pub fn new(
    id: impl Into<String>,
    deck_id: impl Into<String>,
    front: impl Into<String>,
    back: impl Into<String>,
  ) -> Self {
    Self {
      id: id.into(),
      deck_id: deck_id.into(),
      front: front.into(),
      back: back.into(),
      color: None,
      review: None,
    }
  }

  pub fn with_color(mut self, color: impl Into<String>) -> Self {
    self.color = Some(color.into());
    self
  }

  /// Cards without review state have never been scheduled and are always due
  pub fn is_due(&self, now: DateTime<Utc>) -> bool {
    self.review.as_ref().is_none_or(|r| r.is_due(now))
  }

  pub fn is_new(&self) -> bool {
    self.review.is_none()
  }

  /// Review state, or the defaults for a fresh card
  pub fn review_state(&self) -> ReviewState {
    self.review.clone().unwrap_or_default()
  }
}
