use chrono::{DateTime, Duration, Utc};

use crate::domain::{Flashcard, Rating, ReviewState, MIN_EASE_FACTOR};

/// Interval after the first successful review
const FIRST_INTERVAL_DAYS: u32 = 1;

/// Interval after the second consecutive successful review
const SECOND_INTERVAL_DAYS: u32 = 6;

/// Multiplier applied to the interval on a "hard" rating
const HARD_INTERVAL_FACTOR: f64 = 0.5;

/// Compute the next review state for a rating.
///
/// "Again" resets the repetition streak and makes the card due at `now`
/// without touching the ease factor. Any other rating updates the ease with
/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3,
/// and grows the interval 1 -> 6 -> round(previous * EF'). "Hard" then halves
/// the result, never going below one day.
pub fn calculate_sm2(state: &ReviewState, rating: Rating, now: DateTime<Utc>) -> ReviewState {
  let Some(quality) = rating.quality() else {
    return ReviewState {
      interval_days: 0,
      repetition_count: 0,
      ease_factor: state.ease_factor,
      due_at: now,
    };
  };

  let q = quality as f64;
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let ease_factor = (state.ease_factor + ease_delta).max(MIN_EASE_FACTOR);

  let repetition_count = state.repetition_count + 1;
  let mut interval_days = match repetition_count {
    1 => FIRST_INTERVAL_DAYS,
    2 => SECOND_INTERVAL_DAYS,
    _ => (state.interval_days as f64 * ease_factor).round() as u32,
  };

  if rating == Rating::Hard {
    interval_days = ((interval_days as f64 * HARD_INTERVAL_FACTOR).floor() as u32).max(1);
  }

  ReviewState {
    interval_days,
    repetition_count,
    ease_factor,
    due_at: due_after(now, interval_days),
  }
}

/// `now + days`, saturating at the latest representable instant
fn due_after(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
  now
    .checked_add_signed(Duration::days(i64::from(days)))
    .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Advance a card's schedule for one review.
///
/// Returns a copy of the card with only its review state replaced.
pub fn schedule(card: &Flashcard, rating: Rating, now: DateTime<Utc>) -> Flashcard {
  let next = calculate_sm2(&card.review_state(), rating, now);
  Flashcard {
    review: Some(next),
    ..card.clone()
  }
}
