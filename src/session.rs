//! Study service: the host-side sequence around the pure core.
//!
//! A study session calls `review_card` once per card answered and
//! `finish_session` exactly once at the end. Each call loads a snapshot,
//! runs the pure fold, and persists the result.

use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::domain::{Flashcard, Rating, SessionOutcome, UserProgress};
use crate::error::{EngineError, Result};
use crate::events::EventMultiplierSource;
use crate::progression::{self, ProgressionEngine};
use crate::srs;
use crate::store::{FlashcardStore, ProgressStore};
use crate::validation::validate_id;

pub struct StudyService<P, F, C, E> {
  progress: P,
  cards: F,
  clock: C,
  events: E,
  engine: ProgressionEngine,
}

impl<P, F, C, E> StudyService<P, F, C, E>
where
  P: ProgressStore,
  F: FlashcardStore,
  C: Clock,
  E: EventMultiplierSource,
{
  pub fn new(progress: P, cards: F, clock: C, events: E) -> Self {
    Self {
      progress,
      cards,
      clock,
      events,
      engine: ProgressionEngine::default(),
    }
  }

  pub fn with_engine(mut self, engine: ProgressionEngine) -> Self {
    self.engine = engine;
    self
  }

  pub fn progress_store(&self) -> &P {
    &self.progress
  }

  pub fn card_store(&self) -> &F {
    &self.cards
  }

  pub fn now(&self) -> DateTime<Utc> {
    self.clock.now()
  }

  /// Load a user's progress with the daily rollover applied.
  ///
  /// The rolled-over snapshot is not saved here; the next fold persists it.
  pub fn load_progress(&self, user_id: &str) -> Result<UserProgress> {
    validate_id("user", user_id)?;
    let stored = self.progress.load_or_default(user_id)?;
    Ok(progression::rollover_if_new_day(&stored, self.clock.today()))
  }

  /// Schedule one review and persist the card
  pub fn review_card(&self, card_id: &str, rating: Rating) -> Result<Flashcard> {
    let card = self
      .cards
      .load(card_id)?
      .ok_or_else(|| EngineError::CardNotFound(card_id.to_string()))?;

    let next = srs::schedule(&card, rating, self.clock.now());
    self.cards.save(&next)?;

    if let Some(review) = &next.review {
      tracing::debug!(
        "Reviewed card {} as {}: interval {}d, ease {:.2}, due {}",
        card_id,
        rating.as_str(),
        review.interval_days,
        review.ease_factor,
        review.due_at
      );
    }
    Ok(next)
  }

  /// Cards of a deck that are due now, in deck order
  pub fn due_cards(&self, deck_id: &str) -> Result<Vec<Flashcard>> {
    let cards = self.cards.list_deck(deck_id)?;
    let now = self.clock.now();
    Ok(srs::due_cards(&cards, now).into_iter().cloned().collect())
  }

  /// Fold a finished session into the user's progress and persist it
  pub fn finish_session(&self, user_id: &str, outcome: &SessionOutcome) -> Result<UserProgress> {
    let current = self.load_progress(user_id)?;
    let today = self.clock.today();
    let multiplier = self.events.multiplier_for(today);

    let next = self.engine.apply_session(&current, outcome, today, multiplier);
    self.progress.save(user_id, &next)?;

    tracing::info!(
      "Session for {}: +{} XP (x{}), level {}, streak {}",
      user_id,
      next.xp - current.xp,
      multiplier.value(),
      next.level,
      next.streak_days
    );
    if next.level > current.level {
      tracing::info!("{} reached level {}", user_id, next.level);
    }
    let unlocked = next
      .unlock_inventory
      .iter()
      .filter(|(item, _)| !current.status_of(**item).is_held() && next.status_of(**item).is_held())
      .count();
    if unlocked > 0 {
      tracing::info!("{} unlocked {} reward item(s)", user_id, unlocked);
    }

    Ok(next)
  }

  pub fn claim_goal(&self, user_id: &str, goal_id: &str) -> Result<UserProgress> {
    validate_id("goal", goal_id)?;
    let current = self.load_progress(user_id)?;
    let next = self.engine.claim_goal(&current, goal_id);

    if next == current {
      tracing::debug!("Goal {} for {} not claimable", goal_id, user_id);
      return Ok(current);
    }

    self.progress.save(user_id, &next)?;
    tracing::info!("{} claimed goal {} ({} XP)", user_id, goal_id, next.xp - current.xp);
    Ok(next)
  }

  pub fn record_deck_created(&self, user_id: &str) -> Result<UserProgress> {
    let current = self.load_progress(user_id)?;
    let next = progression::record_deck_created(&current);
    self.progress.save(user_id, &next)?;
    Ok(next)
  }
}
