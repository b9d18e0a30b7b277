//! Persistence ports and in-memory adapters.
//!
//! The engine never performs I/O itself; hosts hand it snapshots loaded
//! through these traits and persist what comes back. SQLite adapters live in
//! `crate::db`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Flashcard, UserProgress};
use crate::error::{EngineError, Result};

pub trait ProgressStore {
  fn load(&self, user_id: &str) -> Result<Option<UserProgress>>;

  /// Overwrite the stored progress. Saving the same value twice is a no-op.
  fn save(&self, user_id: &str, progress: &UserProgress) -> Result<()>;

  /// Stored progress, or a fresh default for users who never studied
  fn load_or_default(&self, user_id: &str) -> Result<UserProgress> {
    Ok(self.load(user_id)?.unwrap_or_default())
  }
}

pub trait FlashcardStore {
  fn load(&self, card_id: &str) -> Result<Option<Flashcard>>;

  /// Insert or replace a card by id
  fn save(&self, card: &Flashcard) -> Result<()>;

  /// All cards of a deck in insertion order
  fn list_deck(&self, deck_id: &str) -> Result<Vec<Flashcard>>;
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
  mutex.lock().map_err(|_| {
    tracing::error!("Store mutex poisoned - a thread panicked while holding the lock");
    EngineError::StoreUnavailable
  })
}

#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
  users: Mutex<HashMap<String, UserProgress>>,
}

impl InMemoryProgressStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl ProgressStore for InMemoryProgressStore {
  fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
    Ok(lock(&self.users)?.get(user_id).cloned())
  }

  fn save(&self, user_id: &str, progress: &UserProgress) -> Result<()> {
    lock(&self.users)?.insert(user_id.to_string(), progress.clone());
    Ok(())
  }
}

#[derive(Debug, Default)]
pub struct InMemoryFlashcardStore {
  cards: Mutex<Vec<Flashcard>>,
}

impl InMemoryFlashcardStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_cards(cards: Vec<Flashcard>) -> Self {
    Self {
      cards: Mutex::new(cards),
    }
  }
}

impl FlashcardStore for InMemoryFlashcardStore {
  fn load(&self, card_id: &str) -> Result<Option<Flashcard>> {
    Ok(lock(&self.cards)?.iter().find(|c| c.id == card_id).cloned())
  }

  fn save(&self, card: &Flashcard) -> Result<()> {
    let mut cards = lock(&self.cards)?;
    match cards.iter_mut().find(|c| c.id == card.id) {
      Some(existing) => *existing = card.clone(),
      None => cards.push(card.clone()),
    }
    Ok(())
  }

  fn list_deck(&self, deck_id: &str) -> Result<Vec<Flashcard>> {
    Ok(
      lock(&self.cards)?
        .iter()
        .filter(|c| c.deck_id == deck_id)
        .cloned()
        .collect(),
    )
  }
}
