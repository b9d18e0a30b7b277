use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{try_lock, DbPool};
use crate::domain::{Flashcard, ReviewState};
use crate::error::Result;
use crate::store::FlashcardStore;

const CARD_COLUMNS: &str =
  "id, deck_id, front, back, color, interval_days, repetition_count, ease_factor, due_at";

#[derive(Debug, Clone)]
pub struct SqliteFlashcardStore {
  pool: DbPool,
}

impl SqliteFlashcardStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl FlashcardStore for SqliteFlashcardStore {
  fn load(&self, card_id: &str) -> Result<Option<Flashcard>> {
    let conn = try_lock(&self.pool)?;
    get_card_by_id(&conn, card_id)
  }

  fn save(&self, card: &Flashcard) -> Result<()> {
    let conn = try_lock(&self.pool)?;
    upsert_card(&conn, card)
  }

  fn list_deck(&self, deck_id: &str) -> Result<Vec<Flashcard>> {
    let conn = try_lock(&self.pool)?;
    get_deck_cards(&conn, deck_id)
  }
}

pub fn upsert_card(conn: &Connection, card: &Flashcard) -> Result<()> {
  let review = card.review.as_ref();
  conn.execute(
    r#"
    INSERT INTO flashcards (id, deck_id, front, back, color, interval_days, repetition_count,
                            ease_factor, due_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    ON CONFLICT(id) DO UPDATE SET
      deck_id = excluded.deck_id,
      front = excluded.front,
      back = excluded.back,
      color = excluded.color,
      interval_days = excluded.interval_days,
      repetition_count = excluded.repetition_count,
      ease_factor = excluded.ease_factor,
      due_at = excluded.due_at
    "#,
    params![
      card.id,
      card.deck_id,
      card.front,
      card.back,
      card.color,
      review.map(|r| r.interval_days),
      review.map(|r| r.repetition_count),
      review.map(|r| r.ease_factor),
      review.map(|r| r.due_at.to_rfc3339()),
    ],
  )?;
  Ok(())
}

pub fn get_card_by_id(conn: &Connection, id: &str) -> Result<Option<Flashcard>> {
  let card = conn
    .query_row(
      &format!("SELECT {} FROM flashcards WHERE id = ?1", CARD_COLUMNS),
      params![id],
      row_to_card,
    )
    .optional()?;
  Ok(card)
}

pub fn get_deck_cards(conn: &Connection, deck_id: &str) -> Result<Vec<Flashcard>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {} FROM flashcards WHERE deck_id = ?1 ORDER BY rowid",
    CARD_COLUMNS
  ))?;

  let cards = stmt
    .query_map(params![deck_id], row_to_card)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(cards)
}

/// Convert a database row to a Flashcard.
/// The review state is present only when every review column is set.
fn row_to_card(row: &Row) -> rusqlite::Result<Flashcard> {
  let interval_days: Option<u32> = row.get(5)?;
  let repetition_count: Option<u32> = row.get(6)?;
  let ease_factor: Option<f64> = row.get(7)?;
  let due_at: Option<String> = row.get(8)?;

  let review = match (interval_days, repetition_count, ease_factor, due_at) {
    (Some(interval_days), Some(repetition_count), Some(ease_factor), Some(due_at)) => {
      let due_at = DateTime::parse_from_rfc3339(&due_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e)))?;
      Some(ReviewState {
        interval_days,
        repetition_count,
        ease_factor,
        due_at,
      })
    }
    _ => None,
  };

  Ok(Flashcard {
    id: row.get(0)?,
    deck_id: row.get(1)?,
    front: row.get(2)?,
    back: row.get(3)?,
    color: row.get(4)?,
    review,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Rating;
  use crate::srs::schedule;
  use crate::testing::TestEnv;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 1, 10, 0, 0).unwrap()
  }

  #[test]
  fn test_save_and_load_new_card() {
    let env = TestEnv::new().unwrap();
    let store = SqliteFlashcardStore::new(env.pool.clone());
    let card = Flashcard::new("c1", "d1", "ㄱ", "g / k").with_color("#f97316");

    store.save(&card).unwrap();
    assert_eq!(store.load("c1").unwrap(), Some(card));
    assert!(store.load("c2").unwrap().is_none());
  }

  #[test]
  fn test_scheduled_card_round_trips() {
    let env = TestEnv::new().unwrap();
    let store = SqliteFlashcardStore::new(env.pool.clone());
    let card = schedule(&Flashcard::new("c1", "d1", "ㄴ", "n"), Rating::Good, now());

    store.save(&card).unwrap();
    let loaded = store.load("c1").unwrap().unwrap();
    assert_eq!(loaded, card);
    assert_eq!(loaded.review.unwrap().due_at, now() + Duration::days(1));
  }

  #[test]
  fn test_list_deck_keeps_insertion_order() {
    let env = TestEnv::new().unwrap();
    let store = SqliteFlashcardStore::new(env.pool.clone());
    for (id, deck) in [("b", "d1"), ("a", "d1"), ("x", "d2"), ("c", "d1")] {
      store.save(&Flashcard::new(id, deck, "front", "back")).unwrap();
    }

    let ids: Vec<String> = store.list_deck("d1").unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
  }
}
