//! SQLite-backed user progress.
//!
//! Scalars live in their own columns; goals and the unlock inventory are
//! stored as JSON text.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{try_lock, DbPool};
use crate::domain::UserProgress;
use crate::error::{EngineError, Result};
use crate::store::ProgressStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct SqliteProgressStore {
  pool: DbPool,
}

impl SqliteProgressStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl ProgressStore for SqliteProgressStore {
  fn load(&self, user_id: &str) -> Result<Option<UserProgress>> {
    let conn = try_lock(&self.pool)?;
    get_progress(&conn, user_id)
  }

  fn save(&self, user_id: &str, progress: &UserProgress) -> Result<()> {
    let conn = try_lock(&self.pool)?;
    upsert_progress(&conn, user_id, progress)
  }
}

pub fn get_progress(conn: &Connection, user_id: &str) -> Result<Option<UserProgress>> {
  let raw = conn
    .query_row(
      r#"
      SELECT xp, level, streak_days, last_study_date, cards_learned, minutes_studied,
             questions_answered, correct_answers, fastest_session_minutes,
             daily_goals, unlock_inventory, learn_sessions_used_today
      FROM user_progress WHERE user_id = ?1
      "#,
      params![user_id],
      RawProgress::from_row,
    )
    .optional()?;

  raw.map(RawProgress::into_progress).transpose()
}

pub fn upsert_progress(conn: &Connection, user_id: &str, progress: &UserProgress) -> Result<()> {
  let daily_goals = serde_json::to_string(&progress.daily_goals)?;
  let unlock_inventory = serde_json::to_string(&progress.unlock_inventory)?;
  let last_study_date = progress
    .last_study_date
    .map(|d| d.format(DATE_FORMAT).to_string());

  conn.execute(
    r#"
    INSERT INTO user_progress (user_id, xp, level, streak_days, last_study_date, cards_learned,
                               minutes_studied, questions_answered, correct_answers,
                               fastest_session_minutes, daily_goals, unlock_inventory,
                               learn_sessions_used_today, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
    ON CONFLICT(user_id) DO UPDATE SET
      xp = excluded.xp,
      level = excluded.level,
      streak_days = excluded.streak_days,
      last_study_date = excluded.last_study_date,
      cards_learned = excluded.cards_learned,
      minutes_studied = excluded.minutes_studied,
      questions_answered = excluded.questions_answered,
      correct_answers = excluded.correct_answers,
      fastest_session_minutes = excluded.fastest_session_minutes,
      daily_goals = excluded.daily_goals,
      unlock_inventory = excluded.unlock_inventory,
      learn_sessions_used_today = excluded.learn_sessions_used_today,
      updated_at = excluded.updated_at
    "#,
    params![
      user_id,
      to_sql_int(progress.xp)?,
      progress.level,
      progress.streak_days,
      last_study_date,
      to_sql_int(progress.cards_learned)?,
      to_sql_int(progress.minutes_studied)?,
      to_sql_int(progress.questions_answered)?,
      to_sql_int(progress.correct_answers)?,
      progress.fastest_session_minutes,
      daily_goals,
      unlock_inventory,
      progress.learn_sessions_used_today,
      Utc::now().to_rfc3339(),
    ],
  )?;
  Ok(())
}

/// SQLite integers are signed; counters beyond i64::MAX cannot be stored
fn to_sql_int(value: u64) -> Result<i64> {
  i64::try_from(value).map_err(|_| EngineError::invalid(format!("counter too large to store: {}", value)))
}

fn from_sql_int(column: &str, value: i64) -> Result<u64> {
  u64::try_from(value).map_err(|_| EngineError::invalid(format!("stored {} is negative: {}", column, value)))
}

/// Row as read from SQLite, before JSON and date decoding
struct RawProgress {
  xp: i64,
  level: u32,
  streak_days: u32,
  last_study_date: Option<String>,
  cards_learned: i64,
  minutes_studied: i64,
  questions_answered: i64,
  correct_answers: i64,
  fastest_session_minutes: u32,
  daily_goals: String,
  unlock_inventory: String,
  learn_sessions_used_today: u32,
}

impl RawProgress {
  fn from_row(row: &Row) -> rusqlite::Result<Self> {
    Ok(Self {
      xp: row.get(0)?,
      level: row.get(1)?,
      streak_days: row.get(2)?,
      last_study_date: row.get(3)?,
      cards_learned: row.get(4)?,
      minutes_studied: row.get(5)?,
      questions_answered: row.get(6)?,
      correct_answers: row.get(7)?,
      fastest_session_minutes: row.get(8)?,
      daily_goals: row.get(9)?,
      unlock_inventory: row.get(10)?,
      learn_sessions_used_today: row.get(11)?,
    })
  }

  fn into_progress(self) -> Result<UserProgress> {
    let last_study_date = self
      .last_study_date
      .map(|s| {
        NaiveDate::parse_from_str(&s, DATE_FORMAT)
          .map_err(|e| EngineError::invalid(format!("bad last_study_date '{}': {}", s, e)))
      })
      .transpose()?;

    Ok(UserProgress {
      xp: from_sql_int("xp", self.xp)?,
      level: self.level.max(1),
      streak_days: self.streak_days,
      last_study_date,
      cards_learned: from_sql_int("cards_learned", self.cards_learned)?,
      minutes_studied: from_sql_int("minutes_studied", self.minutes_studied)?,
      questions_answered: from_sql_int("questions_answered", self.questions_answered)?,
      correct_answers: from_sql_int("correct_answers", self.correct_answers)?,
      fastest_session_minutes: self.fastest_session_minutes,
      daily_goals: serde_json::from_str(&self.daily_goals)?,
      unlock_inventory: serde_json::from_str(&self.unlock_inventory)?,
      learn_sessions_used_today: self.learn_sessions_used_today,
    })
  }
}
