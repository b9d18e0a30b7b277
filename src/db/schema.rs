use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS user_progress (
      user_id TEXT PRIMARY KEY,
      xp INTEGER NOT NULL DEFAULT 0,
      level INTEGER NOT NULL DEFAULT 1,
      streak_days INTEGER NOT NULL DEFAULT 0,
      last_study_date TEXT,
      cards_learned INTEGER NOT NULL DEFAULT 0,
      minutes_studied INTEGER NOT NULL DEFAULT 0,
      questions_answered INTEGER NOT NULL DEFAULT 0,
      correct_answers INTEGER NOT NULL DEFAULT 0,
      fastest_session_minutes INTEGER NOT NULL DEFAULT 0,
      daily_goals TEXT NOT NULL DEFAULT '[]',
      unlock_inventory TEXT NOT NULL DEFAULT '{}',
      learn_sessions_used_today INTEGER NOT NULL DEFAULT 0,
      updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS flashcards (
      id TEXT PRIMARY KEY,
      deck_id TEXT NOT NULL,
      front TEXT NOT NULL,
      back TEXT NOT NULL,
      color TEXT,
      -- Review state, all NULL until the card is first scheduled
      interval_days INTEGER,
      repetition_count INTEGER,
      ease_factor REAL,
      due_at TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_flashcards_deck_id ON flashcards(deck_id);
    "#,
  )?;

  Ok(())
}
