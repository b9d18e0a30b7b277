//! Test utilities for database setup.
//!
//! Reuses the authoritative schema initialization so tests never carry their
//! own copy of the tables.

use std::path::Path;
use tempfile::TempDir;

use crate::db::{self, DbPool};
use crate::error::{EngineError, Result};

/// Test environment with a file-backed database in a temporary directory,
/// removed automatically when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Pool over `flashcards.db` with all migrations applied
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()
            .map_err(|e| EngineError::Config(format!("failed to create temp dir: {}", e)))?;

        let pool = db::init_db(&temp.path().join("flashcards.db"))?;

        Ok(Self { temp, pool })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_creates_database_file() {
        let env = TestEnv::new().unwrap();
        assert!(env.path().join("flashcards.db").exists());
    }

    #[test]
    fn test_reopen_keeps_data_and_writes_backup() {
        let env = TestEnv::new().unwrap();
        {
            let conn = db::try_lock(&env.pool).unwrap();
            conn.execute(
                "INSERT INTO flashcards (id, deck_id, front, back) VALUES ('c1', 'd1', 'a', 'b')",
                [],
            )
            .unwrap();
        }

        let reopened = db::init_db(&env.path().join("flashcards.db")).unwrap();
        let conn = db::try_lock(&reopened).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM flashcards", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert!(env.path().join("flashcards.db.backup").exists());
    }
}
