pub mod cards;
pub mod progress;
pub mod schema;

use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{EngineError, Result};

pub use cards::SqliteFlashcardStore;
pub use progress::SqliteProgressStore;
pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> Result<MutexGuard<'_, Connection>> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    EngineError::StoreUnavailable
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    if let Err(e) = std::fs::create_dir_all(parent) {
      tracing::warn!("Could not create database directory {}: {}", parent.display(), e);
    }
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  tracing::info!("Database ready at {}", path.display());
  Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database with the full schema, for tests and throwaway hosts
pub fn init_in_memory() -> Result<DbPool> {
  let conn = Connection::open_in_memory()?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Flashcard;
  use crate::store::FlashcardStore;

  #[test]
  fn test_in_memory_pool_has_schema() {
    let pool = init_in_memory().unwrap();
    let store = SqliteFlashcardStore::new(pool.clone());
    store.save(&Flashcard::new("c1", "d1", "front", "back")).unwrap();
    assert_eq!(store.list_deck("d1").unwrap().len(), 1);
  }

  #[test]
  fn test_poisoned_pool_reports_unavailable() {
    let pool = init_in_memory().unwrap();
    let poisoner = pool.clone();
    let _ = std::thread::spawn(move || {
      let _guard = poisoner.lock().unwrap();
      panic!("poison the connection mutex");
    })
    .join();

    assert!(matches!(try_lock(&pool), Err(EngineError::StoreUnavailable)));
  }
}
