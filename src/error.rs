//! Error type shared by the stores, the study service and boundary validation.
//!
//! The scheduling and progression folds themselves are total and never fail;
//! errors only come from persistence, configuration and input validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("flashcard not found: {0}")]
  CardNotFound(String),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("configuration error: {0}")]
  Config(String),

  /// A store's mutex was poisoned by a panicking thread.
  #[error("store unavailable")]
  StoreUnavailable,
}

impl EngineError {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidInput(msg.into())
  }
}

pub type Result<T> = std::result::Result<T, EngineError>;
