//! Boundary validation for values arriving from hosts.
//!
//! Hosts typically receive session results as loosely typed JSON with signed
//! numbers. Everything is checked here once so the engine can assume
//! non-negative counts and a known rating.

use serde::{Deserialize, Serialize};

use crate::domain::{Rating, SessionOutcome};
use crate::error::{EngineError, Result};

/// Session result as reported by a client, before validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawSessionOutcome {
  pub raw_score: i64,
  pub minutes_spent: i64,
  #[serde(default)]
  pub is_perfect_run: bool,
  #[serde(default)]
  pub used_ai_content: bool,
  #[serde(default)]
  pub deck_count: i64,
}

fn non_negative<T: TryFrom<i64>>(field: &str, value: i64) -> Result<T> {
  if value < 0 {
    return Err(EngineError::invalid(format!("{} must not be negative, got {}", field, value)));
  }
  T::try_from(value).map_err(|_| EngineError::invalid(format!("{} is out of range: {}", field, value)))
}

impl TryFrom<RawSessionOutcome> for SessionOutcome {
  type Error = EngineError;

  fn try_from(raw: RawSessionOutcome) -> Result<Self> {
    Ok(Self {
      raw_score: non_negative("raw_score", raw.raw_score)?,
      minutes_spent: non_negative("minutes_spent", raw.minutes_spent)?,
      is_perfect_run: raw.is_perfect_run,
      used_ai_content: raw.used_ai_content,
      deck_count: non_negative("deck_count", raw.deck_count)?,
    })
  }
}

/// Parse and validate a session outcome from a JSON body
pub fn parse_session_outcome(json: &str) -> Result<SessionOutcome> {
  let raw: RawSessionOutcome = serde_json::from_str(json)?;
  SessionOutcome::try_from(raw)
}

/// Parse a rating name (`again`, `hard`, `good`, `easy`), case-insensitive
pub fn parse_rating(input: &str) -> Result<Rating> {
  let normalized = input.trim().to_ascii_lowercase();
  Rating::from_str(&normalized).ok_or_else(|| EngineError::invalid(format!("unknown rating: '{}'", input)))
}

/// User and goal ids are opaque, but must be non-empty and printable
pub fn validate_id(kind: &str, id: &str) -> Result<()> {
  if id.trim().is_empty() {
    return Err(EngineError::invalid(format!("{} id must not be empty", kind)));
  }
  if id.chars().any(|c| c.is_control()) {
    return Err(EngineError::invalid(format!("{} id contains control characters", kind)));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_outcome() {
    let outcome = parse_session_outcome(
      r#"{"raw_score": 600, "minutes_spent": 35, "is_perfect_run": true, "deck_count": 3}"#,
    )
    .unwrap();

    assert_eq!(outcome.raw_score, 600);
    assert_eq!(outcome.minutes_spent, 35);
    assert!(outcome.is_perfect_run);
    assert!(!outcome.used_ai_content);
    assert_eq!(outcome.deck_count, 3);
  }

  #[test]
  fn test_negative_minutes_rejected() {
    let raw = RawSessionOutcome {
      raw_score: 10,
      minutes_spent: -5,
      ..Default::default()
    };
    let err = SessionOutcome::try_from(raw).unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(ref msg) if msg.contains("minutes_spent")));
  }

  #[test]
  fn test_negative_score_rejected() {
    let raw = RawSessionOutcome {
      raw_score: -1,
      ..Default::default()
    };
    assert!(SessionOutcome::try_from(raw).is_err());
  }

  #[test]
  fn test_out_of_range_minutes_rejected() {
    let raw = RawSessionOutcome {
      minutes_spent: i64::from(u32::MAX) + 1,
      ..Default::default()
    };
    assert!(SessionOutcome::try_from(raw).is_err());
  }

  #[test]
  fn test_malformed_json_rejected() {
    assert!(matches!(
      parse_session_outcome("{\"raw_score\": \"lots\"}"),
      Err(EngineError::Serialization(_))
    ));
  }

  #[test]
  fn test_parse_rating() {
    assert_eq!(parse_rating("good").unwrap(), Rating::Good);
    assert_eq!(parse_rating("  Easy ").unwrap(), Rating::Easy);
    assert!(matches!(parse_rating("NaN"), Err(EngineError::InvalidInput(_))));
    assert!(parse_rating("").is_err());
  }

  #[test]
  fn test_validate_id() {
    assert!(validate_id("user", "alice").is_ok());
    assert!(validate_id("user", "  ").is_err());
    assert!(validate_id("goal", "a\nb").is_err());
  }
}
