//! Seasonal score multipliers.
//!
//! The progression engine applies whatever factor it is handed; deciding which
//! factor is in effect on a given day is the job of an `EventMultiplierSource`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Validated score multiplier: finite and non-negative
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct EventMultiplier(f64);

impl EventMultiplier {
  pub const NEUTRAL: EventMultiplier = EventMultiplier(1.0);

  pub fn new(factor: f64) -> Result<Self> {
    if !factor.is_finite() || factor < 0.0 {
      return Err(EngineError::invalid(format!(
        "event multiplier must be a finite non-negative number, got {}",
        factor
      )));
    }
    Ok(Self(factor))
  }

  pub fn value(&self) -> f64 {
    self.0
  }

  /// floor(raw_score * factor)
  pub fn apply(&self, raw_score: u64) -> u64 {
    (raw_score as f64 * self.0).floor() as u64
  }
}

impl Default for EventMultiplier {
  fn default() -> Self {
    Self::NEUTRAL
  }
}

pub trait EventMultiplierSource {
  fn multiplier_for(&self, day: NaiveDate) -> EventMultiplier;
}

/// Same multiplier every day
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatMultiplier(pub EventMultiplier);

impl EventMultiplierSource for FlatMultiplier {
  fn multiplier_for(&self, _day: NaiveDate) -> EventMultiplier {
    self.0
  }
}

/// A bonus window, inclusive on both ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalEvent {
  pub name: String,
  pub start: NaiveDate,
  pub end: NaiveDate,
  pub multiplier: f64,
}

impl SeasonalEvent {
  pub fn is_active(&self, day: NaiveDate) -> bool {
    self.start <= day && day <= self.end
  }
}

/// Calendar of seasonal events. Overlapping events do not stack: the highest
/// active multiplier wins. Days outside every event get the neutral factor.
#[derive(Debug, Clone, Default)]
pub struct SeasonalCalendar {
  events: Vec<(SeasonalEvent, EventMultiplier)>,
}

impl SeasonalCalendar {
  pub fn new(events: Vec<SeasonalEvent>) -> Result<Self> {
    let events = events
      .into_iter()
      .map(|event| {
        if event.end < event.start {
          return Err(EngineError::invalid(format!(
            "event '{}' ends before it starts",
            event.name
          )));
        }
        let multiplier = EventMultiplier::new(event.multiplier)?;
        Ok((event, multiplier))
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Self { events })
  }

  pub fn active_events(&self, day: NaiveDate) -> impl Iterator<Item = &SeasonalEvent> {
    self
      .events
      .iter()
      .map(|(event, _)| event)
      .filter(move |event| event.is_active(day))
  }
}

impl EventMultiplierSource for SeasonalCalendar {
  fn multiplier_for(&self, day: NaiveDate) -> EventMultiplier {
    self
      .events
      .iter()
      .filter(|(event, _)| event.is_active(day))
      .map(|(_, multiplier)| *multiplier)
      .fold(None, |best: Option<EventMultiplier>, m| match best {
        Some(b) if b >= m => Some(b),
        _ => Some(m),
      })
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn event(name: &str, start: NaiveDate, end: NaiveDate, multiplier: f64) -> SeasonalEvent {
    SeasonalEvent {
      name: name.to_string(),
      start,
      end,
      multiplier,
    }
  }

  #[test]
  fn test_multiplier_rejects_invalid_factors() {
    assert!(EventMultiplier::new(f64::NAN).is_err());
    assert!(EventMultiplier::new(f64::INFINITY).is_err());
    assert!(EventMultiplier::new(-0.5).is_err());
    assert!(EventMultiplier::new(0.0).is_ok());
    assert!(EventMultiplier::new(2.0).is_ok());
  }

  #[test]
  fn test_multiplier_apply_floors() {
    let m = EventMultiplier::new(1.5).unwrap();
    assert_eq!(m.apply(333), 499);
    assert_eq!(EventMultiplier::NEUTRAL.apply(600), 600);
    assert_eq!(EventMultiplier::new(0.0).unwrap().apply(600), 0);
  }

  #[test]
  fn test_flat_multiplier() {
    let source = FlatMultiplier::default();
    assert_eq!(source.multiplier_for(date(2025, 1, 1)), EventMultiplier::NEUTRAL);
  }

  #[test]
  fn test_calendar_picks_highest_active() {
    let calendar = SeasonalCalendar::new(vec![
      event("winter", date(2025, 12, 1), date(2025, 12, 31), 1.5),
      event("new-year", date(2025, 12, 30), date(2026, 1, 2), 2.0),
    ])
    .unwrap();

    assert_eq!(calendar.multiplier_for(date(2025, 12, 1)).value(), 1.5);
    assert_eq!(calendar.multiplier_for(date(2025, 12, 31)).value(), 2.0);
    assert_eq!(calendar.multiplier_for(date(2026, 1, 2)).value(), 2.0);
    assert_eq!(calendar.multiplier_for(date(2026, 1, 3)).value(), 1.0);
    assert_eq!(calendar.active_events(date(2025, 12, 30)).count(), 2);
  }

  #[test]
  fn test_calendar_rejects_bad_events() {
    let backwards = event("oops", date(2025, 5, 2), date(2025, 5, 1), 2.0);
    assert!(SeasonalCalendar::new(vec![backwards]).is_err());

    let negative = event("neg", date(2025, 5, 1), date(2025, 5, 2), -1.0);
    assert!(SeasonalCalendar::new(vec![negative]).is_err());
  }
}
