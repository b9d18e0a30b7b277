//! Injected time source so scheduling and streak logic stay deterministic.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::cell::Cell;

pub trait Clock {
  fn now(&self) -> DateTime<Utc>;

  /// Calendar day used for streaks and daily resets
  fn today(&self) -> NaiveDate;
}

/// Wall clock. Calendar days follow the machine's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }

  fn today(&self) -> NaiveDate {
    Local::now().date_naive()
  }
}

/// Manually driven clock for tests and simulations.
/// `today` is the UTC date of the current instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
  now: Cell<DateTime<Utc>>,
}

impl FixedClock {
  pub fn at(now: DateTime<Utc>) -> Self {
    Self { now: Cell::new(now) }
  }

  pub fn set(&self, now: DateTime<Utc>) {
    self.now.set(now);
  }

  pub fn advance(&self, by: Duration) {
    self.now.set(self.now.get() + by);
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.now.get()
  }

  fn today(&self) -> NaiveDate {
    self.now.get().date_naive()
  }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }

  fn today(&self) -> NaiveDate {
    (**self).today()
  }
}
