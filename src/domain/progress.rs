use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::rewards::{RewardItemId, UnlockStatus};

/// What a daily goal counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalMetric {
  ReviewCards,
  StudyTime,
  CreateDeck,
  PerfectScore,
}

impl GoalMetric {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::ReviewCards => "review_cards",
      Self::StudyTime => "study_time",
      Self::CreateDeck => "create_deck",
      Self::PerfectScore => "perfect_score",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "review_cards" => Some(Self::ReviewCards),
      "study_time" => Some(Self::StudyTime),
      "create_deck" => Some(Self::CreateDeck),
      "perfect_score" => Some(Self::PerfectScore),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
  pub id: String,
  pub metric: GoalMetric,
  pub target: u32,
  pub current: u32,
  pub xp_reward: u64,
  /// One-way latch, set only when the reward is claimed
  #[serde(default)]
  pub completed: bool,
}

impl Goal {
  pub fn new(id: impl Into<String>, metric: GoalMetric, target: u32, xp_reward: u64) -> Self {
    Self {
      id: id.into(),
      metric,
      target,
      current: 0,
      xp_reward,
      completed: false,
    }
  }

  pub fn is_claimable(&self) -> bool {
    !self.completed && self.current >= self.target
  }
}

/// Persistent per-user study progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
  pub xp: u64,
  pub level: u32,
  pub streak_days: u32,
  /// Calendar day of the last completed session
  #[serde(default)]
  pub last_study_date: Option<NaiveDate>,

  // Cumulative aggregates
  #[serde(default)]
  pub cards_learned: u64,
  #[serde(default)]
  pub minutes_studied: u64,
  #[serde(default)]
  pub questions_answered: u64,
  #[serde(default)]
  pub correct_answers: u64,
  /// Shortest non-zero session length in minutes, 0 while unset
  #[serde(default)]
  pub fastest_session_minutes: u32,

  #[serde(default)]
  pub daily_goals: Vec<Goal>,
  #[serde(default)]
  pub unlock_inventory: BTreeMap<RewardItemId, UnlockStatus>,
  #[serde(default)]
  pub learn_sessions_used_today: u32,
}

impl Default for UserProgress {
  fn default() -> Self {
    Self {
      xp: 0,
      level: 1,
      streak_days: 0,
      last_study_date: None,
      cards_learned: 0,
      minutes_studied: 0,
      questions_answered: 0,
      correct_answers: 0,
      fastest_session_minutes: 0,
      daily_goals: Vec::new(),
      unlock_inventory: BTreeMap::new(),
      learn_sessions_used_today: 0,
    }
  }
}

impl UserProgress {
  /// Status of an item; items absent from the inventory are locked
  pub fn status_of(&self, item: RewardItemId) -> UnlockStatus {
    self.unlock_inventory.get(&item).copied().unwrap_or_default()
  }

  pub fn goal(&self, goal_id: &str) -> Option<&Goal> {
    self.daily_goals.iter().find(|g| g.id == goal_id)
  }

  pub fn claimable_goals(&self) -> impl Iterator<Item = &Goal> {
    self.daily_goals.iter().filter(|g| g.is_claimable())
  }

  /// Share of answered questions counted as correct, in 0.0..=1.0
  pub fn accuracy(&self) -> f64 {
    if self.questions_answered > 0 {
      (self.correct_answers as f64 / self.questions_answered as f64).min(1.0)
    } else {
      0.0
    }
  }
}

/// Aggregate result of one finished study session.
///
/// `deck_count` is the user's total number of decks at session end; deck
/// storage lives with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionOutcome {
  pub raw_score: u64,
  pub minutes_spent: u32,
  pub is_perfect_run: bool,
  pub used_ai_content: bool,
  pub deck_count: u32,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::rewards::ItemClass;

  #[test]
  fn test_default_progress() {
    let progress = UserProgress::default();
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.level, 1);
    assert_eq!(progress.streak_days, 0);
    assert!(progress.last_study_date.is_none());
    assert!(progress.daily_goals.is_empty());
    assert!(progress.unlock_inventory.is_empty());
  }

  #[test]
  fn test_status_of_missing_item_is_locked() {
    let progress = UserProgress::default();
    assert_eq!(
      progress.status_of(RewardItemId::premium(ItemClass::Gemini)),
      UnlockStatus::Locked
    );
  }

  #[test]
  fn test_goal_claimable() {
    let mut goal = Goal::new("g1", GoalMetric::ReviewCards, 20, 150);
    assert!(!goal.is_claimable());

    goal.current = 20;
    assert!(goal.is_claimable());

    goal.completed = true;
    assert!(!goal.is_claimable());
  }

  #[test]
  fn test_accuracy() {
    let mut progress = UserProgress::default();
    assert_eq!(progress.accuracy(), 0.0);

    progress.questions_answered = 20;
    progress.correct_answers = 15;
    assert!((progress.accuracy() - 0.75).abs() < f64::EPSILON);
  }

  #[test]
  fn test_goal_metric_from_str() {
    assert_eq!(GoalMetric::from_str("study_time"), Some(GoalMetric::StudyTime));
    assert_eq!(GoalMetric::from_str("create_deck"), Some(GoalMetric::CreateDeck));
    assert_eq!(GoalMetric::from_str("reviewCards"), None);
  }

  #[test]
  fn test_progress_deserializes_with_missing_optional_fields() {
    let json = r#"{"xp": 1200, "level": 2, "streak_days": 3}"#;
    let progress: UserProgress = serde_json::from_str(json).unwrap();
    assert_eq!(progress.xp, 1200);
    assert_eq!(progress.level, 2);
    assert_eq!(progress.cards_learned, 0);
    assert!(progress.daily_goals.is_empty());
  }
}
