//! Folding finished study sessions into persistent user progress.
//!
//! Every operation here takes a snapshot and returns a new one; nothing is
//! read from or written to storage.

use chrono::NaiveDate;

use super::goals::{advance_goals, record_metric};
use super::leveling::{advance_level, DEFAULT_LEVEL_CAP};
use super::streak::next_streak;
use super::unlocks::{UnlockCatalog, UnlockContext};
use crate::config::ProgressionConfig;
use crate::domain::{GoalMetric, SessionOutcome, UserProgress};
use crate::events::EventMultiplier;

/// Questions credited per scored session. Coarse proxy; sessions do not
/// report per-question counts.
const QUESTIONS_PER_SESSION: u64 = 10;

/// Final score points per card counted as reviewed
const SCORE_PER_CARD: u64 = 50;

/// Share of each hundred score points counted as correct answers
const CORRECT_RATIO: f64 = 0.9;

#[derive(Debug, Clone)]
pub struct ProgressionEngine {
  catalog: UnlockCatalog,
  level_cap: u32,
}

impl Default for ProgressionEngine {
  fn default() -> Self {
    Self {
      catalog: UnlockCatalog::standard(),
      level_cap: DEFAULT_LEVEL_CAP,
    }
  }
}

impl ProgressionEngine {
  pub fn new(catalog: UnlockCatalog, level_cap: u32) -> Self {
    Self {
      catalog,
      level_cap: level_cap.max(1),
    }
  }

  pub fn from_config(config: &ProgressionConfig) -> Self {
    Self::new(UnlockCatalog::standard(), config.level_cap)
  }

  pub fn catalog(&self) -> &UnlockCatalog {
    &self.catalog
  }

  pub fn level_cap(&self) -> u32 {
    self.level_cap
  }

  /// Fold one finished session into `progress`.
  ///
  /// Order matters: streak, score multiplier, XP and level, unlocks (against
  /// the updated streak and level), goals, then the cumulative aggregates.
  /// Callers are expected to run `rollover_if_new_day` first.
  pub fn apply_session(
    &self,
    progress: &UserProgress,
    outcome: &SessionOutcome,
    today: NaiveDate,
    multiplier: EventMultiplier,
  ) -> UserProgress {
    let mut next = progress.clone();

    next.streak_days = next_streak(progress.streak_days, progress.last_study_date, today);
    next.last_study_date = Some(today);

    let final_score = multiplier.apply(outcome.raw_score);

    next.xp = progress.xp.saturating_add(final_score);
    next.level = advance_level(progress.level, next.xp, self.level_cap);
    if next.level > progress.level {
      tracing::debug!("Level up: {} -> {} at {} XP", progress.level, next.level, next.xp);
    }

    let question_credit = if outcome.raw_score > 0 { QUESTIONS_PER_SESSION } else { 0 };
    let cumulative_questions = progress.questions_answered.saturating_add(question_credit);
    let cumulative_cards_reviewed = progress.cards_learned.saturating_add(final_score / SCORE_PER_CARD);

    let ctx = UnlockContext {
      final_score,
      minutes_spent: outcome.minutes_spent,
      is_perfect_run: outcome.is_perfect_run,
      used_ai_content: outcome.used_ai_content,
      deck_count: outcome.deck_count,
      streak_days: next.streak_days,
      level: next.level,
      cumulative_questions,
      cumulative_cards_reviewed,
    };
    let unlocked = self.catalog.evaluate(&ctx, &mut next.unlock_inventory);
    for item in &unlocked {
      tracing::debug!("Unlocked reward item {}", item);
    }

    advance_goals(&mut next.daily_goals, outcome, final_score);

    next.minutes_studied = progress.minutes_studied.saturating_add(outcome.minutes_spent as u64);
    next.cards_learned = cumulative_cards_reviewed;
    next.questions_answered = cumulative_questions;
    let correct_credit = (final_score as f64 / 100.0 * CORRECT_RATIO).floor() as u64;
    next.correct_answers = progress.correct_answers.saturating_add(correct_credit);

    let minutes = outcome.minutes_spent;
    if minutes > 0 && (progress.fastest_session_minutes == 0 || minutes < progress.fastest_session_minutes) {
      next.fastest_session_minutes = minutes;
    }

    if outcome.used_ai_content {
      next.learn_sessions_used_today = progress.learn_sessions_used_today.saturating_add(1);
    }

    next
  }

  /// Pay out a goal's XP reward and latch it completed.
  ///
  /// Unknown or already completed goals leave the progress unchanged.
  pub fn claim_goal(&self, progress: &UserProgress, goal_id: &str) -> UserProgress {
    let mut next = progress.clone();

    let Some(goal) = next.daily_goals.iter_mut().find(|g| g.id == goal_id) else {
      return next;
    };
    if goal.completed {
      return next;
    }

    goal.completed = true;
    next.xp = next.xp.saturating_add(goal.xp_reward);
    next.level = advance_level(next.level, next.xp, self.level_cap);
    next
  }
}

/// Reset per-day counters when `today` differs from the last study day.
/// Hosts call this on load, before `apply_session`.
pub fn rollover_if_new_day(progress: &UserProgress, today: NaiveDate) -> UserProgress {
  let mut next = progress.clone();
  if progress.last_study_date != Some(today) {
    next.learn_sessions_used_today = 0;
  }
  next
}

/// Credit incomplete `create_deck` goals for one newly created deck
pub fn record_deck_created(progress: &UserProgress) -> UserProgress {
  let mut next = progress.clone();
  record_metric(&mut next.daily_goals, GoalMetric::CreateDeck, 1);
  next
}

/// `ProgressionEngine::apply_session` with the standard catalog
pub fn apply_session(
  progress: &UserProgress,
  outcome: &SessionOutcome,
  today: NaiveDate,
  multiplier: EventMultiplier,
) -> UserProgress {
  ProgressionEngine::default().apply_session(progress, outcome, today, multiplier)
}

/// `ProgressionEngine::claim_goal` with the default level cap
pub fn claim_goal(progress: &UserProgress, goal_id: &str) -> UserProgress {
  ProgressionEngine::default().claim_goal(progress, goal_id)
}
