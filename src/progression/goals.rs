//! Daily goal accounting.

use crate::domain::{Goal, GoalMetric, SessionOutcome};

/// Final score a session needs to count towards a `perfect_score` goal
pub const PERFECT_SCORE_THRESHOLD: u64 = 1000;

/// Add `amount` to every incomplete goal tracking `metric`
pub fn record_metric(goals: &mut [Goal], metric: GoalMetric, amount: u32) {
  if amount == 0 {
    return;
  }
  for goal in goals.iter_mut().filter(|g| !g.completed && g.metric == metric) {
    goal.current = goal.current.saturating_add(amount);
  }
}

/// Fold one finished session into the goal list.
///
/// `create_deck` goals are not touched here; deck creation is reported
/// separately.
pub fn advance_goals(goals: &mut [Goal], outcome: &SessionOutcome, final_score: u64) {
  record_metric(goals, GoalMetric::ReviewCards, 1);
  record_metric(goals, GoalMetric::StudyTime, outcome.minutes_spent);
  if final_score >= PERFECT_SCORE_THRESHOLD {
    record_metric(goals, GoalMetric::PerfectScore, 1);
  }
}
