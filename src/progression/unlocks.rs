//! Declarative unlock catalog.
//!
//! Each reward item is paired with a predicate over the post-session
//! aggregates. Adding an item means adding a row, not touching control flow.

use std::collections::BTreeMap;

use crate::domain::{ItemClass, RewardItemId, UnlockStatus};

/// Aggregates an unlock predicate is evaluated against, after the session's
/// streak, XP and level updates have been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnlockContext {
  pub final_score: u64,
  pub minutes_spent: u32,
  pub is_perfect_run: bool,
  pub used_ai_content: bool,
  pub deck_count: u32,
  pub streak_days: u32,
  pub level: u32,
  pub cumulative_questions: u64,
  pub cumulative_cards_reviewed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
  PerfectRun,
  UsedAiContent,
  MinScore(u64),
  MinStreak(u32),
  MinMinutes(u32),
  MinLevel(u32),
  MinQuestions(u64),
  MinDecks(u32),
  MinCardsReviewed(u64),
}

impl Predicate {
  pub fn holds(&self, ctx: &UnlockContext) -> bool {
    match *self {
      Self::PerfectRun => ctx.is_perfect_run,
      Self::UsedAiContent => ctx.used_ai_content,
      Self::MinScore(n) => ctx.final_score >= n,
      Self::MinStreak(n) => ctx.streak_days >= n,
      Self::MinMinutes(n) => ctx.minutes_spent >= n,
      Self::MinLevel(n) => ctx.level >= n,
      Self::MinQuestions(n) => ctx.cumulative_questions >= n,
      Self::MinDecks(n) => ctx.deck_count >= n,
      Self::MinCardsReviewed(n) => ctx.cumulative_cards_reviewed >= n,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRule {
  pub item: RewardItemId,
  pub predicate: Predicate,
}

impl UnlockRule {
  pub const fn new(item: RewardItemId, predicate: Predicate) -> Self {
    Self { item, predicate }
  }
}

/// (class, premium predicate, standard predicate)
const STANDARD_RULES: [(ItemClass, Predicate, Predicate); 10] = [
  (ItemClass::Insight, Predicate::PerfectRun, Predicate::MinQuestions(10)),
  (ItemClass::Jackpot, Predicate::MinScore(500), Predicate::MinScore(100)),
  (ItemClass::Safetynet, Predicate::MinStreak(7), Predicate::MinStreak(3)),
  (ItemClass::Oracle, Predicate::MinMinutes(30), Predicate::MinMinutes(5)),
  (ItemClass::Overdrive, Predicate::MinLevel(5), Predicate::MinLevel(2)),
  (ItemClass::Rewind, Predicate::MinQuestions(50), Predicate::MinQuestions(10)),
  (ItemClass::Void, Predicate::MinDecks(3), Predicate::MinDecks(1)),
  (ItemClass::Gemini, Predicate::UsedAiContent, Predicate::UsedAiContent),
  (ItemClass::Phoenix, Predicate::MinStreak(5), Predicate::MinStreak(2)),
  (ItemClass::Xray, Predicate::MinCardsReviewed(100), Predicate::MinCardsReviewed(20)),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockCatalog {
  rules: Vec<UnlockRule>,
}

impl UnlockCatalog {
  pub fn new(rules: Vec<UnlockRule>) -> Self {
    Self { rules }
  }

  /// The built-in premium and standard item tiers
  pub fn standard() -> Self {
    let rules = STANDARD_RULES
      .iter()
      .flat_map(|&(class, premium, standard)| {
        [
          UnlockRule::new(RewardItemId::premium(class), premium),
          UnlockRule::new(RewardItemId::standard(class), standard),
        ]
      })
      .collect();
    Self::new(rules)
  }

  pub fn with_rule(mut self, rule: UnlockRule) -> Self {
    self.rules.push(rule);
    self
  }

  pub fn rules(&self) -> &[UnlockRule] {
    &self.rules
  }

  /// Mark every locked item whose predicate holds as unlocked.
  ///
  /// Items already unlocked or ready are skipped, so statuses only move
  /// forward. Returns the newly unlocked items in catalog order.
  pub fn evaluate(
    &self,
    ctx: &UnlockContext,
    inventory: &mut BTreeMap<RewardItemId, UnlockStatus>,
  ) -> Vec<RewardItemId> {
    let mut unlocked = Vec::new();

    for rule in &self.rules {
      let held = inventory.get(&rule.item).is_some_and(|s| s.is_held());
      if held || !rule.predicate.holds(ctx) {
        continue;
      }
      inventory.insert(rule.item, UnlockStatus::Unlocked);
      unlocked.push(rule.item);
    }

    unlocked
  }
}

impl Default for UnlockCatalog {
  fn default() -> Self {
    Self::standard()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn premium(class: ItemClass) -> RewardItemId {
    RewardItemId::premium(class)
  }

  fn standard(class: ItemClass) -> RewardItemId {
    RewardItemId::standard(class)
  }

  #[test]
  fn test_standard_catalog_covers_both_tiers() {
    let catalog = UnlockCatalog::standard();
    assert_eq!(catalog.rules().len(), 20);

    for class in ItemClass::ALL {
      assert!(catalog.rules().iter().any(|r| r.item == premium(class)));
      assert!(catalog.rules().iter().any(|r| r.item == standard(class)));
    }
  }

  #[test]
  fn test_predicates_at_boundaries() {
    let ctx = UnlockContext {
      final_score: 500,
      minutes_spent: 30,
      streak_days: 7,
      level: 5,
      deck_count: 3,
      cumulative_questions: 50,
      cumulative_cards_reviewed: 100,
      ..Default::default()
    };

    assert!(Predicate::MinScore(500).holds(&ctx));
    assert!(!Predicate::MinScore(501).holds(&ctx));
    assert!(Predicate::MinMinutes(30).holds(&ctx));
    assert!(Predicate::MinStreak(7).holds(&ctx));
    assert!(Predicate::MinLevel(5).holds(&ctx));
    assert!(Predicate::MinDecks(3).holds(&ctx));
    assert!(Predicate::MinQuestions(50).holds(&ctx));
    assert!(Predicate::MinCardsReviewed(100).holds(&ctx));
    assert!(!Predicate::PerfectRun.holds(&ctx));
    assert!(!Predicate::UsedAiContent.holds(&ctx));
  }

  #[test]
  fn test_evaluate_unlocks_matching_items() {
    let catalog = UnlockCatalog::standard();
    let ctx = UnlockContext {
      final_score: 150,
      minutes_spent: 6,
      streak_days: 1,
      level: 1,
      ..Default::default()
    };
    let mut inventory = BTreeMap::new();

    let unlocked = catalog.evaluate(&ctx, &mut inventory);

    assert_eq!(unlocked, vec![standard(ItemClass::Jackpot), standard(ItemClass::Oracle)]);
    assert_eq!(inventory.get(&standard(ItemClass::Jackpot)), Some(&UnlockStatus::Unlocked));
    assert!(!inventory.contains_key(&premium(ItemClass::Jackpot)));
  }

  #[test]
  fn test_evaluate_never_downgrades() {
    let catalog = UnlockCatalog::standard();
    let ctx = UnlockContext {
      used_ai_content: true,
      ..Default::default()
    };
    let mut inventory = BTreeMap::new();
    inventory.insert(premium(ItemClass::Gemini), UnlockStatus::Ready);
    inventory.insert(standard(ItemClass::Gemini), UnlockStatus::Locked);
    inventory.insert(premium(ItemClass::Xray), UnlockStatus::Unlocked);

    let unlocked = catalog.evaluate(&ctx, &mut inventory);

    assert_eq!(unlocked, vec![standard(ItemClass::Gemini)]);
    assert_eq!(inventory.get(&premium(ItemClass::Gemini)), Some(&UnlockStatus::Ready));
    assert_eq!(inventory.get(&premium(ItemClass::Xray)), Some(&UnlockStatus::Unlocked));
  }

  #[test]
  fn test_custom_rule() {
    let catalog = UnlockCatalog::new(Vec::new())
      .with_rule(UnlockRule::new(premium(ItemClass::Phoenix), Predicate::MinLevel(3)));
    let mut inventory = BTreeMap::new();

    let ctx = UnlockContext { level: 3, ..Default::default() };
    assert_eq!(catalog.evaluate(&ctx, &mut inventory), vec![premium(ItemClass::Phoenix)]);
  }
}
