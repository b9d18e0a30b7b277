//! Reward items and their inventory status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two parallel reward tiers. Premium items share predicate shapes with
/// standard items but require higher thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardTier {
  Premium,
  Standard,
}

impl RewardTier {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Premium => "premium",
      Self::Standard => "standard",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "premium" => Some(Self::Premium),
      "standard" => Some(Self::Standard),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
  Insight,
  Jackpot,
  Safetynet,
  Oracle,
  Overdrive,
  Rewind,
  Void,
  Gemini,
  Phoenix,
  Xray,
}

impl ItemClass {
  pub const ALL: [ItemClass; 10] = [
    Self::Insight,
    Self::Jackpot,
    Self::Safetynet,
    Self::Oracle,
    Self::Overdrive,
    Self::Rewind,
    Self::Void,
    Self::Gemini,
    Self::Phoenix,
    Self::Xray,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Insight => "insight",
      Self::Jackpot => "jackpot",
      Self::Safetynet => "safetynet",
      Self::Oracle => "oracle",
      Self::Overdrive => "overdrive",
      Self::Rewind => "rewind",
      Self::Void => "void",
      Self::Gemini => "gemini",
      Self::Phoenix => "phoenix",
      Self::Xray => "xray",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.as_str() == s)
  }
}

/// Identifies one reward item, e.g. `premium.jackpot`.
///
/// Serialized as its dotted string form so it can key a JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RewardItemId {
  pub tier: RewardTier,
  pub class: ItemClass,
}

impl RewardItemId {
  pub const fn new(tier: RewardTier, class: ItemClass) -> Self {
    Self { tier, class }
  }

  pub const fn premium(class: ItemClass) -> Self {
    Self::new(RewardTier::Premium, class)
  }

  pub const fn standard(class: ItemClass) -> Self {
    Self::new(RewardTier::Standard, class)
  }

  pub fn parse(s: &str) -> Option<Self> {
    let (tier, class) = s.split_once('.')?;
    Some(Self::new(RewardTier::from_str(tier)?, ItemClass::from_str(class)?))
  }
}

impl fmt::Display for RewardItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.tier.as_str(), self.class.as_str())
  }
}

impl From<RewardItemId> for String {
  fn from(id: RewardItemId) -> Self {
    id.to_string()
  }
}

impl TryFrom<String> for RewardItemId {
  type Error = String;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    Self::parse(&s).ok_or_else(|| format!("unknown reward item: {}", s))
  }
}

/// Inventory status of a reward item.
///
/// Cycle: locked -> unlocked -> ready -> locked. The progression engine only
/// performs locked -> unlocked; the rest happens when the host arms or spends
/// an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockStatus {
  #[default]
  Locked,
  Unlocked,
  Ready,
}

impl UnlockStatus {
  /// True for statuses the engine must never overwrite
  pub fn is_held(&self) -> bool {
    matches!(self, Self::Unlocked | Self::Ready)
  }
}
