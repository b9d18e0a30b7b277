//! Geometric leveling curve.
//!
//! Advancing from level L to L+1 requires `1000 * (2^L - 1)` cumulative XP:
//! 1000 for level 2, 3000 for level 3, 7000 for level 4, and so on.

/// XP needed to leave level 1
pub const BASE_LEVEL_XP: u64 = 1000;

/// Upper bound on levels, keeps the level-up loop finite for huge XP values
pub const DEFAULT_LEVEL_CAP: u32 = 1000;

/// Cumulative XP at which `level` advances to `level + 1`.
/// Saturates at `u64::MAX` once the curve leaves the integer range.
pub fn xp_threshold(level: u32) -> u64 {
  match 1u64.checked_shl(level) {
    Some(pow) => BASE_LEVEL_XP.saturating_mul(pow - 1),
    None => u64::MAX,
  }
}

/// Raise `level` while `xp` meets the current threshold. Never lowers it.
pub fn advance_level(level: u32, xp: u64, level_cap: u32) -> u32 {
  let mut level = level.max(1);
  while level < level_cap && xp >= xp_threshold(level) {
    level += 1;
  }
  level
}

pub fn level_for_xp(xp: u64, level_cap: u32) -> u32 {
  advance_level(1, xp, level_cap)
}

/// XP still missing before the next level-up
pub fn xp_to_next_level(level: u32, xp: u64) -> u64 {
  xp_threshold(level).saturating_sub(xp)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_thresholds() {
    assert_eq!(xp_threshold(1), 1000);
    assert_eq!(xp_threshold(2), 3000);
    assert_eq!(xp_threshold(3), 7000);
    assert_eq!(xp_threshold(10), 1_023_000);
  }

  #[test]
  fn test_threshold_saturates() {
    assert!(xp_threshold(54) > xp_threshold(53));
    assert_eq!(xp_threshold(55), u64::MAX);
    assert_eq!(xp_threshold(64), u64::MAX);
    assert_eq!(xp_threshold(500), u64::MAX);
  }

  #[test]
  fn test_level_for_xp() {
    assert_eq!(level_for_xp(0, DEFAULT_LEVEL_CAP), 1);
    assert_eq!(level_for_xp(999, DEFAULT_LEVEL_CAP), 1);
    assert_eq!(level_for_xp(1000, DEFAULT_LEVEL_CAP), 2);
    assert_eq!(level_for_xp(2999, DEFAULT_LEVEL_CAP), 2);
    assert_eq!(level_for_xp(3000, DEFAULT_LEVEL_CAP), 3);
    assert_eq!(level_for_xp(7000, DEFAULT_LEVEL_CAP), 4);
  }

  #[test]
  fn test_huge_xp_terminates_at_cap() {
    assert_eq!(level_for_xp(u64::MAX, DEFAULT_LEVEL_CAP), DEFAULT_LEVEL_CAP);
    assert_eq!(level_for_xp(u64::MAX, 10), 10);
  }

  #[test]
  fn test_advance_never_lowers() {
    // A stored level above what XP supports is left alone
    assert_eq!(advance_level(5, 0, DEFAULT_LEVEL_CAP), 5);
    assert_eq!(advance_level(0, 0, DEFAULT_LEVEL_CAP), 1);
  }

  #[test]
  fn test_xp_to_next_level() {
    assert_eq!(xp_to_next_level(1, 600), 400);
    assert_eq!(xp_to_next_level(2, 1000), 2000);
    assert_eq!(xp_to_next_level(1, 5000), 0);
  }
}
