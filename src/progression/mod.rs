pub mod engine;
pub mod goals;
pub mod leveling;
pub mod streak;
pub mod unlocks;

pub use engine::{
  apply_session, claim_goal, record_deck_created, rollover_if_new_day, ProgressionEngine,
};
pub use leveling::{level_for_xp, xp_threshold, xp_to_next_level, DEFAULT_LEVEL_CAP};
pub use unlocks::{Predicate, UnlockCatalog, UnlockContext, UnlockRule};
