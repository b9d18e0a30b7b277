pub mod card;
pub mod progress;
pub mod review;
pub mod rewards;

pub use card::{Flashcard, ReviewState, DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};
pub use progress::{Goal, GoalMetric, SessionOutcome, UserProgress};
pub use review::Rating;
pub use rewards::{ItemClass, RewardItemId, RewardTier, UnlockStatus};
