pub mod card_selector;
pub mod sm2;

pub use card_selector::{due_cards, next_due_at};
pub use sm2::{calculate_sm2, schedule};
