//! Due-set selection over in-memory flashcards.

use chrono::{DateTime, Utc};

use crate::domain::Flashcard;

/// Cards eligible for review at `now`, in input order.
///
/// A card is due when it has never been scheduled or its due time has passed.
pub fn due_cards(cards: &[Flashcard], now: DateTime<Utc>) -> Vec<&Flashcard> {
  cards.iter().filter(|c| c.is_due(now)).collect()
}

/// Earliest due time among cards not yet due (for "come back at" hints)
pub fn next_due_at(cards: &[Flashcard], now: DateTime<Utc>) -> Option<DateTime<Utc>> {
  cards
    .iter()
    .filter_map(|c| c.review.as_ref())
    .map(|r| r.due_at)
    .filter(|due| *due > now)
    .min()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ReviewState;
  use chrono::{Duration, TimeZone};

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
  }

  fn card_due(id: &str, due_at: Option<DateTime<Utc>>) -> Flashcard {
    let mut card = Flashcard::new(id, "deck", "front", "back");
    card.review = due_at.map(|due_at| ReviewState {
      due_at,
      ..ReviewState::default()
    });
    card
  }

  #[test]
  fn test_due_cards_filters_and_keeps_order() {
    let cards = vec![
      card_due("a", Some(now() + Duration::days(1))),
      card_due("b", None),
      card_due("c", Some(now())),
      card_due("d", Some(now() - Duration::hours(3))),
      card_due("e", Some(now() + Duration::seconds(1))),
    ];

    let due: Vec<&str> = due_cards(&cards, now()).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(due, vec!["b", "c", "d"]);
  }

  #[test]
  fn test_due_cards_empty() {
    assert!(due_cards(&[], now()).is_empty());
  }

  #[test]
  fn test_next_due_at() {
    let soon = now() + Duration::hours(2);
    let cards = vec![
      card_due("a", Some(now() + Duration::days(3))),
      card_due("b", None),
      card_due("c", Some(soon)),
      card_due("d", Some(now() - Duration::days(1))),
    ];

    assert_eq!(next_due_at(&cards, now()), Some(soon));
  }

  #[test]
  fn test_next_due_at_none_when_all_due() {
    let cards = vec![card_due("a", None), card_due("b", Some(now()))];
    assert_eq!(next_due_at(&cards, now()), None);
  }
}
