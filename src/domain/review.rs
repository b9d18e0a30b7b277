use serde::{Deserialize, Serialize};

/// How well the user recalled a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
  Again, // Forgot
  Hard,  // Recalled with serious difficulty
  Good,  // Recalled after some hesitation
  Easy,  // Instant recall
}

impl Rating {
  pub const ALL: [Rating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Again => "again",
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "again" => Some(Self::Again),
      "hard" => Some(Self::Hard),
      "good" => Some(Self::Good),
      "easy" => Some(Self::Easy),
      _ => None,
    }
  }

  /// Map the 1-4 answer keys to ratings
  pub fn from_key(c: char) -> Option<Self> {
    match c {
      '1' => Some(Self::Again),
      '2' => Some(Self::Hard),
      '3' => Some(Self::Good),
      '4' => Some(Self::Easy),
      _ => None,
    }
  }

  /// SM-2 quality score. "Again" has none: it never feeds the ease formula.
  pub fn quality(&self) -> Option<u8> {
    match self {
      Self::Again => None,
      Self::Hard => Some(3),
      Self::Good => Some(4),
      Self::Easy => Some(5),
    }
  }

  pub fn is_lapse(&self) -> bool {
    matches!(self, Self::Again)
  }
}
