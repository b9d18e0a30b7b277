use chrono::NaiveDate;

/// Streak after studying on `today`.
///
/// Same day: unchanged. Day after the last session: +1. Anything else,
/// including a first session or a last date in the future: restart at 1.
pub fn next_streak(current: u32, last_study_date: Option<NaiveDate>, today: NaiveDate) -> u32 {
  match last_study_date {
    Some(last) if last == today => current,
    Some(last) if today.pred_opt() == Some(last) => current.saturating_add(1),
    _ => 1,
  }
}
