//! Consecutive study-day streak

use chrono::NaiveDate;

use crate::date::days_between;

/// Streak after a review on `today`, given the previous review day.
///
/// - no previous review: the streak starts at 1
/// - same day: unchanged
/// - the next day: +1
/// - any larger gap, or a previous day in the future: back to 1
pub fn streak(last_review_date: Option<NaiveDate>, current_streak: u32, today: NaiveDate) -> u32 {
    let Some(last) = last_review_date else {
        return 1;
    };

    match days_between(last, today) {
        0 => current_streak,
        1 => current_streak.saturating_add(1),
        _ => 1,
    }
}
