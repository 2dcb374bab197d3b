//! Review stats updater

use chrono::NaiveDate;

use crate::streak::streak;
use crate::types::{Grade, Stats};

/// Fold one review into the running stats.
///
/// `new_ease` is the card's ease *after* scheduling. The average is an
/// incremental mean weighted by the previous review count:
/// `(avg * total + new_ease) / (total + 1)`.
pub fn update_stats(stats: &Stats, grade: Grade, new_ease: f64, today: NaiveDate) -> Stats {
    let previous_total = stats.total_reviews as f64;
    let average_ease = (stats.average_ease * previous_total + new_ease) / (previous_total + 1.0);

    Stats {
        total_reviews: stats.total_reviews.saturating_add(1),
        correct_reviews: if grade.is_correct() {
            stats.correct_reviews.saturating_add(1)
        } else {
            stats.correct_reviews
        },
        average_ease,
        streak_days: streak(stats.last_review_date, stats.streak_days, today),
        last_review_date: Some(today),
    }
}
