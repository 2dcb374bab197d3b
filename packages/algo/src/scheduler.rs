//! SM-2 style scheduler
//!
//! | grade | interval                                   | ease                  |
//! |-------|--------------------------------------------|-----------------------|
//! | again | `1`                                        | `max(1.3, ease-0.2)`  |
//! | hard  | `interval * 1.2 * modifier`                | `max(1.3, ease-0.15)` |
//! | good  | `interval * ease * modifier`               | unchanged             |
//! | easy  | `interval * ease * easeBonus * modifier`   | `ease + 0.15`         |
//!
//! The interval is then capped at `maxInterval`. The multiplier is computed
//! first and applied to the interval last, so results match the reference
//! numbers exactly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::add_interval;
use crate::error::AlgoResult;
use crate::sanitize::{validate_card, validate_settings};
use crate::types::{
    Card, Grade, Settings, AGAIN_EASE_PENALTY, EASY_EASE_GAIN, HARD_EASE_PENALTY,
    HARD_INTERVAL_FACTOR, INITIAL_INTERVAL, MIN_EASE,
};

/// New scheduling fields for a reviewed card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub interval: f64,
    pub ease: f64,
    pub reviews: u32,
    #[serde(with = "crate::date::day")]
    pub next_review: NaiveDate,
    #[serde(with = "crate::date::day")]
    pub last_review: NaiveDate,
}

impl CardUpdate {
    pub fn apply(&self, card: &mut Card) {
        card.interval = self.interval;
        card.ease = self.ease;
        card.reviews = self.reviews;
        card.next_review = self.next_review;
        card.last_review = Some(self.last_review);
    }
}

/// Compute the card's next state after a review graded `grade` on `today`.
///
/// Fails only with `InvalidInput` for non-finite card numerics or settings
/// outside their domain.
pub fn schedule(
    card: &Card,
    grade: Grade,
    settings: &Settings,
    today: NaiveDate,
) -> AlgoResult<CardUpdate> {
    validate_card(card)?;
    validate_settings(settings)?;

    let (interval, ease) = next_interval_and_ease(card.interval, card.ease, grade, settings);
    let interval = interval.min(settings.max_interval);

    Ok(CardUpdate {
        interval,
        ease,
        reviews: card.reviews.saturating_add(1),
        next_review: add_interval(today, interval),
        last_review: today,
    })
}

fn next_interval_and_ease(interval: f64, ease: f64, grade: Grade, settings: &Settings) -> (f64, f64) {
    let modifier = settings.interval_modifier;
    match grade {
        Grade::Again => (INITIAL_INTERVAL, (ease - AGAIN_EASE_PENALTY).max(MIN_EASE)),
        Grade::Hard => (
            interval * (HARD_INTERVAL_FACTOR * modifier),
            (ease - HARD_EASE_PENALTY).max(MIN_EASE),
        ),
        Grade::Good => (interval * (ease * modifier), ease),
        Grade::Easy => (
            interval * (ease * settings.ease_bonus * modifier),
            ease + EASY_EASE_GAIN,
        ),
    }
}
