//! Property-Based Tests for the scheduler and streak calculator
//!
//! Tests the following invariants:
//! - Ease never drops below the floor, interval stays in (0, maxInterval]
//! - Stored cards outside the valid domain are refused, never scheduled
//! - `again` always resets the interval to exactly 1
//! - `easy` raises ease and gives the longest interval of the four grades
//! - Streak arithmetic over arbitrary day gaps
//! - Running average ease equals the plain mean of post-review eases

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use flashdeck_algo::{
    reduce, schedule, streak, update_stats, Action, AlgoError, Card, Document, Grade, Settings,
    Stats, MIN_EASE,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn arb_grade() -> impl Strategy<Value = Grade> {
    prop_oneof![
        Just(Grade::Again),
        Just(Grade::Hard),
        Just(Grade::Good),
        Just(Grade::Easy),
    ]
}

fn arb_card() -> impl Strategy<Value = Card> {
    (
        (0.01f64..=20000.0f64), // interval
        (MIN_EASE..=5.0f64),    // ease
        (0u32..=500u32),        // reviews
    )
        .prop_map(|(interval, ease, reviews)| {
            let mut card = Card::new(1, "front", "back", base_day());
            card.interval = interval;
            card.ease = ease;
            card.reviews = reviews;
            card
        })
}

/// Any stored ease, including values a hand-edited import might carry.
fn arb_stored_ease() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (-5.0f64..=5.0f64),
        1 => (0.0f64..MIN_EASE),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

fn arb_settings() -> impl Strategy<Value = Settings> {
    (
        (1.0f64..=3.0f64),       // ease_bonus
        (0.1f64..=3.0f64),       // interval_modifier
        (1.0f64..=36500.0f64),   // max_interval
    )
        .prop_map(|(ease_bonus, interval_modifier, max_interval)| Settings {
            ease_bonus,
            interval_modifier,
            max_interval,
            ..Settings::default()
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_ease_floor_and_interval_bounds(
        card in arb_card(),
        grade in arb_grade(),
        settings in arb_settings(),
    ) {
        let update = schedule(&card, grade, &settings, base_day()).unwrap();
        prop_assert!(update.ease >= MIN_EASE);
        prop_assert!(update.interval > 0.0);
        prop_assert!(update.interval <= settings.max_interval);
        prop_assert_eq!(update.reviews, card.reviews + 1);
        prop_assert!(update.next_review >= base_day());
        prop_assert_eq!(update.last_review, base_day());
    }

    #[test]
    fn prop_any_stored_ease_respects_floor(
        ease in arb_stored_ease(),
        grade in arb_grade(),
        settings in arb_settings(),
    ) {
        let mut card = Card::new(1, "front", "back", base_day());
        card.ease = ease;

        match schedule(&card, grade, &settings, base_day()) {
            Ok(update) => {
                prop_assert!(ease.is_finite() && ease >= MIN_EASE);
                prop_assert!(update.ease >= MIN_EASE);
            }
            Err(err) => {
                prop_assert!(!ease.is_finite() || ease < MIN_EASE);
                prop_assert!(matches!(err, AlgoError::InvalidInput(_)));
            }
        }
    }

    #[test]
    fn prop_load_refuses_ease_below_floor(ease in 0.0f64..MIN_EASE, card_idx in 0usize..3) {
        let doc = Document::starter(base_day());
        let mut imported = doc.clone();
        imported.decks.get_mut("General").unwrap().cards[card_idx].ease = ease;

        let result = reduce(&doc, Action::LoadState(Box::new(imported)), base_day());
        prop_assert!(matches!(result, Err(AlgoError::InvalidInput(_))));
    }

    #[test]
    fn prop_again_resets_interval(card in arb_card(), settings in arb_settings()) {
        let update = schedule(&card, Grade::Again, &settings, base_day()).unwrap();
        prop_assert_eq!(update.interval, 1.0f64.min(settings.max_interval));
    }

    #[test]
    fn prop_easy_dominates(
        interval in 1.0f64..=5000.0f64,
        ease in MIN_EASE..=5.0f64,
        ease_bonus in 1.0f64..=3.0f64,
        interval_modifier in 1.0f64..=3.0f64,
    ) {
        let mut card = Card::new(1, "front", "back", base_day());
        card.interval = interval;
        card.ease = ease;
        let settings = Settings { ease_bonus, interval_modifier, ..Settings::default() };

        let easy = schedule(&card, Grade::Easy, &settings, base_day()).unwrap();
        prop_assert!(easy.ease > card.ease);
        for grade in Grade::ALL {
            let other = schedule(&card, grade, &settings, base_day()).unwrap();
            prop_assert!(easy.interval >= other.interval, "{grade} beat easy");
        }
    }

    #[test]
    fn prop_streak_by_gap(current in 0u32..=10_000u32, gap in 0u64..=400u64) {
        let last = base_day();
        let today = last.checked_add_days(Days::new(gap)).unwrap();
        let expected = match gap {
            0 => current,
            1 => current + 1,
            _ => 1,
        };
        prop_assert_eq!(streak(Some(last), current, today), expected);
        prop_assert_eq!(streak(None, current, today), 1);
    }

    #[test]
    fn prop_average_ease_is_mean(eases in prop::collection::vec(MIN_EASE..=5.0f64, 1..50)) {
        let mut stats = Stats::default();
        for ease in &eases {
            stats = update_stats(&stats, Grade::Good, *ease, base_day());
        }
        let mean = eases.iter().sum::<f64>() / eases.len() as f64;
        prop_assert!((stats.average_ease - mean).abs() < 1e-9);
        prop_assert_eq!(stats.total_reviews, eases.len() as u64);
    }
}
