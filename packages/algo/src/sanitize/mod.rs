//! Data Validation
//!
//! Numeric sanity checks applied before data enters the scheduler.
//!
//! Functions:
//! - Card, settings and stats validation (NaN / Inf, domain bounds)
//! - Whole-document validation for loads and imports

use std::collections::HashSet;

use crate::document::Document;
use crate::error::{AlgoError, AlgoResult};
use crate::types::{Card, Settings, Stats, MIN_EASE};

fn ensure_finite(field: &str, value: f64) -> AlgoResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AlgoError::invalid(format!("{field} must be finite, got {value}")))
    }
}

pub fn validate_card(card: &Card) -> AlgoResult<()> {
    ensure_finite("interval", card.interval)?;
    ensure_finite("ease", card.ease)?;
    if card.interval < 0.0 {
        return Err(AlgoError::invalid(format!(
            "card {} has negative interval {}",
            card.id, card.interval
        )));
    }
    if card.ease < MIN_EASE {
        return Err(AlgoError::invalid(format!(
            "card {} has ease {} below the {MIN_EASE} floor",
            card.id, card.ease
        )));
    }
    Ok(())
}

pub fn validate_settings(settings: &Settings) -> AlgoResult<()> {
    ensure_finite("easeBonus", settings.ease_bonus)?;
    ensure_finite("intervalModifier", settings.interval_modifier)?;
    ensure_finite("maxInterval", settings.max_interval)?;

    if settings.ease_bonus < 1.0 {
        return Err(AlgoError::invalid(format!(
            "easeBonus must be >= 1, got {}",
            settings.ease_bonus
        )));
    }
    if settings.interval_modifier < 0.0 {
        return Err(AlgoError::invalid(format!(
            "intervalModifier must be >= 0, got {}",
            settings.interval_modifier
        )));
    }
    if settings.max_interval <= 0.0 {
        return Err(AlgoError::invalid(format!(
            "maxInterval must be > 0, got {}",
            settings.max_interval
        )));
    }
    Ok(())
}

pub fn validate_stats(stats: &Stats) -> AlgoResult<()> {
    ensure_finite("averageEase", stats.average_ease)?;
    if stats.correct_reviews > stats.total_reviews {
        return Err(AlgoError::invalid(format!(
            "correctReviews ({}) exceeds totalReviews ({})",
            stats.correct_reviews, stats.total_reviews
        )));
    }
    Ok(())
}

/// Check a document before it replaces the live state.
///
/// Card ids must be unique across all decks, and every deck must be stored
/// under its own name.
pub fn validate_document(doc: &Document) -> AlgoResult<()> {
    validate_settings(&doc.settings)?;
    validate_stats(&doc.stats)?;

    let mut seen = HashSet::new();
    for (key, deck) in &doc.decks {
        if *key != deck.name {
            return Err(AlgoError::invalid(format!(
                "deck stored under \"{key}\" is named \"{}\"",
                deck.name
            )));
        }
        for card in &deck.cards {
            validate_card(card)?;
            if !seen.insert(card.id) {
                return Err(AlgoError::invalid(format!("duplicate card id {}", card.id)));
            }
        }
    }
    Ok(())
}
