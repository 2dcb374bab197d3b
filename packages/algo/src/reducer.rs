//! State transitions
//!
//! `reduce` takes the current document by reference and returns the next one.
//! The input is never modified, so a failed transition leaves the caller's
//! state exactly as it was.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::{AlgoError, AlgoResult};
use crate::sanitize::{validate_document, validate_settings};
use crate::scheduler::schedule;
use crate::stats::update_stats;
use crate::types::{Card, Deck, Grade, SettingsPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    AddDeck {
        name: String,
    },
    AddCard {
        #[serde(rename = "deckName")]
        deck_name: String,
        front: String,
        back: String,
    },
    /// One review: schedule the card, fold it into stats and daily progress.
    ReviewCard {
        #[serde(rename = "deckName")]
        deck_name: String,
        #[serde(rename = "cardId")]
        card_id: u64,
        grade: Grade,
    },
    UpdateSettings(SettingsPatch),
    ResetDailyProgress,
    LoadState(Box<Document>),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddDeck { .. } => "add_deck",
            Action::AddCard { .. } => "add_card",
            Action::ReviewCard { .. } => "review_card",
            Action::UpdateSettings(_) => "update_settings",
            Action::ResetDailyProgress => "reset_daily_progress",
            Action::LoadState(_) => "load_state",
        }
    }
}

pub fn reduce(doc: &Document, action: Action, today: NaiveDate) -> AlgoResult<Document> {
    match action {
        Action::AddDeck { name } => add_deck(doc, name),
        Action::AddCard {
            deck_name,
            front,
            back,
        } => add_card(doc, &deck_name, front, back, today),
        Action::ReviewCard {
            deck_name,
            card_id,
            grade,
        } => review_card(doc, &deck_name, card_id, grade, today),
        Action::UpdateSettings(patch) => {
            let settings = patch.apply(&doc.settings);
            validate_settings(&settings)?;
            let mut next = doc.clone();
            next.settings = settings;
            Ok(next)
        }
        Action::ResetDailyProgress => {
            let mut next = doc.clone();
            next.daily_progress.reset(today);
            Ok(next)
        }
        Action::LoadState(loaded) => {
            validate_document(&loaded)?;
            Ok(*loaded)
        }
    }
}

fn add_deck(doc: &Document, name: String) -> AlgoResult<Document> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AlgoError::invalid("deck name must not be empty"));
    }

    let mut next = doc.clone();
    next.decks
        .entry(name.to_string())
        .or_insert_with(|| Deck::new(name));
    Ok(next)
}

fn add_card(
    doc: &Document,
    deck_name: &str,
    front: String,
    back: String,
    today: NaiveDate,
) -> AlgoResult<Document> {
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(AlgoError::invalid("card front and back must not be empty"));
    }

    let mut next = doc.clone();
    let id = next.next_card_id()?;
    next.deck_mut(deck_name)?
        .cards
        .push(Card::new(id, front, back, today));
    Ok(next)
}

fn review_card(
    doc: &Document,
    deck_name: &str,
    card_id: u64,
    grade: Grade,
    today: NaiveDate,
) -> AlgoResult<Document> {
    let card = doc.card(deck_name, card_id)?;
    let update = schedule(card, grade, &doc.settings, today)?;
    let was_new = card.is_new();

    let mut next = doc.clone();
    next.deck_mut(deck_name)?
        .card_mut(card_id)
        .ok_or_else(|| AlgoError::CardNotFound {
            deck: deck_name.to_string(),
            card_id,
        })
        .map(|card| update.apply(card))?;

    next.stats = update_stats(&doc.stats, grade, update.ease, today);
    next.daily_progress.roll_over(today);
    next.daily_progress.record_review(was_new);
    Ok(next)
}
