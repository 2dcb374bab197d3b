//! The study document
//!
//! Everything the app persists lives in one JSON document:
//!
//! ```text
//! { decks: { [name]: Deck }, settings, stats, dailyProgress }
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AlgoError, AlgoResult};
use crate::sanitize::validate_document;
use crate::types::{Card, DailyProgress, Deck, Settings, Stats};

pub const DEFAULT_DECK: &str = "General";

const STARTER_CARDS: [(&str, &str); 3] = [("苹果", "Apple"), ("香蕉", "Banana"), ("橙子", "Orange")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub decks: BTreeMap<String, Deck>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub daily_progress: DailyProgress,
}

impl Document {
    /// A document with no decks and default settings.
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            decks: BTreeMap::new(),
            settings: Settings::default(),
            stats: Stats::default(),
            daily_progress: DailyProgress::new(today),
        }
    }

    /// First-run document: a `General` deck with a few starter cards.
    pub fn starter(today: NaiveDate) -> Self {
        let mut doc = Self::empty(today);
        let mut deck = Deck::new(DEFAULT_DECK);
        for (id, (front, back)) in (1u64..).zip(STARTER_CARDS) {
            deck.cards.push(Card::new(id, front, back, today));
        }
        doc.decks.insert(DEFAULT_DECK.to_string(), deck);
        doc
    }

    /// Parse and validate; a document that fails either is refused.
    pub fn from_json(raw: &str) -> AlgoResult<Self> {
        let doc: Self = serde_json::from_str(raw)
            .map_err(|err| AlgoError::invalid(format!("malformed document: {err}")))?;
        validate_document(&doc)?;
        Ok(doc)
    }

    pub fn to_json_pretty(&self) -> AlgoResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| AlgoError::invalid(format!("document not serializable: {err}")))
    }

    pub fn deck(&self, name: &str) -> AlgoResult<&Deck> {
        self.decks
            .get(name)
            .ok_or_else(|| AlgoError::DeckNotFound(name.to_string()))
    }

    pub fn deck_mut(&mut self, name: &str) -> AlgoResult<&mut Deck> {
        self.decks
            .get_mut(name)
            .ok_or_else(|| AlgoError::DeckNotFound(name.to_string()))
    }

    pub fn card(&self, deck: &str, card_id: u64) -> AlgoResult<&Card> {
        self.deck(deck)?
            .card(card_id)
            .ok_or_else(|| AlgoError::CardNotFound {
                deck: deck.to_string(),
                card_id,
            })
    }

    pub fn card_count(&self) -> usize {
        self.decks.values().map(|deck| deck.cards.len()).sum()
    }

    /// One past the largest id in any deck.
    pub fn next_card_id(&self) -> AlgoResult<u64> {
        match self
            .decks
            .values()
            .flat_map(|deck| deck.cards.iter().map(|card| card.id))
            .max()
        {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| AlgoError::invalid("card ids exhausted")),
        }
    }
}
