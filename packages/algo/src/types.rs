//! Common Types and Constants
//!
//! Plain data records shared by every module and persisted as-is in the study
//! document (camelCase keys, `YYYY-MM-DD` dates).

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AlgoError;

// ==================== Constants ====================

/// Ease floor; no review may push a card below it
pub const MIN_EASE: f64 = 1.3;

/// Ease of a freshly created card
pub const DEFAULT_EASE: f64 = 2.5;

/// Interval of a fresh card and the reset value after `again`
pub const INITIAL_INTERVAL: f64 = 1.0;

/// Interval growth factor for `hard`
pub const HARD_INTERVAL_FACTOR: f64 = 1.2;

pub const AGAIN_EASE_PENALTY: f64 = 0.2;
pub const HARD_EASE_PENALTY: f64 = 0.15;
pub const EASY_EASE_GAIN: f64 = 0.15;

// ==================== Grade ====================

/// Recall difficulty reported after a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// Everything except `again` counts as a correct recall.
    pub fn is_correct(&self) -> bool {
        !matches!(self, Grade::Again)
    }
}

impl FromStr for Grade {
    type Err = AlgoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            other => Err(AlgoError::invalid(format!("unknown grade: {other:?}"))),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Cards & Decks ====================

/// A single flashcard and its scheduling state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: u64,
    pub front: String,
    pub back: String,
    /// Current interval in days, fractional
    pub interval: f64,
    pub ease: f64,
    /// Completed reviews
    pub reviews: u32,
    #[serde(with = "crate::date::day")]
    pub next_review: NaiveDate,
    #[serde(with = "crate::date::optional_day", default)]
    pub last_review: Option<NaiveDate>,
}

impl Card {
    /// A never-reviewed card, due immediately.
    pub fn new(id: u64, front: impl Into<String>, back: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            id,
            front: front.into(),
            back: back.into(),
            interval: INITIAL_INTERVAL,
            ease: DEFAULT_EASE,
            reviews: 0,
            next_review: today,
            last_review: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.reviews == 0
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review <= today
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn card(&self, card_id: u64) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == card_id)
    }

    pub fn card_mut(&mut self, card_id: u64) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| card.id == card_id)
    }

    /// Cards whose due date is today or earlier, in deck order.
    pub fn due_cards(&self, today: NaiveDate) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.is_due(today)).collect()
    }

    pub fn new_card_count(&self) -> usize {
        self.cards.iter().filter(|card| card.is_new()).count()
    }
}

// ==================== Settings ====================

/// Global study settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub new_cards_per_day: u32,
    pub reviews_per_day: u32,
    /// Extra multiplier applied on `easy`, >= 1
    pub ease_bonus: f64,
    /// Global interval scaling, >= 0
    pub interval_modifier: f64,
    /// Interval cap in days
    pub max_interval: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            new_cards_per_day: 20,
            reviews_per_day: 200,
            ease_bonus: 1.3,
            interval_modifier: 1.0,
            max_interval: 36500.0,
        }
    }
}

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_cards_per_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews_per_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ease_bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_modifier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_interval: Option<f64>,
}

impl SettingsPatch {
    pub fn apply(&self, settings: &Settings) -> Settings {
        Settings {
            new_cards_per_day: self.new_cards_per_day.unwrap_or(settings.new_cards_per_day),
            reviews_per_day: self.reviews_per_day.unwrap_or(settings.reviews_per_day),
            ease_bonus: self.ease_bonus.unwrap_or(settings.ease_bonus),
            interval_modifier: self.interval_modifier.unwrap_or(settings.interval_modifier),
            max_interval: self.max_interval.unwrap_or(settings.max_interval),
        }
    }
}

// ==================== Stats ====================

/// Running review aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_reviews: u64,
    pub correct_reviews: u64,
    pub average_ease: f64,
    pub streak_days: u32,
    #[serde(with = "crate::date::optional_day", default)]
    pub last_review_date: Option<NaiveDate>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_reviews: 0,
            correct_reviews: 0,
            average_ease: DEFAULT_EASE,
            streak_days: 0,
            last_review_date: None,
        }
    }
}

impl Stats {
    /// Share of reviews not graded `again`, 0 before the first review.
    pub fn accuracy(&self) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        self.correct_reviews as f64 / self.total_reviews as f64
    }
}

// ==================== Daily Progress ====================

/// Counters for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub new_cards_learned: u32,
    pub reviews_done: u32,
    #[serde(with = "crate::date::day")]
    pub date: NaiveDate,
}

impl Default for DailyProgress {
    /// Dated at the epoch so the first review always rolls it over.
    fn default() -> Self {
        Self {
            new_cards_learned: 0,
            reviews_done: 0,
            date: NaiveDate::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_parse() {
        assert_eq!("again".parse::<Grade>().unwrap(), Grade::Again);
        assert_eq!("easy".parse::<Grade>().unwrap(), Grade::Easy);
        assert!(matches!(
            "Good".parse::<Grade>(),
            Err(AlgoError::InvalidInput(_))
        ));
        assert!("".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Grade::Hard).unwrap(), "\"hard\"");
        assert!(serde_json::from_str::<Grade>("\"meh\"").is_err());
    }

    #[test]
    fn test_card_json_shape() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let card = Card::new(7, "香蕉", "Banana", today);
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["nextReview"], "2024-03-01");
        assert!(json["lastReview"].is_null());
        assert_eq!(json["ease"], 2.5);

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_card_accepts_legacy_timestamps() {
        let raw = r#"{
            "id": 1, "front": "a", "back": "b", "interval": 2.5, "ease": 2.5,
            "reviews": 1, "nextReview": "2024-03-03T00:00:00.000Z",
            "lastReview": "2024-03-01T00:00:00.000Z"
        }"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        assert_eq!(card.next_review, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(card.last_review, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_due_cards() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut deck = Deck::new("General");
        deck.cards.push(Card::new(1, "a", "A", today));
        let mut later = Card::new(2, "b", "B", today);
        later.next_review = today.succ_opt().unwrap();
        deck.cards.push(later);

        let due: Vec<u64> = deck.due_cards(today).iter().map(|c| c.id).collect();
        assert_eq!(due, vec![1]);
    }

    #[test]
    fn test_settings_patch_keeps_absent_fields() {
        let patch = SettingsPatch {
            ease_bonus: Some(1.5),
            ..Default::default()
        };
        let merged = patch.apply(&Settings::default());
        assert_eq!(merged.ease_bonus, 1.5);
        assert_eq!(merged.new_cards_per_day, 20);
        assert_eq!(merged.max_interval, 36500.0);
    }

    #[test]
    fn test_accuracy() {
        let stats = Stats {
            total_reviews: 4,
            correct_reviews: 3,
            ..Default::default()
        };
        assert_eq!(stats.accuracy(), 0.75);
        assert_eq!(Stats::default().accuracy(), 0.0);
    }
}
