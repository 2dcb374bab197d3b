//! Daily progress tracker

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DailyProgress, Settings};

/// Work still needed today to meet both daily targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remaining {
    pub new_cards: u32,
    pub reviews: u32,
}

impl DailyProgress {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            new_cards_learned: 0,
            reviews_done: 0,
            date: today,
        }
    }

    /// Count one review; `was_new` means the card had never been reviewed
    /// before this one.
    pub fn record_review(&mut self, was_new: bool) {
        self.reviews_done = self.reviews_done.saturating_add(1);
        if was_new {
            self.new_cards_learned = self.new_cards_learned.saturating_add(1);
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    /// Reset when the counters belong to another day. Returns true if reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.date == today {
            return false;
        }
        self.reset(today);
        true
    }

    pub fn remaining(&self, settings: &Settings) -> Remaining {
        Remaining {
            new_cards: settings.new_cards_per_day.saturating_sub(self.new_cards_learned),
            reviews: settings.reviews_per_day.saturating_sub(self.reviews_done),
        }
    }
}

/// Both daily targets reached.
pub fn check_daily_completion(progress: &DailyProgress, settings: &Settings) -> bool {
    progress.new_cards_learned >= settings.new_cards_per_day
        && progress.reviews_done >= settings.reviews_per_day
}
