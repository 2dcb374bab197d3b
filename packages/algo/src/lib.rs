//! # flashdeck-algo - flashcard study core
//!
//! Pure Rust implementation of the study bookkeeping behind flashdeck:
//!
//! - **Scheduler** - SM-2 style interval / ease update from a recall grade
//! - **Stats** - running review aggregates (accuracy, average ease)
//! - **Streak** - consecutive study-day counter
//! - **Daily progress** - per-day counters and the completion check
//! - **Reducer** - explicit state transitions over the whole document
//!
//! ## Module layout
//!
//! - [`types`] - data model and constants
//! - [`date`] - day-granularity date helpers (`YYYY-MM-DD`)
//! - [`scheduler`] - next interval / ease / due date
//! - [`stats`] - stats updater
//! - [`streak`] - streak calculator
//! - [`progress`] - daily progress tracker
//! - [`document`] - the persisted document and its defaults
//! - [`reducer`] - actions and the transition function
//! - [`sanitize`] - numeric validation
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use flashdeck_algo::{schedule, Card, Grade, Settings};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let card = Card::new(1, "苹果", "Apple", today);
//! let update = schedule(&card, Grade::Good, &Settings::default(), today).unwrap();
//! assert_eq!(update.interval, 2.5);
//! assert_eq!(update.next_review, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod date;
pub mod document;
pub mod error;
pub mod progress;
pub mod reducer;
pub mod sanitize;
pub mod scheduler;
pub mod stats;
pub mod streak;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use document::Document;
pub use error::{AlgoError, AlgoResult};
pub use progress::{check_daily_completion, Remaining};
pub use reducer::{reduce, Action};
pub use scheduler::{schedule, CardUpdate};
pub use stats::update_stats;
pub use streak::streak;
