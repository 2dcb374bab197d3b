//! Day-granularity dates
//!
//! Every date in the study document is a calendar day in UTC. Values are held
//! as [`NaiveDate`] so no arithmetic ever happens below day granularity.
//!
//! Serialized form is `YYYY-MM-DD`. Older documents stored full ISO
//! timestamps (`2024-03-01T00:00:00.000Z`); those are accepted on input and
//! truncated to their UTC date.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::error::{AlgoError, AlgoResult};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Current calendar day in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse `YYYY-MM-DD`, falling back to an RFC 3339 timestamp.
pub fn parse_day(raw: &str) -> AlgoResult<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, DAY_FORMAT) {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|ts| ts.with_timezone(&Utc).date_naive())
        .map_err(|_| AlgoError::invalid(format!("not a date: {raw:?}")))
}

/// Advance `day` by the whole-day part of `interval`.
///
/// The fractional part stays in the card's float interval; only the due date
/// is truncated. Saturates at [`NaiveDate::MAX`].
pub fn add_interval(day: NaiveDate, interval: f64) -> NaiveDate {
    let whole = interval.max(0.0).floor() as u64;
    day.checked_add_days(Days::new(whole))
        .unwrap_or(NaiveDate::MAX)
}

/// Signed number of whole days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// `#[serde(with = "crate::date::day")]`
pub mod day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_day(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_day(&raw).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "crate::date::optional_day")]`, `null` for absent.
pub mod optional_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(day) => serializer.serialize_some(&super::format_day(*day)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => super::parse_day(text)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
