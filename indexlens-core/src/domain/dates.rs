//! Lenient calendar-date parsing for document fields.
//!
//! Documents mix `2024-03-18`, `2024-03-18 09:30:00` and ISO timestamps.
//! Only the calendar day matters, so the first ten characters are parsed as
//! `%Y-%m-%d`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Parse the leading `YYYY-MM-DD` of a date or datetime string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// `YYYY/MM/DD`, the label used on every dated card. Absent dates render `--`.
pub fn format_day(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y/%m/%d").to_string(),
        None => "--".to_string(),
    }
}

pub fn deserialize_day<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{raw}'")))
}

/// Missing, null, blank or unparseable values all become `None`.
pub fn deserialize_optional_day<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_day))
}
