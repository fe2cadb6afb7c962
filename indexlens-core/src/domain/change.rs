//! Constituent change records.
//!
//! A `rebalance` record without a ticker only carries aggregate counts. That
//! shape is resolved once, at parse time, into [`ChangeEntry::Summary`];
//! everything else is [`ChangeEntry::Itemized`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::deserialize_day;

/// Change type. Unknown types are kept verbatim for generic rendering; a
/// record without a type is `Other("")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeKind {
    Add,
    Remove,
    Rebalance,
    Other(String),
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Add => "add",
            ChangeKind::Remove => "remove",
            ChangeKind::Rebalance => "rebalance",
            ChangeKind::Other(raw) => raw,
        }
    }
}

impl Default for ChangeKind {
    fn default() -> Self {
        ChangeKind::Other(String::new())
    }
}

impl From<String> for ChangeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "add" => ChangeKind::Add,
            "remove" => ChangeKind::Remove,
            "rebalance" => ChangeKind::Rebalance,
            _ => ChangeKind::Other(raw),
        }
    }
}

impl From<ChangeKind> for String {
    fn from(kind: ChangeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record shape as it appears in `changes.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChangeRecord {
    #[serde(deserialize_with = "deserialize_day")]
    date: NaiveDate,
    #[serde(rename = "type", default)]
    kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, alias = "reason", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    added_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    removed_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

/// A change with per-ticker detail (or an unrecognised record).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemizedChange {
    pub date: NaiveDate,
    pub kind: ChangeKind,
    pub ticker: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
}

impl ItemizedChange {
    pub fn ticker_str(&self) -> &str {
        self.ticker.as_deref().unwrap_or("")
    }

    pub fn name_str(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// A rebalance reported only as aggregate counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryChange {
    pub date: NaiveDate,
    pub added_count: Option<u32>,
    pub removed_count: Option<u32>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawChangeRecord", into = "RawChangeRecord")]
pub enum ChangeEntry {
    Itemized(ItemizedChange),
    Summary(SummaryChange),
}

impl ChangeEntry {
    pub fn date(&self) -> NaiveDate {
        match self {
            ChangeEntry::Itemized(c) => c.date,
            ChangeEntry::Summary(s) => s.date,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            ChangeEntry::Itemized(c) => c.kind.clone(),
            ChangeEntry::Summary(_) => ChangeKind::Rebalance,
        }
    }

    pub fn notes(&self) -> Option<&str> {
        match self {
            ChangeEntry::Itemized(c) => c.notes.as_deref(),
            ChangeEntry::Summary(s) => s.notes.as_deref(),
        }
    }

    pub fn as_itemized(&self) -> Option<&ItemizedChange> {
        match self {
            ChangeEntry::Itemized(c) => Some(c),
            ChangeEntry::Summary(_) => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryChange> {
        match self {
            ChangeEntry::Summary(s) => Some(s),
            ChangeEntry::Itemized(_) => None,
        }
    }
}

impl From<RawChangeRecord> for ChangeEntry {
    fn from(raw: RawChangeRecord) -> Self {
        if raw.kind == ChangeKind::Rebalance && raw.ticker.is_none() {
            return ChangeEntry::Summary(SummaryChange {
                date: raw.date,
                added_count: raw.added_count,
                removed_count: raw.removed_count,
                description: raw.description,
                notes: raw.notes,
            });
        }
        ChangeEntry::Itemized(ItemizedChange {
            date: raw.date,
            kind: raw.kind,
            ticker: raw.ticker,
            name: raw.name,
            description: raw.description,
            notes: raw.notes,
            sector: raw.sector,
            country: raw.country,
        })
    }
}

impl From<ChangeEntry> for RawChangeRecord {
    fn from(entry: ChangeEntry) -> Self {
        match entry {
            ChangeEntry::Itemized(c) => RawChangeRecord {
                date: c.date,
                kind: c.kind,
                ticker: c.ticker,
                name: c.name,
                description: c.description,
                notes: c.notes,
                added_count: None,
                removed_count: None,
                sector: c.sector,
                country: c.country,
            },
            ChangeEntry::Summary(s) => RawChangeRecord {
                date: s.date,
                kind: ChangeKind::Rebalance,
                ticker: None,
                name: None,
                description: s.description,
                notes: s.notes,
                added_count: s.added_count,
                removed_count: s.removed_count,
                sector: None,
                country: None,
            },
        }
    }
}

/// Contents of `<index>/changes.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangesDocument {
    #[serde(default)]
    pub changes: Vec<ChangeEntry>,
}
