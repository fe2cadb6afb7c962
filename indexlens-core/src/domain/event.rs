use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::index::IndexId;

/// A narrative market event from `events.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub year: i32,
    pub description: String,
    #[serde(default)]
    pub details: String,
    /// Index codes the event applies to. Unknown codes are kept and simply
    /// never match.
    #[serde(default)]
    pub indices: Vec<String>,
}

impl NarrativeEvent {
    /// Events are anchored to January 1 of their year.
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, 1, 1)
    }

    pub fn applies_to(&self, index: IndexId) -> bool {
        self.indices.iter().any(|code| code == index.code())
    }
}
