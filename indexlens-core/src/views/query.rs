//! Search, sort and cap over the constituent list.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::ConstituentRecord;
use crate::params::{SortColumn, SortDirection, SortSpec};

pub const DEFAULT_DISPLAY_CAP: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<'a> {
    pub rows: Vec<&'a ConstituentRecord>,
    /// Rows matched by the search but cut by the display cap.
    pub truncated_count: usize,
}

impl QueryResult<'_> {
    pub fn matched(&self) -> usize {
        self.rows.len() + self.truncated_count
    }
}

/// Case-insensitive substring match on ticker or name. An empty or
/// whitespace-only term matches everything.
pub fn matches_term(record: &ConstituentRecord, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    record.ticker.to_lowercase().contains(&term) || record.name.to_lowercase().contains(&term)
}

fn compare(a: &ConstituentRecord, b: &ConstituentRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Ticker => a.ticker.to_lowercase().cmp(&b.ticker.to_lowercase()),
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortColumn::Sector => a.sector.to_lowercase().cmp(&b.sector.to_lowercase()),
        SortColumn::Weight => a.weight.total_cmp(&b.weight),
        SortColumn::DateAdded => a.date_added.cmp(&b.date_added),
    }
}

/// Filter, stable-sort, then cap.
pub fn query<'a>(
    all: &'a [ConstituentRecord],
    search_term: &str,
    sort: SortSpec,
    display_cap: usize,
) -> QueryResult<'a> {
    let mut rows: Vec<&ConstituentRecord> = all.iter().filter(|c| matches_term(c, search_term)).collect();

    rows.sort_by(|a, b| {
        let ord = compare(a, b, sort.column);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });

    let truncated_count = rows.len().saturating_sub(display_cap);
    rows.truncate(display_cap);

    QueryResult { rows, truncated_count }
}
