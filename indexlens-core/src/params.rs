//! View parameters.
//!
//! Every selection a user can make (active index, price period, sort state,
//! change-type filter, search term, simulated amount) lives in one explicit
//! struct that is passed to the views. Nothing is held in ambient state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ChangeKind, IndexId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{given}' (expected one of: {expected})")]
pub struct ParseParamError {
    pub kind: &'static str,
    pub given: String,
    pub expected: &'static str,
}

/// Change-type filter for the timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Add,
    Remove,
    Rebalance,
}

impl TypeFilter {
    /// Whether a change of this kind survives the filter.
    pub fn admits(self, kind: &ChangeKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Add => *kind == ChangeKind::Add,
            TypeFilter::Remove => *kind == ChangeKind::Remove,
            TypeFilter::Rebalance => *kind == ChangeKind::Rebalance,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Add => "add",
            TypeFilter::Remove => "remove",
            TypeFilter::Rebalance => "rebalance",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TypeFilter::All => TypeFilter::Add,
            TypeFilter::Add => TypeFilter::Remove,
            TypeFilter::Remove => TypeFilter::Rebalance,
            TypeFilter::Rebalance => TypeFilter::All,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            "add" => Ok(TypeFilter::Add),
            "remove" => Ok(TypeFilter::Remove),
            "rebalance" => Ok(TypeFilter::Rebalance),
            _ => Err(ParseParamError {
                kind: "change type filter",
                given: s.to_string(),
                expected: "all, add, remove, rebalance",
            }),
        }
    }
}

/// Sortable constituent table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortColumn {
    Ticker,
    Name,
    Sector,
    Weight,
    DateAdded,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Ticker,
        SortColumn::Name,
        SortColumn::Sector,
        SortColumn::Weight,
        SortColumn::DateAdded,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Ticker => "ticker",
            SortColumn::Name => "name",
            SortColumn::Sector => "sector",
            SortColumn::Weight => "weight",
            SortColumn::DateAdded => "dateAdded",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl FromStr for SortColumn {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ticker" => Ok(SortColumn::Ticker),
            "name" => Ok(SortColumn::Name),
            "sector" => Ok(SortColumn::Sector),
            "weight" => Ok(SortColumn::Weight),
            "dateAdded" | "date-added" | "date_added" => Ok(SortColumn::DateAdded),
            _ => Err(ParseParamError {
                kind: "sort column",
                given: s.to_string(),
                expected: "ticker, name, sector, weight, dateAdded",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: SortColumn::Weight,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    /// Header-click semantics: the active column flips direction, any other
    /// column becomes active ascending.
    pub fn toggle(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                direction: self.direction.flipped(),
            }
        } else {
            Self {
                column,
                direction: SortDirection::Asc,
            }
        }
    }
}

/// Price chart period selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PricePeriod {
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "15y")]
    FifteenYears,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl PricePeriod {
    pub const ALL: [PricePeriod; 5] = [
        PricePeriod::OneYear,
        PricePeriod::FiveYears,
        PricePeriod::TenYears,
        PricePeriod::FifteenYears,
        PricePeriod::All,
    ];

    /// Look-back in years. `All` reaches far enough back to cover any series.
    pub fn years(self) -> i32 {
        match self {
            PricePeriod::OneYear => 1,
            PricePeriod::FiveYears => 5,
            PricePeriod::TenYears => 10,
            PricePeriod::FifteenYears => 15,
            PricePeriod::All => 999,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PricePeriod::OneYear => "1y",
            PricePeriod::FiveYears => "5y",
            PricePeriod::TenYears => "10y",
            PricePeriod::FifteenYears => "15y",
            PricePeriod::All => "all",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

impl FromStr for PricePeriod {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PricePeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseParamError {
                kind: "price period",
                given: s.to_string(),
                expected: "1y, 5y, 10y, 15y, all",
            })
    }
}

/// The full set of per-view selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    pub index: IndexId,
    pub period: PricePeriod,
    pub sort: SortSpec,
    pub type_filter: TypeFilter,
    pub search: String,
    pub amount: f64,
}

impl ViewParams {
    pub fn new(index: IndexId) -> Self {
        Self {
            index,
            period: PricePeriod::default(),
            sort: SortSpec::default(),
            type_filter: TypeFilter::default(),
            search: String::new(),
            amount: 0.0,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }
}

impl Default for ViewParams {
    fn default() -> Self {
        Self::new(IndexId::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_admits_matching_kind_only() {
        assert!(TypeFilter::All.admits(&ChangeKind::Other("split".into())));
        assert!(TypeFilter::Add.admits(&ChangeKind::Add));
        assert!(!TypeFilter::Add.admits(&ChangeKind::Remove));
        assert!(!TypeFilter::Rebalance.admits(&ChangeKind::Other("rebalance-ish".into())));
    }

    #[test]
    fn toggle_same_column_flips() {
        let spec = SortSpec::default().toggle(SortColumn::Weight);
        assert_eq!(spec.direction, SortDirection::Asc);
        assert_eq!(spec.toggle(SortColumn::Weight).direction, SortDirection::Desc);
    }

    #[test]
    fn toggle_new_column_starts_ascending() {
        let spec = SortSpec::default().toggle(SortColumn::Name);
        assert_eq!(spec, SortSpec { column: SortColumn::Name, direction: SortDirection::Asc });
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!("rebalance".parse::<TypeFilter>(), Ok(TypeFilter::Rebalance));
        assert!("split".parse::<TypeFilter>().is_err());
        assert_eq!("15y".parse::<PricePeriod>(), Ok(PricePeriod::FifteenYears));
        let err = "3y".parse::<PricePeriod>().unwrap_err();
        assert_eq!(err.kind, "price period");
    }

    #[test]
    fn cycles_wrap_around() {
        assert_eq!(TypeFilter::Rebalance.next(), TypeFilter::All);
        assert_eq!(PricePeriod::All.next(), PricePeriod::OneYear);
        assert_eq!(SortColumn::DateAdded.next(), SortColumn::Ticker);
    }

    #[test]
    fn defaults_match_initial_view() {
        let params = ViewParams::default();
        assert_eq!(params.index, IndexId::Sp500);
        assert_eq!(params.sort, SortSpec { column: SortColumn::Weight, direction: SortDirection::Desc });
        assert_eq!(params.period, PricePeriod::All);
    }
}
