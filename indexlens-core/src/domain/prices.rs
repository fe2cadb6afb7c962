use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ordered::OrderedMap;

/// Monthly index levels plus trailing returns for one index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Period labels, `YYYY-MM` or `YYYY-MM-DD`.
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    /// Horizon key → signed percentage. A key mapped to `null` is distinct
    /// from a missing key: the former renders a placeholder, the latter is
    /// not shown.
    #[serde(default)]
    pub returns: OrderedMap<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceSeriesError {
    #[error("price series has {dates} dates but {values} values")]
    LengthMismatch { dates: usize, values: usize },
}

impl PriceSeries {
    pub fn validate(&self) -> Result<(), PriceSeriesError> {
        if self.dates.len() != self.values.len() {
            return Err(PriceSeriesError::LengthMismatch {
                dates: self.dates.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Year component of a period label.
pub fn label_year(label: &str) -> Option<i32> {
    label.split('-').next()?.trim().parse().ok()
}

/// Trailing-return horizons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Ytd,
    OneYear,
    FiveYears,
    TenYears,
    TwentyYears,
    SinceInception,
}

impl Horizon {
    pub const ORDERED: [Horizon; 6] = [
        Horizon::Ytd,
        Horizon::OneYear,
        Horizon::FiveYears,
        Horizon::TenYears,
        Horizon::TwentyYears,
        Horizon::SinceInception,
    ];

    /// Key in the `returns` object.
    pub fn key(self) -> &'static str {
        match self {
            Horizon::Ytd => "ytd",
            Horizon::OneYear => "1y",
            Horizon::FiveYears => "5y",
            Horizon::TenYears => "10y",
            Horizon::TwentyYears => "20y",
            Horizon::SinceInception => "sinceInception",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Horizon::Ytd => "今年の成績",
            Horizon::OneYear => "1年",
            Horizon::FiveYears => "5年",
            Horizon::TenYears => "10年",
            Horizon::TwentyYears => "20年",
            Horizon::SinceInception => "最初から",
        }
    }
}
