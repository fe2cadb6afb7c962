use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The indices the dashboard knows how to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexId {
    #[default]
    Sp500,
    Nasdaq100,
    Nikkei225,
    Topix,
    Acwi,
    Prime150,
}

impl IndexId {
    pub const ALL: [IndexId; 6] = [
        IndexId::Sp500,
        IndexId::Nasdaq100,
        IndexId::Nikkei225,
        IndexId::Topix,
        IndexId::Acwi,
        IndexId::Prime150,
    ];

    /// Identifier used in document paths and as key in shared documents.
    pub fn code(self) -> &'static str {
        match self {
            IndexId::Sp500 => "sp500",
            IndexId::Nasdaq100 => "nasdaq100",
            IndexId::Nikkei225 => "nikkei225",
            IndexId::Topix => "topix",
            IndexId::Acwi => "acwi",
            IndexId::Prime150 => "prime150",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            IndexId::Sp500 => "S&P 500",
            IndexId::Nasdaq100 => "NASDAQ 100",
            IndexId::Nikkei225 => "日経平均",
            IndexId::Topix => "TOPIX",
            IndexId::Acwi => "MSCI ACWI",
            IndexId::Prime150 => "JPX Prime 150",
        }
    }

    /// The all-country index carries region/country breakdowns and flags
    /// Japanese constituents in the timeline.
    pub fn is_all_country(self) -> bool {
        self == IndexId::Acwi
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid index name '{given}' (expected one of: sp500, nasdaq100, nikkei225, topix, acwi, prime150)")]
pub struct ParseIndexError {
    pub given: String,
}

impl FromStr for IndexId {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndexId::ALL
            .into_iter()
            .find(|id| id.code() == s)
            .ok_or_else(|| ParseIndexError { given: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_code() {
        for id in IndexId::ALL {
            assert_eq!(id.code().parse::<IndexId>().unwrap(), id);
        }
    }

    #[test]
    fn rejects_unknown_and_wrong_case() {
        assert!("dax".parse::<IndexId>().is_err());
        assert!("SP500".parse::<IndexId>().is_err());
        let err = "../etc".parse::<IndexId>().unwrap_err();
        assert_eq!(err.given, "../etc");
    }

    #[test]
    fn only_acwi_is_all_country() {
        let all_country: Vec<IndexId> =
            IndexId::ALL.into_iter().filter(|i| i.is_all_country()).collect();
        assert_eq!(all_country, vec![IndexId::Acwi]);
    }

    #[test]
    fn defaults_to_sp500() {
        assert_eq!(IndexId::default(), IndexId::Sp500);
    }

    #[test]
    fn display_names() {
        assert_eq!(IndexId::Nikkei225.display_name(), "日経平均");
        assert_eq!(IndexId::Acwi.to_string(), "acwi");
    }
}
