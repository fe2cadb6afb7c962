use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_day, deserialize_optional_day};
use super::ordered::OrderedMap;

/// One holding of an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituentRecord {
    pub ticker: String,
    pub name: String,
    #[serde(default = "unknown_sector")]
    pub sector: String,
    /// Percentage of the index, 0–100.
    #[serde(default)]
    pub weight: f64,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

fn unknown_sector() -> String {
    "Unknown".to_string()
}

/// Contents of `<index>/constituents.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    #[serde(deserialize_with = "deserialize_day")]
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub total_constituents: usize,
    #[serde(default)]
    pub constituents: Vec<ConstituentRecord>,
    /// Sector → aggregate weight, in document order.
    #[serde(default)]
    pub sectors: OrderedMap<f64>,
    /// All-country index only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<OrderedMap<f64>>,
    /// All-country index only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<OrderedMap<f64>>,
}

impl IndexSnapshot {
    /// Reported constituent count, or the list length when the document
    /// leaves it at zero.
    pub fn constituent_count(&self) -> usize {
        if self.total_constituents > 0 {
            self.total_constituents
        } else {
            self.constituents.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generated_document() {
        let json = r#"{
            "lastUpdated": "2026-01-05 07:12:44",
            "totalConstituents": 2,
            "constituents": [
                {"ticker": "NVDA", "name": "NVIDIA", "sector": "Information Technology", "weight": 7.41, "price": 187.2},
                {"ticker": "AAPL", "name": "Apple", "sector": "Information Technology", "weight": 6.9, "dateAdded": "1982-11-30"}
            ],
            "sectors": {"Information Technology": 14.31}
        }"#;
        let snap: IndexSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.last_updated, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(snap.constituents[0].date_added, None);
        assert_eq!(
            snap.constituents[1].date_added,
            NaiveDate::from_ymd_opt(1982, 11, 30)
        );
        assert!(snap.regions.is_none());
    }

    #[test]
    fn missing_sector_defaults_to_unknown() {
        let c: ConstituentRecord =
            serde_json::from_str(r#"{"ticker": "X", "name": "Xco", "weight": 1.0}"#).unwrap();
        assert_eq!(c.sector, "Unknown");
    }

    #[test]
    fn count_falls_back_to_list_length() {
        let snap: IndexSnapshot = serde_json::from_str(
            r#"{"lastUpdated": "2026-01-01", "constituents": [{"ticker": "A", "name": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(snap.constituent_count(), 1);
    }
}
