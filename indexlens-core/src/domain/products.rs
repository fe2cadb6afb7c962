use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Exchange suffixes stripped from a ticker before the second lookup.
pub const REGIONAL_SUFFIXES: [&str; 4] = [" US", " JP", " JT", ".T"];

/// Ticker or company name → well-known product description.
///
/// A soft join used only to enrich cards; a miss is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductMapping {
    entries: HashMap<String, String>,
}

impl ProductMapping {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact ticker, then ticker without its regional suffix, then company
    /// name. First hit wins. Empty descriptions count as misses.
    pub fn lookup(&self, ticker: &str, name: &str) -> Option<&str> {
        let hit = |key: &str| {
            if key.is_empty() {
                return None;
            }
            self.entries
                .get(key)
                .map(String::as_str)
                .filter(|p| !p.is_empty())
        };

        hit(ticker)
            .or_else(|| {
                REGIONAL_SUFFIXES
                    .iter()
                    .find_map(|suffix| ticker.strip_suffix(suffix))
                    .and_then(hit)
            })
            .or_else(|| hit(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProductMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ProductMapping {
        vec![
            ("AAPL", "iPhone"),
            ("7203", "プリウス"),
            ("Nintendo", "Switch"),
            ("EMPTY", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn exact_ticker_first() {
        assert_eq!(mapping().lookup("AAPL", "Nintendo"), Some("iPhone"));
    }

    #[test]
    fn strips_regional_suffix() {
        assert_eq!(mapping().lookup("AAPL US", ""), Some("iPhone"));
        assert_eq!(mapping().lookup("7203 JP", "Toyota"), Some("プリウス"));
    }

    #[test]
    fn falls_back_to_name() {
        assert_eq!(mapping().lookup("7974 JP", "Nintendo"), Some("Switch"));
    }

    #[test]
    fn miss_and_empty_description() {
        assert_eq!(mapping().lookup("ZZZ", "Nobody"), None);
        assert_eq!(mapping().lookup("EMPTY", ""), None);
        assert_eq!(mapping().lookup("", ""), None);
    }
}
