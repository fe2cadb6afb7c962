//! Year-by-year composition, reduced to the leading categories.

use serde::Serialize;

use crate::domain::{HistoricalCompositionSeries, OrderedMap};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBreakdown {
    pub year: String,
    pub sectors: Vec<CategoryShare>,
    pub countries: Option<Vec<CategoryShare>>,
    pub note: Option<String>,
}

/// The `n` heaviest categories, descending. Equal weights keep document order.
pub fn top_categories(year_data: &OrderedMap<f64>, n: usize) -> Vec<CategoryShare> {
    let mut shares: Vec<CategoryShare> = year_data
        .iter()
        .map(|(name, weight)| CategoryShare {
            name: name.to_string(),
            weight: *weight,
        })
        .collect();
    shares.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    shares.truncate(n);
    shares
}

/// [`top_categories`] applied to every year of the series, oldest first.
pub fn composition_history(series: &HistoricalCompositionSeries, n: usize) -> Vec<YearBreakdown> {
    series
        .years
        .iter()
        .map(|(year, composition)| YearBreakdown {
            year: year.clone(),
            sectors: top_categories(&composition.sectors, n),
            countries: composition.countries.as_ref().map(|c| top_categories(c, n)),
            note: composition.note.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, f64)]) -> OrderedMap<f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn names(shares: &[CategoryShare]) -> Vec<&str> {
        shares.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn keeps_five_heaviest() {
        let data = map(&[("A", 40.0), ("B", 25.0), ("C", 20.0), ("D", 10.0), ("E", 5.0), ("F", 0.0)]);
        assert_eq!(names(&top_categories(&data, 5)), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn ties_keep_document_order() {
        let data = map(&[("Energy", 3.0), ("Utilities", 9.0), ("Materials", 3.0)]);
        assert_eq!(names(&top_categories(&data, 3)), vec!["Utilities", "Energy", "Materials"]);
    }

    #[test]
    fn fewer_than_n() {
        assert_eq!(top_categories(&map(&[("A", 1.0)]), 5).len(), 1);
        assert!(top_categories(&OrderedMap::new(), 5).is_empty());
    }

    #[test]
    fn history_covers_every_year_in_order() {
        let series: HistoricalCompositionSeries = serde_json::from_str(
            r#"{
                "2020": {"sectors": {"IT": 28.0, "Health Care": 14.0}},
                "note": "GICS reclassified in 2018",
                "2010": {"sectors": {"Financials": 16.0, "IT": 18.0}, "countries": {"United States": 45.0}}
            }"#,
        )
        .unwrap();
        let history = composition_history(&series, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].year, "2010");
        assert_eq!(names(&history[0].sectors), vec!["IT"]);
        assert_eq!(history[0].countries.as_ref().map(|c| c.len()), Some(1));
        assert!(history[1].countries.is_none());
    }
}
