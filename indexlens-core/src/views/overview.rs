//! Header card and composition breakdowns for the active index.

use serde::Serialize;

use super::historical::top_categories;
use super::returns::{summarize, ReturnLine};
use crate::data::DataStore;
use crate::domain::dates::format_day;
use crate::domain::{IndexId, IndexMetadata, OrderedMap};
use crate::labels::{country_color, region_color, sector_color, sector_label, Rgba};

/// Countries listed in the all-country breakdown.
pub const TOP_COUNTRIES: usize = 10;

/// One slice of a breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub name: String,
    pub label: String,
    pub weight: f64,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub index: IndexId,
    pub display_name: &'static str,
    pub last_updated: String,
    pub constituent_count: usize,
    pub metadata: Option<IndexMetadata>,
    pub returns: Vec<ReturnLine>,
    /// Document order.
    pub sectors: Vec<Slice>,
    /// All-country index only; empty otherwise.
    pub regions: Vec<Slice>,
    /// All-country index only; heaviest first.
    pub top_countries: Vec<Slice>,
}

pub fn sector_slices(sectors: &OrderedMap<f64>) -> Vec<Slice> {
    sectors
        .iter()
        .map(|(name, weight)| Slice {
            name: name.to_string(),
            label: sector_label(name).to_string(),
            weight: *weight,
            color: sector_color(name),
        })
        .collect()
}

pub fn region_slices(regions: &OrderedMap<f64>) -> Vec<Slice> {
    regions
        .iter()
        .map(|(name, weight)| Slice {
            name: name.to_string(),
            label: name.to_string(),
            weight: *weight,
            color: region_color(name),
        })
        .collect()
}

pub fn top_country_slices(countries: &OrderedMap<f64>, n: usize) -> Vec<Slice> {
    top_categories(countries, n)
        .into_iter()
        .map(|share| Slice {
            color: country_color(&share.name),
            label: share.name.clone(),
            name: share.name,
            weight: share.weight,
        })
        .collect()
}

pub fn overview(store: &DataStore) -> Overview {
    let index = store.index();
    let snapshot = store.snapshot();
    let all_country = index.is_all_country();

    Overview {
        index,
        display_name: index.display_name(),
        last_updated: format_day(Some(snapshot.last_updated)),
        constituent_count: snapshot.constituent_count(),
        metadata: store.metadata().cloned(),
        returns: store.prices().map(|p| summarize(&p.returns)).unwrap_or_default(),
        sectors: sector_slices(&snapshot.sectors),
        regions: match &snapshot.regions {
            Some(regions) if all_country => region_slices(regions),
            _ => Vec::new(),
        },
        top_countries: match &snapshot.countries {
            Some(countries) if all_country => top_country_slices(countries, TOP_COUNTRIES),
            _ => Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SharedData;
    use crate::domain::IndexSnapshot;

    fn snapshot(json: &str) -> IndexSnapshot {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn sector_slices_keep_document_order() {
        let slices = sector_slices(&[("Utilities", 2.0), ("Health Care", 9.0)].into_iter().collect());
        assert_eq!(slices[0].name, "Utilities");
        assert_eq!(slices[1].label, "ヘルスケア");
    }

    #[test]
    fn acwi_gets_regions_and_top_countries() {
        let countries: String = (0..12)
            .map(|i| format!(r#""C{i}": {}"#, i + 1))
            .collect::<Vec<_>>()
            .join(",");
        let json = format!(
            r#"{{"lastUpdated": "2026-01-02", "constituents": [], "sectors": {{}},
                "regions": {{"North America": 65.0, "Europe": 15.0}},
                "countries": {{{countries}}}}}"#
        );
        let store = DataStore::from_parts(IndexId::Acwi, snapshot(&json), Vec::new(), SharedData::default());
        let view = overview(&store);
        assert_eq!(view.regions.len(), 2);
        assert_eq!(view.top_countries.len(), TOP_COUNTRIES);
        assert_eq!(view.top_countries[0].name, "C11");
        assert_eq!(view.last_updated, "2026/01/02");
        assert!(view.metadata.is_none());
        assert!(view.returns.is_empty());
    }

    #[test]
    fn single_country_index_has_no_region_breakdown() {
        let snap = snapshot(
            r#"{"lastUpdated": "2026-01-02", "totalConstituents": 503, "constituents": [],
                "sectors": {"Financials": 13.1}, "regions": {"North America": 100.0}}"#,
        );
        let store = DataStore::from_parts(IndexId::Sp500, snap, Vec::new(), SharedData::default());
        let view = overview(&store);
        assert!(view.regions.is_empty());
        assert_eq!(view.constituent_count, 503);
        assert_eq!(view.display_name, "S&P 500");
    }
}
