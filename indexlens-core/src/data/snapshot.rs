//! Builds a `constituents.json` snapshot from market-capitalisation rows.
//!
//! Weights are each row's share of the total market cap, as a percentage
//! rounded to four places. Rows are ordered heaviest first and sector weights
//! are the sums of their members' rounded weights, rounded to two places.

use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{ConstituentRecord, IndexSnapshot, OrderedMap};

const UNKNOWN_SECTOR: &str = "Unknown";

/// One input row: a ticker and its market cap, with the sector reported by the
/// quote provider when it has one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapRow {
    pub ticker: String,
    pub market_cap: f64,
    #[serde(default)]
    pub sector: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("no rows with a positive market cap")]
    NoData,
}

/// Snapshot stamped with today's local date.
pub fn build_snapshot(
    rows: &[MarketCapRow],
    names: &HashMap<String, String>,
    sectors: &HashMap<String, String>,
) -> Result<IndexSnapshot, BuildError> {
    build_snapshot_on(rows, names, sectors, Local::now().date_naive())
}

/// `names` maps ticker to company name (the ticker is used when absent).
/// `sectors` is the fallback sector table, keyed by ticker with `-` written
/// as `.`; it is consulted when a row has no sector or reports `Unknown`.
/// Rows with a missing, zero or negative market cap are skipped.
pub fn build_snapshot_on(
    rows: &[MarketCapRow],
    names: &HashMap<String, String>,
    sectors: &HashMap<String, String>,
    last_updated: NaiveDate,
) -> Result<IndexSnapshot, BuildError> {
    let priced: Vec<&MarketCapRow> = rows
        .iter()
        .filter(|r| r.market_cap.is_finite() && r.market_cap > 0.0)
        .collect();
    if priced.is_empty() {
        return Err(BuildError::NoData);
    }
    if priced.len() < rows.len() {
        tracing::warn!(skipped = rows.len() - priced.len(), "rows without a market cap skipped");
    }

    let total: f64 = priced.iter().map(|r| r.market_cap).sum();
    let mut constituents: Vec<ConstituentRecord> = priced
        .iter()
        .map(|row| ConstituentRecord {
            ticker: row.ticker.clone(),
            name: names.get(&row.ticker).cloned().unwrap_or_else(|| row.ticker.clone()),
            sector: resolve_sector(row, sectors),
            weight: round_to(row.market_cap / total * 100.0, 4),
            date_added: None,
            country: None,
        })
        .collect();
    constituents.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    let mut sums: Vec<(String, f64)> = Vec::new();
    for c in &constituents {
        match sums.iter_mut().find(|(name, _)| *name == c.sector) {
            Some(slot) => slot.1 += c.weight,
            None => sums.push((c.sector.clone(), c.weight)),
        }
    }
    let mut sector_weights = OrderedMap::new();
    for (name, weight) in sums {
        sector_weights.insert(name, round_to(weight, 2));
    }

    Ok(IndexSnapshot {
        last_updated,
        total_constituents: constituents.len(),
        constituents,
        sectors: sector_weights,
        regions: None,
        countries: None,
    })
}

fn resolve_sector(row: &MarketCapRow, fallback: &HashMap<String, String>) -> String {
    match row.sector.as_deref() {
        Some(s) if !s.is_empty() && s != UNKNOWN_SECTOR => s.to_string(),
        _ => fallback
            .get(&row.ticker.replace('-', "."))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
    }
}

fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ticker: &str, market_cap: f64, sector: Option<&str>) -> MarketCapRow {
        MarketCapRow {
            ticker: ticker.into(),
            market_cap,
            sector: sector.map(str::to_string),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn weights_are_market_cap_shares() {
        let rows = vec![
            row("MSFT", 1.0, Some("Information Technology")),
            row("AAPL", 2.0, Some("Information Technology")),
            row("XOM", 3.0, Some("Energy")),
        ];
        let snap = build_snapshot_on(&rows, &HashMap::new(), &HashMap::new(), day()).unwrap();

        let weights: Vec<(&str, f64)> =
            snap.constituents.iter().map(|c| (c.ticker.as_str(), c.weight)).collect();
        assert_eq!(weights, vec![("XOM", 50.0), ("AAPL", 33.3333), ("MSFT", 16.6667)]);
        assert_eq!(snap.total_constituents, 3);
        assert_eq!(snap.last_updated, day());
    }

    #[test]
    fn sector_totals_follow_weight_order() {
        let rows = vec![
            row("MSFT", 1.0, Some("Information Technology")),
            row("AAPL", 2.0, Some("Information Technology")),
            row("XOM", 3.0, Some("Energy")),
        ];
        let snap = build_snapshot_on(&rows, &HashMap::new(), &HashMap::new(), day()).unwrap();
        let sectors: Vec<(&str, f64)> = snap.sectors.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(sectors, vec![("Energy", 50.0), ("Information Technology", 50.0)]);
    }

    #[test]
    fn names_and_fallback_sectors() {
        let rows = vec![
            row("BRK-B", 5.0, Some("Unknown")),
            row("JPM", 4.0, None),
            row("ZZZ", 1.0, None),
        ];
        let names = table(&[("BRK-B", "Berkshire Hathaway")]);
        let sectors = table(&[("BRK.B", "Financials"), ("JPM", "Financials")]);
        let snap = build_snapshot_on(&rows, &names, &sectors, day()).unwrap();

        assert_eq!(snap.constituents[0].name, "Berkshire Hathaway");
        assert_eq!(snap.constituents[0].sector, "Financials");
        assert_eq!(snap.constituents[1].name, "JPM");
        assert_eq!(snap.constituents[1].sector, "Financials");
        assert_eq!(snap.constituents[2].sector, "Unknown");
    }

    #[test]
    fn provider_sector_wins_over_fallback() {
        let rows = vec![row("V", 1.0, Some("Financials"))];
        let sectors = table(&[("V", "Information Technology")]);
        let snap = build_snapshot_on(&rows, &HashMap::new(), &sectors, day()).unwrap();
        assert_eq!(snap.constituents[0].sector, "Financials");
    }

    #[test]
    fn unpriced_rows_are_skipped() {
        let rows = vec![row("A", 1.0, None), row("B", 0.0, None), row("C", f64::NAN, None)];
        let snap = build_snapshot_on(&rows, &HashMap::new(), &HashMap::new(), day()).unwrap();
        assert_eq!(snap.constituents.len(), 1);
        assert_eq!(snap.constituents[0].weight, 100.0);
    }

    #[test]
    fn no_rows_is_an_error() {
        let err = build_snapshot_on(&[], &HashMap::new(), &HashMap::new(), day()).unwrap_err();
        assert_eq!(err, BuildError::NoData);
    }

    #[test]
    fn snapshot_reloads_as_document() {
        let rows = vec![row("AAPL", 2.0, Some("Information Technology")), row("XOM", 1.0, Some("Energy"))];
        let snap = build_snapshot_on(&rows, &HashMap::new(), &HashMap::new(), day()).unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(!json.contains("dateAdded"));
        let back: IndexSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
