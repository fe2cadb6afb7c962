//! `build`: write `<index>/constituents.json` from a market-cap CSV.
//!
//! Inputs are plain CSV files with a header row:
//! - caps: `ticker,marketCap[,sector]`
//! - names (optional): `ticker,name`
//! - sectors (optional fallback): `ticker,sector`, tickers written with `.`

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use indexlens_core::data::store::constituents_doc;
use indexlens_core::data::{build_snapshot, MarketCapRow};
use indexlens_core::domain::{IndexId, IndexSnapshot};

pub fn run_build(
    caps: &Path,
    names: Option<&Path>,
    sectors: Option<&Path>,
    index: IndexId,
    data_dir: &Path,
) -> Result<()> {
    let rows = read_caps(open(caps)?).with_context(|| format!("read {}", caps.display()))?;
    let names = match names {
        Some(path) => read_lookup(open(path)?).with_context(|| format!("read {}", path.display()))?,
        None => HashMap::new(),
    };
    let sectors = match sectors {
        Some(path) => read_lookup(open(path)?).with_context(|| format!("read {}", path.display()))?,
        None => HashMap::new(),
    };

    let snapshot = build_snapshot(&rows, &names, &sectors)
        .with_context(|| format!("no usable rows in {}", caps.display()))?;
    let path = write_snapshot(&snapshot, data_dir, index)?;

    tracing::info!(%index, rows = rows.len(), path = %path.display(), "snapshot written");
    println!("Saved {index}: {} constituents -> {}", snapshot.total_constituents, path.display());
    Ok(())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("open {}", path.display()))
}

pub fn read_caps<R: Read>(reader: R) -> Result<Vec<MarketCapRow>> {
    let mut csv = csv::Reader::from_reader(reader);
    let rows = csv.deserialize().collect::<Result<Vec<MarketCapRow>, _>>()?;
    Ok(rows)
}

/// First column to second column. Rows with fewer than two fields are skipped.
pub fn read_lookup<R: Read>(reader: R) -> Result<HashMap<String, String>> {
    let mut csv = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut table = HashMap::new();
    for record in csv.records() {
        let record = record?;
        if let (Some(key), Some(value)) = (record.get(0), record.get(1)) {
            table.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    Ok(table)
}

/// Writes `<data_dir>/<index>/constituents.json` and returns its path.
pub fn write_snapshot(snapshot: &IndexSnapshot, data_dir: &Path, index: IndexId) -> Result<PathBuf> {
    let path = data_dir.join(constituents_doc(index));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, snapshot)?;
    writeln!(out)?;
    out.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    use indexlens_core::data::{DataStore, DirectorySource};

    const CAPS: &str = "ticker,marketCap,sector\n\
                        AAPL,3000,Information Technology\n\
                        BRK-B,1000,Unknown\n\
                        XOM,500,\n";

    #[test]
    fn reads_caps_with_optional_sector() {
        let rows = read_caps(CAPS.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].market_cap, 3000.0);
        assert_eq!(rows[1].sector.as_deref(), Some("Unknown"));
        assert_eq!(rows[2].sector, None);
    }

    #[test]
    fn lookup_maps_first_column_to_second() {
        let table = read_lookup("ticker,name\nAAPL, Apple Inc.\nXOM\n".as_bytes()).unwrap();
        assert_eq!(table.get("AAPL").map(String::as_str), Some("Apple Inc."));
        assert!(!table.contains_key("XOM"));
    }

    #[test]
    fn builds_a_loadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let caps = dir.path().join("caps.csv");
        let sectors = dir.path().join("sectors.csv");
        std::fs::write(&caps, CAPS).unwrap();
        std::fs::write(&sectors, "ticker,sector\nBRK.B,Financials\nXOM,Energy\n").unwrap();

        run_build(&caps, None, Some(&sectors), IndexId::Nasdaq100, dir.path()).unwrap();

        let text = std::fs::read_to_string(dir.path().join("nasdaq100/constituents.json")).unwrap();
        let snapshot: IndexSnapshot = serde_json::from_str(&text).unwrap();
        let tickers: Vec<&str> = snapshot.constituents.iter().map(|c| c.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "BRK-B", "XOM"]);
        assert_eq!(snapshot.constituents[0].weight, 66.6667);
        assert_eq!(snapshot.constituents[1].sector, "Financials");
        assert_eq!(snapshot.constituents[2].sector, "Energy");
        assert_eq!(snapshot.constituents[2].name, "XOM");
        assert_eq!(snapshot.total_constituents, 3);
    }

    #[test]
    fn empty_caps_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let caps = dir.path().join("caps.csv");
        std::fs::write(&caps, "ticker,marketCap\n").unwrap();
        assert!(run_build(&caps, None, None, IndexId::Sp500, dir.path()).is_err());
        assert!(!dir.path().join("sp500/constituents.json").exists());
    }

    #[test]
    fn written_snapshot_replaces_fixture_document() {
        let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../indexlens-core/tests/fixtures/data");
        let dir = tempfile::tempdir().unwrap();
        for doc in [
            "prices.json",
            "historical_sectors.json",
            "index_metadata.json",
            "company_products.json",
            "events.json",
            "sp500/changes.json",
        ] {
            let target = dir.path().join(doc);
            std::fs::create_dir_all(target.parent().unwrap()).unwrap();
            std::fs::copy(fixtures.join(doc), target).unwrap();
        }

        let rows = read_caps(CAPS.as_bytes()).unwrap();
        let snapshot = build_snapshot(&rows, &HashMap::new(), &HashMap::new()).unwrap();
        write_snapshot(&snapshot, dir.path(), IndexId::Sp500).unwrap();

        let store = DataStore::load(&DirectorySource::new(dir.path()), "sp500").unwrap();
        assert_eq!(store.constituents().len(), 3);
        assert_eq!(store.constituents()[0].ticker, "AAPL");
    }
}
