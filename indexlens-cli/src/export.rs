//! CSV and JSON output.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use indexlens_core::domain::dates::format_day;
use indexlens_core::domain::ConstituentRecord;
use indexlens_core::labels::sector_label;

/// One exported constituent row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    ticker: &'a str,
    name: &'a str,
    sector: &'a str,
    sector_label: &'a str,
    weight: f64,
    date_added: String,
    country: &'a str,
}

impl<'a> From<&'a ConstituentRecord> for CsvRow<'a> {
    fn from(c: &'a ConstituentRecord) -> Self {
        Self {
            ticker: &c.ticker,
            name: &c.name,
            sector: &c.sector,
            sector_label: sector_label(&c.sector),
            weight: c.weight,
            date_added: c.date_added.map(|d| format_day(Some(d))).unwrap_or_default(),
            country: c.country.as_deref().unwrap_or(""),
        }
    }
}

pub fn write_constituents_csv<W: Write>(rows: &[&ConstituentRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(CsvRow::from(*row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write rows to `path`, or stdout when `path` is `-`.
pub fn export_constituents(rows: &[&ConstituentRecord], path: &Path) -> Result<()> {
    if path.as_os_str() == "-" {
        return write_constituents_csv(rows, std::io::stdout().lock());
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_constituents_csv(rows, file)?;
    tracing::info!(rows = rows.len(), path = %path.display(), "constituents exported");
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<ConstituentRecord> {
        vec![
            ConstituentRecord {
                ticker: "AAPL".into(),
                name: "Apple Inc.".into(),
                sector: "Information Technology".into(),
                weight: 6.9,
                date_added: NaiveDate::from_ymd_opt(1982, 11, 30),
                country: None,
            },
            ConstituentRecord {
                ticker: "XOM".into(),
                name: "Exxon, Mobil".into(),
                sector: "Energy".into(),
                weight: 0.9,
                date_added: None,
                country: Some("United States".into()),
            },
        ]
    }

    #[test]
    fn csv_has_header_and_quoted_fields() {
        let data = records();
        let rows: Vec<&ConstituentRecord> = data.iter().collect();
        let mut buf = Vec::new();
        write_constituents_csv(&rows, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ticker,name,sector,sector_label,weight,date_added,country");
        assert_eq!(lines[1], "AAPL,Apple Inc.,Information Technology,情報・ハイテク,6.9,1982/11/30,");
        assert_eq!(lines[2], "XOM,\"Exxon, Mobil\",Energy,エネルギー,0.9,,United States");
    }

    #[test]
    fn exports_to_file() {
        let data = records();
        let rows: Vec<&ConstituentRecord> = data.iter().collect();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sp500.csv");
        export_constituents(&rows, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }
}
