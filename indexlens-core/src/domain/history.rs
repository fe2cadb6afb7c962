use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

/// Composition of an index in one snapshot year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearComposition {
    #[serde(default)]
    pub sectors: OrderedMap<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub countries: Option<OrderedMap<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum SeriesEntry {
    Year(YearComposition),
    Note(String),
}

/// Year label → composition for one index, as found in
/// `historical_sectors.json`. A series-level `note` string may sit next to
/// the years and is kept apart from them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrderedMap<SeriesEntry>", into = "OrderedMap<SeriesEntry>")]
pub struct HistoricalCompositionSeries {
    /// Sorted ascending by year label.
    pub years: Vec<(String, YearComposition)>,
    pub note: Option<String>,
}

impl HistoricalCompositionSeries {
    pub fn year(&self, label: &str) -> Option<&YearComposition> {
        self.years.iter().find(|(y, _)| y == label).map(|(_, c)| c)
    }

    pub fn has_countries(&self) -> bool {
        self.years.iter().any(|(_, c)| c.countries.is_some())
    }
}

impl From<OrderedMap<SeriesEntry>> for HistoricalCompositionSeries {
    fn from(map: OrderedMap<SeriesEntry>) -> Self {
        let mut years = Vec::new();
        let mut note = None;
        for (key, entry) in map.iter() {
            match entry {
                SeriesEntry::Year(c) => years.push((key.to_string(), c.clone())),
                SeriesEntry::Note(text) => note = Some(text.clone()),
            }
        }
        years.sort_by(|a, b| a.0.cmp(&b.0));
        Self { years, note }
    }
}

impl From<HistoricalCompositionSeries> for OrderedMap<SeriesEntry> {
    fn from(series: HistoricalCompositionSeries) -> Self {
        let mut map: OrderedMap<SeriesEntry> = series
            .years
            .into_iter()
            .map(|(y, c)| (y, SeriesEntry::Year(c)))
            .collect();
        if let Some(note) = series.note {
            map.insert("note", SeriesEntry::Note(note));
        }
        map
    }
}
