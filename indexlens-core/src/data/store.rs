//! Session snapshot of every dataset one view needs.
//!
//! Loading is a fan-out/fan-in: the five shared documents and the two
//! per-index documents are fetched concurrently on the rayon pool and the
//! store exists only once all seven have resolved. Any failure fails the
//! whole load. After that the store is read-only; views are recomputed from
//! it on demand.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::source::{DocumentSource, LoadError};
use crate::domain::{
    ChangeEntry, ChangesDocument, ConstituentRecord, HistoricalCompositionSeries, IndexId,
    IndexMetadata, IndexSnapshot, NarrativeEvent, PriceSeries, ProductMapping,
};

pub const PRICES_DOC: &str = "prices.json";
pub const HISTORICAL_DOC: &str = "historical_sectors.json";
pub const METADATA_DOC: &str = "index_metadata.json";
pub const PRODUCTS_DOC: &str = "company_products.json";
pub const EVENTS_DOC: &str = "events.json";

pub fn constituents_doc(index: IndexId) -> String {
    format!("{}/constituents.json", index.code())
}

pub fn changes_doc(index: IndexId) -> String {
    format!("{}/changes.json", index.code())
}

/// Documents shared by every index, keyed by index code where applicable.
#[derive(Debug, Clone, Default)]
pub struct SharedData {
    pub prices: HashMap<String, PriceSeries>,
    pub historical: HashMap<String, HistoricalCompositionSeries>,
    pub metadata: HashMap<String, IndexMetadata>,
    pub products: ProductMapping,
    pub events: Vec<NarrativeEvent>,
}

/// Everything loaded for one active index.
#[derive(Debug, Clone)]
pub struct DataStore {
    index: IndexId,
    snapshot: IndexSnapshot,
    changes: Vec<ChangeEntry>,
    shared: SharedData,
}

impl DataStore {
    /// Validate the selector, then load. An unknown index fails before any
    /// document is requested.
    pub fn load(source: &dyn DocumentSource, index: &str) -> Result<Self, LoadError> {
        let index: IndexId = index.parse()?;
        Self::load_index(source, index)
    }

    pub fn load_index(source: &dyn DocumentSource, index: IndexId) -> Result<Self, LoadError> {
        let started = Instant::now();
        info!(source = source.name(), index = %index, "loading datasets");

        let constituents_path = constituents_doc(index);
        let changes_path = changes_doc(index);

        let (shared, (snapshot, changes)) = rayon::join(
            || load_shared(source),
            || {
                rayon::join(
                    || fetch_json::<IndexSnapshot>(source, &constituents_path),
                    || fetch_json::<ChangesDocument>(source, &changes_path),
                )
            },
        );

        let shared = shared?;
        let snapshot = snapshot?;
        let changes = changes?.changes;

        warn_duplicate_tickers(index, &snapshot.constituents);

        info!(
            index = %index,
            constituents = snapshot.constituents.len(),
            changes = changes.len(),
            events = shared.events.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "datasets loaded"
        );

        Ok(Self { index, snapshot, changes, shared })
    }

    /// Assemble a store from already-parsed parts.
    pub fn from_parts(
        index: IndexId,
        snapshot: IndexSnapshot,
        changes: Vec<ChangeEntry>,
        shared: SharedData,
    ) -> Self {
        Self { index, snapshot, changes, shared }
    }

    pub fn index(&self) -> IndexId {
        self.index
    }

    pub fn snapshot(&self) -> &IndexSnapshot {
        &self.snapshot
    }

    pub fn constituents(&self) -> &[ConstituentRecord] {
        &self.snapshot.constituents
    }

    pub fn changes(&self) -> &[ChangeEntry] {
        &self.changes
    }

    pub fn events(&self) -> &[NarrativeEvent] {
        &self.shared.events
    }

    pub fn products(&self) -> &ProductMapping {
        &self.shared.products
    }

    pub fn prices(&self) -> Option<&PriceSeries> {
        self.shared.prices.get(self.index.code())
    }

    pub fn historical(&self) -> Option<&HistoricalCompositionSeries> {
        self.shared.historical.get(self.index.code())
    }

    pub fn metadata(&self) -> Option<&IndexMetadata> {
        self.shared.metadata.get(self.index.code())
    }
}

fn load_shared(source: &dyn DocumentSource) -> Result<SharedData, LoadError> {
    let ((prices, historical), (metadata, (products, events))) = rayon::join(
        || {
            rayon::join(
                || fetch_json::<HashMap<String, PriceSeries>>(source, PRICES_DOC),
                || fetch_json::<HashMap<String, HistoricalCompositionSeries>>(source, HISTORICAL_DOC),
            )
        },
        || {
            rayon::join(
                || fetch_json::<HashMap<String, IndexMetadata>>(source, METADATA_DOC),
                || {
                    rayon::join(
                        || fetch_json::<ProductMapping>(source, PRODUCTS_DOC),
                        || fetch_json::<Vec<NarrativeEvent>>(source, EVENTS_DOC),
                    )
                },
            )
        },
    );

    let prices = prices?;
    for (code, series) in &prices {
        series.validate().map_err(|e| LoadError::InvalidDataset {
            path: PRICES_DOC.to_string(),
            reason: format!("{code}: {e}"),
        })?;
    }

    Ok(SharedData {
        prices,
        historical: historical?,
        metadata: metadata?,
        products: products?,
        events: events?,
    })
}

fn fetch_json<T: DeserializeOwned>(source: &dyn DocumentSource, path: &str) -> Result<T, LoadError> {
    let bytes = source.fetch(path)?;
    debug!(path, bytes = bytes.len(), "document fetched");
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Parse {
        path: path.to_string(),
        source,
    })
}

fn warn_duplicate_tickers(index: IndexId, constituents: &[ConstituentRecord]) {
    let mut seen = HashSet::new();
    for c in constituents {
        if !seen.insert(c.ticker.as_str()) {
            warn!(index = %index, ticker = %c.ticker, "duplicate ticker in constituents");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory source recording which paths were requested.
    struct MemorySource {
        docs: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
        calls: AtomicUsize,
    }

    impl MemorySource {
        fn new(docs: &[(&str, &str)]) -> Self {
            Self {
                docs: docs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
                requested: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DocumentSource for MemorySource {
        fn name(&self) -> &str {
            "memory"
        }

        fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requested.lock().unwrap().push(path.to_string());
            self.docs
                .get(path)
                .map(|d| d.as_bytes().to_vec())
                .ok_or_else(|| LoadError::NotFound { path: path.to_string() })
        }
    }

    fn full_source() -> MemorySource {
        MemorySource::new(&[
            (PRICES_DOC, r#"{"topix": {"dates": ["2025-01"], "values": [2700.0], "returns": {"1y": 12.5}}}"#),
            (HISTORICAL_DOC, r#"{}"#),
            (METADATA_DOC, r#"{"topix": {"description": "東証", "inceptionDate": "1968-01-04", "rebalance": "毎月", "trusts": []}}"#),
            (PRODUCTS_DOC, r#"{"7203": "プリウス"}"#),
            (EVENTS_DOC, r#"[{"year": 2011, "description": "震災", "details": "", "indices": ["topix"]}]"#),
            ("topix/constituents.json", r#"{"lastUpdated": "2026-01-05", "totalConstituents": 1, "constituents": [{"ticker": "7203", "name": "トヨタ自動車", "sector": "自動車・輸送機", "weight": 3.8}], "sectors": {"自動車・輸送機": 3.8}}"#),
            ("topix/changes.json", r#"{"changes": [{"date": "2025-10-30", "type": "add", "ticker": "285A", "name": "キオクシア"}]}"#),
        ])
    }

    #[test]
    fn loads_all_seven_documents() {
        let source = full_source();
        let store = DataStore::load(&source, "topix").unwrap();

        assert_eq!(store.index(), IndexId::Topix);
        assert_eq!(store.constituents().len(), 1);
        assert_eq!(store.changes().len(), 1);
        assert_eq!(store.events().len(), 1);
        assert_eq!(store.products().lookup("7203", ""), Some("プリウス"));
        assert!(store.prices().is_some());
        assert!(store.metadata().is_some());
        assert!(store.historical().is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn invalid_index_fetches_nothing() {
        let source = full_source();
        let err = DataStore::load(&source, "ftse100").unwrap_err();
        assert!(matches!(err, LoadError::InvalidIndex(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_document_fails_whole_load() {
        let source = full_source();
        let err = DataStore::load(&source, "acwi").unwrap_err();
        match err {
            LoadError::NotFound { path } => assert!(path.starts_with("acwi/")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut source = full_source();
        source.docs.insert(EVENTS_DOC.into(), "[{".into());
        let err = DataStore::load(&source, "topix").unwrap_err();
        assert!(matches!(err, LoadError::Parse { ref path, .. } if path == EVENTS_DOC));
    }

    #[test]
    fn price_length_mismatch_is_rejected() {
        let mut source = full_source();
        source.docs.insert(
            PRICES_DOC.into(),
            r#"{"topix": {"dates": ["2025-01", "2025-02"], "values": [1.0]}}"#.into(),
        );
        let err = DataStore::load(&source, "topix").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDataset { .. }));
    }
}
