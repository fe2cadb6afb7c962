//! Domain types for index composition documents

pub mod change;
pub mod constituent;
pub mod dates;
pub mod event;
pub mod history;
pub mod index;
pub mod metadata;
pub mod ordered;
pub mod prices;
pub mod products;

pub use change::{ChangeEntry, ChangeKind, ChangesDocument, ItemizedChange, SummaryChange};
pub use constituent::{ConstituentRecord, IndexSnapshot};
pub use event::NarrativeEvent;
pub use history::{HistoricalCompositionSeries, YearComposition};
pub use index::{IndexId, ParseIndexError};
pub use metadata::IndexMetadata;
pub use ordered::OrderedMap;
pub use prices::{Horizon, PriceSeries, PriceSeriesError};
pub use products::ProductMapping;
