//! Document retrieval, the per-view data store, and snapshot building

pub mod http;
pub mod snapshot;
pub mod source;
pub mod store;

pub use http::HttpSource;
pub use snapshot::{build_snapshot, build_snapshot_on, BuildError, MarketCapRow};
pub use source::{DirectorySource, DocumentSource, LoadError};
pub use store::{DataStore, SharedData};
