//! IndexLens Core: datasets, view computations and configuration for the
//! stock-index composition dashboard.
//!
//! - Domain types for constituents, changes, events, prices and history
//! - Document sources (local directory or static HTTP origin) and the
//!   concurrently loaded per-view `DataStore`
//! - Pure views: timeline, portfolio simulation, constituent query, returns,
//!   price window, historical composition, overview
//! - Label and color tables, explicit view parameters, debouncing and TOML
//!   configuration

pub mod config;
pub mod data;
pub mod debounce;
pub mod domain;
pub mod labels;
pub mod params;
pub mod views;

pub use config::{ConfigError, DashboardConfig};
pub use data::{DataStore, LoadError};
pub use domain::IndexId;
pub use params::ViewParams;
