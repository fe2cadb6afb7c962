//! Pure view computations over a loaded [`DataStore`](crate::data::DataStore).
//!
//! Every function here is synchronous and side-effect free; callers recompute
//! a view whenever its inputs change.

pub mod historical;
pub mod overview;
pub mod prices;
pub mod query;
pub mod returns;
pub mod simulation;
pub mod timeline;

pub use historical::{composition_history, top_categories, CategoryShare, YearBreakdown};
pub use overview::{overview, Overview, Slice};
pub use prices::{window, PriceWindow};
pub use query::{query, QueryResult, DEFAULT_DISPLAY_CAP};
pub use returns::{summarize, ReturnLine, Tone};
pub use simulation::{format_yen, simulate, simulate_snapshot, BarSegment, SimulatedHolding, Simulation};
pub use timeline::{build_timeline, ChangeCard, DateGroup, GroupLayout, TextSegment, EMPTY_TIMELINE};
