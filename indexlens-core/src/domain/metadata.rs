use serde::{Deserialize, Serialize};

/// Per-index descriptive metadata from `index_metadata.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub inception_date: String,
    /// Free-text rebalance schedule.
    #[serde(default)]
    pub rebalance: String,
    /// Investment trusts that track the index.
    #[serde(default)]
    pub trusts: Vec<String>,
}
