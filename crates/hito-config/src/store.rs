//! Record store location.

use serde::{Deserialize, Serialize};

fn default_snapshot_path() -> String {
    ".hitos/snapshot.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON snapshot backing the local record store.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}
