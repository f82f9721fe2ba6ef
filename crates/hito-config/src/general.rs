//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default calendar page size.
const fn default_page_size() -> usize {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows per calendar page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Client used when a command does not name one.
    #[serde(default)]
    pub default_client_id: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_client_id: None,
        }
    }
}
