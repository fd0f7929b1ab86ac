//! Catalog configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunables shared by the catalog store, its views and the admin tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Maximum number of records in the "all" listing.
    #[serde(default = "default_all_limit")]
    pub all_limit: usize,

    /// How often a view re-polls the store (milliseconds).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Simulated delay of the product detail extractor (milliseconds).
    #[serde(default = "default_extract_delay_ms")]
    pub extract_delay_ms: u64,

    /// Shared secret for the admin login.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_all_limit() -> usize {
    12
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

fn default_extract_delay_ms() -> u64 {
    1_500
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            all_limit: default_all_limit(),
            poll_interval_ms: default_poll_interval_ms(),
            extract_delay_ms: default_extract_delay_ms(),
            admin_password: default_admin_password(),
        }
    }
}

impl CatalogConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn extract_delay(&self) -> Duration {
        Duration::from_millis(self.extract_delay_ms)
    }
}
