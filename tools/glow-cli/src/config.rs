//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use glow_commerce::CatalogConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["glow.toml", ".glow.toml", "glow.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlowConfig {
    /// Directory holding the product store, relative to the working directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Optional store size limit in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,

    /// Catalog tunables.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".glow")
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            quota_bytes: None,
            catalog: CatalogConfig::default(),
        }
    }
}

impl GlowConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Generate a default glow.toml config file.
pub fn generate_default_config() -> String {
    let defaults = CatalogConfig::default();
    format!(
        r#"# GlowBeauty catalog configuration

# Where products and the admin session are stored
data_dir = ".glow"

# Reject writes once the store grows past this many bytes
# quota_bytes = 5242880

[catalog]
# Products shown on the "all" page
all_limit = {all_limit}
# How often `glow watch` re-reads the store (ms)
poll_interval_ms = {poll}
# Simulated fetch time of `glow extract` (ms)
extract_delay_ms = {delay}
admin_password = "{password}"
"#,
        all_limit = defaults.all_limit,
        poll = defaults.poll_interval_ms,
        delay = defaults.extract_delay_ms,
        password = defaults.admin_password,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: GlowConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".glow"));
        assert_eq!(config.quota_bytes, None);
        assert_eq!(config.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glow.json");
        let path = path.to_str().unwrap();

        let mut config = GlowConfig::default();
        config.catalog.all_limit = 3;
        config.save(path).unwrap();

        let loaded = GlowConfig::load(path).unwrap();
        assert_eq!(loaded.catalog.all_limit, 3);
    }

    #[test]
    fn test_partial_toml() {
        let config: GlowConfig = toml::from_str("data_dir = \"/var/glow\"").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/glow"));
        assert_eq!(config.catalog.poll_interval_ms, 2000);
    }
}
