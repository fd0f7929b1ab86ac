//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use glow_commerce::admin::AdminGate;
use glow_commerce::catalog::CatalogStore;
use glow_store::FileStore;

use crate::config::{GlowConfig, CONFIG_NAMES};
use crate::output::Output;

/// The store shared by the catalog and the admin gate.
pub type SharedStore = Arc<FileStore>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: GlowConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config are resolved against.
    root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let root = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| cwd.clone(), Path::to_path_buf);
            (GlowConfig::load(path)?, root)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (GlowConfig::default(), cwd.clone()))
        };

        Ok(Self {
            config,
            output,
            cwd,
            root,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(GlowConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match GlowConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config, current)),
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %e, "skipping unreadable config")
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> PathBuf {
        if self.config.data_dir.is_absolute() {
            self.config.data_dir.clone()
        } else {
            self.root.join(&self.config.data_dir)
        }
    }

    /// Open the on-disk store.
    pub fn open_store(&self) -> Result<SharedStore> {
        let dir = self.data_dir();
        let mut store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
        if let Some(quota) = self.config.quota_bytes {
            store = store.with_quota(quota);
        }
        self.output.debug(&format!("Using data directory {}", dir.display()));
        Ok(Arc::new(store))
    }

    /// Open the catalog over `store`.
    pub fn catalog(&self, store: &SharedStore) -> Arc<CatalogStore<SharedStore>> {
        Arc::new(CatalogStore::from_config(
            Arc::clone(store),
            &self.config.catalog,
        ))
    }

    /// Open the admin gate over `store`.
    pub fn admin_gate(&self, store: &SharedStore) -> AdminGate<SharedStore> {
        AdminGate::new(Arc::clone(store), self.config.catalog.admin_password.clone())
    }

    /// Fail unless an admin is logged in.
    pub fn require_admin(&self, store: &SharedStore) -> Result<()> {
        if !self.admin_gate(store).is_admin()? {
            bail!("Admin login required. Run `glow login` first.");
        }
        Ok(())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
