//! Configuration service implementation.
//!
//! Loads the root configuration from the configuration file
//! (~/.config/sesh/config.toml) and caches it. A missing file yields the
//! defaults; a malformed one is logged and also falls back to defaults,
//! so a bad edit never takes the service down.

use crate::paths::SeshPaths;
use sesh_core::config::AppConfig;
use sesh_core::error::{Result, SeshError};
use std::path::Path;
use std::sync::{Arc, RwLock};
use tracing::warn;

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService. The configuration is loaded lazily on
    /// first access.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = Self::load_default_location().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load config, using defaults");
            AppConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Loads the configuration from an explicit path. A missing file is
    /// the defaults, not an error.
    pub fn load_from_path(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    fn load_default_location() -> Result<AppConfig> {
        let path = SeshPaths::config_file()
            .map_err(|err| SeshError::config(format!("config path: {err}")))?;
        Self::load_from_path(&path)
    }
}
