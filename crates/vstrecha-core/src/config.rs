//! Application configuration management.
//!
//! The only tunable is the page cache TTL. Configuration is stored at
//! `~/.config/vstrecha/config.json`; a missing file means defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Application name used for the config directory path
const APP_NAME: &str = "vstrecha";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// How long a cached page snapshot is served before refetching.
/// 5 minutes keeps back-navigation instant without showing noticeably old data.
pub const CACHE_TTL_MS: u64 = 300_000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub cache_ttl_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the cache settings, falling back to `CACHE_TTL_MS`.
    pub fn cache(&self) -> Result<CacheConfig, CacheError> {
        match self.cache_ttl_ms {
            Some(ms) => CacheConfig::with_ttl_ms(ms),
            None => Ok(CacheConfig::default()),
        }
    }
}

/// Validated cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    ttl_ms: u64,
}

impl CacheConfig {
    pub fn with_ttl_ms(ttl_ms: u64) -> Result<Self, CacheError> {
        if ttl_ms == 0 || ttl_ms > i64::MAX as u64 {
            return Err(CacheError::InvalidTtl(ttl_ms));
        }
        Ok(Self { ttl_ms })
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn ttl(&self) -> Duration {
        Duration::milliseconds(self.ttl_ms as i64)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: CACHE_TTL_MS,
        }
    }
}
