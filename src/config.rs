//! Runtime configuration read from `layered-nav.toml`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "layered-nav.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the persisted UI snapshot lives.
    pub state_dir: PathBuf,
    /// Sampling period of the persistent state synchronizer.
    pub sync_interval_ms: u64,
    pub log_dir: PathBuf,
    /// Used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(".cache"),
            sync_interval_ms: 1000,
            log_dir: PathBuf::from(".logs"),
            log_filter: "layered_nav=debug,warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Load `layered-nav.toml` from the working directory, falling back to
    /// defaults when it cannot be used.
    ///
    /// Runs before logging is set up, so problems go to stderr.
    pub fn load() -> Self {
        match Self::load_from(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {e:#}; using default configuration");
                Self::default()
            }
        }
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }

    fn sanitized(mut self) -> Self {
        // tokio's interval panics on a zero period
        if self.sync_interval_ms == 0 {
            self.sync_interval_ms = Self::default().sync_interval_ms;
        }
        self
    }
}
