use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::storage::RecentFrequentOrder;
use crate::{Error, Result};

/// Default number of rows shown by `recent` and `frequent`
pub const DEFAULT_LIMIT: usize = 10;

/// Optional per-repository settings, read from `.git/gitbm.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GitbmConfig {
    pub default_limit: Option<usize>,
    pub recent_frequent_order: Option<RecentFrequentOrder>,
    pub busy_timeout_ms: Option<u64>,
    pub install_hook: Option<bool>,
}

impl GitbmConfig {
    pub fn default_limit(&self) -> usize {
        self.default_limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn recent_frequent_order(&self) -> RecentFrequentOrder {
        self.recent_frequent_order.unwrap_or_default()
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms.unwrap_or(0))
    }

    pub fn install_hook(&self) -> bool {
        self.install_hook.unwrap_or(true)
    }
}

pub fn default_config_path_in(git_dir: &Path) -> PathBuf {
    git_dir.join("gitbm.toml")
}

pub fn default_database_path_in(git_dir: &Path) -> PathBuf {
    git_dir.join("gitbm.db")
}

/// Load the config at `path`; a missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<GitbmConfig> {
    if !path.exists() {
        return Ok(GitbmConfig::default());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: GitbmConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}
