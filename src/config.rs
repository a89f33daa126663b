use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FeedConfig {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub feed: SequencerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the content API, without a trailing slash (e.g. `http://localhost:3000/api`).
    pub base_url: String,
    pub health_url: String,
    /// User id sent with like toggles.
    pub user_id: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
    /// Prefix prepended to every document key.
    pub key_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SequencerConfig {
    pub initial_window: usize,
    pub window_increment: usize,
    /// Upper bound on the window size. `0` means unbounded.
    pub max_window: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            health_url: "http://localhost:3000/health".into(),
            user_id: 1,
            timeout_secs: 10,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let db_path = default_feed_dir()
            .join("feed.db")
            .to_string_lossy()
            .into_owned();
        Self {
            db_path,
            key_prefix: "@conceptfeed".into(),
        }
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            initial_window: 20,
            window_increment: 10,
            max_window: 0,
        }
    }
}

impl SequencerConfig {
    /// The window cap, or `None` when growth is unbounded.
    pub fn window_cap(&self) -> Option<usize> {
        (self.max_window > 0).then_some(self.max_window)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Returns `~/.conceptfeed/`, falling back to the working directory when no home exists.
pub fn default_feed_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".conceptfeed")
}

/// Returns the default config file path: `~/.conceptfeed/config.toml`
pub fn default_config_path() -> PathBuf {
    default_feed_dir().join("config.toml")
}

impl FeedConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            FeedConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (CONCEPTFEED_API_URL, CONCEPTFEED_DB, CONCEPTFEED_USER_ID, CONCEPTFEED_LOG_LEVEL).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CONCEPTFEED_API_URL") {
            self.remote.base_url = val;
        }
        if let Ok(val) = std::env::var("CONCEPTFEED_DB") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("CONCEPTFEED_USER_ID") {
            self.remote.user_id = val
                .parse()
                .with_context(|| format!("CONCEPTFEED_USER_ID is not a number: {val}"))?;
        }
        if let Ok(val) = std::env::var("CONCEPTFEED_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }

    /// Resolve the database path, expanding `~` if needed.
    pub fn resolved_db_path(&self) -> PathBuf {
        expand_tilde(&self.storage.db_path)
    }

}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
