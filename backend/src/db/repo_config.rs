//! `repository.toml` support.
//!
//! The file selects the store backend, its Postgres connection settings and
//! the analytics limits enforced by the HTTP layer. Every table except
//! `[repository]` is optional.
//!
//! ```toml
//! [repository]
//! type = "postgres"
//!
//! [postgres]
//! database_url = "postgres://indexer@db/forum"
//!
//! [analytics]
//! max_divisions = 200
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::{RepositoryError, RepositoryResult};
use crate::algorithms::{DEFAULT_WINDOW_DAYS, MAX_DIVISIONS};

/// Where [`RepositoryConfig::load_default`] looks, in order.
pub const DEFAULT_CONFIG_PATHS: [&str; 3] =
    ["repository.toml", "backend/repository.toml", "../repository.toml"];

/// Parsed `repository.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySection,
    #[serde(default)]
    pub postgres: PostgresConfig,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySection {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Connection and retry settings of the Postgres store.
///
/// Field names are the `[postgres]` keys. Durations are whole seconds except
/// `retry_delay_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
    pub idle_timeout: u64,
    /// Extra attempts for retryable failures.
    pub max_retries: u32,
    /// First backoff delay; doubles on every retry.
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 30,
            idle_timeout: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_parsed<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl PostgresConfig {
    /// Settings from `DATABASE_URL` (or `PG_DATABASE_URL`) plus the optional
    /// `PG_POOL_MAX`, `PG_POOL_MIN`, `PG_CONN_TIMEOUT_SEC`,
    /// `PG_IDLE_TIMEOUT_SEC`, `PG_MAX_RETRIES` and `PG_RETRY_DELAY_MS`.
    pub fn from_env() -> RepositoryResult<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| {
                RepositoryError::configuration("DATABASE_URL or PG_DATABASE_URL must be set")
            })?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_connections: env_parsed("PG_POOL_MAX").unwrap_or(defaults.max_connections),
            min_connections: env_parsed("PG_POOL_MIN").unwrap_or(defaults.min_connections),
            connect_timeout: env_parsed("PG_CONN_TIMEOUT_SEC").unwrap_or(defaults.connect_timeout),
            idle_timeout: env_parsed("PG_IDLE_TIMEOUT_SEC").unwrap_or(defaults.idle_timeout),
            max_retries: env_parsed("PG_MAX_RETRIES").unwrap_or(defaults.max_retries),
            retry_delay_ms: env_parsed("PG_RETRY_DELAY_MS").unwrap_or(defaults.retry_delay_ms),
        })
    }
}

/// Limits applied to analytics requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSettings {
    /// Slot count used when a request does not name one.
    pub default_divisions: usize,
    /// Largest slot count a request may ask for.
    pub max_divisions: usize,
    /// Length of the daily activity window, today included.
    pub activity_window_days: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            default_divisions: 10,
            max_divisions: 1000,
            activity_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl AnalyticsSettings {
    /// Read overrides from `VOTE_TREND_DEFAULT_DIVISIONS`,
    /// `VOTE_TREND_MAX_DIVISIONS` and `ACTIVITY_WINDOW_DAYS`.
    ///
    /// Unset or unparsable variables keep the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_divisions: env_parsed("VOTE_TREND_DEFAULT_DIVISIONS")
                .unwrap_or(defaults.default_divisions),
            max_divisions: env_parsed("VOTE_TREND_MAX_DIVISIONS")
                .unwrap_or(defaults.max_divisions),
            activity_window_days: env_parsed("ACTIVITY_WINDOW_DAYS")
                .unwrap_or(defaults.activity_window_days),
        }
    }

    /// Positive divisions no larger than [`MAX_DIVISIONS`], default within
    /// the maximum and a non-empty activity window.
    pub fn validate(&self) -> RepositoryResult<()> {
        if self.default_divisions < 1 || self.max_divisions < 1 {
            return Err(RepositoryError::configuration(
                "analytics divisions must be at least 1",
            ));
        }
        if self.max_divisions > MAX_DIVISIONS {
            return Err(RepositoryError::configuration(format!(
                "max_divisions ({}) exceeds the supported {}",
                self.max_divisions, MAX_DIVISIONS
            )));
        }
        if self.default_divisions > self.max_divisions {
            return Err(RepositoryError::configuration(format!(
                "default_divisions ({}) exceeds max_divisions ({})",
                self.default_divisions, self.max_divisions
            )));
        }
        if self.activity_window_days < 1 {
            return Err(RepositoryError::configuration(
                "activity_window_days must be at least 1",
            ));
        }
        Ok(())
    }
}

impl RepositoryConfig {
    /// Read and validate a config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            RepositoryError::ConfigurationError(msg) => {
                RepositoryError::configuration(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse and validate config text.
    pub fn from_toml_str(content: &str) -> RepositoryResult<Self> {
        let config: RepositoryConfig = toml::from_str(content)
            .map_err(|e| RepositoryError::configuration(format!("invalid TOML: {}", e)))?;
        config.repository_type()?;
        config.analytics.validate()?;
        Ok(config)
    }

    /// Load the first of `candidates` that exists.
    ///
    /// `Ok(None)` when none exists. A file that exists but cannot be read,
    /// parsed or validated is an error, never skipped.
    pub fn load_first<P: AsRef<Path>>(candidates: &[P]) -> RepositoryResult<Option<Self>> {
        match candidates.iter().map(AsRef::as_ref).find(|p| p.exists()) {
            Some(path) => Self::from_file(path).map(Some),
            None => Ok(None),
        }
    }

    /// [`load_first`](Self::load_first) over [`DEFAULT_CONFIG_PATHS`].
    pub fn load_default() -> RepositoryResult<Option<Self>> {
        let candidates: Vec<PathBuf> = DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect();
        Self::load_first(&candidates)
    }

    /// Like [`load_default`](Self::load_default) but a missing file is an
    /// error too.
    pub fn from_default_location() -> RepositoryResult<Self> {
        Self::load_default()?.ok_or_else(|| {
            RepositoryError::configuration("no repository.toml found in standard locations")
        })
    }

    pub fn repository_type(&self) -> RepositoryResult<RepositoryType> {
        self.repository
            .repo_type
            .parse()
            .map_err(RepositoryError::configuration)
    }
}
