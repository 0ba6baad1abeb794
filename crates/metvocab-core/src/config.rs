//! Configuration for the vocabulary cache and registry client.
//!
//! `VocabConfig` is built once by the host application and handed by
//! reference to `HttpFetcher` and `DiskCache`. Nothing else in the crate reads
//! the process environment; `VocabConfig::from_env` is the one place that does.

use crate::error::{Result, VocabError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable naming the cache root directory.
pub const ENV_CACHE_PATH: &str = "METVOCAB_CACHEPATH";
/// Environment variable giving the maximum cache age in days.
pub const ENV_CACHE_DAYS: &str = "METVOCAB_CACHEDAYS";

/// Registry endpoint constants.
pub struct RegistryConfig;

impl RegistryConfig {
    pub const API_ROOT: &'static str = "https://vocab.met.no/rest/v1";
    pub const USER_AGENT: &'static str = "Met-Vocab-Tools (Rust crate)";
    pub const ACCEPT: &'static str = "application/ld+json";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
}

/// Cache directory and file naming.
pub struct PathsConfig;

impl PathsConfig {
    pub const CACHE_DIR_NAME: &'static str = "metvocab";
    pub const CACHE_FILE_SUFFIX: &'static str = ".json";
}

/// Resolved configuration consumed by the cache and the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabConfig {
    /// Absolute path of the cache root.
    pub cache_root: PathBuf,
    /// Cache entries older than this are refreshed.
    pub max_age: Duration,
    /// Base URL of the registry REST API, without trailing slash.
    pub api_root: String,
    /// Timeout applied to every registry request.
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl VocabConfig {
    pub const DEFAULT_CACHE_DAYS: u64 = 7;
    /// Lower bound applied to `max_age`.
    pub const MIN_MAX_AGE: Duration = Duration::from_secs(60 * 60);
    const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

    /// Create a configuration for an existing cache root with default
    /// registry settings and a seven day max age.
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            max_age: Duration::from_secs(Self::DEFAULT_CACHE_DAYS * Self::SECONDS_PER_DAY),
            api_root: RegistryConfig::API_ROOT.to_string(),
            request_timeout: RegistryConfig::REQUEST_TIMEOUT,
            user_agent: RegistryConfig::USER_AGENT.to_string(),
        }
    }

    /// Set the maximum cache age. Values below one hour are raised to one hour.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        if max_age < Self::MIN_MAX_AGE {
            warn!(
                "Cache max age {:?} is below the minimum, using {:?}",
                max_age,
                Self::MIN_MAX_AGE
            );
            self.max_age = Self::MIN_MAX_AGE;
        } else {
            self.max_age = max_age;
        }
        self
    }

    /// Set the registry API root.
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build a configuration from `METVOCAB_CACHEPATH` and
    /// `METVOCAB_CACHEDAYS`, creating the cache root if needed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let cache_root = match lookup(ENV_CACHE_PATH) {
            Some(path) if !path.trim().is_empty() => absolute_path(Path::new(path.trim()))?,
            _ => default_cache_root(),
        };

        std::fs::create_dir_all(&cache_root)
            .map_err(|e| VocabError::io_with_path(e, &cache_root))?;
        debug!("Cache path is {}", cache_root.display());

        let days = match lookup(ENV_CACHE_DAYS) {
            Some(value) => value.trim().parse::<u64>().map_err(|e| VocabError::Config {
                message: format!(
                    "{} must be a whole number of days, got '{}': {}",
                    ENV_CACHE_DAYS, value, e
                ),
            })?,
            None => Self::DEFAULT_CACHE_DAYS,
        };

        Ok(Self::new(cache_root)
            .with_max_age(Duration::from_secs(days.saturating_mul(Self::SECONDS_PER_DAY))))
    }
}

/// Pick a per-user data directory for the cache, falling back to the home
/// directory and finally the working directory.
fn default_cache_root() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(PathsConfig::CACHE_DIR_NAME)
}

fn absolute_path(path: &Path) -> Result<PathBuf> {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    std::path::absolute(&expanded).map_err(|e| VocabError::io_with_path(e, expanded))
}
