//! On-disk vocabulary cache with max-age freshness and stale fallback.
//!
//! Each registry URI maps to one JSON file:
//! `<cache_root>/<host>/<path segments except last>/<last segment>.json`.
//! File presence and mtime are the only cache metadata.
//!
//! Lookup order for [`DiskCache::get`]:
//! 1. Fresh file on disk: return it, no network call
//! 2. Missing or stale: one fetch attempt
//!    - success: atomically overwrite the file and return the new document
//!    - failure: return the stale file if there is one, otherwise `None`

use crate::cache::atomic;
use crate::config::{PathsConfig, VocabConfig};
use crate::document::VocabDocument;
use crate::error::{Result, VocabError};
use crate::network::{DynFetcher, HttpFetcher};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};
use url::Url;

/// Freshness report for one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub has_cache: bool,
    pub is_fresh: bool,
    pub age_seconds: Option<u64>,
    /// RFC 3339 mtime of the cache file.
    pub last_modified: Option<String>,
}

/// File-per-URI cache in front of a [`VocabFetcher`](crate::network::VocabFetcher).
///
/// Holds no per-call state; share one instance between indexes.
pub struct DiskCache {
    cache_root: PathBuf,
    max_age: Duration,
    fetcher: DynFetcher,
}

impl DiskCache {
    /// Create a cache rooted at `config.cache_root` that refreshes through `fetcher`.
    pub fn new(config: &VocabConfig, fetcher: DynFetcher) -> Self {
        Self {
            cache_root: config.cache_root.clone(),
            max_age: config.max_age,
            fetcher,
        }
    }

    /// Create a cache backed by the registry REST API.
    pub fn with_http(config: &VocabConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Return the document for `uri`, preferring a fresh local copy.
    ///
    /// Fails with `MalformedUri` before touching disk or network if `uri`
    /// has no final path segment. A malformed body in a successful registry
    /// response is also an error; every other fetch failure degrades to the
    /// stale copy or `None`.
    pub async fn get(&self, voc_id: &str, uri: &str) -> Result<Option<VocabDocument>> {
        let path = self.cache_path(uri)?;

        match entry_age(&path) {
            Some(age) if age < self.max_age => match atomic::read_json::<VocabDocument>(&path) {
                Ok(Some(doc)) => {
                    debug!("Vocabulary cache hit for {} (age {}s)", uri, age.as_secs());
                    return Ok(Some(doc));
                }
                Ok(None) => {}
                Err(e) => warn!("Unreadable cache entry for {}, refreshing: {}", uri, e),
            },
            Some(age) => debug!(
                "Vocabulary cache stale for {} (age {}s), trying network",
                uri,
                age.as_secs()
            ),
            None => debug!("No cache entry for {}, fetching", uri),
        }

        match self.fetcher.fetch(voc_id, uri).await? {
            Some(doc) => {
                match atomic::write_json(&path, &doc) {
                    Ok(()) => info!("Refreshed vocabulary cache for {}", uri),
                    Err(e) => warn!("Failed to store cache entry for {}: {}", uri, e),
                }
                Ok(Some(doc))
            }
            None => self.stale_fallback(&path, uri),
        }
    }

    /// Deterministic cache file path for `uri`.
    pub fn cache_path(&self, uri: &str) -> Result<PathBuf> {
        let parsed = Url::parse(uri).map_err(|e| VocabError::malformed_uri(uri, e.to_string()))?;

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| VocabError::malformed_uri(uri, "missing host"))?;
        if is_relative_component(host) {
            return Err(VocabError::malformed_uri(uri, "host is a relative path component"));
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|s| s.collect())
            .unwrap_or_default();
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| VocabError::malformed_uri(uri, "empty path"))?;
        if last.is_empty() {
            return Err(VocabError::malformed_uri(uri, "missing final path segment"));
        }
        if segments.iter().copied().any(is_relative_component) {
            return Err(VocabError::malformed_uri(uri, "path contains '.' or '..' segments"));
        }

        let mut path = self.cache_root.join(host);
        for segment in parents.iter().filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}{}", last, PathsConfig::CACHE_FILE_SUFFIX));
        Ok(path)
    }

    /// Report the cache state for `uri` without touching the network.
    pub fn entry_status(&self, uri: &str) -> Result<CacheStatus> {
        let path = self.cache_path(uri)?;
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        let age = modified.map(age_since);

        Ok(CacheStatus {
            has_cache: modified.is_some(),
            is_fresh: age.map(|a| a < self.max_age).unwrap_or(false),
            age_seconds: age.map(|a| a.as_secs()),
            last_modified: modified.map(|m| DateTime::<Utc>::from(m).to_rfc3339()),
            path,
        })
    }

    fn stale_fallback(&self, path: &Path, uri: &str) -> Result<Option<VocabDocument>> {
        match atomic::read_json::<VocabDocument>(path) {
            Ok(Some(doc)) => {
                warn!("Network fetch failed for {}, using stale cache", uri);
                Ok(Some(doc))
            }
            Ok(None) => {
                warn!("Network fetch failed for {} and nothing is cached", uri);
                Ok(None)
            }
            Err(e) => {
                warn!("Network fetch failed for {} and cache entry is unreadable: {}", uri, e);
                Ok(None)
            }
        }
    }
}

/// Components that would resolve outside their parent directory. Checked
/// after percent-decoding too, since `%2e%2e` survives URL parsing in hosts.
fn is_relative_component(component: &str) -> bool {
    let decoded = urlencoding::decode(component)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| component.to_string());
    matches!(component, "." | "..") || matches!(decoded.as_str(), "." | "..")
}

/// Age of the file at `path`, or `None` if it does not exist.
fn entry_age(path: &Path) -> Option<Duration> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(age_since)
}

/// Future mtimes count as age zero.
fn age_since(modified: SystemTime) -> Duration {
    SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO)
}
