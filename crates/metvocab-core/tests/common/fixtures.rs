//! Fixture loading and cache helpers.

use metvocab_core::{DiskCache, VocabConfig};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

pub const MMD: &str = "mmd";
pub const INSTRUMENT: &str = "https://vocab.met.no/mmd/Instrument";
pub const MODIS: &str = "https://vocab.met.no/mmd/Instrument/MODIS";
pub const OLCI: &str = "https://vocab.met.no/mmd/Instrument/OLCI";
pub const ACCESS_CONSTRAINT: &str = "https://vocab.met.no/mmd/Access_Constraint";

/// Older than the default seven day max age.
pub const EIGHT_DAYS: Duration = Duration::from_secs(8 * 24 * 60 * 60);

/// Parse `tests/fixtures/<name>`.
pub fn load_fixture(name: &str) -> Value {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("missing fixture {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("bad fixture {}: {}", name, e))
}

/// Config pointing at `api_root` with a fresh temp cache directory.
pub fn test_config(api_root: &str) -> (VocabConfig, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = VocabConfig::new(temp_dir.path())
        .with_api_root(api_root)
        .with_request_timeout(Duration::from_secs(5));
    (config, temp_dir)
}

/// HTTP-backed cache against `api_root`.
pub fn http_cache(api_root: &str) -> (Arc<DiskCache>, TempDir) {
    let (config, temp_dir) = test_config(api_root);
    let cache = DiskCache::with_http(&config).unwrap();
    (Arc::new(cache), temp_dir)
}

/// Push a cache entry's mtime into the past.
pub fn backdate(path: &PathBuf, by: Duration) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - by).unwrap();
}

/// Number of regular files below `dir`.
pub fn count_files(dir: &Path) -> usize {
    let mut count = 0;
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                count += 1;
            }
        }
    }
    count
}
