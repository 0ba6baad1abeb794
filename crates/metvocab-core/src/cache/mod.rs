//! Local persistence of vocabulary documents.
//!
//! - `DiskCache`: max-age freshness with stale-on-failure fallback
//! - Atomic JSON file operations for cache entries

mod atomic;
mod disk;

pub use atomic::{read_json, write_json};
pub use disk::{CacheStatus, DiskCache};
