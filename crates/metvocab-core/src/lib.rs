//! MetVocab Core - cached lookup of controlled-vocabulary terms.
//!
//! Resolves terms published as JSON-LD by a SKOS vocabulary registry
//! (e.g. `https://vocab.met.no`), caches the documents on local disk with a
//! max-age policy, and answers membership and search queries against them.
//!
//! # Example
//!
//! ```rust,ignore
//! use metvocab_core::{ConceptIndex, DiskCache, GroupIndex, VocabConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> metvocab_core::Result<()> {
//!     let config = VocabConfig::from_env()?;
//!     let cache = Arc::new(DiskCache::with_http(&config)?);
//!
//!     let mut access = ConceptIndex::new(
//!         cache.clone(),
//!         "mmd",
//!         "https://vocab.met.no/mmd/Access_Constraint",
//!     );
//!     access.init_vocab().await?;
//!     assert!(access.check_concept_value("Open"));
//!
//!     let mut instruments =
//!         GroupIndex::new(cache, "mmd", "https://vocab.met.no/mmd/Instrument");
//!     instruments.init_vocab().await?;
//!     println!("{:?}", instruments.search_lowercase("modis"));
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod labels;
pub mod logging;
pub mod network;

pub use cache::{CacheStatus, DiskCache};
pub use config::VocabConfig;
pub use document::{ConceptNode, VocabDocument};
pub use error::{Result, VocabError};
pub use index::{ConceptIndex, ConceptRecord, GroupIndex, MemberConcept, ResourceSource};
pub use labels::{Field, FieldShape, LabelEntry, Labels};
pub use logging::{init_logging, LogConfig};
pub use network::{DynFetcher, HttpFetcher, VocabFetcher};
