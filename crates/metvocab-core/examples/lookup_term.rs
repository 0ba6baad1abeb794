//! Check a term against the MMD vocabularies.
//!
//! ```text
//! cargo run --example lookup_term -- Open
//! cargo run --example lookup_term -- modis
//! ```
//!
//! Honours `METVOCAB_CACHEPATH`, `METVOCAB_CACHEDAYS`, `METVOCAB_LOGLEVEL`
//! and `METVOCAB_LOGFILE`.

use metvocab_core::{init_logging, ConceptIndex, DiskCache, GroupIndex, LogConfig, VocabConfig};
use std::sync::Arc;

const ACCESS_CONSTRAINT: &str = "https://vocab.met.no/mmd/Access_Constraint";
const INSTRUMENT: &str = "https://vocab.met.no/mmd/Instrument";

#[tokio::main(flavor = "current_thread")]
async fn main() -> metvocab_core::Result<()> {
    init_logging(&LogConfig::from_env())?;

    let term = std::env::args().nth(1).unwrap_or_else(|| "Open".to_string());
    let config = VocabConfig::from_env()?;
    let cache = Arc::new(DiskCache::with_http(&config)?);

    let mut access = ConceptIndex::new(cache.clone(), "mmd", ACCESS_CONSTRAINT);
    access.init_vocab().await?;
    println!(
        "{:?} is {}a valid access constraint",
        term,
        if access.check_concept_value(&term) { "" } else { "not " }
    );

    let mut instruments = GroupIndex::new(cache.clone(), "mmd", INSTRUMENT);
    instruments.init_vocab().await?;
    match instruments.search_lowercase(&term) {
        Some(record) => println!(
            "{}",
            serde_json::to_string_pretty(&record).unwrap_or_default()
        ),
        None => println!("No instrument matches {:?}", term),
    }

    let status = cache.entry_status(INSTRUMENT)?;
    println!(
        "Instrument cache: {} (fresh: {})",
        status.path.display(),
        status.is_fresh
    );

    Ok(())
}
