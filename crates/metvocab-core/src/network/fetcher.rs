//! Fetcher trait used by the disk cache to refresh entries.

use crate::document::VocabDocument;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of vocabulary documents.
///
/// A fetch makes exactly one attempt. Transport failures and non-success
/// statuses are soft and come back as `Ok(None)`. An `Err` means the
/// registry answered successfully with something that is not a document,
/// which callers should not paper over.
#[async_trait]
pub trait VocabFetcher: Send + Sync {
    async fn fetch(&self, voc_id: &str, uri: &str) -> Result<Option<VocabDocument>>;
}

/// Shared fetcher handle.
pub type DynFetcher = Arc<dyn VocabFetcher>;
