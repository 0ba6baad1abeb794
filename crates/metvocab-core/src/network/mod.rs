//! Registry access.
//!
//! This module provides:
//! - The `VocabFetcher` trait that `DiskCache` refreshes through
//! - `HttpFetcher`, the reqwest-backed implementation for the REST API

mod client;
mod fetcher;

pub use client::HttpFetcher;
pub use fetcher::{DynFetcher, VocabFetcher};
