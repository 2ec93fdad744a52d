// Path: crates/api/src/fetch/mod.rs

//! Defines the `DocumentFetcher` trait used to retrieve anchor documents.

use crate::error::FetchError;
use async_trait::async_trait;

pub mod http;

pub use http::HttpDocumentFetcher;

/// Retrieves the raw bytes of an off-chain document.
///
/// Callers are expected to have already rewritten content-addressed URLs to an
/// HTTP gateway; fetchers only speak HTTP(S).
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the document at `url` and returns its body unmodified.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}
