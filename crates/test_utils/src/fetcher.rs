// Path: crates/test_utils/src/fetcher.rs
//! A document fetcher serving canned bodies.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use vigil_api::error::FetchError;
use vigil_api::fetch::DocumentFetcher;

/// Serves documents from a map; unknown URLs answer `404`.
#[derive(Default)]
pub struct StaticFetcher {
    documents: HashMap<String, Vec<u8>>,
    failures: HashMap<String, FetchError>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// An empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `url`.
    pub fn with_document(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.documents.insert(url.into(), body.into());
        self
    }

    /// Fails every request for `url` with `error`.
    pub fn with_failure(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.failures.insert(url.into(), error);
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        if let Some(err) = self.failures.get(url) {
            return Err(err.clone());
        }
        self.documents
            .get(url)
            .cloned()
            .ok_or(FetchError::Status(404))
    }
}
