// Path: crates/api/src/fetch/http.rs

use super::DocumentFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use vigil_types::MAX_ANCHOR_DOCUMENT_BYTES;

/// A `DocumentFetcher` backed by a plain HTTP GET.
pub struct HttpDocumentFetcher {
    client: Client,
    max_bytes: usize,
}

impl HttpDocumentFetcher {
    /// Builds a fetcher whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_bytes: MAX_ANCHOR_DOCUMENT_BYTES,
        })
    }

    /// Overrides the largest document accepted.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(format!("HTTP Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("anchor fetch {} returned {}", url, status);
            return Err(FetchError::Status(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > self.max_bytes as u64 {
                return Err(FetchError::TooLarge {
                    max: self.max_bytes,
                });
            }
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(format!("Failed to read body: {}", e))
            }
        })?;
        if body.len() > self.max_bytes {
            return Err(FetchError::TooLarge {
                max: self.max_bytes,
            });
        }
        Ok(body.to_vec())
    }
}
