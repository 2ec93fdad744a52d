// Path: crates/validator/src/anchor.rs
//! The metadata anchor verifier.
//!
//! A vote cites an off-chain rationale document by `(url, hash)`. The verifier
//! fetches the document and checks that its BLAKE2b-256 hash matches. Every
//! failure, from an unreachable host to a tampered document, is reported as
//! `false`: a bad anchor is expected adversarial input, not a crash.

use vigil_api::fetch::DocumentFetcher;
use vigil_crypto::blake2b_256;
use vigil_telemetry::metrics;
use vigil_telemetry::time::Timer;
use vigil_types::app::{Anchor, Hash32};
use vigil_types::config::AnchorConfig;

const IPFS_SCHEME: &str = "ipfs://";

/// Verifies anchor documents through an injected fetcher.
#[derive(Debug, Clone)]
pub struct AnchorVerifier<F> {
    fetcher: F,
    gateway: String,
}

impl<F: DocumentFetcher> AnchorVerifier<F> {
    /// Creates a verifier that rewrites `ipfs://` URLs onto `config.ipfs_gateway`.
    pub fn new(fetcher: F, config: &AnchorConfig) -> Self {
        Self {
            fetcher,
            gateway: config.ipfs_gateway.trim_end_matches('/').to_string(),
        }
    }

    /// The URL that will actually be fetched for `url`.
    pub fn resolve_url(&self, url: &str) -> String {
        match url.strip_prefix(IPFS_SCHEME) {
            Some(path) => format!("https://{}/{}", self.gateway, path),
            None => url.to_string(),
        }
    }

    /// Fetches `url` and checks the document hashes to `expected`.
    pub async fn verify(&self, url: &str, expected: &Hash32) -> bool {
        let resolved = self.resolve_url(url);
        let fetched = {
            let _timer = Timer::new(metrics());
            self.fetcher.fetch(&resolved).await
        };
        let document = match fetched {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(target: "anchor", url = %resolved, error = %e, "anchor document fetch failed");
                metrics().inc_anchor_checks("fetch_failed");
                return false;
            }
        };

        let actual = blake2b_256(&document);
        let valid = actual == *expected;
        if valid {
            metrics().inc_anchor_checks("valid");
            tracing::info!(target: "anchor", url = %resolved, hash = %actual, "anchor verified");
        } else {
            metrics().inc_anchor_checks("mismatch");
            tracing::warn!(
                target: "anchor",
                url = %resolved,
                expected = %expected,
                actual = %actual,
                "anchor hash mismatch"
            );
        }
        valid
    }

    /// Verifies an on-chain anchor.
    pub async fn verify_anchor(&self, anchor: &Anchor) -> bool {
        self.verify(&anchor.url, &anchor.data_hash).await
    }

    /// Like [`verify`](Self::verify), with the expected hash given as hex.
    /// Unparseable hex is a failed check.
    pub async fn verify_hex(&self, url: &str, expected_hex: &str) -> bool {
        match expected_hex.trim().parse::<Hash32>() {
            Ok(expected) => self.verify(url, &expected).await,
            Err(e) => {
                tracing::warn!(target: "anchor", error = %e, "expected anchor hash is not valid hex");
                false
            }
        }
    }
}
