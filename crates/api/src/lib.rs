// Path: crates/api/src/lib.rs

//! # vigil API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # vigil API
//!
//! Core traits for the inspector's external collaborators: the wallet that
//! signs, the fetcher that retrieves anchor documents and the ledger that
//! persists council poll votes. Concrete HTTP adapters live beside each trait.

/// Defines unified traits for cryptographic primitives.
pub mod crypto;
/// Re-exports all core error types from the central `vigil-types` crate.
pub mod error;
/// Defines the `DocumentFetcher` trait and its HTTP adapter.
pub mod fetch;
/// Defines the `VoteLedger` trait and its HTTP adapter.
pub mod ledger;
/// Defines the `WalletConnector` trait for CIP-30 style signing wallets.
pub mod wallet;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::crypto::{SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey};
    pub use crate::error::{CryptoError, ErrorCode, FetchError, LedgerError, WalletError};
    pub use crate::fetch::DocumentFetcher;
    pub use crate::ledger::VoteLedger;
    pub use crate::wallet::WalletConnector;
}
