// Path: crates/crypto/src/error.rs
//! Local error types for the `vigil-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use vigil_api::error::CryptoError;
