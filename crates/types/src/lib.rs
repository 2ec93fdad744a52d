// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # vigil Types
//!
//! This crate is the foundational library for the vigil transaction inspector,
//! containing the shared data model, error types, and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `vigil-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for shared
//! types like `VoteRecord`, `TxValidationState`, `NetworkId` and the error enums.

/// The maximum size in bytes of a hex-decoded transaction accepted for inspection.
pub const MAX_TRANSACTION_BYTES: usize = 64 * 1024; // 64 KiB
/// The maximum size in bytes of a fetched metadata anchor document.
pub const MAX_ANCHOR_DOCUMENT_BYTES: usize = 4 * 1024 * 1024; // 4 MiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CoreError> = std::result::Result<T, E>;

/// Core application-level data structures like `VoteRecord` and the validation states.
pub mod app;
/// Shared configuration structures (`InspectorConfig` and its sections).
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
