// Path: crates/validator/src/lib.rs
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
#![deny(missing_docs)]

//! # vigil Validator
//!
//! The stateful half of the inspector: metadata anchor verification, the
//! aggregate of all check results, the signing session that gates a wallet
//! signature behind those results, and the council's internal poll.

/// Folds every check result into the signing gate.
pub mod aggregate;
/// Fetches rationale documents and compares their hash with the anchor.
pub mod anchor;
/// Loading of the inspector configuration.
pub mod config;
/// The council's internal poll, persisted through a vote ledger.
pub mod poll;
/// The signing session state machine.
pub mod session;

pub use aggregate::ValidationAggregate;
pub use anchor::AnchorVerifier;
pub use poll::{CastCommand, CastReceipt, CouncilPoll};
pub use session::{
    AnchorCheckJob, AnchorCheckResult, Disclosure, DisclosureKind, Generation, JobOutcome, Phase,
    SigningJob, SigningResult, SigningSession, WalletContext,
};
