// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # vigil Test Utilities
//!
//! Builders for real CBOR transactions, a mock wallet that produces real
//! Ed25519 witnesses, and in-memory stand-ins for the document fetcher and
//! the vote ledger.

pub mod fetcher;
pub mod fixtures;
pub mod ledger;
pub mod wallet;

pub use fetcher::StaticFetcher;
pub use fixtures::{base_address, datum_with_credential, enterprise_address, TxBuilder, VoteSpec};
pub use ledger::InMemoryLedger;
pub use wallet::MockWallet;
