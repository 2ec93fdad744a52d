// Path: crates/tx/src/lib.rs
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

//! # vigil Transactions
//!
//! Decoding of Conway-era transactions and everything that reads them: the
//! validation rules, the vote extractor, the governance action identifier
//! codec and the post-signing witness checks.

pub mod address;
pub mod codec;
pub mod explorer;
pub mod gov_action;
pub mod model;
pub mod rules;
pub mod system;
pub mod votes;

pub use address::{Address, AddressKind};
pub use codec::{decode, serialize, transaction_hash};
pub use explorer::ExplorerLinks;
pub use model::{DecodedTransaction, TransactionShape};
pub use rules::{RuleContext, RuleEngine};
pub use system::validate_witness;
pub use votes::VoteExtractor;
