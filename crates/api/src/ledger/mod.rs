// Path: crates/api/src/ledger/mod.rs

//! Defines the `VoteLedger` trait, the persisted store behind the council poll.

use crate::error::LedgerError;
use async_trait::async_trait;
use vigil_types::app::PollVotes;

pub mod http;

pub use http::HttpVoteLedger;

/// A key/value store of council votes keyed by proposal identifier.
#[async_trait]
pub trait VoteLedger: Send + Sync {
    /// Reads the member → vote mapping for `proposal_id`. An unknown proposal
    /// yields an empty mapping, not an error.
    async fn fetch_votes(&self, proposal_id: &str) -> Result<PollVotes, LedgerError>;

    /// Replaces the member → vote mapping for `proposal_id`. Returns only once
    /// the write has been acknowledged.
    async fn store_votes(&self, proposal_id: &str, votes: &PollVotes) -> Result<(), LedgerError>;
}
