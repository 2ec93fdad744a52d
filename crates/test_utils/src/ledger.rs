// Path: crates/test_utils/src/ledger.rs
//! An in-memory vote ledger whose reads and writes can be made to fail.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use vigil_api::error::LedgerError;
use vigil_api::ledger::VoteLedger;
use vigil_types::app::PollVotes;

/// Stores poll votes in a map guarded by an async mutex.
#[derive(Default)]
pub struct InMemoryLedger {
    store: Mutex<HashMap<String, PollVotes>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of acknowledged writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// The stored votes for `proposal_id`, bypassing the failure switches.
    pub async fn snapshot(&self, proposal_id: &str) -> PollVotes {
        self.store
            .lock()
            .await
            .get(proposal_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl VoteLedger for InMemoryLedger {
    async fn fetch_votes(&self, proposal_id: &str) -> Result<PollVotes, LedgerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::Transport("ledger unreachable".into()));
        }
        Ok(self.snapshot(proposal_id).await)
    }

    async fn store_votes(&self, proposal_id: &str, votes: &PollVotes) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Status(503));
        }
        self.store
            .lock()
            .await
            .insert(proposal_id.to_string(), votes.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
