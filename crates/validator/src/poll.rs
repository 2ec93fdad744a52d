// Path: crates/validator/src/poll.rs
//! The internal council poll.
//!
//! Members record a yes/no/abstain stance on a proposal before anyone signs
//! the on-chain vote. A cast is a command: the poll computes the next member
//! map, the ledger persists it, and only an acknowledged write changes the
//! confirmed state. While a write is outstanding no other cast is accepted.

use vigil_api::ledger::VoteLedger;
use vigil_telemetry::metrics;
use vigil_types::app::{Hash28, PollOutcome, PollTally, PollVote, PollVotes};
use vigil_types::error::{ErrorCode, LedgerError};

/// A vote write that has been accepted locally but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastCommand {
    proposal_id: String,
    member: Hash28,
    vote: PollVote,
    next: PollVotes,
}

impl CastCommand {
    /// The member casting.
    pub fn member(&self) -> &Hash28 {
        &self.member
    }

    /// The stance being recorded.
    pub fn vote(&self) -> PollVote {
        self.vote
    }

    /// Persists the full member map the cast would produce.
    pub async fn execute<L: VoteLedger + ?Sized>(self, ledger: &L) -> CastReceipt {
        let result = ledger.store_votes(&self.proposal_id, &self.next).await;
        CastReceipt {
            command: self,
            result,
        }
    }
}

/// The ledger's answer to a [`CastCommand`].
#[derive(Debug, Clone)]
pub struct CastReceipt {
    command: CastCommand,
    result: Result<(), LedgerError>,
}

/// One proposal's poll, backed by a vote ledger.
pub struct CouncilPoll<L> {
    ledger: L,
    proposal_id: String,
    members: Vec<Hash28>,
    confirmed: PollVotes,
    pending: Option<(Hash28, PollVote)>,
}

impl<L: VoteLedger> CouncilPoll<L> {
    /// Reads the current votes for `proposal_id`.
    ///
    /// Every configured member appears in the result; members the ledger has
    /// no entry for are `NotVoted`, and entries for non-members are ignored.
    pub async fn load(
        ledger: L,
        members: Vec<Hash28>,
        proposal_id: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let mut poll = Self {
            ledger,
            proposal_id: proposal_id.into(),
            members,
            confirmed: PollVotes::new(),
            pending: None,
        };
        poll.refresh().await?;
        Ok(poll)
    }

    /// Re-reads the ledger. Refused while a cast is in flight.
    pub async fn refresh(&mut self) -> Result<(), LedgerError> {
        if self.pending.is_some() {
            return Err(LedgerError::WritePending);
        }
        let stored = self
            .ledger
            .fetch_votes(&self.proposal_id)
            .await
            .inspect_err(|e| metrics().inc_error("ledger", e.code()))?;
        self.confirmed = self
            .members
            .iter()
            .map(|m| (*m, stored.get(m).copied().unwrap_or(PollVote::NotVoted)))
            .collect();
        tracing::debug!(
            target: "poll",
            proposal = %self.proposal_id,
            members = self.members.len(),
            recorded = stored.len(),
            "loaded poll"
        );
        Ok(())
    }

    /// The proposal this poll is for.
    pub fn proposal_id(&self) -> &str {
        &self.proposal_id
    }

    /// The backing ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Votes the ledger has acknowledged.
    pub fn votes(&self) -> &PollVotes {
        &self.confirmed
    }

    /// The cast awaiting acknowledgement, if any.
    pub fn pending(&self) -> Option<(&Hash28, PollVote)> {
        self.pending.as_ref().map(|(m, v)| (m, *v))
    }

    /// Counts over the confirmed votes.
    pub fn tally(&self) -> PollTally {
        PollTally::from_votes(&self.confirmed)
    }

    /// The outcome of the confirmed votes.
    pub fn outcome(&self) -> PollOutcome {
        self.tally().outcome()
    }

    /// Accepts a cast and returns the write that must be executed.
    pub fn begin_cast(&mut self, member: Hash28, vote: PollVote) -> Result<CastCommand, LedgerError> {
        if !self.members.contains(&member) {
            return Err(LedgerError::NotAMember(member.to_hex()));
        }
        if self.pending.is_some() {
            return Err(LedgerError::WritePending);
        }
        let mut next = self.confirmed.clone();
        next.insert(member, vote);
        self.pending = Some((member, vote));
        Ok(CastCommand {
            proposal_id: self.proposal_id.clone(),
            member,
            vote,
            next,
        })
    }

    /// Applies a receipt. The confirmed state changes only on success; the
    /// pending slot is cleared either way.
    pub fn complete(&mut self, receipt: CastReceipt) -> Result<(), LedgerError> {
        let CastReceipt { command, result } = receipt;
        if self.pending != Some((command.member, command.vote)) {
            tracing::debug!(target: "poll", member = %command.member, "ignoring receipt for another cast");
            return Ok(());
        }
        self.pending = None;
        match result {
            Ok(()) => {
                tracing::info!(
                    target: "poll",
                    proposal = %self.proposal_id,
                    member = %command.member,
                    vote = %command.vote,
                    "vote recorded"
                );
                self.confirmed = command.next;
                Ok(())
            }
            Err(e) => {
                metrics().inc_error("ledger", e.code());
                tracing::warn!(
                    target: "poll",
                    proposal = %self.proposal_id,
                    member = %command.member,
                    error = %e,
                    "vote write failed"
                );
                Err(e)
            }
        }
    }

    /// Casts and waits for the ledger.
    pub async fn cast(&mut self, member: Hash28, vote: PollVote) -> Result<(), LedgerError> {
        let command = self.begin_cast(member, vote)?;
        let receipt = command.execute(&self.ledger).await;
        self.complete(receipt)
    }
}
