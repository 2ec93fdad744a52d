// Path: crates/validator/src/aggregate.rs
//! Folds every check result into the single "may this be signed" gate.

use std::collections::BTreeSet;
use vigil_types::app::{TxValidationState, VoteValidationState};
use vigil_types::error::SessionError;

/// The check results for one transaction and wallet context.
///
/// A value is always built whole for the current cycle and dropped when the
/// cycle ends. Only the per-vote anchor results arrive later, and only for
/// votes that are still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationAggregate {
    tx: TxValidationState,
    votes: Vec<VoteValidationState>,
    pending_anchors: BTreeSet<usize>,
}

impl ValidationAggregate {
    /// Starts an aggregate for a transaction. `icc_credentials[i]` is the
    /// committee-credential result of vote `i`; anchor results start pending.
    pub fn new(tx: TxValidationState, icc_credentials: &[bool]) -> Self {
        let votes = icc_credentials
            .iter()
            .map(|&has_icc_credentials| VoteValidationState {
                is_metadata_anchor_valid: false,
                has_icc_credentials,
            })
            .collect();
        Self {
            tx,
            votes,
            pending_anchors: (0..icc_credentials.len()).collect(),
        }
    }

    /// The whole-transaction results.
    pub fn tx(&self) -> &TxValidationState {
        &self.tx
    }

    /// The per-vote results, in vote order.
    pub fn votes(&self) -> &[VoteValidationState] {
        &self.votes
    }

    /// Records the anchor result of vote `index`. Returns `false` if that
    /// vote was not waiting for one.
    pub fn record_anchor(&mut self, index: usize, valid: bool) -> bool {
        if !self.pending_anchors.remove(&index) {
            return false;
        }
        match self.votes.get_mut(index) {
            Some(vote) => {
                vote.is_metadata_anchor_valid = valid;
                true
            }
            None => false,
        }
    }

    /// Indices of votes whose anchor check has not completed.
    pub fn pending_anchors(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending_anchors.iter().copied()
    }

    /// True once every anchor check has reported.
    pub fn is_complete(&self) -> bool {
        self.pending_anchors.is_empty()
    }

    /// True if every whole-transaction check passed.
    pub fn tx_checks_passed(&self) -> bool {
        self.tx.all_passed()
    }

    /// True if every vote passed all of its checks.
    pub fn vote_checks_passed(&self) -> bool {
        self.is_complete() && self.votes.iter().all(VoteValidationState::all_passed)
    }

    /// The signing gate. Acknowledgement is checked first, then the
    /// transaction checks, then (for vote transactions) the vote checks.
    pub fn gate(&self, is_vote: bool, acknowledged: bool) -> Result<(), SessionError> {
        if !acknowledged {
            return Err(SessionError::NotAcknowledged);
        }
        if !self.tx_checks_passed() {
            return Err(SessionError::TransactionChecksFailed);
        }
        if is_vote && !self.vote_checks_passed() {
            return Err(SessionError::VoteChecksFailed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_tx() -> TxValidationState {
        TxValidationState {
            is_part_of_signers: true,
            has_no_certificates: true,
            is_same_network: true,
            is_in_output_plutus_data: true,
            is_unsigned_transaction: true,
        }
    }

    #[test]
    fn test_gate_order() {
        let mut agg = ValidationAggregate::new(TxValidationState::default(), &[true]);
        assert_eq!(agg.gate(true, false), Err(SessionError::NotAcknowledged));
        assert_eq!(agg.gate(true, true), Err(SessionError::TransactionChecksFailed));

        agg = ValidationAggregate::new(passing_tx(), &[true]);
        assert_eq!(agg.gate(true, true), Err(SessionError::VoteChecksFailed));
        assert!(agg.record_anchor(0, true));
        assert_eq!(agg.gate(true, true), Ok(()));
    }

    #[test]
    fn test_vote_checks_ignored_for_non_vote_transactions() {
        let agg = ValidationAggregate::new(passing_tx(), &[]);
        assert!(agg.is_complete());
        assert_eq!(agg.gate(false, true), Ok(()));
    }

    #[test]
    fn test_every_vote_must_pass() {
        let mut agg = ValidationAggregate::new(passing_tx(), &[true, false]);
        agg.record_anchor(0, true);
        agg.record_anchor(1, true);
        assert!(!agg.vote_checks_passed());

        let mut agg = ValidationAggregate::new(passing_tx(), &[true, true]);
        agg.record_anchor(0, true);
        assert!(!agg.vote_checks_passed());
        assert_eq!(agg.pending_anchors().collect::<Vec<_>>(), vec![1]);
        agg.record_anchor(1, false);
        assert!(!agg.vote_checks_passed());
    }

    #[test]
    fn test_anchor_result_recorded_once() {
        let mut agg = ValidationAggregate::new(passing_tx(), &[true]);
        assert!(agg.record_anchor(0, false));
        assert!(!agg.record_anchor(0, true));
        assert!(!agg.votes()[0].is_metadata_anchor_valid);
        assert!(!agg.record_anchor(5, true));
    }
}
