// Path: crates/tx/src/rules/mod.rs

//! The validation predicates a council member's transaction must satisfy.
//!
//! Each predicate is a pure function of the decoded transaction and the wallet
//! context, computed independently of every other predicate. `RuleEngine`
//! bundles them with the injected committee configuration and vote policy.

use crate::address::Address;
use crate::model::{DecodedTransaction, TransactionBody};
use vigil_types::app::{Hash28, NetworkId, TxValidationState};
use vigil_types::config::{CommitteeConfig, VotePolicy};
use vigil_types::error::ValidationError;

/// What the connected wallet tells us about its owner.
///
/// Both fields are `None` until a wallet is connected, in which case only the
/// network-independent rules are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuleContext {
    /// The wallet's network.
    pub network: Option<NetworkId>,
    /// The stake credential hash of the wallet's change address.
    pub stake_credential: Option<Hash28>,
}

impl RuleContext {
    /// A context for a connected wallet.
    pub fn connected(network: NetworkId, stake_credential: Hash28) -> Self {
        Self {
            network: Some(network),
            stake_credential: Some(stake_credential),
        }
    }

    /// True once both network and credential are known.
    pub fn is_connected(&self) -> bool {
        self.network.is_some() && self.stake_credential.is_some()
    }
}

/// The wallet's stake credential is one of the body's required signers.
pub fn is_part_of_signers(body: &TransactionBody, stake_credential: &Hash28) -> bool {
    body.required_signers.iter().any(|s| s == stake_credential)
}

/// The body carries no certificates.
pub fn has_no_certificates(body: &TransactionBody) -> bool {
    body.certificates.is_empty()
}

/// The network the transaction pays into, read from its first output.
pub fn transaction_network(tx: &DecodedTransaction) -> Result<NetworkId, ValidationError> {
    tx.first_output_address()
        .map(Address::network)
        .ok_or_else(|| ValidationError::Unevaluable {
            rule: "isSameNetwork",
            reason: "transaction has no outputs".into(),
        })
}

/// The transaction targets the wallet's network.
pub fn is_same_network(
    tx: &DecodedTransaction,
    wallet_network: NetworkId,
) -> Result<bool, ValidationError> {
    Ok(transaction_network(tx)? == wallet_network)
}

/// The wallet's stake credential appears inside some output's inline datum.
///
/// The match is done on the hex rendering of the datum, so the credential is
/// found wherever the datum nests it.
pub fn is_signer_in_plutus_data(body: &TransactionBody, stake_credential: &Hash28) -> bool {
    let needle = stake_credential.to_hex();
    body.outputs
        .iter()
        .filter_map(|o| o.inline_datum())
        .any(|datum| hex::encode(datum).contains(&needle))
}

/// No verification-key witness is attached yet.
pub fn is_unsigned_transaction(tx: &DecodedTransaction) -> bool {
    tx.witness_set.vkey_witnesses.is_empty()
}

/// Checks the number of votes cast by the first voter against `policy`.
///
/// Zero votes is always an error. More than one is an error under
/// `VotePolicy::SingleVote`.
pub fn has_one_vote(body: &TransactionBody, policy: VotePolicy) -> Result<bool, ValidationError> {
    let count = body.first_voter_votes().map_or(0, |v| v.votes.len());
    match (count, policy) {
        (0, _) => Err(ValidationError::NoVotes),
        (1, _) | (_, VotePolicy::PerVote) => Ok(true),
        (n, VotePolicy::SingleVote) => Err(ValidationError::MultipleVotes(n)),
    }
}

/// The first voter is the committee hot-credential script expected on `network`.
pub fn has_valid_icc_credentials(
    body: &TransactionBody,
    committee: &CommitteeConfig,
    network: NetworkId,
) -> bool {
    body.first_voter_votes()
        .and_then(|v| v.voter.committee_script_hash())
        .is_some_and(|hash| hash == committee.script_hash(network))
}

/// Evaluates the whole-transaction rules with injected configuration.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    committee: CommitteeConfig,
    policy: VotePolicy,
}

impl RuleEngine {
    /// Creates an engine for the given committee scripts and vote policy.
    pub fn new(committee: CommitteeConfig, policy: VotePolicy) -> Self {
        Self { committee, policy }
    }

    /// The vote policy in force.
    pub fn policy(&self) -> VotePolicy {
        self.policy
    }

    /// Computes the whole-transaction validation state from scratch.
    ///
    /// Rules that need the wallet stay `false` when `ctx` is not connected.
    pub fn evaluate(
        &self,
        tx: &DecodedTransaction,
        ctx: &RuleContext,
    ) -> Result<TxValidationState, ValidationError> {
        let body = &tx.body;
        let mut state = TxValidationState {
            has_no_certificates: has_no_certificates(body),
            is_unsigned_transaction: is_unsigned_transaction(tx),
            ..TxValidationState::default()
        };
        if let Some(credential) = &ctx.stake_credential {
            state.is_part_of_signers = is_part_of_signers(body, credential);
            state.is_in_output_plutus_data = is_signer_in_plutus_data(body, credential);
        }
        if let Some(network) = ctx.network {
            state.is_same_network = is_same_network(tx, network)?;
        }

        for (rule, passed) in state.checks() {
            tracing::debug!(target: "rules", rule, passed, "rule evaluated");
        }
        tracing::info!(
            target: "rules",
            tx_hash = %tx.hash(),
            connected = ctx.is_connected(),
            all_passed = state.all_passed(),
            "transaction rules evaluated"
        );
        Ok(state)
    }

    /// Applies the vote policy to a vote transaction.
    pub fn check_votes(&self, tx: &DecodedTransaction) -> Result<bool, ValidationError> {
        has_one_vote(&tx.body, self.policy).map_err(|e| {
            tracing::warn!(target: "rules", tx_hash = %tx.hash(), error = %e, "vote shape rejected");
            e
        })
    }

    /// Checks the voter's committee credential for `network`.
    pub fn has_valid_icc_credentials(&self, tx: &DecodedTransaction, network: NetworkId) -> bool {
        has_valid_icc_credentials(&tx.body, &self.committee, network)
    }
}
