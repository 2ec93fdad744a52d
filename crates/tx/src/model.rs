// Path: crates/tx/src/model.rs

//! The structured form of a decoded transaction.
//!
//! A `DecodedTransaction` is immutable once built. A new hex input always
//! produces a new value; nothing here is ever patched in place.

use crate::address::Address;
use vigil_types::app::{Anchor, GovActionId, Hash28, Hash32, Vote, Voter};

/// The data attached to an output, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    /// Only the hash of the datum is committed.
    Hash(Hash32),
    /// The datum itself, kept as its raw plutus-data CBOR.
    Inline(Vec<u8>),
}

/// A transaction output. Only the parts the rules inspect are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    /// The destination address.
    pub address: Address,
    /// The attached datum.
    pub datum: Option<Datum>,
}

impl TransactionOutput {
    /// The inline datum CBOR, if the output carries one.
    pub fn inline_datum(&self) -> Option<&[u8]> {
        match &self.datum {
            Some(Datum::Inline(bytes)) => Some(bytes),
            _ => None,
        }
    }
}

/// A vote cast on one governance action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotingProcedure {
    /// The on-chain vote.
    pub vote: Vote,
    /// The rationale anchor, which governance votes are expected to carry.
    pub anchor: Option<Anchor>,
}

/// All votes cast by one voter, in the order they were encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterVotes {
    /// Who is voting.
    pub voter: Voter,
    /// `(action, procedure)` pairs.
    pub votes: Vec<(GovActionId, VotingProcedure)>,
}

/// A verification-key witness as found in the witness set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VKeyWitness {
    /// The raw public key bytes.
    pub vkey: Vec<u8>,
    /// The raw signature bytes.
    pub signature: Vec<u8>,
    /// The CBOR encoding of the `vkey` field, header included.
    pub vkey_cbor: Vec<u8>,
    /// The CBOR encoding of the whole `[vkey, signature]` witness.
    pub raw: Vec<u8>,
}

/// The transaction body fields the inspector understands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionBody {
    /// Outputs, in order.
    pub outputs: Vec<TransactionOutput>,
    /// Raw CBOR of each certificate.
    pub certificates: Vec<Vec<u8>>,
    /// Key hashes that must countersign.
    pub required_signers: Vec<Hash28>,
    /// Governance votes, grouped by voter. `Some` whenever the body carries
    /// the voting procedures key, even if it is empty.
    pub voting_procedures: Option<Vec<VoterVotes>>,
}

impl TransactionBody {
    /// The vote list of the first voter, which is the one a council member signs for.
    pub fn first_voter_votes(&self) -> Option<&VoterVotes> {
        self.voting_procedures.as_deref().and_then(<[VoterVotes]>::first)
    }

    /// Voter entries after the first. They are never extracted or checked.
    pub fn other_voters(&self) -> &[VoterVotes] {
        self.voting_procedures
            .as_deref()
            .and_then(|voters| voters.get(1..))
            .unwrap_or_default()
    }
}

/// The witness set fields the inspector understands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WitnessSet {
    /// Verification-key witnesses, in order.
    pub vkey_witnesses: Vec<VKeyWitness>,
}

/// The recognised kinds of transaction, resolved once at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionShape {
    /// Carries a voting procedures section, possibly empty.
    Vote {
        /// Number of votes cast by the first voter.
        votes: usize,
    },
    /// No votes, but at least one output carries an inline datum.
    Hierarchy {
        /// Number of outputs with an inline datum.
        datum_outputs: usize,
    },
    /// Anything else.
    Unrecognized,
}

impl TransactionShape {
    /// Classifies a body.
    pub fn classify(body: &TransactionBody) -> Self {
        if body.voting_procedures.is_some() {
            return Self::Vote {
                votes: body.first_voter_votes().map_or(0, |v| v.votes.len()),
            };
        }
        let datum_outputs = body
            .outputs
            .iter()
            .filter(|o| o.inline_datum().is_some())
            .count();
        if datum_outputs > 0 {
            Self::Hierarchy { datum_outputs }
        } else {
            Self::Unrecognized
        }
    }

    /// True for vote transactions.
    pub fn is_vote(&self) -> bool {
        matches!(self, Self::Vote { .. })
    }

    /// Short name for logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vote { .. } => "vote",
            Self::Hierarchy { .. } => "hierarchy",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// A decoded transaction together with the exact bytes it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub(crate) raw: Vec<u8>,
    pub(crate) body_raw: Vec<u8>,
    pub(crate) hash: Hash32,
    /// The decoded body.
    pub body: TransactionBody,
    /// The decoded witness set.
    pub witness_set: WitnessSet,
    /// The phase-two validity flag (`true` when absent).
    pub is_valid: bool,
    /// The shape this transaction was classified as.
    pub shape: TransactionShape,
}

impl DecodedTransaction {
    /// The exact transaction bytes.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// The exact body bytes, the pre-image of the transaction hash.
    pub fn body_bytes(&self) -> &[u8] {
        &self.body_raw
    }

    /// BLAKE2b-256 of the body bytes.
    pub fn hash(&self) -> &Hash32 {
        &self.hash
    }

    /// The first output's address, from which the target network is derived.
    pub fn first_output_address(&self) -> Option<&Address> {
        self.body.outputs.first().map(|o| &o.address)
    }
}
