// Path: crates/types/src/app/governance.rs

//! Data structures describing governance votes embedded in a transaction.

use super::identity::{Hash28, Hash32};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The raw vote value as it appears on-chain in a voting procedure.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Vote {
    /// Encoded as `0`.
    No,
    /// Encoded as `1`.
    Yes,
    /// Encoded as `2`.
    Abstain,
}

/// The label a constitutional committee member sees for their vote.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum VoiceChoice {
    /// The action is judged constitutional (`Yes`).
    Constitutional,
    /// The action is judged unconstitutional (`No`).
    Unconstitutional,
    /// Anything else.
    Abstain,
}

impl From<Vote> for VoiceChoice {
    fn from(vote: Vote) -> Self {
        match vote {
            Vote::Yes => Self::Constitutional,
            Vote::No => Self::Unconstitutional,
            Vote::Abstain => Self::Abstain,
        }
    }
}

impl fmt::Display for VoiceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Constitutional => "Constitutional",
            Self::Unconstitutional => "Unconstitutional",
            Self::Abstain => "Abstain",
        };
        f.write_str(label)
    }
}

/// The kind of credential casting a vote.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Voter {
    /// A constitutional committee hot credential backed by a key hash.
    CommitteeHotKey(Hash28),
    /// A constitutional committee hot credential backed by a script hash.
    CommitteeHotScript(Hash28),
    /// A delegated representative identified by a key hash.
    DRepKey(Hash28),
    /// A delegated representative identified by a script hash.
    DRepScript(Hash28),
    /// A stake pool operator.
    StakePool(Hash28),
}

impl Voter {
    /// Returns the hot-credential script hash if this voter is a committee script.
    pub fn committee_script_hash(&self) -> Option<&Hash28> {
        match self {
            Self::CommitteeHotScript(h) => Some(h),
            _ => None,
        }
    }
}

/// An on-chain reference to an off-chain document.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Anchor {
    /// Where the document can be fetched.
    pub url: String,
    /// The BLAKE2b-256 hash the document must produce.
    pub data_hash: Hash32,
}

/// The `(transaction hash, index)` pair identifying a governance action.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct GovActionId {
    /// Hash of the transaction that submitted the proposal.
    pub tx_hash: Hash32,
    /// Index of the proposal inside that transaction.
    pub index: u8,
}

/// A single vote extracted from a transaction, ready to be shown to the signer.
///
/// Vote records are derived, never stored: they are rebuilt every time the
/// inspected transaction changes.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    /// The bech32 `gov_action1...` identifier.
    pub governance_action_id: String,
    /// The decoded `(tx hash, index)` pair behind the identifier.
    pub action: GovActionId,
    /// The voter casting this vote.
    pub voter: Voter,
    /// Label derived from the on-chain vote.
    pub voice_choice: VoiceChoice,
    /// The cited rationale document.
    pub anchor_url: String,
    /// The hash committed on-chain for the rationale document (hex).
    pub anchor_hash: String,
    /// Link to the action on a block explorer.
    pub explorer_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_choice_mapping() {
        assert_eq!(VoiceChoice::from(Vote::Yes), VoiceChoice::Constitutional);
        assert_eq!(VoiceChoice::from(Vote::No), VoiceChoice::Unconstitutional);
        assert_eq!(VoiceChoice::from(Vote::Abstain), VoiceChoice::Abstain);
        assert_eq!(VoiceChoice::Unconstitutional.to_string(), "Unconstitutional");
    }

    #[test]
    fn test_only_committee_scripts_expose_script_hash() {
        let h = Hash28::from([9; 28]);
        assert_eq!(Voter::CommitteeHotScript(h).committee_script_hash(), Some(&h));
        assert_eq!(Voter::CommitteeHotKey(h).committee_script_hash(), None);
        assert_eq!(Voter::DRepScript(h).committee_script_hash(), None);
    }
}
