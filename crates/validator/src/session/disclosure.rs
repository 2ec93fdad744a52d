// Path: crates/validator/src/session/disclosure.rs
//! The details a signer must acknowledge, one checkbox each.

use serde::Serialize;
use vigil_tx::DecodedTransaction;
use vigil_types::app::VoteRecord;

/// Which detail a disclosure shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisclosureKind {
    /// The governance action a vote targets.
    GovernanceActionId,
    /// The voice choice of a vote.
    VoteChoice,
    /// The rationale document a vote cites.
    MetadataAnchor,
    /// A single confirmation for transactions that carry no votes.
    Proceed,
}

/// One detail the signer must confirm before signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Disclosure {
    /// The vote this detail belongs to, if any.
    pub vote_index: Option<usize>,
    /// What is being disclosed.
    pub kind: DisclosureKind,
    /// The value shown to the signer.
    pub value: String,
}

/// Three disclosures per vote record; a single `Proceed` when there are none.
pub(crate) fn disclosures_for(tx: &DecodedTransaction, records: &[VoteRecord]) -> Vec<Disclosure> {
    if records.is_empty() {
        return vec![Disclosure {
            vote_index: None,
            kind: DisclosureKind::Proceed,
            value: format!("{} transaction {}", tx.shape.name(), tx.hash()),
        }];
    }
    records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| {
            [
                (DisclosureKind::GovernanceActionId, record.governance_action_id.clone()),
                (DisclosureKind::VoteChoice, record.voice_choice.to_string()),
                (DisclosureKind::MetadataAnchor, record.anchor_url.clone()),
            ]
            .into_iter()
            .map(move |(kind, value)| Disclosure {
                vote_index: Some(i),
                kind,
                value,
            })
        })
        .collect()
}
