// Path: crates/tx/src/votes.rs

//! Turns the first voter's votes into display-ready vote records.

use crate::explorer::ExplorerLinks;
use crate::gov_action;
use crate::model::DecodedTransaction;
use crate::rules::transaction_network;
use vigil_types::app::{VoiceChoice, VoteRecord};
use vigil_types::error::ValidationError;

/// Extracts vote records in the order they appear in the transaction.
#[derive(Debug, Clone, Default)]
pub struct VoteExtractor {
    explorer: ExplorerLinks,
}

impl VoteExtractor {
    /// Creates an extractor that links actions through `explorer`.
    pub fn new(explorer: ExplorerLinks) -> Self {
        Self { explorer }
    }

    /// One record per vote of the first voter. A vote without an anchor fails
    /// the whole extraction.
    pub fn extract(&self, tx: &DecodedTransaction) -> Result<Vec<VoteRecord>, ValidationError> {
        let Some(voter_votes) = tx.body.first_voter_votes() else {
            return Ok(Vec::new());
        };
        let others = tx.body.other_voters();
        if !others.is_empty() {
            tracing::warn!(
                target: "rules",
                tx_hash = %tx.hash(),
                other_voters = others.len(),
                other_votes = others.iter().map(|v| v.votes.len()).sum::<usize>(),
                "only the first voter's votes are extracted"
            );
        }
        let network = transaction_network(tx)?;

        voter_votes
            .votes
            .iter()
            .map(|(action, procedure)| {
                let anchor = procedure
                    .anchor
                    .as_ref()
                    .ok_or(ValidationError::MissingAnchor)?;
                let governance_action_id = gov_action::encode_id(action)?;
                let explorer_link = self.explorer.gov_action(&governance_action_id, network);
                Ok(VoteRecord {
                    governance_action_id,
                    action: *action,
                    voter: voter_votes.voter,
                    voice_choice: VoiceChoice::from(procedure.vote),
                    anchor_url: anchor.url.clone(),
                    anchor_hash: anchor.data_hash.to_hex(),
                    explorer_link,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use vigil_test_utils::{base_address, TxBuilder, VoteSpec};
    use vigil_types::app::{GovActionId, Hash32, Vote, Voter};

    fn vote_builder(network: u8) -> TxBuilder {
        TxBuilder::new()
            .output(base_address(network, [1; 28], [2; 28]))
            .voter(1, [0x4f; 28])
    }

    #[test]
    fn test_extracts_one_record_per_vote_in_order() {
        let tx = decode(
            &vote_builder(0)
                .vote(VoteSpec::new([1; 32], 0, Vote::Yes).with_anchor("ipfs://a", [5; 32]))
                .vote(VoteSpec::new([2; 32], 1, Vote::No).with_anchor("https://b", [6; 32]))
                .vote(VoteSpec::new([3; 32], 2, Vote::Abstain).with_anchor("https://c", [7; 32]))
                .build_hex(),
        )
        .unwrap();
        let records = VoteExtractor::default().extract(&tx).unwrap();

        assert_eq!(records.len(), 3);
        let choices: Vec<_> = records.iter().map(|r| r.voice_choice).collect();
        assert_eq!(
            choices,
            vec![
                VoiceChoice::Constitutional,
                VoiceChoice::Unconstitutional,
                VoiceChoice::Abstain
            ]
        );
        let first = &records[0];
        assert_eq!(
            first.action,
            GovActionId {
                tx_hash: Hash32::from([1; 32]),
                index: 0
            }
        );
        assert_eq!(first.voter, Voter::CommitteeHotScript([0x4f; 28].into()));
        assert_eq!(first.anchor_url, "ipfs://a");
        assert_eq!(first.anchor_hash, "05".repeat(32));
        assert_eq!(gov_action::decode(&first.governance_action_id).unwrap(), first.action);
        assert_eq!(
            first.explorer_link,
            format!(
                "https://preprod.cardanoscan.io/govAction/{}",
                first.governance_action_id
            )
        );
    }

    #[test]
    fn test_only_first_voter_is_extracted() {
        let tx = decode(
            &vote_builder(1)
                .vote(VoteSpec::new([1; 32], 0, Vote::Yes).with_anchor("https://a", [5; 32]))
                .other_voter(2, [0x33; 28], VoteSpec::new([9; 32], 4, Vote::No).with_anchor("https://z", [6; 32]))
                .build_hex(),
        )
        .unwrap();
        let records = VoteExtractor::default().extract(&tx).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].voter, Voter::CommitteeHotScript([0x4f; 28].into()));
        assert_eq!(records[0].anchor_url, "https://a");
    }

    #[test]
    fn test_mainnet_link() {
        let tx = decode(
            &vote_builder(1)
                .vote(VoteSpec::new([1; 32], 0, Vote::Yes).with_anchor("https://a", [5; 32]))
                .build_hex(),
        )
        .unwrap();
        let records = VoteExtractor::default().extract(&tx).unwrap();
        assert!(records[0]
            .explorer_link
            .starts_with("https://cardanoscan.io/govAction/gov_action1"));
    }

    #[test]
    fn test_missing_anchor_fails_extraction() {
        let tx = decode(
            &vote_builder(0)
                .vote(VoteSpec::new([1; 32], 0, Vote::Yes).with_anchor("https://a", [5; 32]))
                .vote(VoteSpec::new([2; 32], 0, Vote::No))
                .build_hex(),
        )
        .unwrap();
        assert_eq!(
            VoteExtractor::default().extract(&tx),
            Err(ValidationError::MissingAnchor)
        );
    }

    #[test]
    fn test_non_vote_transaction_has_no_records() {
        let tx = decode(
            &TxBuilder::new()
                .output(base_address(0, [1; 28], [2; 28]))
                .build_hex(),
        )
        .unwrap();
        assert!(VoteExtractor::default().extract(&tx).unwrap().is_empty());
    }
}
