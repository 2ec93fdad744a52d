// Path: crates/tx/tests/vote_pipeline_e2e.rs
//! Decode, check, extract and witness a council vote end to end.

use vigil_api::wallet::WalletConnector;
use vigil_test_utils::{base_address, MockWallet, TxBuilder, VoteSpec};
use vigil_tx::{decode, gov_action, serialize, validate_witness, RuleContext, RuleEngine, VoteExtractor};
use vigil_types::app::{NetworkId, VoiceChoice, Vote};
use vigil_types::config::CommitteeConfig;

#[tokio::test]
async fn test_council_vote_pipeline() {
    let wallet = MockWallet::new([3; 32], 1);
    let committee = CommitteeConfig::default();
    let unsigned = TxBuilder::new()
        .output(base_address(1, [1; 28], [2; 28]))
        .required_signer(wallet.stake_credential().0)
        .voter(1, committee.mainnet_script_hash.0)
        .vote(VoteSpec::new([0xcd; 32], 4, Vote::No).with_anchor("ipfs://bafy", [8; 32]))
        .build_hex();

    let tx = decode(&unsigned).unwrap();
    assert_eq!(serialize(&tx), unsigned);
    assert!(tx.shape.is_vote());

    let engine = RuleEngine::new(committee, Default::default());
    let ctx = RuleContext::connected(NetworkId::Mainnet, wallet.stake_credential());
    let state = engine.evaluate(&tx, &ctx).unwrap();
    assert!(state.is_part_of_signers);
    assert!(state.is_same_network);
    assert!(state.has_no_certificates);
    assert!(state.is_unsigned_transaction);
    assert!(!state.is_in_output_plutus_data);
    assert_eq!(engine.check_votes(&tx), Ok(true));
    assert!(engine.has_valid_icc_credentials(&tx, NetworkId::Mainnet));

    let records = VoteExtractor::default().extract(&tx).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].voice_choice, VoiceChoice::Unconstitutional);
    let id = gov_action::decode(&records[0].governance_action_id).unwrap();
    assert_eq!(id.index, 4);

    let signed = wallet.sign_transaction(&unsigned, true).await.unwrap();
    let witness = validate_witness(&signed, &unsigned, &wallet.stake_credential()).unwrap();
    assert_eq!(witness.public_key_hash, wallet.stake_credential());

    // The signed transaction no longer passes as unsigned.
    let signed_tx = decode(&signed).unwrap();
    assert_eq!(signed_tx.hash(), tx.hash());
    assert!(!engine.evaluate(&signed_tx, &ctx).unwrap().is_unsigned_transaction);
}
