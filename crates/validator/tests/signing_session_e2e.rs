// Path: crates/validator/tests/signing_session_e2e.rs
//! A council member polls, inspects, acknowledges and signs a vote.

use vigil_crypto::blake2b_256;
use vigil_telemetry::prometheus;
use vigil_test_utils::{
    base_address, datum_with_credential, InMemoryLedger, MockWallet, StaticFetcher, TxBuilder,
    VoteSpec,
};
use vigil_types::app::{PollOutcome, PollVote, Vote, WitnessFile};
use vigil_types::config::InspectorConfig;
use vigil_validator::config::from_toml_str;
use vigil_validator::{AnchorVerifier, CouncilPoll, JobOutcome, Phase, SigningSession};

const RATIONALE: &[u8] = br#"{"body":{"summary":"The proposal is constitutional."}}"#;

#[tokio::test]
async fn test_council_member_signs_after_poll() {
    prometheus::install().unwrap();

    let wallet = MockWallet::new([42; 32], 0);
    let other_member = vigil_types::app::Hash28::from([0x77; 28]);
    let config: InspectorConfig = from_toml_str(&format!(
        r#"
        [anchor]
        ipfs_gateway = "gateway.example/ipfs/"

        [poll]
        council_members = ["{}", "{}"]
        "#,
        wallet.stake_credential(),
        other_member
    ))
    .unwrap();

    // The council agrees internally first.
    let proposal = "gov_action1proposal";
    let mut poll = CouncilPoll::load(InMemoryLedger::new(), config.poll.council_members.clone(), proposal)
        .await
        .unwrap();
    poll.cast(wallet.stake_credential(), PollVote::Yes).await.unwrap();
    poll.cast(other_member, PollVote::Abstain).await.unwrap();
    assert_eq!(poll.outcome(), PollOutcome::Passed);

    // Then the member inspects the vote transaction built by the coordinator.
    let credential = wallet.stake_credential().0;
    let unsigned = TxBuilder::new()
        .output(base_address(0, [1; 28], [2; 28]))
        .output_with_datum(base_address(0, [3; 28], [4; 28]), datum_with_credential(&credential))
        .required_signer(credential)
        .voter(1, config.committee.testnet_script_hash.0)
        .vote(VoteSpec::new([0x10; 32], 0, Vote::Yes).with_anchor("ipfs://bafkrationale", blake2b_256(RATIONALE).0))
        .build_hex();

    let fetcher = StaticFetcher::new()
        .with_document("https://gateway.example/ipfs/bafkrationale", RATIONALE);
    let verifier = AnchorVerifier::new(fetcher, &config.anchor);

    let mut session = SigningSession::new(&config);
    session.connect(&wallet).await.unwrap();
    session.set_input(format!("{}\n", unsigned));

    // A first check is superseded by an edit before its fetch completes.
    let stale = session.check().unwrap();
    session.set_input(unsigned.clone());
    for job in stale {
        assert_eq!(session.apply_anchor_result(job.run(&verifier).await), JobOutcome::Discarded);
    }

    session.validate(&verifier).await.unwrap();
    assert_eq!(session.phase(), &Phase::AwaitingAcknowledgement);
    let record = &session.vote_records()[0];
    assert!(record.explorer_link.starts_with("https://preprod.cardanoscan.io/govAction/gov_action1"));
    assert_eq!(record.anchor_url, "ipfs://bafkrationale");

    for i in 0..session.disclosures().len() {
        session.acknowledge(i, true).unwrap();
    }
    let witness = session.sign(&wallet).await.unwrap().clone();

    let file = session.export_witness().unwrap();
    let json = serde_json::to_value(&file).unwrap();
    assert_eq!(json["type"], WitnessFile::KIND);
    assert_eq!(json["description"], WitnessFile::DESCRIPTION);
    assert_eq!(json["voterKeyHash"], wallet.stake_credential().to_hex());
    assert_eq!(json["cborHex"], witness.witness_hex);
    assert!(json["govActionID"].as_str().unwrap().starts_with("gov_action1"));

    let text = prometheus::render();
    assert!(text.contains("vigil_signing_outcomes_total{outcome=\"signed\"} 1"));
    assert!(text.contains("vigil_anchor_checks_total{outcome=\"valid\"} 2"));
    assert!(text.contains("vigil_stale_results_discarded_total{job=\"anchor_check\"} 1"));
    assert!(text.contains("vigil_transactions_decoded_total{shape=\"vote\"} 2"));
}
