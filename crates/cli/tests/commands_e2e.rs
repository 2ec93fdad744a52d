// Path: crates/cli/tests/commands_e2e.rs
//! Drives each `vigil` command the way the binary does, without a network.

use clap::Parser;
use std::fs;
use vigil_api::wallet::WalletConnector;
use vigil_cli::commands::gov_action;
use vigil_cli::commands::inspect::build_report;
use vigil_cli::commands::poll::{execute, PollCommands};
use vigil_cli::commands::verify_witness::{verify, VerifyWitnessArgs};
use vigil_cli::wallet::OfflineWallet;
use vigil_cli::{Cli, Commands};
use vigil_crypto::blake2b_256;
use vigil_test_utils::{
    base_address, datum_with_credential, InMemoryLedger, MockWallet, StaticFetcher, TxBuilder,
    VoteSpec,
};
use vigil_types::app::{Hash28, NetworkId, PollOutcome, PollVote, Vote, WitnessFile};
use vigil_types::config::InspectorConfig;
use vigil_validator::AnchorVerifier;

const RATIONALE_URL: &str = "https://example.com/cc-rationale.jsonld";
const RATIONALE: &[u8] = b"{\"body\":{\"summary\":\"ok\"}}";

fn vote_tx(wallet: &MockWallet) -> String {
    let credential = wallet.stake_credential().0;
    TxBuilder::new()
        .output(base_address(1, [1; 28], [2; 28]))
        .output_with_datum(base_address(1, [3; 28], [4; 28]), datum_with_credential(&credential))
        .required_signer(credential)
        .voter(1, InspectorConfig::default().committee.mainnet_script_hash.0)
        .vote(VoteSpec::new([0x21; 32], 1, Vote::Abstain).with_anchor(RATIONALE_URL, blake2b_256(RATIONALE).0))
        .build_hex()
}

fn verifier(body: &[u8]) -> AnchorVerifier<StaticFetcher> {
    AnchorVerifier::new(
        StaticFetcher::new().with_document(RATIONALE_URL, body.to_vec()),
        &InspectorConfig::default().anchor,
    )
}

#[tokio::test]
async fn test_inspect_reports_ready_vote() {
    let wallet = MockWallet::new([5; 32], 1);
    let offline = OfflineWallet::with_stake_credential(NetworkId::Mainnet, &wallet.stake_credential());
    let config = InspectorConfig::default();

    let report = build_report(&config, &vote_tx(&wallet), Some(&offline), Some(&verifier(RATIONALE)))
        .await
        .unwrap();
    assert_eq!(report.shape, "vote");
    assert_eq!(report.transaction_network, Some(NetworkId::Mainnet));
    assert!(report.checks.all_passed());
    assert_eq!(report.votes.len(), 1);
    assert!(report.votes[0].checks.all_passed());
    assert_eq!(report.disclosures.len(), 3);
    assert!(report.ready_to_sign, "{:?}", report.blocked_by);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["checks"]["isPartOfSigners"], true);
    assert_eq!(json["votes"][0]["voiceChoice"], "Abstain");
    assert_eq!(json["votes"][0]["checks"]["hasICCCredentials"], true);
}

#[tokio::test]
async fn test_inspect_explains_what_blocks_signing() {
    let wallet = MockWallet::new([5; 32], 1);
    let offline = OfflineWallet::with_stake_credential(NetworkId::Mainnet, &wallet.stake_credential());
    let config = InspectorConfig::default();
    let tx = vote_tx(&wallet);

    let unchecked = build_report::<StaticFetcher>(&config, &tx, Some(&offline), None)
        .await
        .unwrap();
    assert!(!unchecked.ready_to_sign);
    assert!(unchecked.blocked_by.unwrap().contains("--check-anchors"));

    let tampered = build_report(&config, &tx, Some(&offline), Some(&verifier(b"changed")))
        .await
        .unwrap();
    assert!(!tampered.votes[0].checks.is_metadata_anchor_valid);
    assert_eq!(
        tampered.blocked_by.as_deref(),
        Some("Ensure all vote validations are successful before proceeding.")
    );

    let anonymous = build_report(&config, &tx, None, Some(&verifier(RATIONALE)))
        .await
        .unwrap();
    assert!(anonymous.wallet.is_none());
    assert!(!anonymous.checks.is_part_of_signers);
    assert_eq!(
        anonymous.blocked_by.as_deref(),
        Some("Please connect your wallet first.")
    );

    let err = build_report::<StaticFetcher>(&config, "not hex", Some(&offline), None)
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Invalid transaction format."));
}

#[tokio::test]
async fn test_verify_witness_writes_export() {
    let wallet = MockWallet::new([6; 32], 1);
    let unsigned = vote_tx(&wallet);
    let signed = wallet.sign_transaction(&unsigned, true).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let unsigned_path = dir.path().join("vote.unsigned");
    fs::write(&unsigned_path, &unsigned).unwrap();
    let args = VerifyWitnessArgs {
        unsigned: unsigned_path.to_string_lossy().into_owned(),
        signed,
        stake_credential: wallet.stake_credential().to_hex(),
        gov_action_id: None,
        out_dir: dir.path().join("out"),
    };

    let (file, path) = verify(&args, &InspectorConfig::default()).unwrap();
    assert_eq!(
        file.gov_action_id,
        gov_action::encode(&"21".repeat(32), 1).unwrap()
    );
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), file.file_name());
    let written: WitnessFile = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, file);
    assert_eq!(written.kind, "TxWitness ConwayEra");

    let someone_else = VerifyWitnessArgs {
        stake_credential: Hash28::from([0; 28]).to_hex(),
        ..args
    };
    let err = verify(&someone_else, &InspectorConfig::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Wallet returned unexpected VKey."));
}

#[tokio::test]
async fn test_poll_vote_and_show() {
    let alice = Hash28::from([0xa1; 28]);
    let bob = Hash28::from([0xb0; 28]);
    let ledger = InMemoryLedger::new();
    let mut stored = vigil_types::app::PollVotes::new();
    stored.insert(bob, PollVote::No);
    vigil_api::ledger::VoteLedger::store_votes(&ledger, "p1", &stored)
        .await
        .unwrap();

    let report = execute(
        ledger,
        vec![alice, bob],
        PollCommands::Vote {
            proposal: "p1".into(),
            member: alice.to_hex(),
            vote: PollVote::Yes,
        },
    )
    .await
    .unwrap();
    assert_eq!(report.votes[&alice], PollVote::Yes);
    assert_eq!(report.outcome, PollOutcome::Tied);

    let outsider = execute(
        InMemoryLedger::new(),
        vec![alice],
        PollCommands::Vote {
            proposal: "p1".into(),
            member: bob.to_hex(),
            vote: PollVote::Yes,
        },
    )
    .await;
    assert!(outsider.is_err());

    let unconfigured = execute(
        InMemoryLedger::new(),
        Vec::new(),
        PollCommands::Show {
            proposal: "p1".into(),
        },
    )
    .await;
    assert!(unconfigured.is_err());
}

#[test]
fn test_gov_action_round_trip() {
    let id = gov_action::encode(&"00".repeat(32), 17).unwrap();
    assert_eq!(
        id,
        "gov_action1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqpzklpgpf"
    );
    let action = gov_action::decode(&id).unwrap();
    assert_eq!(action.index, 17);
    assert!(gov_action::encode(&"00".repeat(32), 300).is_err());
    assert!(gov_action::decode("drep1xyz").is_err());
}

#[test]
fn test_command_line_parsing() {
    let credential = "ab".repeat(28);
    let cli = Cli::try_parse_from([
        "vigil",
        "inspect",
        "84a0",
        "--network",
        "testnet",
        "--stake-credential",
        &credential,
        "--metrics",
    ])
    .unwrap();
    assert!(cli.metrics);
    match cli.command {
        Commands::Inspect(args) => {
            assert_eq!(args.tx, "84a0");
            assert!(!args.check_anchors);
        }
        other => panic!("unexpected command {:?}", other),
    }

    // A wallet identity without a network is refused.
    assert!(Cli::try_parse_from(["vigil", "inspect", "84a0", "--stake-credential", &credential]).is_err());

    let cli = Cli::try_parse_from(["vigil", "poll", "vote", "p1", "--member", &credential, "--vote", "abstain"])
        .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Poll(args) if matches!(args.command, PollCommands::Vote { vote: PollVote::Abstain, .. })
    ));
}
