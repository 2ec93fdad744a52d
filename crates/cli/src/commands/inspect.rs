// Path: crates/cli/src/commands/inspect.rs

use super::NetworkArg;
use crate::util::{mark, parse_hash28, read_hex_input};
use crate::wallet::OfflineWallet;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use futures_util::future::join_all;
use serde::Serialize;
use std::time::Duration;
use vigil_api::fetch::{DocumentFetcher, HttpDocumentFetcher};
use vigil_tx::rules::transaction_network;
use vigil_types::app::{Hash28, NetworkId, TxValidationState, VoteRecord, VoteValidationState};
use vigil_types::config::InspectorConfig;
use vigil_types::error::SessionError;
use vigil_validator::{AnchorVerifier, Disclosure, SigningSession};

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Transaction CBOR hex, or a file containing it.
    pub tx: String,

    /// Network of the signing wallet. Required for the wallet checks.
    #[clap(long, value_enum)]
    pub network: Option<NetworkArg>,

    /// The wallet's change address (hex or bech32).
    #[clap(long, requires = "network", conflicts_with = "stake_credential")]
    pub change_address: Option<String>,

    /// The signer's stake credential hash (hex).
    #[clap(long, requires = "network")]
    pub stake_credential: Option<String>,

    /// Fetch each vote's rationale document and compare its hash.
    #[clap(long)]
    pub check_anchors: bool,

    /// Print the report as JSON.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    pub network: NetworkId,
    pub stake_credential: Hash28,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReport {
    #[serde(flatten)]
    pub record: VoteRecord,
    pub checks: VoteValidationState,
}

/// Everything the inspector found about one transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub tx_hash: String,
    pub shape: &'static str,
    pub transaction_network: Option<NetworkId>,
    pub wallet: Option<WalletSummary>,
    pub checks: TxValidationState,
    pub votes: Vec<VoteReport>,
    pub disclosures: Vec<Disclosure>,
    pub anchors_checked: bool,
    pub ready_to_sign: bool,
    pub blocked_by: Option<String>,
}

impl InspectArgs {
    fn wallet(&self) -> Result<Option<OfflineWallet>> {
        let Some(network) = self.network.map(NetworkId::from) else {
            return Ok(None);
        };
        match (&self.change_address, &self.stake_credential) {
            (Some(address), _) => Ok(Some(OfflineWallet::with_change_address(network, address))),
            (None, Some(credential)) => Ok(Some(OfflineWallet::with_stake_credential(
                network,
                &parse_hash28(credential)?,
            ))),
            (None, None) => Err(anyhow!(
                "--network needs --change-address or --stake-credential"
            )),
        }
    }
}

/// Runs every check a signer would see and summarises them.
///
/// Without a verifier the anchor checks stay pending and the report says so.
/// Signing readiness assumes every disclosure has been acknowledged.
pub async fn build_report<F: DocumentFetcher>(
    config: &InspectorConfig,
    tx_hex: &str,
    wallet: Option<&OfflineWallet>,
    verifier: Option<&AnchorVerifier<F>>,
) -> Result<InspectReport> {
    let mut session = SigningSession::new(config);
    if let Some(wallet) = wallet {
        session
            .connect(wallet)
            .await
            .context("Failed to resolve the wallet context")?;
    }
    session.set_input(tx_hex);
    let jobs = session.check().context("Transaction rejected")?;
    if let Some(verifier) = verifier {
        let results = join_all(jobs.into_iter().map(|job| job.run(verifier))).await;
        for result in results {
            session.apply_anchor_result(result);
        }
    }

    let tx = session
        .transaction()
        .ok_or_else(|| anyhow!("No transaction after a successful check"))?;
    let checks = session
        .validation()
        .ok_or_else(|| anyhow!("No check results after a successful check"))?;
    let is_vote = tx.shape.is_vote();
    let blocked_by = if wallet.is_none() {
        Some(SessionError::NotConnected.to_string())
    } else {
        match checks.gate(is_vote, true) {
            Ok(()) => None,
            Err(SessionError::VoteChecksFailed) if !checks.is_complete() => {
                Some("Metadata anchors were not checked (pass --check-anchors).".to_string())
            }
            Err(e) => Some(e.to_string()),
        }
    };

    let votes = session
        .vote_records()
        .iter()
        .cloned()
        .zip(checks.votes().iter().copied())
        .map(|(record, checks)| VoteReport { record, checks })
        .collect();

    Ok(InspectReport {
        tx_hash: tx.hash().to_hex(),
        shape: tx.shape.name(),
        transaction_network: transaction_network(tx).ok(),
        wallet: session.wallet().map(|w| WalletSummary {
            network: w.network,
            stake_credential: w.stake_credential,
        }),
        checks: *checks.tx(),
        votes,
        disclosures: session.disclosures().to_vec(),
        anchors_checked: verifier.is_some(),
        ready_to_sign: blocked_by.is_none(),
        blocked_by,
    })
}

fn print_human(report: &InspectReport) {
    println!("Transaction {}", report.tx_hash);
    println!("  Shape:   {}", report.shape);
    match report.transaction_network {
        Some(network) => println!("  Network: {}", network),
        None => println!("  Network: unknown (no outputs)"),
    }
    match &report.wallet {
        Some(w) => println!("  Signer:  {} on {}", w.stake_credential, w.network),
        None => println!("  Signer:  not provided"),
    }

    println!("\nTransaction checks:");
    for (rule, passed) in report.checks.checks() {
        println!("  {} {}", mark(passed), rule);
    }

    for (i, vote) in report.votes.iter().enumerate() {
        println!("\nVote {}:", i + 1);
        println!("  Governance action: {}", vote.record.governance_action_id);
        println!("  Voice choice:      {}", vote.record.voice_choice);
        println!("  Anchor:            {}", vote.record.anchor_url);
        println!("  Anchor hash:       {}", vote.record.anchor_hash);
        println!("  Explorer:          {}", vote.record.explorer_link);
        for (rule, passed) in vote.checks.checks() {
            if rule == "isMetadataAnchorValid" && !report.anchors_checked {
                println!("  [skip] {}", rule);
            } else {
                println!("  {} {}", mark(passed), rule);
            }
        }
    }

    println!();
    match &report.blocked_by {
        None => println!("Ready to sign once every detail is acknowledged."),
        Some(reason) => println!("Not ready to sign: {}", reason),
    }
}

pub async fn run(args: InspectArgs, config: &InspectorConfig) -> Result<()> {
    let tx_hex = read_hex_input(&args.tx)?;
    let wallet = args.wallet()?;

    let report = if args.check_anchors {
        let fetcher = HttpDocumentFetcher::new(Duration::from_secs(config.anchor.timeout_secs))?;
        let verifier = AnchorVerifier::new(fetcher, &config.anchor);
        build_report(config, &tx_hex, wallet.as_ref(), Some(&verifier)).await?
    } else {
        build_report::<HttpDocumentFetcher>(config, &tx_hex, wallet.as_ref(), None).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }
    Ok(())
}
