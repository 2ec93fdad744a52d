// Path: crates/cli/src/commands/verify_witness.rs

use crate::util::{parse_hash28, read_hex_input};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use vigil_tx::{decode, validate_witness, ExplorerLinks, VoteExtractor};
use vigil_types::app::WitnessFile;
use vigil_types::config::InspectorConfig;

#[derive(Parser, Debug)]
pub struct VerifyWitnessArgs {
    /// The transaction handed to the wallet (hex or file).
    #[clap(long)]
    pub unsigned: String,

    /// The transaction the wallet returned (hex or file).
    #[clap(long)]
    pub signed: String,

    /// The stake credential hash the witness must belong to (hex).
    #[clap(long)]
    pub stake_credential: String,

    /// Label for the export. Defaults to the first vote's governance action,
    /// or the transaction hash when the transaction carries no votes.
    #[clap(long)]
    pub gov_action_id: Option<String>,

    /// Directory the witness file is written to.
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Validates the wallet's witness and writes the export. Returns the export and its path.
pub fn verify(args: &VerifyWitnessArgs, config: &InspectorConfig) -> Result<(WitnessFile, PathBuf)> {
    let unsigned = read_hex_input(&args.unsigned)?;
    let signed = read_hex_input(&args.signed)?;
    let expected = parse_hash28(&args.stake_credential)?;

    let witness =
        validate_witness(&signed, &unsigned, &expected).context("Witness rejected")?;

    let label = match &args.gov_action_id {
        Some(id) => id.clone(),
        None => {
            let tx = decode(&unsigned).context("Unsigned transaction rejected")?;
            let extractor = VoteExtractor::new(ExplorerLinks::new(config.explorer.clone()));
            match extractor.extract(&tx)?.into_iter().next() {
                Some(record) => record.governance_action_id,
                None => tx.hash().to_hex(),
            }
        }
    };

    let file = WitnessFile::new(label, &witness);
    let path = write_export(&args.out_dir, &file)?;
    tracing::info!(target: "cli", path = %path.display(), "witness exported");
    Ok((file, path))
}

fn write_export(dir: &Path, file: &WitnessFile) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(file.file_name());
    fs::write(&path, serde_json::to_string_pretty(file)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub fn run(args: VerifyWitnessArgs, config: &InspectorConfig) -> Result<()> {
    let (file, path) = verify(&args, config)?;
    println!("Witness is valid for {}", file.voter_key_hash);
    println!("Wrote {}", path.display());
    Ok(())
}
