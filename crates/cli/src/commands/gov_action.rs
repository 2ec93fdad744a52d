// Path: crates/cli/src/commands/gov_action.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use vigil_tx::gov_action;
use vigil_types::app::{GovActionId, Hash32};

#[derive(Parser, Debug)]
pub struct GovActionArgs {
    #[clap(subcommand)]
    pub command: GovActionCommands,
}

#[derive(Subcommand, Debug)]
pub enum GovActionCommands {
    /// Encode a (transaction hash, index) pair as a gov_action1... identifier.
    Encode {
        /// Hash of the transaction that submitted the proposal (hex).
        #[clap(long)]
        tx_hash: String,
        /// Index of the proposal inside that transaction.
        #[clap(long, default_value = "0")]
        index: u64,
    },
    /// Decode a gov_action1... identifier.
    Decode { id: String },
}

/// Encodes `tx_hash#index`.
pub fn encode(tx_hash: &str, index: u64) -> Result<String> {
    let hash: Hash32 = tx_hash
        .parse()
        .with_context(|| format!("'{}' is not a 32-byte hex hash", tx_hash))?;
    Ok(gov_action::encode(&hash, index)?)
}

/// Decodes an identifier.
pub fn decode(id: &str) -> Result<GovActionId> {
    gov_action::decode(id).with_context(|| format!("Invalid governance action id '{}'", id))
}

pub fn run(args: GovActionArgs) -> Result<()> {
    match args.command {
        GovActionCommands::Encode { tx_hash, index } => {
            println!("{}", encode(&tx_hash, index)?);
        }
        GovActionCommands::Decode { id } => {
            let action = decode(&id)?;
            println!("Transaction hash: {}", action.tx_hash);
            println!("Index:            {}", action.index);
        }
    }
    Ok(())
}
