// Path: crates/cli/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # vigil CLI Library
//!
//! The commands behind the `vigil` binary. Like any other consumer, this crate
//! only drives the public APIs of the `vigil-*` libraries; it holds no rule or
//! codec logic of its own.

pub mod commands;
pub mod util;
pub mod wallet;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::*;
use std::path::PathBuf;
use vigil_types::config::InspectorConfig;

#[derive(Parser, Debug)]
#[clap(
    name = "vigil",
    version,
    about = "Inspect governance transactions before a council member signs them.",
    long_about = "vigil decodes a transaction, runs the signing checks, verifies rationale anchors, validates returned witnesses and manages the council's internal poll."
)]
pub struct Cli {
    /// Inspector configuration (TOML). Defaults apply when omitted.
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print Prometheus metrics to stderr after the command.
    #[clap(long, global = true)]
    pub metrics: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a transaction and run every signing check.
    Inspect(inspect::InspectArgs),

    /// Encode or decode governance action identifiers.
    GovAction(gov_action::GovActionArgs),

    /// Validate a wallet's witness and write the witness export.
    VerifyWitness(verify_witness::VerifyWitnessArgs),

    /// The council's internal poll.
    Poll(poll::PollArgs),
}

/// Loads `--config`, or the defaults.
pub fn load_config(path: Option<&PathBuf>) -> Result<InspectorConfig> {
    match path {
        Some(path) => vigil_validator::config::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(InspectorConfig::default()),
    }
}

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref())?;
    if cli.metrics {
        vigil_telemetry::prometheus::install().context("Failed to install metrics")?;
    }

    let outcome = match cli.command {
        Commands::Inspect(args) => inspect::run(args, &config).await,
        Commands::GovAction(args) => gov_action::run(args),
        Commands::VerifyWitness(args) => verify_witness::run(args, &config),
        Commands::Poll(args) => poll::run(args, &config).await,
    };

    if cli.metrics {
        eprint!("{}", vigil_telemetry::prometheus::render());
    }
    outcome
}
