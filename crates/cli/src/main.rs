// Path: crates/cli/src/main.rs
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

//! # vigil
//!
//! Command-line front end of the governance transaction inspector.

use anyhow::Result;
use clap::Parser;
use vigil_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so that reports on stdout stay machine-readable.
    vigil_telemetry::init::init_tracing_with("warn")?;

    vigil_cli::run(cli).await
}
