// Path: crates/cli/src/commands/poll.rs

use crate::util::parse_hash28;
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::time::Duration;
use vigil_api::ledger::{HttpVoteLedger, VoteLedger};
use vigil_types::app::{Hash28, PollOutcome, PollTally, PollVote, PollVotes};
use vigil_types::config::InspectorConfig;
use vigil_validator::CouncilPoll;

#[derive(Parser, Debug)]
pub struct PollArgs {
    /// Vote ledger endpoint. Overrides `poll.ledger_url`.
    #[clap(long)]
    pub ledger_url: Option<String>,

    /// Print the result as JSON.
    #[clap(long)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: PollCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PollCommands {
    /// Show the council's votes on a proposal.
    Show { proposal: String },
    /// Record a member's vote on a proposal.
    Vote {
        proposal: String,
        /// The member's credential hash (hex).
        #[clap(long)]
        member: String,
        /// yes, no or abstain.
        #[clap(long)]
        vote: PollVote,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollReport {
    pub proposal_id: String,
    pub votes: PollVotes,
    pub tally: PollTally,
    pub outcome: PollOutcome,
}

/// Runs a poll command against `ledger` and reports the confirmed state.
pub async fn execute<L: VoteLedger>(
    ledger: L,
    members: Vec<Hash28>,
    command: PollCommands,
) -> Result<PollReport> {
    if members.is_empty() {
        bail!("No council members configured (set poll.council_members)");
    }
    let proposal = match &command {
        PollCommands::Show { proposal } | PollCommands::Vote { proposal, .. } => proposal.clone(),
    };
    let mut poll = CouncilPoll::load(ledger, members, proposal).await?;
    if let PollCommands::Vote { member, vote, .. } = command {
        if vote == PollVote::NotVoted {
            bail!("Choose yes, no or abstain");
        }
        poll.cast(parse_hash28(&member)?, vote).await?;
    }
    Ok(PollReport {
        proposal_id: poll.proposal_id().to_string(),
        votes: poll.votes().clone(),
        tally: poll.tally(),
        outcome: poll.outcome(),
    })
}

fn print_human(report: &PollReport) {
    println!("Proposal {}", report.proposal_id);
    for (member, vote) in &report.votes {
        println!("  {}  {}", member, vote);
    }
    let t = &report.tally;
    println!(
        "\nyes {} / no {} / abstain {} / not voted {}",
        t.yes, t.no, t.abstain, t.not_voted
    );
    println!("Outcome: {:?}", report.outcome);
}

pub async fn run(args: PollArgs, config: &InspectorConfig) -> Result<()> {
    let url = args
        .ledger_url
        .or_else(|| config.poll.ledger_url.clone())
        .ok_or_else(|| anyhow!("No vote ledger configured (pass --ledger-url or set poll.ledger_url)"))?;
    let ledger = HttpVoteLedger::new(url, Duration::from_secs(config.anchor.timeout_secs))?;
    let report = execute(ledger, config.poll.council_members.clone(), args.command).await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_human(&report);
    }
    Ok(())
}
