// Path: crates/types/src/app/poll.rs

//! Data structures for the council's internal poll on a proposal.

use super::identity::Hash28;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A council member's recorded stance on a proposal.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PollVote {
    /// In favour.
    Yes,
    /// Against.
    No,
    /// Explicit abstention.
    Abstain,
    /// No vote recorded yet.
    #[default]
    NotVoted,
}

impl fmt::Display for PollVote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Abstain => "abstain",
            Self::NotVoted => "not-voted",
        })
    }
}

impl std::str::FromStr for PollVote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "abstain" => Ok(Self::Abstain),
            "not-voted" | "not_voted" => Ok(Self::NotVoted),
            other => Err(format!("unknown poll vote '{other}'")),
        }
    }
}

/// Member → vote mapping for one proposal, as stored by the vote ledger.
pub type PollVotes = BTreeMap<Hash28, PollVote>;

/// The aggregate result of a council poll.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PollOutcome {
    /// Nobody has voted yet.
    Pending,
    /// More yes than no.
    Passed,
    /// More no than yes.
    Failed,
    /// Equal yes and no.
    Tied,
}

/// Counts of each stance across the council.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PollTally {
    /// Members voting yes.
    pub yes: usize,
    /// Members voting no.
    pub no: usize,
    /// Members abstaining.
    pub abstain: usize,
    /// Members who have not voted.
    pub not_voted: usize,
}

impl PollTally {
    /// Counts the votes in a member mapping.
    pub fn from_votes(votes: &PollVotes) -> Self {
        votes.values().fold(Self::default(), |mut t, v| {
            match v {
                PollVote::Yes => t.yes += 1,
                PollVote::No => t.no += 1,
                PollVote::Abstain => t.abstain += 1,
                PollVote::NotVoted => t.not_voted += 1,
            }
            t
        })
    }

    /// Derives the outcome from the counts.
    pub fn outcome(&self) -> PollOutcome {
        if self.yes + self.no + self.abstain == 0 {
            PollOutcome::Pending
        } else if self.yes > self.no {
            PollOutcome::Passed
        } else if self.no > self.yes {
            PollOutcome::Failed
        } else {
            PollOutcome::Tied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(list: &[PollVote]) -> PollVotes {
        list.iter()
            .enumerate()
            .map(|(i, v)| (Hash28::from([i as u8; 28]), *v))
            .collect()
    }

    #[test]
    fn test_outcomes() {
        use PollVote::*;
        let t = |l: &[PollVote]| PollTally::from_votes(&votes(l)).outcome();
        assert_eq!(t(&[NotVoted, NotVoted]), PollOutcome::Pending);
        assert_eq!(t(&[Yes, No, Yes]), PollOutcome::Passed);
        assert_eq!(t(&[No, NotVoted]), PollOutcome::Failed);
        assert_eq!(t(&[Abstain, NotVoted]), PollOutcome::Tied);
        assert_eq!(t(&[Yes, No]), PollOutcome::Tied);
    }

    #[test]
    fn test_poll_vote_wire_names() {
        assert_eq!(serde_json::to_string(&PollVote::NotVoted).unwrap(), "\"not-voted\"");
        assert_eq!("Abstain".parse::<PollVote>().unwrap(), PollVote::Abstain);
        assert!("maybe".parse::<PollVote>().is_err());
    }
}
