// Path: crates/api/src/ledger/http.rs

use super::VoteLedger;
use crate::error::LedgerError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use vigil_types::app::PollVotes;

/// A `VoteLedger` served over HTTP: GET `?proposalId=` reads, POST writes.
pub struct HttpVoteLedger {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoreVotesRequest<'a> {
    proposal_id: &'a str,
    votes: &'a PollVotes,
}

impl HttpVoteLedger {
    /// Builds a ledger client for `endpoint`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl VoteLedger for HttpVoteLedger {
    async fn fetch_votes(&self, proposal_id: &str) -> Result<PollVotes, LedgerError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("proposalId", proposal_id)])
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("HTTP Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LedgerError::Status(response.status().as_u16()));
        }

        response
            .json::<PollVotes>()
            .await
            .map_err(|e| LedgerError::Decode(format!("Failed to parse response: {}", e)))
    }

    async fn store_votes(&self, proposal_id: &str, votes: &PollVotes) -> Result<(), LedgerError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&StoreVotesRequest { proposal_id, votes })
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("HTTP Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LedgerError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_types::app::{Hash28, PollVote};

    #[test]
    fn test_store_request_wire_shape() {
        let mut votes = PollVotes::new();
        votes.insert(Hash28::from([0xaa; 28]), PollVote::Yes);
        let body = serde_json::to_value(StoreVotesRequest {
            proposal_id: "gov_action1xyz",
            votes: &votes,
        })
        .unwrap();
        assert_eq!(body["proposalId"], "gov_action1xyz");
        assert_eq!(body["votes"]["aa".repeat(28)], "yes");
    }
}
