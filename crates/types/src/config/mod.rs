// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the inspector's rule engine, anchor
//! verifier, explorer links and council poll.
//!
//! Every field has a default so that an empty TOML file is a valid configuration.
use crate::app::{Hash28, NetworkId};
use serde::{Deserialize, Serialize};

/// Top-level configuration, usually loaded from a TOML file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct InspectorConfig {
    /// Expected committee hot-credential scripts.
    pub committee: CommitteeConfig,
    /// Anchor document fetching.
    pub anchor: AnchorConfig,
    /// Block explorer links.
    pub explorer: ExplorerConfig,
    /// How many votes a single transaction may carry.
    pub vote_policy: VotePolicy,
    /// Internal council poll.
    pub poll: PollConfig,
}

/// The committee hot-credential script hash each network expects voters to use.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CommitteeConfig {
    /// Expected script hash on test networks.
    #[serde(default = "default_testnet_script_hash")]
    pub testnet_script_hash: Hash28,
    /// Expected script hash on the main network.
    #[serde(default = "default_mainnet_script_hash")]
    pub mainnet_script_hash: Hash28,
}

fn default_testnet_script_hash() -> Hash28 {
    Hash28::from([
        0x4f, 0x00, 0x98, 0x4f, 0xa7, 0x2e, 0x26, 0x5b, 0x8f, 0xf8, 0xff, 0xce, 0x44, 0x05,
        0xda, 0x56, 0x2c, 0xd3, 0xd6, 0xb1, 0x6a, 0x4a, 0x38, 0xde, 0x33, 0x72, 0xee, 0xea,
    ])
}
fn default_mainnet_script_hash() -> Hash28 {
    Hash28::from([
        0x85, 0xc4, 0x7d, 0xd4, 0xb9, 0xa2, 0xe7, 0x0e, 0x88, 0x96, 0x5d, 0x91, 0xdd, 0x69,
        0xbe, 0x18, 0x2d, 0x56, 0x05, 0xb2, 0x3b, 0xb5, 0x25, 0x0b, 0x1c, 0x94, 0xbf, 0x64,
    ])
}

impl Default for CommitteeConfig {
    fn default() -> Self {
        Self {
            testnet_script_hash: default_testnet_script_hash(),
            mainnet_script_hash: default_mainnet_script_hash(),
        }
    }
}

impl CommitteeConfig {
    /// The script hash a committee voter must present on `network`.
    pub fn script_hash(&self, network: NetworkId) -> &Hash28 {
        match network {
            NetworkId::Testnet => &self.testnet_script_hash,
            NetworkId::Mainnet => &self.mainnet_script_hash,
        }
    }
}

/// Settings for fetching anchor documents.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AnchorConfig {
    /// Host and path prefix that `ipfs://` URLs are rewritten onto.
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_ipfs_gateway() -> String {
    "ipfs.io/ipfs".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway: default_ipfs_gateway(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Block explorer base URLs, each ending with `/`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Explorer used for test-network transactions.
    #[serde(default = "default_testnet_explorer")]
    pub testnet_base_url: String,
    /// Explorer used for main-network transactions.
    #[serde(default = "default_mainnet_explorer")]
    pub mainnet_base_url: String,
}

fn default_testnet_explorer() -> String {
    "https://preprod.cardanoscan.io/".to_string()
}
fn default_mainnet_explorer() -> String {
    "https://cardanoscan.io/".to_string()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            testnet_base_url: default_testnet_explorer(),
            mainnet_base_url: default_mainnet_explorer(),
        }
    }
}

impl ExplorerConfig {
    /// The base URL for `network`.
    pub fn base_url(&self, network: NetworkId) -> &str {
        match network {
            NetworkId::Testnet => &self.testnet_base_url,
            NetworkId::Mainnet => &self.mainnet_base_url,
        }
    }
}

/// How many votes one transaction may carry.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VotePolicy {
    /// Exactly one vote; more is a hard failure.
    #[default]
    SingleVote,
    /// Any positive number of votes, each validated on its own.
    PerVote,
}

/// Settings for the internal council poll.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct PollConfig {
    /// Key hashes of the members allowed to vote.
    #[serde(default)]
    pub council_members: Vec<Hash28>,
    /// Endpoint of the persisted vote ledger.
    #[serde(default)]
    pub ledger_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: InspectorConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, InspectorConfig::default());
        assert_eq!(
            cfg.committee.script_hash(NetworkId::Testnet).to_hex(),
            "4f00984fa72e265b8ff8ffce4405da562cd3d6b16a4a38de3372eeea"
        );
        assert_eq!(
            cfg.committee.script_hash(NetworkId::Mainnet).to_hex(),
            "85c47dd4b9a2e70e88965d91dd69be182d5605b23bb5250b1c94bf64"
        );
        assert_eq!(cfg.anchor.ipfs_gateway, "ipfs.io/ipfs");
        assert_eq!(cfg.vote_policy, VotePolicy::SingleVote);
    }

    #[test]
    fn test_partial_override() {
        let cfg: InspectorConfig = toml::from_str(
            r#"
            vote_policy = "per_vote"

            [anchor]
            timeout_secs = 5

            [poll]
            council_members = ["01010101010101010101010101010101010101010101010101010101"]
            ledger_url = "http://localhost:8080/votes"
            "#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cfg.vote_policy, VotePolicy::PerVote);
        assert_eq!(cfg.anchor.timeout_secs, 5);
        assert_eq!(cfg.anchor.ipfs_gateway, "ipfs.io/ipfs");
        assert_eq!(cfg.poll.council_members.len(), 1);
        assert_eq!(cfg.explorer.base_url(NetworkId::Mainnet), "https://cardanoscan.io/");
    }
}
