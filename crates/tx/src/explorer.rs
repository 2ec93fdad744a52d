// Path: crates/tx/src/explorer.rs

//! Block explorer links for governance actions and addresses.

use vigil_types::app::NetworkId;
use vigil_types::config::ExplorerConfig;

/// Builds explorer URLs from the configured base URLs.
#[derive(Debug, Clone, Default)]
pub struct ExplorerLinks {
    config: ExplorerConfig,
}

impl ExplorerLinks {
    /// Wraps the explorer configuration.
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// `<base>govAction/<id>`
    pub fn gov_action(&self, gov_action_id: &str, network: NetworkId) -> String {
        format!("{}govAction/{}", self.config.base_url(network), gov_action_id)
    }

    /// `<base>address/<bech32>`
    pub fn address(&self, bech32: &str, network: NetworkId) -> String {
        format!("{}address/{}", self.config.base_url(network), bech32)
    }

    /// Picks the link kind from the identifier's prefix, as explorer search does.
    /// Returns `None` for anything that is neither an address nor an action id.
    pub fn for_bech32(&self, bech32: &str, network: NetworkId) -> Option<String> {
        if bech32.starts_with("addr") {
            Some(self.address(bech32, network))
        } else if bech32.starts_with("gov_action") {
            Some(self.gov_action(bech32, network))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_follow_network() {
        let links = ExplorerLinks::default();
        assert_eq!(
            links.gov_action("gov_action1xyz", NetworkId::Testnet),
            "https://preprod.cardanoscan.io/govAction/gov_action1xyz"
        );
        assert_eq!(
            links.for_bech32("addr1abc", NetworkId::Mainnet).as_deref(),
            Some("https://cardanoscan.io/address/addr1abc")
        );
        assert_eq!(links.for_bech32("drep1abc", NetworkId::Mainnet), None);
    }
}
