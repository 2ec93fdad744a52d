// Path: crates/cli/src/wallet.rs

//! A wallet context built from command-line flags.

use async_trait::async_trait;
use vigil_api::error::WalletError;
use vigil_api::wallet::WalletConnector;
use vigil_types::app::{Hash28, NetworkId};

const REWARD_KEY_HEADER: u8 = 0xe0;

/// Answers identity questions from flags and refuses to sign.
///
/// When only a stake credential is given, a reward address for it stands in
/// for the change address; the session only reads its stake part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfflineWallet {
    network: NetworkId,
    change_address: String,
}

impl OfflineWallet {
    /// Uses `change_address` (hex or bech32) as reported by a real wallet.
    pub fn with_change_address(network: NetworkId, change_address: impl Into<String>) -> Self {
        Self {
            network,
            change_address: change_address.into(),
        }
    }

    /// Uses a reward address for `stake_credential`.
    pub fn with_stake_credential(network: NetworkId, stake_credential: &Hash28) -> Self {
        let mut bytes = Vec::with_capacity(29);
        bytes.push(REWARD_KEY_HEADER | network.as_u8());
        bytes.extend_from_slice(stake_credential.as_bytes());
        Self {
            network,
            change_address: hex::encode(bytes),
        }
    }
}

#[async_trait]
impl WalletConnector for OfflineWallet {
    async fn sign_transaction(
        &self,
        _tx_hex: &str,
        _partial_sign: bool,
    ) -> Result<String, WalletError> {
        Err(WalletError::Rejected(
            "offline inspection cannot sign; use a wallet and verify-witness".into(),
        ))
    }

    async fn change_address(&self) -> Result<String, WalletError> {
        Ok(self.change_address.clone())
    }

    async fn network_id(&self) -> Result<u8, WalletError> {
        Ok(self.network.as_u8())
    }

    async fn registered_pub_stake_keys(&self) -> Result<Vec<String>, WalletError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_tx::Address;

    #[tokio::test]
    async fn test_stake_credential_becomes_reward_address() {
        let credential = Hash28::from([0x3c; 28]);
        let wallet = OfflineWallet::with_stake_credential(NetworkId::Testnet, &credential);
        let address = Address::parse(&wallet.change_address().await.unwrap()).unwrap();
        assert_eq!(address.network(), NetworkId::Testnet);
        assert_eq!(address.stake_credential().unwrap(), credential);
        assert_eq!(wallet.network_id().await.unwrap(), 0);
        assert!(wallet.sign_transaction("84", true).await.is_err());
    }
}
