// Path: crates/api/src/wallet/mod.rs

//! Defines the `WalletConnector` trait, the seam between the signing session
//! and a CIP-30 style browser or hardware wallet.

use crate::error::WalletError;
use async_trait::async_trait;

/// A connected wallet able to report its identity and sign transactions.
///
/// Every call may suspend on a device or user round trip. Implementations must
/// not cache answers across connections; the session asks again on every
/// (re)connect.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Signs a hex-encoded transaction and returns the hex-encoded signed
    /// transaction. The session always passes `partial_sign = true`.
    async fn sign_transaction(&self, tx_hex: &str, partial_sign: bool)
        -> Result<String, WalletError>;

    /// Returns the wallet's change address, as hex bytes or bech32.
    async fn change_address(&self) -> Result<String, WalletError>;

    /// Returns the wallet's network id: `0` for test networks, `1` for main.
    async fn network_id(&self) -> Result<u8, WalletError>;

    /// Returns the hex public keys of the wallet's registered stake keys.
    async fn registered_pub_stake_keys(&self) -> Result<Vec<String>, WalletError>;
}
