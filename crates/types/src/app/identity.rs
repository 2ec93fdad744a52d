// Path: crates/types/src/app/identity.rs

//! Defines the fixed-width hash newtypes and the `NetworkId` used to identify
//! credentials, transactions and the chain a wallet is connected to.
//!
//! Hashes render as lowercase hex everywhere (logs, JSON, TOML) so that values
//! copied from an explorer or a wallet compare byte-for-byte.

use crate::error::CoreError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A fixed-width hash digest, stored as raw bytes and displayed as hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash<const N: usize>(pub [u8; N]);

/// A 28-byte hash (BLAKE2b-224), used for key hashes and script hashes.
pub type Hash28 = Hash<28>;
/// A 32-byte hash (BLAKE2b-256), used for transaction ids and document hashes.
pub type Hash32 = Hash<32>;

impl<const N: usize> Hash<N> {
    /// The width of the digest in bytes.
    pub const LEN: usize = N;

    /// Builds a hash from a byte slice, failing if the length is not exactly `N`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CoreError> {
        <[u8; N]>::try_from(bytes).map(Self).map_err(|_| {
            CoreError::InvalidLength {
                expected: N,
                got: bytes.len(),
            }
        })
    }

    /// Returns the lowercase hex encoding of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Hash<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Hash<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> FromStr for Hash<N> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| CoreError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl<const N: usize> fmt::Display for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> fmt::Debug for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash<{}>({})", N, self.to_hex())
    }
}

impl<const N: usize> Serialize for Hash<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Hash<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// The network a transaction targets or a wallet is connected to.
///
/// The numeric values match the network nibble of a Shelley address header and
/// the value returned by a CIP-30 wallet's `getNetworkId`.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Any test network (preprod, preview). Addresses use the `addr_test` prefix.
    Testnet = 0,
    /// The main network. Addresses use the `addr` prefix.
    Mainnet = 1,
}

impl NetworkId {
    /// Returns the numeric wallet network id.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        }
    }
}

impl TryFrom<u8> for NetworkId {
    type Error = CoreError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Testnet),
            1 => Ok(Self::Mainnet),
            other => Err(CoreError::UnknownNetwork(other)),
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let h = Hash28::from([0xab; 28]);
        let parsed: Hash28 = h.to_hex().parse().unwrap();
        assert_eq!(h, parsed);
        assert_eq!(h.to_string().len(), 56);
    }

    #[test]
    fn test_hash_rejects_wrong_length() {
        let err = "abcd".parse::<Hash32>().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidLength {
                expected: 32,
                got: 2
            }
        ));
    }

    #[test]
    fn test_hash_serde_as_hex_string() {
        let h = Hash32::from([1u8; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(32)));
        let back: Hash32 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn test_network_id_from_wallet_value() {
        assert_eq!(NetworkId::try_from(0).unwrap(), NetworkId::Testnet);
        assert_eq!(NetworkId::try_from(1).unwrap(), NetworkId::Mainnet);
        assert!(NetworkId::try_from(7).is_err());
    }
}
