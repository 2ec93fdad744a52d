// Path: crates/tx/src/address.rs

//! Chain addresses: header interpretation, stake-credential extraction and
//! bech32 rendering.

use bech32::{FromBase32, ToBase32, Variant};
use std::fmt;
use vigil_types::app::{Hash28, NetworkId};
use vigil_types::error::AddressError;

const HASH_LEN: usize = 28;
const BASE_LEN: usize = 1 + 2 * HASH_LEN;
const SINGLE_LEN: usize = 1 + HASH_LEN;

/// The address kinds distinguished by the header's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Payment and stake credentials (types 0-3).
    Base,
    /// Payment credential plus a chain pointer to the stake registration (types 4-5).
    Pointer,
    /// Payment credential only (types 6-7).
    Enterprise,
    /// Legacy bootstrap address (type 8).
    Byron,
    /// Stake credential only (types 14-15).
    Reward,
}

/// A raw address with its header already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    bytes: Vec<u8>,
    kind: AddressKind,
}

impl Address {
    /// Validates raw address bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AddressError> {
        let header = *bytes.first().ok_or(AddressError::Empty)?;
        let type_nibble = header >> 4;
        let kind = match type_nibble {
            0..=3 => AddressKind::Base,
            4 | 5 => AddressKind::Pointer,
            6 | 7 => AddressKind::Enterprise,
            8 => AddressKind::Byron,
            14 | 15 => AddressKind::Reward,
            other => return Err(AddressError::UnsupportedType(other)),
        };
        let len_ok = match kind {
            AddressKind::Base => bytes.len() == BASE_LEN,
            AddressKind::Enterprise | AddressKind::Reward => bytes.len() == SINGLE_LEN,
            AddressKind::Pointer => bytes.len() > SINGLE_LEN,
            AddressKind::Byron => true,
        };
        if !len_ok {
            return Err(AddressError::InvalidLength {
                kind: type_nibble,
                got: bytes.len(),
            });
        }
        Ok(Self { bytes, kind })
    }

    /// Parses an address given either as hex bytes (as CIP-30 wallets return
    /// it) or as bech32 text.
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AddressError::Empty);
        }
        if text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit()) {
            let bytes = hex::decode(text).map_err(|e| AddressError::Encoding(e.to_string()))?;
            return Self::from_bytes(bytes);
        }
        let (_hrp, data, _variant) =
            bech32::decode(text).map_err(|e| AddressError::Encoding(e.to_string()))?;
        let bytes =
            Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Encoding(e.to_string()))?;
        Self::from_bytes(bytes)
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The address kind.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The network the address belongs to. Byron addresses count as main network.
    pub fn network(&self) -> NetworkId {
        match (self.kind, self.bytes.first().map(|h| h & 0x0f)) {
            (AddressKind::Byron, _) => NetworkId::Mainnet,
            (_, Some(0)) => NetworkId::Testnet,
            _ => NetworkId::Mainnet,
        }
    }

    /// The stake credential hash of base and reward addresses.
    pub fn stake_credential(&self) -> Result<Hash28, AddressError> {
        let range = match self.kind {
            AddressKind::Base => SINGLE_LEN..BASE_LEN,
            AddressKind::Reward => 1..SINGLE_LEN,
            _ => return Err(AddressError::NoStakeCredential),
        };
        let slice = self
            .bytes
            .get(range)
            .ok_or(AddressError::NoStakeCredential)?;
        Hash28::from_slice(slice).map_err(|_| AddressError::NoStakeCredential)
    }

    /// The bech32 human-readable prefix for this address.
    pub fn hrp(&self) -> &'static str {
        match (self.kind, self.network()) {
            (AddressKind::Reward, NetworkId::Testnet) => "stake_test",
            (AddressKind::Reward, NetworkId::Mainnet) => "stake",
            (_, NetworkId::Testnet) => "addr_test",
            (_, NetworkId::Mainnet) => "addr",
        }
    }

    /// Renders the address as bech32.
    pub fn to_bech32(&self) -> Result<String, AddressError> {
        bech32::encode(self.hrp(), self.bytes.to_base32(), Variant::Bech32)
            .map_err(|e| AddressError::Encoding(e.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_bech32() {
            Ok(s) => f.write_str(&s),
            Err(_) => f.write_str(&hex::encode(&self.bytes)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(network: u8, stake: u8) -> Vec<u8> {
        let mut b = vec![network & 0x0f];
        b.extend([0x11; 28]);
        b.extend([stake; 28]);
        b
    }

    #[test]
    fn test_base_address_network_and_stake() {
        let addr = Address::from_bytes(base(0, 0x22)).unwrap();
        assert_eq!(addr.kind(), AddressKind::Base);
        assert_eq!(addr.network(), NetworkId::Testnet);
        assert_eq!(addr.stake_credential().unwrap(), Hash28::from([0x22; 28]));
        assert!(addr.to_bech32().unwrap().starts_with("addr_test1"));

        let main = Address::from_bytes(base(1, 0x22)).unwrap();
        assert_eq!(main.network(), NetworkId::Mainnet);
        assert!(main.to_bech32().unwrap().starts_with("addr1"));
    }

    #[test]
    fn test_parse_hex_and_bech32_agree() {
        let raw = base(1, 0x33);
        let from_hex = Address::parse(&hex::encode(&raw)).unwrap();
        let from_bech = Address::parse(&from_hex.to_bech32().unwrap()).unwrap();
        assert_eq!(from_hex, from_bech);
    }

    #[test]
    fn test_reward_address_stake_credential() {
        let mut raw = vec![0xe0];
        raw.extend([0x44; 28]);
        let addr = Address::from_bytes(raw).unwrap();
        assert_eq!(addr.kind(), AddressKind::Reward);
        assert_eq!(addr.stake_credential().unwrap(), Hash28::from([0x44; 28]));
        assert!(addr.to_bech32().unwrap().starts_with("stake_test1"));
    }

    #[test]
    fn test_enterprise_address_has_no_stake_credential() {
        let mut raw = vec![0x61];
        raw.extend([0x55; 28]);
        let addr = Address::from_bytes(raw).unwrap();
        assert_eq!(addr.stake_credential(), Err(AddressError::NoStakeCredential));
    }

    #[test]
    fn test_rejects_bad_headers_and_lengths() {
        assert_eq!(Address::from_bytes(vec![]), Err(AddressError::Empty));
        assert_eq!(
            Address::from_bytes(vec![0x90; 29]),
            Err(AddressError::UnsupportedType(9))
        );
        assert!(matches!(
            Address::from_bytes(vec![0x00; 30]),
            Err(AddressError::InvalidLength { kind: 0, got: 30 })
        ));
    }
}
