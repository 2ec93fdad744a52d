// Path: crates/tx/src/gov_action.rs

//! Bech32 encoding of governance action identifiers (CIP-129).
//!
//! The payload is the 32-byte transaction hash followed by the index as a
//! single byte, under the human-readable prefix `gov_action`.

use bech32::{FromBase32, ToBase32, Variant};
use vigil_types::app::{GovActionId, Hash32};
use vigil_types::error::GovActionIdError;

/// The human-readable prefix of every governance action identifier.
pub const GOV_ACTION_HRP: &str = "gov_action";

const PAYLOAD_LEN: usize = 33;

/// Encodes `(tx_hash, index)`. Fails if the index does not fit in one byte.
pub fn encode(tx_hash: &Hash32, index: u64) -> Result<String, GovActionIdError> {
    let index = u8::try_from(index).map_err(|_| GovActionIdError::IndexOutOfRange(index))?;
    encode_id(&GovActionId {
        tx_hash: *tx_hash,
        index,
    })
}

/// Encodes an already-validated identifier.
pub fn encode_id(id: &GovActionId) -> Result<String, GovActionIdError> {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.extend_from_slice(id.tx_hash.as_bytes());
    payload.push(id.index);
    bech32::encode(GOV_ACTION_HRP, payload.to_base32(), Variant::Bech32)
        .map_err(|e| GovActionIdError::Bech32(e.to_string()))
}

/// Decodes an identifier back into `(tx_hash, index)`.
pub fn decode(text: &str) -> Result<GovActionId, GovActionIdError> {
    let (hrp, data, variant) =
        bech32::decode(text.trim()).map_err(|e| GovActionIdError::Bech32(e.to_string()))?;
    if hrp != GOV_ACTION_HRP {
        return Err(GovActionIdError::WrongPrefix(hrp));
    }
    if variant != Variant::Bech32 {
        return Err(GovActionIdError::Bech32("unexpected bech32m checksum".into()));
    }
    let payload =
        Vec::<u8>::from_base32(&data).map_err(|e| GovActionIdError::Bech32(e.to_string()))?;
    match payload.split_last() {
        Some((index, hash)) if payload.len() == PAYLOAD_LEN => Ok(GovActionId {
            tx_hash: Hash32::from_slice(hash)
                .map_err(|_| GovActionIdError::InvalidPayloadLength(payload.len()))?,
            index: *index,
        }),
        _ => Err(GovActionIdError::InvalidPayloadLength(payload.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_is_deterministic_and_prefixed() {
        let hash = Hash32::from([0u8; 32]);
        let a = encode(&hash, 0).unwrap();
        let b = encode(&hash, 0).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("gov_action1"));
        assert_ne!(a, encode(&hash, 1).unwrap());
    }

    #[test]
    fn test_known_identifier() {
        // CIP-129 test vector.
        let hash: Hash32 = "0000000000000000000000000000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        assert_eq!(
            encode(&hash, 17).unwrap(),
            "gov_action1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqpzklpgpf"
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let hash = Hash32::from([1u8; 32]);
        assert_eq!(
            encode(&hash, 256),
            Err(GovActionIdError::IndexOutOfRange(256))
        );
    }

    #[test]
    fn test_decode_rejects_other_prefixes() {
        let text = bech32::encode("drep", vec![0u8; 33].to_base32(), Variant::Bech32).unwrap();
        assert_eq!(
            decode(&text),
            Err(GovActionIdError::WrongPrefix("drep".into()))
        );
        let short =
            bech32::encode(GOV_ACTION_HRP, vec![0u8; 32].to_base32(), Variant::Bech32).unwrap();
        assert_eq!(
            decode(&short),
            Err(GovActionIdError::InvalidPayloadLength(32))
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(hash in any::<[u8; 32]>(), index in any::<u8>()) {
            let hash = Hash32::from(hash);
            let text = encode(&hash, u64::from(index)).unwrap();
            let decoded = decode(&text).unwrap();
            prop_assert_eq!(decoded, GovActionId { tx_hash: hash, index });
        }
    }
}
