// Path: crates/tx/src/system/witness.rs

//! Post-signing validation of the witness a wallet returns.

use crate::codec::decode;
use vigil_api::crypto::{SerializableKey, VerifyingKey};
use vigil_crypto::blake2b_224;
use vigil_crypto::sign::eddsa::{Ed25519PublicKey, Ed25519Signature};
use vigil_types::app::{Hash28, Witness};
use vigil_types::error::WitnessError;

/// Length of the CBOR header in front of a 32-byte key (`0x58 0x20`).
const VKEY_HEADER_LEN: usize = 2;

/// A centralized helper for verifying an Ed25519 signature over `message`.
pub fn verify_signature(
    public_key: &Ed25519PublicKey,
    message: &[u8],
    signature: &[u8],
) -> Result<(), WitnessError> {
    let sig = Ed25519Signature::from_bytes(signature).map_err(|e| {
        tracing::debug!(target: "witness", error = %e, "signature does not parse");
        WitnessError::InvalidSignature
    })?;
    public_key
        .verify(message, &sig)
        .map_err(|_| WitnessError::InvalidSignature)
}

/// Validates the first verification-key witness of `signed_hex`.
///
/// The key (taken from the witness CBOR with its header stripped) must hash to
/// `expected_key_hash`, and the signature must verify against the hash of the
/// original `unsigned_hex`, never the signed transaction's own body.
pub fn validate_witness(
    signed_hex: &str,
    unsigned_hex: &str,
    expected_key_hash: &Hash28,
) -> Result<Witness, WitnessError> {
    let signed = decode(signed_hex)?;
    let vkey_witness = signed
        .witness_set
        .vkey_witnesses
        .first()
        .ok_or(WitnessError::MissingWitness)?;

    let key_bytes = vkey_witness
        .vkey_cbor
        .get(VKEY_HEADER_LEN..)
        .ok_or_else(|| WitnessError::MalformedKey("key shorter than its header".into()))?;
    let public_key_hash = blake2b_224(key_bytes);
    if public_key_hash != *expected_key_hash {
        tracing::warn!(
            target: "witness",
            expected = %expected_key_hash,
            got = %public_key_hash,
            "wallet returned an unexpected key"
        );
        return Err(WitnessError::UnexpectedVKey);
    }
    let public_key = Ed25519PublicKey::from_bytes(key_bytes)
        .map_err(|e| WitnessError::MalformedKey(e.to_string()))?;

    let unsigned = decode(unsigned_hex)?;
    verify_signature(&public_key, unsigned.hash().as_bytes(), &vkey_witness.signature).map_err(
        |e| {
            tracing::warn!(target: "witness", tx_hash = %unsigned.hash(), "signature does not verify");
            e
        },
    )?;

    tracing::info!(target: "witness", tx_hash = %unsigned.hash(), key_hash = %public_key_hash, "witness validated");
    Ok(Witness {
        public_key_hash,
        public_key: key_bytes.to_vec(),
        signature_bytes: vkey_witness.signature.clone(),
        witness_hex: hex::encode(&vkey_witness.raw),
    })
}
