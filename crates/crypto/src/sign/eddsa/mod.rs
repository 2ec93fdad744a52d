// Path: crates/crypto/src/sign/eddsa/mod.rs
//! Ed25519 signatures using `ed25519-dalek`.

use crate::algorithms::hash::blake2b_224;
use crate::error::CryptoError;
use ed25519_dalek as dalek;
use ed25519_dalek::{Signer, Verifier};
use rand::rngs::OsRng;
use vigil_api::crypto::{SerializableKey, Signature, SigningKey, SigningKeyPair, VerifyingKey};
use vigil_types::app::Hash28;

/// Ed25519 key pair implementation
#[derive(Clone)]
pub struct Ed25519KeyPair {
    signing_key: dalek::SigningKey,
}

/// Ed25519 signature implementation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519Signature(dalek::Signature);

/// Ed25519 public key implementation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey(dalek::VerifyingKey);

/// Ed25519 private key implementation
#[derive(Clone)]
pub struct Ed25519PrivateKey(dalek::SigningKey);

impl Ed25519KeyPair {
    /// Generate a new Ed25519 key pair
    pub fn generate() -> Self {
        let mut rng = OsRng;
        Self {
            signing_key: dalek::SigningKey::generate(&mut rng),
        }
    }

    /// Derive a key pair from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: dalek::SigningKey::from_bytes(seed),
        }
    }
}

impl SigningKeyPair for Ed25519KeyPair {
    type PublicKey = Ed25519PublicKey;
    type PrivateKey = Ed25519PrivateKey;
    type Signature = Ed25519Signature;

    fn public_key(&self) -> Self::PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key())
    }

    fn private_key(&self) -> Self::PrivateKey {
        Ed25519PrivateKey(self.signing_key.clone())
    }

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.signing_key.sign(message)))
    }
}

impl VerifyingKey for Ed25519PublicKey {
    type Signature = Ed25519Signature;

    fn verify(&self, message: &[u8], signature: &Self::Signature) -> Result<(), CryptoError> {
        self.0.verify(message, &signature.0).map_err(|e| {
            log::debug!("ed25519 verification failed: {}", e);
            CryptoError::VerificationFailed
        })
    }
}

impl SerializableKey for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: &[u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Invalid public key length: expected 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        dalek::VerifyingKey::from_bytes(raw)
            .map(Ed25519PublicKey)
            .map_err(|e| CryptoError::InvalidKey(format!("Failed to parse public key: {}", e)))
    }
}

impl SigningKey for Ed25519PrivateKey {
    type Signature = Ed25519Signature;

    fn sign(&self, message: &[u8]) -> Result<Self::Signature, CryptoError> {
        Ok(Ed25519Signature(self.0.sign(message)))
    }
}

impl SerializableKey for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        // Export just the seed (32 bytes)
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: &[u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey("Invalid private key length: expected 32 bytes".to_string())
        })?;
        Ok(Ed25519PrivateKey(dalek::SigningKey::from_bytes(seed)))
    }
}

impl SerializableKey for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        dalek::Signature::from_slice(bytes)
            .map(Ed25519Signature)
            .map_err(|e| CryptoError::InvalidSignature(format!("Failed to parse signature: {}", e)))
    }
}

impl Signature for Ed25519Signature {}

impl Ed25519PublicKey {
    /// Get the raw public key bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// BLAKE2b-224 of the raw key, the form in which key credentials appear on-chain
    pub fn key_hash(&self) -> Hash28 {
        blake2b_224(self.as_bytes())
    }
}

impl Ed25519PrivateKey {
    /// Get the public key corresponding to this private key
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }
}

#[cfg(test)]
mod tests;
