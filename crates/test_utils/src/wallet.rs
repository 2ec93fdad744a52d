// Path: crates/test_utils/src/wallet.rs
//! A wallet that signs for real, with switches to misbehave.

use crate::fixtures::base_address;
use async_trait::async_trait;
use minicbor::data::Tag;
use minicbor::{Decoder, Encoder};
use std::sync::atomic::{AtomicUsize, Ordering};
use vigil_api::crypto::{SerializableKey, SigningKeyPair};
use vigil_api::error::WalletError;
use vigil_api::wallet::WalletConnector;
use vigil_crypto::sign::eddsa::Ed25519KeyPair;
use vigil_crypto::{blake2b_224, blake2b_256};
use vigil_types::app::Hash28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behaviour {
    Honest,
    Reject,
    CorruptSignature,
}

/// An in-process CIP-30 wallet backed by an Ed25519 key.
///
/// The wallet's stake credential is the hash of its key, so an honest
/// signature passes witness validation. `signing_with` makes it sign with a
/// different key than the one it reports, `corrupting_signature` flips a bit
/// of every signature, and `rejecting` declines every request.
pub struct MockWallet {
    identity: Ed25519KeyPair,
    signer: Ed25519KeyPair,
    network: u8,
    behaviour: Behaviour,
    sign_calls: AtomicUsize,
}

impl MockWallet {
    /// A wallet on `network` (`0` test, `1` main) whose key derives from `seed`.
    pub fn new(seed: [u8; 32], network: u8) -> Self {
        let identity = Ed25519KeyPair::from_seed(&seed);
        Self {
            signer: identity.clone(),
            identity,
            network,
            behaviour: Behaviour::Honest,
            sign_calls: AtomicUsize::new(0),
        }
    }

    /// Declines every signing request.
    pub fn rejecting(mut self) -> Self {
        self.behaviour = Behaviour::Reject;
        self
    }

    /// Returns signatures with one bit flipped.
    pub fn corrupting_signature(mut self) -> Self {
        self.behaviour = Behaviour::CorruptSignature;
        self
    }

    /// Signs with a key derived from `seed` while still reporting the original identity.
    pub fn signing_with(mut self, seed: [u8; 32]) -> Self {
        self.signer = Ed25519KeyPair::from_seed(&seed);
        self
    }

    /// The raw public key the wallet reports.
    pub fn public_key(&self) -> Vec<u8> {
        self.identity.public_key().to_bytes()
    }

    /// BLAKE2b-224 of the wallet's key, used as both the stake credential and voter hash.
    pub fn stake_credential(&self) -> Hash28 {
        blake2b_224(&self.public_key())
    }

    /// The wallet's base change address.
    pub fn change_address_bytes(&self) -> Vec<u8> {
        base_address(self.network, [0x5a; 28], self.stake_credential().0)
    }

    /// How many times `sign_transaction` has been called.
    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    fn sign_body(&self, body: &[u8]) -> Result<(Vec<u8>, Vec<u8>), WalletError> {
        let hash = blake2b_256(body);
        let signature = self
            .signer
            .sign(hash.as_bytes())
            .map_err(|e| WalletError::Rejected(e.to_string()))?;
        let mut signature = signature.to_bytes();
        if self.behaviour == Behaviour::CorruptSignature {
            if let Some(first) = signature.first_mut() {
                *first ^= 0x01;
            }
        }
        Ok((self.signer.public_key().to_bytes(), signature))
    }
}

fn split_body(tx: &[u8]) -> Result<&[u8], WalletError> {
    let invalid = |e: minicbor::decode::Error| WalletError::InvalidResponse(e.to_string());
    let mut d = Decoder::new(tx);
    d.array().map_err(invalid)?;
    let start = d.position();
    d.skip().map_err(invalid)?;
    tx.get(start..d.position())
        .ok_or_else(|| WalletError::InvalidResponse("body out of range".into()))
}

fn signed_transaction(body: &[u8], vkey: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut witnesses = Encoder::new(Vec::new());
    let written = (|| -> Result<(), minicbor::encode::Error<std::convert::Infallible>> {
        witnesses
            .map(1)?
            .u8(0)?
            .tag(Tag::new(258))?
            .array(1)?
            .array(2)?
            .bytes(vkey)?
            .bytes(signature)?;
        Ok(())
    })();
    let witnesses = written.map(|_| witnesses.into_writer()).unwrap_or_default();

    let mut out = Vec::with_capacity(body.len() + witnesses.len() + 3);
    out.push(0x84); // array(4)
    out.extend_from_slice(body);
    out.extend_from_slice(&witnesses);
    out.push(0xf5); // true
    out.push(0xf6); // null
    out
}

#[async_trait]
impl WalletConnector for MockWallet {
    async fn sign_transaction(
        &self,
        tx_hex: &str,
        _partial_sign: bool,
    ) -> Result<String, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        if self.behaviour == Behaviour::Reject {
            return Err(WalletError::Rejected("user declined to sign".into()));
        }
        let tx = hex::decode(tx_hex.trim())
            .map_err(|e| WalletError::InvalidResponse(e.to_string()))?;
        let body = split_body(&tx)?;
        let (vkey, signature) = self.sign_body(body)?;
        Ok(hex::encode(signed_transaction(body, &vkey, &signature)))
    }

    async fn change_address(&self) -> Result<String, WalletError> {
        Ok(hex::encode(self.change_address_bytes()))
    }

    async fn network_id(&self) -> Result<u8, WalletError> {
        Ok(self.network)
    }

    async fn registered_pub_stake_keys(&self) -> Result<Vec<String>, WalletError> {
        Ok(vec![hex::encode(self.public_key())])
    }
}
