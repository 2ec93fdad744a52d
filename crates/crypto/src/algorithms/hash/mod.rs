// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions using the RustCrypto `blake2` crate.

use blake2::digest::consts::{U28, U32};
use blake2::{Blake2b, Digest};
use vigil_types::app::{Hash28, Hash32};

type Blake2b224 = Blake2b<U28>;
type Blake2b256 = Blake2b<U32>;

/// BLAKE2b-224 digest as a fixed-width hash.
pub fn blake2b_224(message: &[u8]) -> Hash28 {
    let mut out = [0u8; 28];
    out.copy_from_slice(&Blake2b224::digest(message));
    Hash28::from(out)
}

/// BLAKE2b-256 digest as a fixed-width hash.
pub fn blake2b_256(message: &[u8]) -> Hash32 {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Blake2b256::digest(message));
    Hash32::from(out)
}

#[cfg(test)]
mod tests;
