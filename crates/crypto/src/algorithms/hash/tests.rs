//! Tests for hash function implementations

use super::{blake2b_224, blake2b_256};

#[test]
fn test_hash_functions() {
    let message = b"test message";

    assert_eq!(blake2b_224(message).as_bytes().len(), 28);
    assert_eq!(blake2b_256(message).as_bytes().len(), 32);

    // Verify deterministic behavior
    assert_eq!(blake2b_256(message), blake2b_256(message));
    assert_ne!(blake2b_256(message), blake2b_256(b"test messagf"));
}

#[test]
fn test_known_vectors() {
    assert_eq!(
        blake2b_256(b"").to_hex(),
        "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
    );
    assert_eq!(
        blake2b_256(b"abc").to_hex(),
        "bddd813c634239723171ef3fee98579b94964e3bb1cb3e427262c8c068d52319"
    );
    assert_eq!(
        blake2b_224(b"").to_hex(),
        "836cc68931c2e4e3e838602eca1902591d216837bafddfe6f0c8cb07"
    );
}
