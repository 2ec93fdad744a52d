// Path: crates/crypto/src/sign/eddsa/tests/mod.rs
use super::*;

#[test]
fn test_keypair_generation() {
    let keypair = Ed25519KeyPair::generate();
    let message = b"Test message";

    // Sign
    let signature = keypair.sign(message).unwrap();

    // Verify
    let public_key = keypair.public_key();
    assert!(public_key.verify(message, &signature).is_ok());
}

#[test]
fn test_serialization_roundtrip() {
    let keypair = Ed25519KeyPair::from_seed(&[7u8; 32]);

    let public_bytes = keypair.public_key().to_bytes();
    let private_bytes = keypair.private_key().to_bytes();
    assert_eq!(public_bytes.len(), 32);
    assert_eq!(private_bytes.len(), 32); // Just the seed

    let public_key = Ed25519PublicKey::from_bytes(&public_bytes).unwrap();
    let private_key = Ed25519PrivateKey::from_bytes(&private_bytes).unwrap();
    assert_eq!(public_key, private_key.public_key());
}

#[test]
fn test_tampered_signature_is_rejected() {
    let keypair = Ed25519KeyPair::from_seed(&[1u8; 32]);
    let message = b"tx body hash";
    let mut sig_bytes = keypair.sign(message).unwrap().to_bytes();
    sig_bytes[10] ^= 0x01;
    let tampered = Ed25519Signature::from_bytes(&sig_bytes).unwrap();
    assert!(matches!(
        keypair.public_key().verify(message, &tampered),
        Err(CryptoError::VerificationFailed)
    ));
}

#[test]
fn test_wrong_lengths_are_rejected() {
    assert!(matches!(
        Ed25519PublicKey::from_bytes(&[0u8; 31]),
        Err(CryptoError::InvalidKey(_))
    ));
    assert!(matches!(
        Ed25519Signature::from_bytes(&[0u8; 63]),
        Err(CryptoError::InvalidSignature(_))
    ));
}

#[test]
fn test_key_hash_is_blake2b_224_of_key() {
    let keypair = Ed25519KeyPair::from_seed(&[3u8; 32]);
    let pk = keypair.public_key();
    assert_eq!(pk.key_hash(), blake2b_224(&pk.to_bytes()));
}
