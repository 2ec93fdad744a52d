//! Tests for the transaction decoder

use super::*;
use vigil_test_utils::{base_address, datum_with_credential, enterprise_address, TxBuilder, VoteSpec};
use vigil_types::app::NetworkId;

fn simple_tx() -> TxBuilder {
    TxBuilder::new().output(base_address(1, [1; 28], [2; 28]))
}

#[test]
fn test_decode_simple_transaction() {
    let builder = simple_tx();
    let tx = decode(&builder.build_hex()).unwrap();

    assert_eq!(tx.body.outputs.len(), 1);
    assert!(tx.body.certificates.is_empty());
    assert!(tx.body.required_signers.is_empty());
    assert!(tx.witness_set.vkey_witnesses.is_empty());
    assert!(tx.is_valid);
    assert_eq!(tx.shape, TransactionShape::Unrecognized);
    assert_eq!(
        tx.first_output_address().map(|a| a.network()),
        Some(NetworkId::Mainnet)
    );
}

#[test]
fn test_serialize_round_trips_input() {
    let hex_input = simple_tx().certificate([3; 28]).build_hex();
    let tx = decode(&format!("  {}\n", hex_input.to_uppercase())).unwrap();
    assert_eq!(serialize(&tx), hex_input);
}

#[test]
fn test_hash_is_blake2b_of_body() {
    let builder = simple_tx().required_signer([9; 28]);
    let tx = decode(&builder.build_hex()).unwrap();
    assert_eq!(tx.body_bytes(), builder.build_body().as_slice());
    assert_eq!(transaction_hash(&tx), blake2b_256(&builder.build_body()));
}

#[test]
fn test_decode_vote_transaction() {
    let action = [0xab; 32];
    let builder = TxBuilder::new()
        .output(base_address(0, [1; 28], [2; 28]))
        .voter(1, [0x4f; 28])
        .vote(VoteSpec::new(action, 3, Vote::Yes).with_anchor("https://example.com/r.json", [7; 32]));
    let tx = decode(&builder.build_hex()).unwrap();

    assert_eq!(tx.shape, TransactionShape::Vote { votes: 1 });
    let first = tx.body.first_voter_votes().unwrap();
    assert_eq!(first.voter, Voter::CommitteeHotScript(Hash28::from([0x4f; 28])));
    let (id, procedure) = &first.votes[0];
    assert_eq!(id.tx_hash, Hash32::from(action));
    assert_eq!(id.index, 3);
    assert_eq!(procedure.vote, Vote::Yes);
    let anchor = procedure.anchor.as_ref().unwrap();
    assert_eq!(anchor.url, "https://example.com/r.json");
    assert_eq!(anchor.data_hash, Hash32::from([7; 32]));
}

#[test]
fn test_empty_vote_section_is_a_vote_shape() {
    let tx = decode(&simple_tx().empty_vote_section().build_hex()).unwrap();
    assert_eq!(tx.body.voting_procedures, Some(Vec::new()));
    assert!(tx.body.first_voter_votes().is_none());
    assert_eq!(tx.shape, TransactionShape::Vote { votes: 0 });

    let without = decode(&simple_tx().build_hex()).unwrap();
    assert_eq!(without.body.voting_procedures, None);
}

#[test]
fn test_other_voters_are_kept_apart() {
    let builder = simple_tx()
        .voter(1, [0x4f; 28])
        .vote(VoteSpec::new([1; 32], 0, Vote::Yes))
        .other_voter(2, [0x33; 28], VoteSpec::new([2; 32], 1, Vote::No));
    let tx = decode(&builder.build_hex()).unwrap();
    assert_eq!(tx.shape, TransactionShape::Vote { votes: 1 });
    assert_eq!(tx.body.other_voters().len(), 1);
    assert_eq!(tx.body.other_voters()[0].voter, Voter::DRepKey(Hash28::from([0x33; 28])));
}

#[test]
fn test_decode_vote_without_anchor() {
    let builder = simple_tx()
        .voter(1, [0x4f; 28])
        .vote(VoteSpec::new([1; 32], 0, Vote::Abstain));
    let tx = decode(&builder.build_hex()).unwrap();
    let (_, procedure) = &tx.body.first_voter_votes().unwrap().votes[0];
    assert_eq!(procedure.anchor, None);
}

#[test]
fn test_hierarchy_shape_keeps_inline_datum() {
    let datum = datum_with_credential(&[0x42; 28]);
    let builder = TxBuilder::new()
        .output(enterprise_address(0, [1; 28]))
        .output_with_datum(enterprise_address(0, [2; 28]), datum.clone());
    let tx = decode(&builder.build_hex()).unwrap();
    assert_eq!(tx.shape, TransactionShape::Hierarchy { datum_outputs: 1 });
    assert_eq!(tx.body.outputs[1].inline_datum(), Some(datum.as_slice()));
}

#[test]
fn test_legacy_outputs_are_accepted() {
    let tx = decode(&simple_tx().legacy_outputs().build_hex()).unwrap();
    assert_eq!(tx.body.outputs.len(), 1);
    assert_eq!(tx.body.outputs[0].datum, None);
}

#[test]
fn test_vkey_witness_keeps_raw_encodings() {
    let vkey = vec![5u8; 32];
    let sig = vec![6u8; 64];
    let tx = decode(&simple_tx().vkey_witness(vkey.clone(), sig.clone()).build_hex()).unwrap();
    let w = &tx.witness_set.vkey_witnesses[0];
    assert_eq!(w.vkey, vkey);
    assert_eq!(w.signature, sig);
    assert_eq!(&w.vkey_cbor[..2], &[0x58, 0x20]);
    assert_eq!(&w.vkey_cbor[2..], vkey.as_slice());
    assert_eq!(w.raw[0], 0x82);
}

#[test]
fn test_rejects_malformed_input() {
    assert_eq!(decode("   "), Err(DecodeError::Empty));
    assert!(matches!(decode("zz"), Err(DecodeError::InvalidHex(_))));
    assert!(matches!(decode("abc"), Err(DecodeError::InvalidHex(_))));
    // A bare unsigned integer is not a transaction.
    assert!(matches!(decode("01"), Err(DecodeError::Cbor(_))));
    // Array of one element.
    assert!(matches!(decode("81a0"), Err(DecodeError::Structure(_))));
    // Truncated body.
    let hex_input = simple_tx().build_hex();
    assert!(decode(&hex_input[..hex_input.len() - 10]).is_err());
}

#[test]
fn test_rejects_trailing_bytes() {
    let hex_input = format!("{}00", simple_tx().build_hex());
    assert_eq!(decode(&hex_input), Err(DecodeError::TrailingBytes(1)));
}

#[test]
fn test_indefinite_transaction_array() {
    // [_ {1: [{0: addr}]}, {}, true, null]
    let addr = hex::encode(base_address(0, [1; 28], [2; 28]));
    let hex_input = format!("9fa10181a1005839{}a0f5f6ff", addr);
    let tx = decode(&hex_input).unwrap();
    assert_eq!(tx.body.outputs.len(), 1);
    assert_eq!(
        tx.first_output_address().map(|a| a.network()),
        Some(NetworkId::Testnet)
    );
}
