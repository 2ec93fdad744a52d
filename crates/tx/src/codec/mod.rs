// Path: crates/tx/src/codec/mod.rs

//! Decoding of Conway-era transactions from their hex CBOR encoding.
//!
//! Only the fields the inspector reasons about are interpreted; every other
//! body or witness-set key is skipped. The exact input bytes are retained so
//! that `serialize` reproduces the input and the transaction hash is taken
//! over the body bytes as they were signed.

use crate::address::Address;
use crate::model::{
    DecodedTransaction, Datum, TransactionBody, TransactionOutput, TransactionShape, VKeyWitness,
    VoterVotes, VotingProcedure, WitnessSet,
};
use minicbor::data::Type;
use minicbor::Decoder;
use vigil_crypto::blake2b_256;
use vigil_types::app::{Anchor, GovActionId, Hash28, Hash32, Vote, Voter};
use vigil_types::error::DecodeError;
use vigil_types::MAX_TRANSACTION_BYTES;

const SET_TAG: u64 = 258;
const ENCODED_CBOR_TAG: u64 = 24;

const BODY_OUTPUTS: u64 = 1;
const BODY_CERTIFICATES: u64 = 4;
const BODY_REQUIRED_SIGNERS: u64 = 14;
const BODY_VOTING_PROCEDURES: u64 = 19;
const WITNESS_VKEYS: u64 = 0;

type DecodeResult<T> = Result<T, DecodeError>;

fn cbor(e: minicbor::decode::Error) -> DecodeError {
    DecodeError::Cbor(e.to_string())
}

fn structure(msg: impl Into<String>) -> DecodeError {
    DecodeError::Structure(msg.into())
}

/// Decodes a hex-encoded transaction.
///
/// Surrounding whitespace is ignored. No partial transaction is ever
/// returned: any malformed field fails the whole decode.
pub fn decode(hex_input: &str) -> DecodeResult<DecodedTransaction> {
    let trimmed = hex_input.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    if trimmed.len() / 2 > MAX_TRANSACTION_BYTES {
        return Err(DecodeError::TooLarge {
            max: MAX_TRANSACTION_BYTES,
            got: trimmed.len() / 2,
        });
    }
    let bytes = hex::decode(trimmed).map_err(|e| DecodeError::InvalidHex(e.to_string()))?;
    decode_bytes(bytes)
}

/// Decodes a transaction from raw CBOR bytes.
pub fn decode_bytes(bytes: Vec<u8>) -> DecodeResult<DecodedTransaction> {
    let mut d = Decoder::new(&bytes);

    let len = d.array().map_err(cbor)?;
    if let Some(n) = len {
        if !(2..=4).contains(&n) {
            return Err(structure(format!("transaction array has {} elements", n)));
        }
    }

    let body_start = d.position();
    let body = decode_body(&mut d)?;
    let body_raw = slice(&d, body_start)?.to_vec();

    let witness_set = decode_witness_set(&mut d)?;

    // [body, witnesses, is_valid?, auxiliary_data?]
    let mut is_valid = true;
    let mut remaining = len.map(|n| n.saturating_sub(2));
    loop {
        match remaining {
            Some(0) => break,
            Some(ref mut n) => *n -= 1,
            None => {
                if d.datatype().map_err(cbor)? == Type::Break {
                    skip_break(&mut d);
                    break;
                }
            }
        }
        if d.datatype().map_err(cbor)? == Type::Bool {
            is_valid = d.bool().map_err(cbor)?;
        } else {
            d.skip().map_err(cbor)?;
        }
    }

    let trailing = bytes.len().saturating_sub(d.position());
    if trailing > 0 {
        return Err(DecodeError::TrailingBytes(trailing));
    }

    let shape = TransactionShape::classify(&body);
    let hash = blake2b_256(&body_raw);
    tracing::debug!(
        target: "decoder",
        tx_hash = %hash,
        shape = shape.name(),
        outputs = body.outputs.len(),
        vkey_witnesses = witness_set.vkey_witnesses.len(),
        "decoded transaction"
    );

    Ok(DecodedTransaction {
        raw: bytes,
        body_raw,
        hash,
        body,
        witness_set,
        is_valid,
        shape,
    })
}

/// Returns the lowercase hex of the exact bytes the transaction was decoded from.
pub fn serialize(tx: &DecodedTransaction) -> String {
    hex::encode(tx.raw_bytes())
}

/// BLAKE2b-256 of the transaction body bytes.
pub fn transaction_hash(tx: &DecodedTransaction) -> Hash32 {
    *tx.hash()
}

// --- Generic CBOR helpers ---

fn slice<'b>(d: &Decoder<'b>, start: usize) -> DecodeResult<&'b [u8]> {
    d.input()
        .get(start..d.position())
        .ok_or_else(|| structure("item boundary out of range"))
}

fn skip_break(d: &mut Decoder<'_>) {
    d.set_position(d.position() + 1);
}

/// Consumes an optional CBOR set tag (258).
fn skip_set_tag(d: &mut Decoder<'_>) -> DecodeResult<()> {
    if d.datatype().map_err(cbor)? == Type::Tag {
        let tag = d.tag().map_err(cbor)?;
        if tag.as_u64() != SET_TAG {
            return Err(structure(format!("unexpected tag {}", tag.as_u64())));
        }
    }
    Ok(())
}

/// Visits every element of an array (definite or indefinite).
fn for_each_element<'b, F>(d: &mut Decoder<'b>, mut f: F) -> DecodeResult<()>
where
    F: FnMut(&mut Decoder<'b>) -> DecodeResult<()>,
{
    match d.array().map_err(cbor)? {
        Some(n) => {
            for _ in 0..n {
                f(d)?;
            }
        }
        None => {
            while d.datatype().map_err(cbor)? != Type::Break {
                f(d)?;
            }
            skip_break(d);
        }
    }
    Ok(())
}

/// Visits every entry of a map (definite or indefinite). The callback reads
/// both key and value.
fn for_each_entry<'b, F>(d: &mut Decoder<'b>, mut f: F) -> DecodeResult<()>
where
    F: FnMut(&mut Decoder<'b>) -> DecodeResult<()>,
{
    match d.map().map_err(cbor)? {
        Some(n) => {
            for _ in 0..n {
                f(d)?;
            }
        }
        None => {
            while d.datatype().map_err(cbor)? != Type::Break {
                f(d)?;
            }
            skip_break(d);
        }
    }
    Ok(())
}

/// Reads a byte string, definite or chunked.
fn bytes(d: &mut Decoder<'_>) -> DecodeResult<Vec<u8>> {
    match d.datatype().map_err(cbor)? {
        Type::BytesIndef => {
            let mut out = Vec::new();
            for chunk in d.bytes_iter().map_err(cbor)? {
                out.extend_from_slice(chunk.map_err(cbor)?);
            }
            Ok(out)
        }
        _ => Ok(d.bytes().map_err(cbor)?.to_vec()),
    }
}

/// Reads a text string, definite or chunked.
fn text(d: &mut Decoder<'_>) -> DecodeResult<String> {
    match d.datatype().map_err(cbor)? {
        Type::StringIndef => {
            let mut out = String::new();
            for chunk in d.str_iter().map_err(cbor)? {
                out.push_str(chunk.map_err(cbor)?);
            }
            Ok(out)
        }
        _ => Ok(d.str().map_err(cbor)?.to_string()),
    }
}

fn hash28(d: &mut Decoder<'_>) -> DecodeResult<Hash28> {
    let raw = bytes(d)?;
    Hash28::from_slice(&raw).map_err(|e| structure(e.to_string()))
}

fn hash32(d: &mut Decoder<'_>) -> DecodeResult<Hash32> {
    let raw = bytes(d)?;
    Hash32::from_slice(&raw).map_err(|e| structure(e.to_string()))
}

/// Reads the header of a fixed-size array and checks its length.
fn fixed_array(d: &mut Decoder<'_>, expected: u64, what: &str) -> DecodeResult<bool> {
    match d.array().map_err(cbor)? {
        Some(n) if n == expected => Ok(false),
        None => Ok(true),
        Some(n) => Err(structure(format!(
            "{} has {} elements, expected {}",
            what, n, expected
        ))),
    }
}

fn end_fixed_array(d: &mut Decoder<'_>, indefinite: bool, what: &str) -> DecodeResult<()> {
    if indefinite {
        if d.datatype().map_err(cbor)? != Type::Break {
            return Err(structure(format!("{} has too many elements", what)));
        }
        skip_break(d);
    }
    Ok(())
}

// --- Transaction body ---

fn decode_body(d: &mut Decoder<'_>) -> DecodeResult<TransactionBody> {
    if !matches!(d.datatype().map_err(cbor)?, Type::Map | Type::MapIndef) {
        return Err(structure("transaction body is not a map"));
    }
    let mut body = TransactionBody::default();
    for_each_entry(d, |d| {
        let key = d.u64().map_err(cbor)?;
        match key {
            BODY_OUTPUTS => {
                for_each_element(d, |d| {
                    body.outputs.push(decode_output(d)?);
                    Ok(())
                })?;
            }
            BODY_CERTIFICATES => {
                skip_set_tag(d)?;
                for_each_element(d, |d| {
                    let start = d.position();
                    d.skip().map_err(cbor)?;
                    body.certificates.push(slice(d, start)?.to_vec());
                    Ok(())
                })?;
            }
            BODY_REQUIRED_SIGNERS => {
                skip_set_tag(d)?;
                for_each_element(d, |d| {
                    body.required_signers.push(hash28(d)?);
                    Ok(())
                })?;
            }
            BODY_VOTING_PROCEDURES => {
                body.voting_procedures = Some(decode_voting_procedures(d)?);
            }
            _ => d.skip().map_err(cbor)?,
        }
        Ok(())
    })?;
    Ok(body)
}

fn decode_address(d: &mut Decoder<'_>) -> DecodeResult<Address> {
    Address::from_bytes(bytes(d)?).map_err(|e| structure(format!("output address: {}", e)))
}

fn decode_output(d: &mut Decoder<'_>) -> DecodeResult<TransactionOutput> {
    match d.datatype().map_err(cbor)? {
        // Legacy form: [address, amount, ? datum_hash]
        Type::Array | Type::ArrayIndef => {
            let mut index = 0usize;
            let mut address = None;
            let mut datum = None;
            for_each_element(d, |d| {
                match index {
                    0 => address = Some(decode_address(d)?),
                    2 => datum = Some(Datum::Hash(hash32(d)?)),
                    _ => d.skip().map_err(cbor)?,
                }
                index += 1;
                Ok(())
            })?;
            let address = address.ok_or_else(|| structure("output has no address"))?;
            Ok(TransactionOutput { address, datum })
        }
        // Post-Alonzo form: { 0: address, 1: amount, ? 2: datum_option, ? 3: script_ref }
        Type::Map | Type::MapIndef => {
            let mut address = None;
            let mut datum = None;
            for_each_entry(d, |d| {
                match d.u64().map_err(cbor)? {
                    0 => address = Some(decode_address(d)?),
                    2 => datum = Some(decode_datum_option(d)?),
                    _ => d.skip().map_err(cbor)?,
                }
                Ok(())
            })?;
            let address = address.ok_or_else(|| structure("output has no address"))?;
            Ok(TransactionOutput { address, datum })
        }
        other => Err(structure(format!("unexpected output type {:?}", other))),
    }
}

/// `[0, datum_hash] / [1, #6.24(bytes .cbor plutus_data)]`
fn decode_datum_option(d: &mut Decoder<'_>) -> DecodeResult<Datum> {
    let indefinite = fixed_array(d, 2, "datum option")?;
    let datum = match d.u8().map_err(cbor)? {
        0 => Datum::Hash(hash32(d)?),
        1 => {
            let tag = d.tag().map_err(cbor)?;
            if tag.as_u64() != ENCODED_CBOR_TAG {
                return Err(structure(format!("inline datum tag {}", tag.as_u64())));
            }
            Datum::Inline(bytes(d)?)
        }
        other => return Err(structure(format!("unknown datum option {}", other))),
    };
    end_fixed_array(d, indefinite, "datum option")?;
    Ok(datum)
}

// --- Governance votes ---

fn decode_voting_procedures(d: &mut Decoder<'_>) -> DecodeResult<Vec<VoterVotes>> {
    let mut out = Vec::new();
    for_each_entry(d, |d| {
        let voter = decode_voter(d)?;
        let mut votes = Vec::new();
        for_each_entry(d, |d| {
            let action = decode_gov_action_id(d)?;
            let procedure = decode_procedure(d)?;
            votes.push((action, procedure));
            Ok(())
        })?;
        out.push(VoterVotes { voter, votes });
        Ok(())
    })?;
    Ok(out)
}

fn decode_voter(d: &mut Decoder<'_>) -> DecodeResult<Voter> {
    let indefinite = fixed_array(d, 2, "voter")?;
    let kind = d.u8().map_err(cbor)?;
    let hash = hash28(d)?;
    end_fixed_array(d, indefinite, "voter")?;
    match kind {
        0 => Ok(Voter::CommitteeHotKey(hash)),
        1 => Ok(Voter::CommitteeHotScript(hash)),
        2 => Ok(Voter::DRepKey(hash)),
        3 => Ok(Voter::DRepScript(hash)),
        4 => Ok(Voter::StakePool(hash)),
        other => Err(structure(format!("unknown voter kind {}", other))),
    }
}

fn decode_gov_action_id(d: &mut Decoder<'_>) -> DecodeResult<GovActionId> {
    let indefinite = fixed_array(d, 2, "governance action id")?;
    let tx_hash = hash32(d)?;
    let index = d.u64().map_err(cbor)?;
    end_fixed_array(d, indefinite, "governance action id")?;
    let index = u8::try_from(index)
        .map_err(|_| structure(format!("governance action index {} out of range", index)))?;
    Ok(GovActionId { tx_hash, index })
}

fn decode_procedure(d: &mut Decoder<'_>) -> DecodeResult<VotingProcedure> {
    let indefinite = fixed_array(d, 2, "voting procedure")?;
    let vote = match d.u8().map_err(cbor)? {
        0 => Vote::No,
        1 => Vote::Yes,
        2 => Vote::Abstain,
        other => return Err(structure(format!("unknown vote value {}", other))),
    };
    let anchor = if d.datatype().map_err(cbor)? == Type::Null {
        d.null().map_err(cbor)?;
        None
    } else {
        let anchor_indefinite = fixed_array(d, 2, "anchor")?;
        let url = text(d)?;
        let data_hash = hash32(d)?;
        end_fixed_array(d, anchor_indefinite, "anchor")?;
        Some(Anchor { url, data_hash })
    };
    end_fixed_array(d, indefinite, "voting procedure")?;
    Ok(VotingProcedure { vote, anchor })
}

// --- Witness set ---

fn decode_witness_set(d: &mut Decoder<'_>) -> DecodeResult<WitnessSet> {
    if !matches!(d.datatype().map_err(cbor)?, Type::Map | Type::MapIndef) {
        return Err(structure("witness set is not a map"));
    }
    let mut set = WitnessSet::default();
    for_each_entry(d, |d| {
        match d.u64().map_err(cbor)? {
            WITNESS_VKEYS => {
                skip_set_tag(d)?;
                for_each_element(d, |d| {
                    set.vkey_witnesses.push(decode_vkey_witness(d)?);
                    Ok(())
                })?;
            }
            _ => d.skip().map_err(cbor)?,
        }
        Ok(())
    })?;
    Ok(set)
}

fn decode_vkey_witness(d: &mut Decoder<'_>) -> DecodeResult<VKeyWitness> {
    let start = d.position();
    let indefinite = fixed_array(d, 2, "vkey witness")?;
    let vkey_start = d.position();
    let vkey = bytes(d)?;
    let vkey_cbor = slice(d, vkey_start)?.to_vec();
    let signature = bytes(d)?;
    end_fixed_array(d, indefinite, "vkey witness")?;
    let raw = slice(d, start)?.to_vec();
    Ok(VKeyWitness {
        vkey,
        signature,
        vkey_cbor,
        raw,
    })
}

#[cfg(test)]
mod tests;
