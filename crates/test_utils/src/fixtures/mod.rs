// Path: crates/test_utils/src/fixtures/mod.rs
//! Builders for real Conway-era CBOR transactions.

use minicbor::data::Tag;
use minicbor::encode::Error as EncodeError;
use minicbor::Encoder;
use std::convert::Infallible;
use vigil_types::app::Vote;

type Enc = Encoder<Vec<u8>>;
type EncResult = Result<(), EncodeError<Infallible>>;

/// A base address (header type 0) with the given payment and stake key hashes.
pub fn base_address(network: u8, payment: [u8; 28], stake: [u8; 28]) -> Vec<u8> {
    let mut out = Vec::with_capacity(57);
    out.push(network & 0x0f);
    out.extend_from_slice(&payment);
    out.extend_from_slice(&stake);
    out
}

/// An enterprise address (header type 6), which has no stake part.
pub fn enterprise_address(network: u8, payment: [u8; 28]) -> Vec<u8> {
    let mut out = Vec::with_capacity(29);
    out.push(0x60 | (network & 0x0f));
    out.extend_from_slice(&payment);
    out
}

/// Plutus data `Constr 0 [credential]`, as a hierarchy datum would embed a member.
pub fn datum_with_credential(credential: &[u8; 28]) -> Vec<u8> {
    let mut e = Encoder::new(Vec::new());
    let written: EncResult = (|| {
        e.tag(Tag::new(121))?.array(1)?.bytes(credential)?;
        Ok(())
    })();
    // Writing into a Vec cannot fail.
    written.map(|_| e.into_writer()).unwrap_or_default()
}

/// One vote to place in the voting procedures.
#[derive(Debug, Clone)]
pub struct VoteSpec {
    action_tx_hash: [u8; 32],
    action_index: u64,
    vote: Vote,
    anchor: Option<(String, [u8; 32])>,
}

impl VoteSpec {
    /// A vote on `(action_tx_hash, action_index)` without an anchor.
    pub fn new(action_tx_hash: [u8; 32], action_index: u64, vote: Vote) -> Self {
        Self {
            action_tx_hash,
            action_index,
            vote,
            anchor: None,
        }
    }

    /// Attaches a rationale anchor.
    pub fn with_anchor(mut self, url: impl Into<String>, data_hash: [u8; 32]) -> Self {
        self.anchor = Some((url.into(), data_hash));
        self
    }
}

#[derive(Debug, Clone)]
struct OutputSpec {
    address: Vec<u8>,
    inline_datum: Option<Vec<u8>>,
}

/// Builds transactions shaped like the ones a council member is asked to sign.
#[derive(Debug, Clone, Default)]
pub struct TxBuilder {
    outputs: Vec<OutputSpec>,
    legacy_outputs: bool,
    certificates: Vec<[u8; 28]>,
    required_signers: Vec<[u8; 28]>,
    voter: Option<(u8, [u8; 28])>,
    votes: Vec<VoteSpec>,
    other_voters: Vec<(u8, [u8; 28], VoteSpec)>,
    empty_vote_section: bool,
    vkey_witnesses: Vec<(Vec<u8>, Vec<u8>)>,
}

impl TxBuilder {
    /// An empty transaction with a single dummy input and a fee.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an output paying 2 ADA to `address`.
    pub fn output(mut self, address: Vec<u8>) -> Self {
        self.outputs.push(OutputSpec {
            address,
            inline_datum: None,
        });
        self
    }

    /// Adds an output carrying `datum` (plutus-data CBOR) inline.
    pub fn output_with_datum(mut self, address: Vec<u8>, datum: Vec<u8>) -> Self {
        self.outputs.push(OutputSpec {
            address,
            inline_datum: Some(datum),
        });
        self
    }

    /// Encodes outputs in the pre-Alonzo array form. Inline datums are dropped.
    pub fn legacy_outputs(mut self) -> Self {
        self.legacy_outputs = true;
        self
    }

    /// Adds a stake registration certificate for `stake`.
    pub fn certificate(mut self, stake: [u8; 28]) -> Self {
        self.certificates.push(stake);
        self
    }

    /// Adds a required signer.
    pub fn required_signer(mut self, key_hash: [u8; 28]) -> Self {
        self.required_signers.push(key_hash);
        self
    }

    /// Sets the voter (`0` committee key, `1` committee script, `2`/`3` DRep, `4` pool).
    pub fn voter(mut self, kind: u8, hash: [u8; 28]) -> Self {
        self.voter = Some((kind, hash));
        self
    }

    /// Adds a vote for the voter.
    pub fn vote(mut self, vote: VoteSpec) -> Self {
        self.votes.push(vote);
        self
    }

    /// Adds a second voter entry, encoded after the main voter.
    pub fn other_voter(mut self, kind: u8, hash: [u8; 28], vote: VoteSpec) -> Self {
        self.other_voters.push((kind, hash, vote));
        self
    }

    /// Writes the voting procedures key as an empty map.
    pub fn empty_vote_section(mut self) -> Self {
        self.empty_vote_section = true;
        self
    }

    /// Attaches a verification-key witness.
    pub fn vkey_witness(mut self, vkey: Vec<u8>, signature: Vec<u8>) -> Self {
        self.vkey_witnesses.push((vkey, signature));
        self
    }

    /// Encodes the transaction.
    pub fn build(&self) -> Vec<u8> {
        let mut e = Encoder::new(Vec::new());
        let written = self.encode(&mut e);
        // Writing into a Vec cannot fail.
        written.map(|_| e.into_writer()).unwrap_or_default()
    }

    /// Encodes the transaction as lowercase hex.
    pub fn build_hex(&self) -> String {
        hex::encode(self.build())
    }

    /// Encodes only the body, the pre-image of the transaction hash.
    pub fn build_body(&self) -> Vec<u8> {
        let mut e = Encoder::new(Vec::new());
        let written = self.encode_body(&mut e);
        written.map(|_| e.into_writer()).unwrap_or_default()
    }

    fn encode(&self, e: &mut Enc) -> EncResult {
        e.array(4)?;
        self.encode_body(e)?;
        self.encode_witness_set(e)?;
        e.bool(true)?.null()?;
        Ok(())
    }

    fn has_votes(&self) -> bool {
        self.voter.is_some() && !self.votes.is_empty()
    }

    fn has_vote_section(&self) -> bool {
        self.has_votes() || self.empty_vote_section || !self.other_voters.is_empty()
    }

    fn encode_body(&self, e: &mut Enc) -> EncResult {
        let mut entries = 3;
        if !self.certificates.is_empty() {
            entries += 1;
        }
        if !self.required_signers.is_empty() {
            entries += 1;
        }
        if self.has_vote_section() {
            entries += 1;
        }
        e.map(entries)?;

        // 0: inputs
        e.u8(0)?.tag(Tag::new(258))?.array(1)?;
        e.array(2)?.bytes(&[0x11; 32])?.u8(0)?;

        // 1: outputs
        e.u8(1)?.array(self.outputs.len() as u64)?;
        for output in &self.outputs {
            if self.legacy_outputs {
                e.array(2)?.bytes(&output.address)?.u64(2_000_000)?;
                continue;
            }
            match &output.inline_datum {
                Some(datum) => {
                    e.map(3)?;
                    e.u8(0)?.bytes(&output.address)?;
                    e.u8(1)?.u64(2_000_000)?;
                    e.u8(2)?.array(2)?.u8(1)?.tag(Tag::new(24))?.bytes(datum)?;
                }
                None => {
                    e.map(2)?;
                    e.u8(0)?.bytes(&output.address)?;
                    e.u8(1)?.u64(2_000_000)?;
                }
            }
        }

        // 2: fee
        e.u8(2)?.u64(180_000)?;

        if !self.certificates.is_empty() {
            e.u8(4)?
                .tag(Tag::new(258))?
                .array(self.certificates.len() as u64)?;
            for stake in &self.certificates {
                e.array(2)?.u8(0)?.array(2)?.u8(0)?.bytes(stake)?;
            }
        }

        if !self.required_signers.is_empty() {
            e.u8(14)?
                .tag(Tag::new(258))?
                .array(self.required_signers.len() as u64)?;
            for signer in &self.required_signers {
                e.bytes(signer)?;
            }
        }

        if self.has_vote_section() {
            let main = self.voter.filter(|_| self.has_votes());
            e.u8(19)?
                .map(u64::from(main.is_some()) + self.other_voters.len() as u64)?;
            if let Some((kind, hash)) = main {
                encode_voter_votes(e, kind, &hash, &self.votes)?;
            }
            for (kind, hash, vote) in &self.other_voters {
                encode_voter_votes(e, *kind, hash, std::slice::from_ref(vote))?;
            }
        }
        Ok(())
    }

    fn encode_witness_set(&self, e: &mut Enc) -> EncResult {
        if self.vkey_witnesses.is_empty() {
            e.map(0)?;
            return Ok(());
        }
        e.map(1)?
            .u8(0)?
            .tag(Tag::new(258))?
            .array(self.vkey_witnesses.len() as u64)?;
        for (vkey, signature) in &self.vkey_witnesses {
            e.array(2)?.bytes(vkey)?.bytes(signature)?;
        }
        Ok(())
    }
}

fn encode_voter_votes(e: &mut Enc, kind: u8, hash: &[u8; 28], votes: &[VoteSpec]) -> EncResult {
    e.array(2)?.u8(kind)?.bytes(hash)?;
    e.map(votes.len() as u64)?;
    for vote in votes {
        e.array(2)?
            .bytes(&vote.action_tx_hash)?
            .u64(vote.action_index)?;
        let value = match vote.vote {
            Vote::No => 0u8,
            Vote::Yes => 1,
            Vote::Abstain => 2,
        };
        e.array(2)?.u8(value)?;
        match &vote.anchor {
            Some((url, hash)) => {
                e.array(2)?.str(url)?.bytes(hash)?;
            }
            None => {
                e.null()?;
            }
        }
    }
    Ok(())
}
