// Path: crates/types/src/app/witness.rs

//! Signed witness material returned by a wallet and the file format used to export it.

use super::identity::Hash28;
use serde::{Deserialize, Serialize};

/// A verification-key witness that passed validation.
///
/// Only ever constructed after both the key-hash and the signature checks
/// succeed, so holding one implies it is usable.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Witness {
    /// BLAKE2b-224 hash of the signing public key.
    pub public_key_hash: Hash28,
    /// The raw 32-byte Ed25519 public key.
    #[serde(with = "hex_bytes")]
    pub public_key: Vec<u8>,
    /// The raw 64-byte Ed25519 signature.
    #[serde(with = "hex_bytes")]
    pub signature_bytes: Vec<u8>,
    /// CBOR encoding of the `[vkey, signature]` witness, hex.
    pub witness_hex: String,
}

/// The document written to disk when a vote witness is exported.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct WitnessFile {
    /// Always `"TxWitness ConwayEra"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `"Key Witness ShelleyEra"`.
    pub description: String,
    /// The bech32 governance action the vote targets.
    #[serde(rename = "govActionID")]
    pub gov_action_id: String,
    /// Hex of the voter's key hash.
    #[serde(rename = "voterKeyHash")]
    pub voter_key_hash: String,
    /// CBOR of the witness, hex.
    #[serde(rename = "cborHex")]
    pub cbor_hex: String,
}

impl WitnessFile {
    /// The `type` field every export carries.
    pub const KIND: &'static str = "TxWitness ConwayEra";
    /// The `description` field every export carries.
    pub const DESCRIPTION: &'static str = "Key Witness ShelleyEra";

    /// Builds an export for a validated witness.
    pub fn new(gov_action_id: impl Into<String>, witness: &Witness) -> Self {
        Self {
            kind: Self::KIND.to_string(),
            description: Self::DESCRIPTION.to_string(),
            gov_action_id: gov_action_id.into(),
            voter_key_hash: witness.public_key_hash.to_hex(),
            cbor_hex: witness.witness_hex.clone(),
        }
    }

    /// `<first 15 chars of govActionID>-vote-from-<first 5 chars of voter hash>.witness`
    pub fn file_name(&self) -> String {
        let gov: String = self.gov_action_id.chars().take(15).collect();
        let voter: String = self.voter_key_hash.chars().take(5).collect();
        format!("{gov}-vote-from-{voter}.witness")
    }
}

mod hex_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn witness() -> Witness {
        Witness {
            public_key_hash: Hash28::from([0xcd; 28]),
            public_key: vec![1; 32],
            signature_bytes: vec![2; 64],
            witness_hex: "8258200101".into(),
        }
    }

    #[test]
    fn test_witness_file_shape() {
        let file = WitnessFile::new(
            "gov_action1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqcykzxf",
            &witness(),
        );
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["type"], "TxWitness ConwayEra");
        assert_eq!(json["description"], "Key Witness ShelleyEra");
        assert_eq!(json["voterKeyHash"], "cd".repeat(28));
        assert_eq!(json["cborHex"], "8258200101");
        assert!(json.get("govActionID").is_some());
    }

    #[test]
    fn test_witness_file_name() {
        let file = WitnessFile::new("gov_action1abcdefghijk", &witness());
        assert_eq!(file.file_name(), "gov_action1abcd-vote-from-cdcdc.witness");
    }
}
