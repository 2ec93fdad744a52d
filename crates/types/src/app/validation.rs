// Path: crates/types/src/app/validation.rs

//! The boolean check results shown to the signer before a transaction may be signed.

use serde::{Deserialize, Serialize};

/// Results of the whole-transaction checks.
///
/// Every field defaults to `false`; a state is always recomputed from the
/// current transaction and wallet context, never merged with an older one.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TxValidationState {
    /// The wallet's stake credential is a required signer.
    pub is_part_of_signers: bool,
    /// The transaction carries no certificates.
    pub has_no_certificates: bool,
    /// The transaction targets the wallet's network.
    pub is_same_network: bool,
    /// The wallet's stake credential appears in an output's inline datum.
    pub is_in_output_plutus_data: bool,
    /// No verification-key witnesses are attached yet.
    pub is_unsigned_transaction: bool,
}

impl TxValidationState {
    /// Named view of each check, in display order.
    pub fn checks(&self) -> [(&'static str, bool); 5] {
        [
            ("isPartOfSigners", self.is_part_of_signers),
            ("hasNoCertificates", self.has_no_certificates),
            ("isSameNetwork", self.is_same_network),
            ("isInOutputPlutusData", self.is_in_output_plutus_data),
            ("isUnsignedTransaction", self.is_unsigned_transaction),
        ]
    }

    /// True only if every check passed.
    pub fn all_passed(&self) -> bool {
        self.checks().iter().all(|(_, ok)| *ok)
    }
}

/// Results of the checks run for a single vote record.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct VoteValidationState {
    /// The anchor document hashes to the committed value.
    pub is_metadata_anchor_valid: bool,
    /// The voter is the expected committee hot-credential script.
    pub has_icc_credentials: bool,
}

impl VoteValidationState {
    /// Named view of each check, in display order.
    pub fn checks(&self) -> [(&'static str, bool); 2] {
        [
            ("isMetadataAnchorValid", self.is_metadata_anchor_valid),
            ("hasICCCredentials", self.has_icc_credentials),
        ]
    }

    /// True only if every check passed.
    pub fn all_passed(&self) -> bool {
        self.is_metadata_anchor_valid && self.has_icc_credentials
    }
}
