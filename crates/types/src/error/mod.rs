// Path: crates/types/src/error/mod.rs
//! Core error types for the vigil transaction inspector.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Low-level errors from the shared data model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A byte string had the wrong width.
    #[error("Invalid length. Expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The required width.
        expected: usize,
        /// The width received.
        got: usize,
    },
    /// A string was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// A wallet reported a network id other than 0 or 1.
    #[error("Unknown network id: {0}")]
    UnknownNetwork(u8),
    /// A configuration file could not be loaded or was inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorCode for CoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidLength { .. } => "CORE_INVALID_LENGTH",
            Self::InvalidHex(_) => "CORE_INVALID_HEX",
            Self::UnknownNetwork(_) => "CORE_UNKNOWN_NETWORK",
            Self::Config(_) => "CORE_CONFIG_ERROR",
        }
    }
}

/// Errors raised while turning a hex string into a decoded transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input was empty after trimming.
    #[error("Transaction input is empty")]
    Empty,
    /// The input was not valid hexadecimal.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
    /// The decoded bytes exceed the accepted size.
    #[error("Transaction too large. Max {max} bytes, got {got}")]
    TooLarge {
        /// Maximum accepted size.
        max: usize,
        /// Size received.
        got: usize,
    },
    /// The CBOR itself was malformed.
    #[error("Malformed CBOR: {0}")]
    Cbor(String),
    /// The CBOR was well-formed but did not have the shape of a transaction.
    #[error("Unexpected transaction structure: {0}")]
    Structure(String),
    /// Bytes remained after the transaction item.
    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}

impl ErrorCode for DecodeError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "DECODE_EMPTY_INPUT",
            Self::InvalidHex(_) => "DECODE_INVALID_HEX",
            Self::TooLarge { .. } => "DECODE_TOO_LARGE",
            Self::Cbor(_) => "DECODE_MALFORMED_CBOR",
            Self::Structure(_) => "DECODE_UNEXPECTED_STRUCTURE",
            Self::TrailingBytes(_) => "DECODE_TRAILING_BYTES",
        }
    }
}

/// Errors related to parsing and rendering chain addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The address had no bytes.
    #[error("Address is empty")]
    Empty,
    /// The address text was neither hex nor valid bech32.
    #[error("Invalid address encoding: {0}")]
    Encoding(String),
    /// The header names an address type this inspector does not know.
    #[error("Unsupported address type: {0}")]
    UnsupportedType(u8),
    /// The payload length does not match the header's address type.
    #[error("Invalid address length for type {kind}: {got} bytes")]
    InvalidLength {
        /// The header's address type nibble.
        kind: u8,
        /// The byte length received.
        got: usize,
    },
    /// The address carries no stake credential.
    #[error("Address has no stake credential")]
    NoStakeCredential,
}

impl ErrorCode for AddressError {
    fn code(&self) -> &'static str {
        match self {
            Self::Empty => "ADDRESS_EMPTY",
            Self::Encoding(_) => "ADDRESS_INVALID_ENCODING",
            Self::UnsupportedType(_) => "ADDRESS_UNSUPPORTED_TYPE",
            Self::InvalidLength { .. } => "ADDRESS_INVALID_LENGTH",
            Self::NoStakeCredential => "ADDRESS_NO_STAKE_CREDENTIAL",
        }
    }
}

/// Errors from the governance action identifier codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovActionIdError {
    /// The proposal index does not fit in the single payload byte.
    #[error("Governance action index {0} does not fit in one byte")]
    IndexOutOfRange(u64),
    /// The identifier was not valid bech32.
    #[error("Invalid bech32: {0}")]
    Bech32(String),
    /// The identifier did not carry the `gov_action` prefix.
    #[error("Unexpected identifier prefix '{0}'")]
    WrongPrefix(String),
    /// The decoded payload was not 33 bytes.
    #[error("Invalid identifier payload length: {0}")]
    InvalidPayloadLength(usize),
}

impl ErrorCode for GovActionIdError {
    fn code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange(_) => "GOV_ACTION_INDEX_OUT_OF_RANGE",
            Self::Bech32(_) => "GOV_ACTION_INVALID_BECH32",
            Self::WrongPrefix(_) => "GOV_ACTION_WRONG_PREFIX",
            Self::InvalidPayloadLength(_) => "GOV_ACTION_INVALID_PAYLOAD",
        }
    }
}

/// Fatal failures raised while evaluating rules or extracting votes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A vote transaction was expected but carried no votes.
    #[error("Transaction has no votes.")]
    NoVotes,
    /// More votes than the single-vote policy allows.
    #[error("You are signing more than one vote. Number of votes: {0}")]
    MultipleVotes(usize),
    /// A vote did not cite an anchor.
    #[error("Vote has no anchor.")]
    MissingAnchor,
    /// A rule could not be evaluated against the transaction.
    #[error("Rule '{rule}' could not be evaluated: {reason}")]
    Unevaluable {
        /// Name of the rule.
        rule: &'static str,
        /// What was missing.
        reason: String,
    },
    /// A governance action identifier could not be built.
    #[error(transparent)]
    GovActionId(#[from] GovActionIdError),
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoVotes => "VALIDATION_NO_VOTES",
            Self::MultipleVotes(_) => "VALIDATION_MULTIPLE_VOTES",
            Self::MissingAnchor => "VALIDATION_MISSING_ANCHOR",
            Self::Unevaluable { .. } => "VALIDATION_RULE_UNEVALUABLE",
            Self::GovActionId(_) => "VALIDATION_GOV_ACTION_ID",
        }
    }
}

/// Errors fetching an anchor document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// The request failed before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    /// The document exceeds the accepted size.
    #[error("Document exceeds {max} bytes")]
    TooLarge {
        /// Maximum accepted size.
        max: usize,
    },
    /// The request did not complete in time.
    #[error("Request timed out")]
    Timeout,
}

impl ErrorCode for FetchError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "FETCH_INVALID_URL",
            Self::Transport(_) => "FETCH_TRANSPORT_ERROR",
            Self::Status(_) => "FETCH_HTTP_STATUS",
            Self::TooLarge { .. } => "FETCH_TOO_LARGE",
            Self::Timeout => "FETCH_TIMEOUT",
        }
    }
}

/// Errors from the wallet signing interface.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet is connected.
    #[error("Please connect your wallet first.")]
    NotConnected,
    /// The user or the device declined to sign.
    #[error("Wallet rejected the request: {0}")]
    Rejected(String),
    /// The wallet answered with something unusable.
    #[error("Invalid wallet response: {0}")]
    InvalidResponse(String),
    /// The wallet's change address has no stake part.
    #[error(transparent)]
    Address(#[from] AddressError),
    /// The wallet reported an unknown network.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ErrorCode for WalletError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotConnected => "WALLET_NOT_CONNECTED",
            Self::Rejected(_) => "WALLET_REJECTED",
            Self::InvalidResponse(_) => "WALLET_INVALID_RESPONSE",
            Self::Address(_) => "WALLET_ADDRESS_ERROR",
            Self::Core(_) => "WALLET_CORE_ERROR",
        }
    }
}

/// Errors validating the witness a wallet returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// The signed transaction carried no verification-key witness.
    #[error("Signed transaction has no verification-key witness.")]
    MissingWitness,
    /// The witness key could not be interpreted.
    #[error("Malformed witness key: {0}")]
    MalformedKey(String),
    /// The key hash does not match the wallet's stake credential.
    #[error("Wallet returned unexpected VKey.")]
    UnexpectedVKey,
    /// The signature does not verify against the unsigned transaction hash.
    #[error("Wallet created an invalid signature.")]
    InvalidSignature,
    /// Either transaction could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ErrorCode for WitnessError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingWitness => "WITNESS_MISSING",
            Self::MalformedKey(_) => "WITNESS_MALFORMED_KEY",
            Self::UnexpectedVKey => "WITNESS_UNEXPECTED_VKEY",
            Self::InvalidSignature => "WITNESS_INVALID_SIGNATURE",
            Self::Decode(_) => "WITNESS_DECODE_ERROR",
        }
    }
}

/// Errors related to cryptographic primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A key had the wrong length or encoding.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// A signature had the wrong length or encoding.
    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),
    /// The signature did not verify.
    #[error("Signature verification failed")]
    VerificationFailed,
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidKey(_) => "CRYPTO_INVALID_KEY",
            Self::InvalidSignature(_) => "CRYPTO_INVALID_SIGNATURE",
            Self::VerificationFailed => "CRYPTO_VERIFICATION_FAILED",
        }
    }
}

/// Errors from the persisted vote ledger and the council poll on top of it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger could not be reached.
    #[error("Ledger transport error: {0}")]
    Transport(String),
    /// The ledger answered with a non-success status.
    #[error("Ledger returned HTTP status {0}")]
    Status(u16),
    /// The ledger's answer could not be parsed.
    #[error("Ledger response could not be decoded: {0}")]
    Decode(String),
    /// The voter is not a configured council member.
    #[error("{0} is not a council member")]
    NotAMember(String),
    /// A previous write for this poll has not been acknowledged yet.
    #[error("A vote for this proposal is still being recorded")]
    WritePending,
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "LEDGER_TRANSPORT_ERROR",
            Self::Status(_) => "LEDGER_HTTP_STATUS",
            Self::Decode(_) => "LEDGER_DECODE_ERROR",
            Self::NotAMember(_) => "LEDGER_NOT_A_MEMBER",
            Self::WritePending => "LEDGER_WRITE_PENDING",
        }
    }
}

/// Errors surfaced by the signing session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The pasted input could not be decoded.
    #[error("Invalid transaction format.")]
    InvalidFormat,
    /// No wallet is connected.
    #[error("Please connect your wallet first.")]
    NotConnected,
    /// There is no transaction in a signable phase.
    #[error("No transaction is ready to sign.")]
    NothingToSign,
    /// A whole-transaction check failed.
    #[error("Ensure all transaction validations are successful before proceeding.")]
    TransactionChecksFailed,
    /// A per-vote check failed.
    #[error("Ensure all vote validations are successful before proceeding.")]
    VoteChecksFailed,
    /// Not every disclosed detail has been acknowledged.
    #[error("You must acknowledge the transaction details before signing!")]
    NotAcknowledged,
    /// The disclosure being acknowledged does not exist.
    #[error("Unknown disclosure index {0}")]
    UnknownDisclosure(usize),
    /// An operation was attempted in a phase that does not allow it.
    #[error("Operation not allowed while {0}")]
    InvalidPhase(&'static str),
    /// There is no signed witness to export.
    #[error("No signed witness is available to export.")]
    NotSigned,
    /// Rule evaluation or vote extraction failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The wallet failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),
    /// The returned witness was rejected.
    #[error(transparent)]
    Witness(#[from] WitnessError),
}

impl ErrorCode for SessionError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "SESSION_INVALID_FORMAT",
            Self::NotConnected => "SESSION_NOT_CONNECTED",
            Self::NothingToSign => "SESSION_NOTHING_TO_SIGN",
            Self::TransactionChecksFailed => "SESSION_TX_CHECKS_FAILED",
            Self::VoteChecksFailed => "SESSION_VOTE_CHECKS_FAILED",
            Self::NotAcknowledged => "SESSION_NOT_ACKNOWLEDGED",
            Self::UnknownDisclosure(_) => "SESSION_UNKNOWN_DISCLOSURE",
            Self::InvalidPhase(_) => "SESSION_INVALID_PHASE",
            Self::NotSigned => "SESSION_NOT_SIGNED",
            Self::Validation(_) => "SESSION_VALIDATION_ERROR",
            Self::Wallet(_) => "SESSION_WALLET_ERROR",
            Self::Witness(_) => "SESSION_WITNESS_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_visible_messages() {
        assert_eq!(ValidationError::NoVotes.to_string(), "Transaction has no votes.");
        assert_eq!(
            ValidationError::MultipleVotes(3).to_string(),
            "You are signing more than one vote. Number of votes: 3"
        );
        assert_eq!(WitnessError::UnexpectedVKey.to_string(), "Wallet returned unexpected VKey.");
        assert_eq!(
            WitnessError::InvalidSignature.to_string(),
            "Wallet created an invalid signature."
        );
        assert_eq!(SessionError::InvalidFormat.to_string(), "Invalid transaction format.");
        assert_eq!(
            SessionError::from(WitnessError::InvalidSignature).to_string(),
            "Wallet created an invalid signature."
        );
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DecodeError::Empty.code(), "DECODE_EMPTY_INPUT");
        assert_eq!(SessionError::NotAcknowledged.code(), "SESSION_NOT_ACKNOWLEDGED");
        assert_eq!(LedgerError::WritePending.code(), "LEDGER_WRITE_PENDING");
    }
}
