// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use vigil_types::error::{
    AddressError, CoreError, CryptoError, DecodeError, ErrorCode, FetchError, GovActionIdError,
    LedgerError, SessionError, ValidationError, WalletError, WitnessError,
};
pub use vigil_types::Result;
