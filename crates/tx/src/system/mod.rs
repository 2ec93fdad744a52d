// Path: crates/tx/src/system/mod.rs

//! Checks applied to what the wallet hands back after signing.

pub mod witness;

pub use witness::{validate_witness, verify_signature};
