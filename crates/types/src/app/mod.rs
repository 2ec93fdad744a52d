// Path: crates/types/src/app/mod.rs
//! Core application-level data structures like vote records and validation states.

/// Data structures describing governance votes, voters and anchors.
pub mod governance;
/// Fixed-width hash newtypes and the network identifier.
pub mod identity;
/// Data structures for the internal council poll.
pub mod poll;
/// Boolean validation states that gate signing.
pub mod validation;
/// Signed witness material and its export format.
pub mod witness;

pub use governance::*;
pub use identity::{Hash, Hash28, Hash32, NetworkId};
pub use poll::*;
pub use validation::*;
pub use witness::*;
