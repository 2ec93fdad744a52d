// Path: crates/cli/src/commands/mod.rs

use clap::ValueEnum;
use vigil_types::app::NetworkId;

pub mod gov_action;
pub mod inspect;
pub mod poll;
pub mod verify_witness;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for NetworkId {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => NetworkId::Mainnet,
            NetworkArg::Testnet => NetworkId::Testnet,
        }
    }
}
