//! The asset registry stateful precompile.
//!
//! A call arrives as `selector ‖ payload`. [`AssetPrecompile::run`] looks the
//! selector up in a fixed table of [`Operation`]s and hands the payload to that
//! operation's handler, which charges gas, validates the payload, checks the
//! caller's role for writes and then reads or updates the registry. Each call runs
//! on an overlay of the host state and is committed only if it succeeds.

pub mod abi;
pub mod config;
mod contract;
mod errors;
pub mod gas;
mod handlers;
mod operation;
mod selector;


pub use config::{
    AssetConfig, ConfigError, ContractDeployerAssetConfig, PrecompileUpgrades,
    StatefulPrecompileConfig, TxAssetConfig,
};
pub use contract::{AssetPrecompile, CallResult, PrecompileCall};
pub use errors::PrecompileError;
pub use operation::Operation;
pub use selector::{SELECTOR_LEN, Selector};

use crate::types::address::{ADDRESS_LEN, Address};

const fn precompile_address(last: u8) -> Address {
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes[0] = 0x03;
    bytes[ADDRESS_LEN - 1] = last;
    Address(bytes)
}

/// `0x0300000000000000000000000000000000000000`
pub const CONTRACT_DEPLOYER_ASSET_ADDRESS: Address = precompile_address(0x00);
/// `0x0300000000000000000000000000000000000001`
pub const TX_ASSET_ADDRESS: Address = precompile_address(0x01);
