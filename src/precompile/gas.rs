//! Static gas schedule for the asset precompile.
//!
//! Every operation has a flat cost charged before any other work. Mutations cost
//! more than reads.

use precompile_derive::Error;

pub const REGISTER_ASSET_GAS: u64 = 20_000;
pub const UPDATE_LOCATION_GAS: u64 = 20_000;
pub const UPDATE_NAME_GAS: u64 = 20_000;
pub const GET_ASSET_GAS: u64 = 5_000;
pub const GET_ASSETS_BY_OWNER_GAS: u64 = 5_000;
pub const GET_ALL_GAS: u64 = 5_000;

/// Supplied gas does not cover the operation's cost.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("out of gas: required {required}, supplied {supplied}")]
pub struct OutOfGas {
    pub required: u64,
    pub supplied: u64,
}

/// Deducts `cost` from `supplied`, returning the gas left over.
pub fn deduct_gas(supplied: u64, cost: u64) -> Result<u64, OutOfGas> {
    supplied.checked_sub(cost).ok_or(OutOfGas {
        required: cost,
        supplied,
    })
}
