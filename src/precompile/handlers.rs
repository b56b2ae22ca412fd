//! One handler per [`Operation`].
//!
//! Every handler runs the same pipeline: deduct gas, check the payload length,
//! decode fields, pass the access gate if the operation mutates, then touch the
//! registry.

use super::abi::{
    TEXT_FIELD_LEN, WORD_LEN, check_input_len, encode_asset, encode_assets, encode_id,
    read_address, read_hash, read_text,
};
use super::errors::PrecompileError;
use super::gas::deduct_gas;
use super::operation::Operation;
use crate::access::ensure_can_mutate;
use crate::registry::AssetRegistry;
use crate::state::State;
use crate::types::address::{ADDRESS_LEN, Address};
use crate::types::bytes::Bytes;
use crate::types::hash::Hash;

/// Call parameters a handler sees once the selector has been stripped.
pub(crate) struct CallContext<'c> {
    pub caller: Address,
    /// The precompile address the host routed the call to; namespaces both the
    /// registry and the allow list.
    pub address: Address,
    pub payload: &'c [u8],
    pub read_only: bool,
}

/// Output of a handler: encoded result and the gas left after deduction.
pub(crate) struct HandlerOutput {
    pub remaining_gas: u64,
    pub result: Result<Bytes, PrecompileError>,
}

/// Runs `op` against `state`, charging its fixed cost from `supplied_gas` first.
pub(crate) fn handle<S: State + ?Sized>(
    op: Operation,
    state: &mut S,
    ctx: &CallContext<'_>,
    supplied_gas: u64,
) -> HandlerOutput {
    let remaining_gas = match deduct_gas(supplied_gas, op.gas_cost()) {
        Ok(remaining) => remaining,
        Err(err) => {
            return HandlerOutput {
                remaining_gas: 0,
                result: Err(err.into()),
            };
        }
    };

    let result = check_input_len(op, ctx.payload).and_then(|()| match op {
        Operation::RegisterAsset => register_asset(state, ctx),
        Operation::GetAsset => get_asset(state, ctx),
        Operation::GetAll => get_all(state, ctx),
        Operation::GetAssetByAddress => get_asset_by_address(state, ctx),
        Operation::UpdateLocation => update_location(state, ctx),
        Operation::UpdateName => update_name(state, ctx),
    });

    HandlerOutput {
        remaining_gas,
        result,
    }
}

fn register_asset<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let (owner, name) = ctx.payload.split_at(ADDRESS_LEN);
    let owner = read_address(owner);
    let name = read_text("name", name)?;
    ensure_can_mutate(&*state, ctx.address, ctx.caller, ctx.read_only)?;

    let id = AssetRegistry::new(state, ctx.address).register_asset(ctx.caller, owner, name)?;
    Ok(encode_id(&id))
}

fn get_asset<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let id = read_hash(ctx.payload);
    let asset = AssetRegistry::new(state, ctx.address).get_asset(id)?;
    Ok(encode_asset(&asset))
}

fn get_all<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let assets = AssetRegistry::new(state, ctx.address).get_all()?;
    Ok(encode_assets(&assets))
}

fn get_asset_by_address<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let owner = read_address(ctx.payload);
    let assets = AssetRegistry::new(state, ctx.address).get_assets_by_owner(owner)?;
    Ok(encode_assets(&assets))
}

fn update_location<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let (id, location) = split_update(ctx.payload);
    let location = read_text("location", location)?;
    ensure_can_mutate(&*state, ctx.address, ctx.caller, ctx.read_only)?;

    AssetRegistry::new(state, ctx.address).update_location(id, location)?;
    Ok(Bytes::empty())
}

fn update_name<S: State + ?Sized>(
    state: &mut S,
    ctx: &CallContext<'_>,
) -> Result<Bytes, PrecompileError> {
    let (id, name) = split_update(ctx.payload);
    let name = read_text("name", name)?;
    ensure_can_mutate(&*state, ctx.address, ctx.caller, ctx.read_only)?;

    AssetRegistry::new(state, ctx.address).update_name(id, name)?;
    Ok(Bytes::empty())
}

/// Splits an update payload into the asset id and its text field.
fn split_update(payload: &[u8]) -> (Hash, &[u8]) {
    let (id, text) = payload.split_at(WORD_LEN);
    debug_assert_eq!(text.len(), TEXT_FIELD_LEN);
    (read_hash(id), text)
}
