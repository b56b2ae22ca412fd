//! Fixed-width calldata and output encoding.
//!
//! # Calldata
//!
//! A call is a 4-byte [`Selector`](super::Selector) followed by a payload whose
//! exact length depends on the operation (see [`Operation::input_len`]). Ids are
//! 32 raw bytes, addresses 20 raw bytes, and text is a 32-byte field holding UTF-8
//! right-padded with zeros.
//!
//! # Output
//!
//! Output is a sequence of 32-byte words. An asset record is four words:
//! `id ‖ owner (left-padded) ‖ name ‖ location`. Lists start with a big-endian
//! count word. `registerAsset` returns the id word and updates return nothing.
//!
//! The `*_calldata` builders and `decode_*` functions are the caller-side halves
//! of this format.

use super::errors::PrecompileError;
use super::operation::Operation;
use crate::registry::Asset;
use crate::types::address::{ADDRESS_LEN, Address};
use crate::types::bytes::Bytes;
use crate::types::hash::{HASH_LEN, Hash};
use precompile_derive::Error;

pub const WORD_LEN: usize = 32;
pub const TEXT_FIELD_LEN: usize = 32;
/// Encoded size of one asset record.
pub const ASSET_RECORD_LEN: usize = 4 * WORD_LEN;

/// Caller-side encoding and decoding failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("{field} is {len} bytes, the limit is 32")]
    TextTooLong { field: &'static str, len: usize },
    #[error("{field} contains a NUL byte")]
    NulInText { field: &'static str },
    #[error("output is {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("owner word is not a left-padded address")]
    InvalidAddressWord,
    #[error("count word does not fit in 64 bits")]
    InvalidCountWord,
    #[error("invalid text in field {field}")]
    InvalidText { field: &'static str },
}

/// Checks that a payload has exactly the length `op` takes.
pub(crate) fn check_input_len(op: Operation, payload: &[u8]) -> Result<(), PrecompileError> {
    let expected = op.input_len();
    if payload.len() != expected {
        return Err(PrecompileError::InvalidInputLength {
            operation: op.name(),
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Reads a text field, dropping the zero padding.
pub(crate) fn read_text(field: &'static str, bytes: &[u8]) -> Result<String, PrecompileError> {
    strip_padding(bytes)
        .map_err(|_| PrecompileError::InvalidText { field })
}

pub(crate) fn read_address(bytes: &[u8]) -> Address {
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&bytes[..ADDRESS_LEN]);
    Address(out)
}

pub(crate) fn read_hash(bytes: &[u8]) -> Hash {
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&bytes[..HASH_LEN]);
    Hash(out)
}

fn strip_padding(bytes: &[u8]) -> Result<String, std::string::FromUtf8Error> {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8(bytes[..end].to_vec())
}

pub fn encode_id(id: &Hash) -> Bytes {
    Bytes::from(id.as_slice())
}

pub fn encode_asset(asset: &Asset) -> Bytes {
    let mut out = Bytes::with_capacity(ASSET_RECORD_LEN);
    write_asset(&mut out, asset);
    out
}

pub fn encode_assets(assets: &[Asset]) -> Bytes {
    let mut out = Bytes::with_capacity(WORD_LEN + assets.len() * ASSET_RECORD_LEN);
    out.extend_from_slice(&count_word(assets.len() as u64));
    for asset in assets {
        write_asset(&mut out, asset);
    }
    out
}

fn write_asset(out: &mut Bytes, asset: &Asset) {
    out.extend_from_slice(asset.id.as_slice());
    out.extend_from_slice(&address_word(&asset.owner));
    out.extend_from_slice(&text_word(&asset.name));
    out.extend_from_slice(&text_word(&asset.location));
}

/// Text packed into one word. Longer text is cut at the last character boundary
/// that fits.
fn text_word(text: &str) -> [u8; WORD_LEN] {
    let mut end = text.len().min(WORD_LEN);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let mut word = [0u8; WORD_LEN];
    word[..end].copy_from_slice(&text.as_bytes()[..end]);
    word
}

fn address_word(address: &Address) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[WORD_LEN - ADDRESS_LEN..].copy_from_slice(address.as_slice());
    word
}

fn count_word(count: u64) -> [u8; WORD_LEN] {
    let mut word = [0u8; WORD_LEN];
    word[WORD_LEN - 8..].copy_from_slice(&count.to_be_bytes());
    word
}

/// Packs `text` into a 32-byte field.
pub fn text_field(field: &'static str, text: &str) -> Result<[u8; TEXT_FIELD_LEN], AbiError> {
    if text.len() > TEXT_FIELD_LEN {
        return Err(AbiError::TextTooLong {
            field,
            len: text.len(),
        });
    }
    if text.as_bytes().contains(&0) {
        return Err(AbiError::NulInText { field });
    }
    let mut out = [0u8; TEXT_FIELD_LEN];
    out[..text.len()].copy_from_slice(text.as_bytes());
    Ok(out)
}

fn calldata(op: Operation, parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + op.input_len());
    out.extend_from_slice(&op.selector().0);
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

pub fn register_asset_calldata(owner: Address, name: &str) -> Result<Vec<u8>, AbiError> {
    let name = text_field("name", name)?;
    Ok(calldata(Operation::RegisterAsset, &[owner.as_slice(), &name]))
}

pub fn get_asset_calldata(id: Hash) -> Vec<u8> {
    calldata(Operation::GetAsset, &[id.as_slice()])
}

pub fn get_all_calldata() -> Vec<u8> {
    calldata(Operation::GetAll, &[])
}

pub fn get_asset_by_address_calldata(owner: Address) -> Vec<u8> {
    calldata(Operation::GetAssetByAddress, &[owner.as_slice()])
}

pub fn update_location_calldata(id: Hash, location: &str) -> Result<Vec<u8>, AbiError> {
    let location = text_field("location", location)?;
    Ok(calldata(Operation::UpdateLocation, &[id.as_slice(), &location]))
}

pub fn update_name_calldata(id: Hash, name: &str) -> Result<Vec<u8>, AbiError> {
    let name = text_field("name", name)?;
    Ok(calldata(Operation::UpdateName, &[id.as_slice(), &name]))
}

/// Decodes the output of `registerAsset`.
pub fn decode_id(output: &[u8]) -> Result<Hash, AbiError> {
    Hash::from_slice(output).ok_or(AbiError::InvalidLength {
        expected: HASH_LEN,
        actual: output.len(),
    })
}

/// Decodes the output of `getAsset`.
pub fn decode_asset(output: &[u8]) -> Result<Asset, AbiError> {
    if output.len() != ASSET_RECORD_LEN {
        return Err(AbiError::InvalidLength {
            expected: ASSET_RECORD_LEN,
            actual: output.len(),
        });
    }
    let (id, rest) = output.split_at(WORD_LEN);
    let (owner, rest) = rest.split_at(WORD_LEN);
    let (name, location) = rest.split_at(WORD_LEN);

    let padding = WORD_LEN - ADDRESS_LEN;
    if owner[..padding].iter().any(|&b| b != 0) {
        return Err(AbiError::InvalidAddressWord);
    }

    Ok(Asset {
        id: read_hash(id),
        owner: read_address(&owner[padding..]),
        name: strip_padding(name).map_err(|_| AbiError::InvalidText { field: "name" })?,
        location: strip_padding(location)
            .map_err(|_| AbiError::InvalidText { field: "location" })?,
    })
}

/// Decodes the output of `getAll` and `getAssetByAddress`.
pub fn decode_assets(output: &[u8]) -> Result<Vec<Asset>, AbiError> {
    if output.len() < WORD_LEN {
        return Err(AbiError::InvalidLength {
            expected: WORD_LEN,
            actual: output.len(),
        });
    }
    let (head, body) = output.split_at(WORD_LEN);
    if head[..WORD_LEN - 8].iter().any(|&b| b != 0) {
        return Err(AbiError::InvalidCountWord);
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&head[WORD_LEN - 8..]);
    let count = usize::try_from(u64::from_be_bytes(raw)).map_err(|_| AbiError::InvalidCountWord)?;

    let expected = count
        .checked_mul(ASSET_RECORD_LEN)
        .ok_or(AbiError::InvalidCountWord)?;
    if body.len() != expected {
        return Err(AbiError::InvalidLength {
            expected: expected + WORD_LEN,
            actual: output.len(),
        });
    }
    body.chunks_exact(ASSET_RECORD_LEN).map(decode_asset).collect()
}
