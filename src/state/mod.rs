//! Key/value state the precompile reads and writes.
//!
//! The host hands the precompile a [`State`]; every call runs against an
//! [`OverlayState`] layered on top of it so that writes are either applied
//! together on success or dropped together on failure. [`MemoryState`] is a
//! self-contained in-memory base for embedding and tests.

mod memory;
mod overlay;

pub use memory::MemoryState;
pub use overlay::OverlayState;

use crate::types::address::Address;
use crate::types::encoding::Encode;
use crate::types::hash::Hash;

/// Domain prefix mixed into every storage key derived by this crate.
const KEY_DOMAIN: &[u8] = b"STATEFUL_PRECOMPILE";

/// A pending write: `Some(value)` stores, `None` deletes.
pub type Write = (Hash, Option<Vec<u8>>);

/// Key/value storage keyed by 32-byte hashes.
pub trait State {
    /// Returns the value under `key`, if any.
    fn get(&self, key: Hash) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn push(&mut self, key: Hash, value: Vec<u8>);

    /// Removes `key`.
    fn delete(&mut self, key: Hash);

    fn contains_key(&self, key: Hash) -> bool {
        self.get(key).is_some()
    }

    /// Applies a batch of staged writes in order.
    fn apply_writes(&mut self, writes: Vec<Write>) {
        for (key, value) in writes {
            match value {
                Some(value) => self.push(key, value),
                None => self.delete(key),
            }
        }
    }
}

/// Derives the storage slot of an entry in `table` owned by the precompile at
/// `namespace`.
///
/// The table name is length-prefixed; callers pass fixed-width `parts` so keys of
/// one table can never alias keys of another or of a different precompile.
pub fn storage_key(namespace: &Address, table: &str, parts: &[&[u8]]) -> Hash {
    let mut h = Hash::sha3();
    h.update(KEY_DOMAIN);
    h.update(namespace.as_slice());
    table.encode(&mut h);
    for part in parts {
        h.update(part);
    }
    h.finalize()
}
