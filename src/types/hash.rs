//! 32-byte digests: SHA3-256 for storage keys, Keccak-256 for selectors and ids.

use crate::types::encoding::EncodeSink;
use precompile_derive::BinaryCodec;
use sha3::{Digest, Keccak256, Sha3_256};
use std::fmt;

/// Digest length in bytes.
pub const HASH_LEN: usize = 32;

/// Fixed-size 32-byte hash.
///
/// Used both as a storage key and as the asset identifier type. `Copy` because it
/// is passed by value through every registry lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, BinaryCodec, Default, Hash, Ord, PartialOrd)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// The all-zero hash.
    pub const fn zero() -> Hash {
        Hash([0u8; HASH_LEN])
    }

    /// Returns the hash as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Builds a hash from exactly [`HASH_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Hash> {
        let array: [u8; HASH_LEN] = bytes.try_into().ok()?;
        Some(Hash(array))
    }

    /// Starts an incremental SHA3-256 computation.
    pub fn sha3() -> HashBuilder<Sha3_256> {
        HashBuilder::new()
    }

    /// Starts an incremental Keccak-256 computation (Ethereum flavour).
    pub fn keccak() -> HashBuilder<Keccak256> {
        HashBuilder::new()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Incremental hash builder over any 32-byte digest.
///
/// Implements [`EncodeSink`] so encodable values can be fed straight into the
/// digest without an intermediate buffer.
pub struct HashBuilder<D: Digest> {
    hasher: D,
}

impl<D: Digest> HashBuilder<D> {
    /// Creates a builder with empty state.
    pub fn new() -> Self {
        Self { hasher: D::new() }
    }

    /// Feeds data into the digest.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Consumes the builder and returns the digest.
    pub fn finalize(self) -> Hash {
        let mut out = [0u8; HASH_LEN];
        out.copy_from_slice(&self.hasher.finalize()[..HASH_LEN]);
        Hash(out)
    }
}

impl<D: Digest> Default for HashBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> EncodeSink for HashBuilder<D> {
    fn write(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }
}

/// One-shot Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut h = Hash::keccak();
    h.update(data);
    h.finalize()
}
