//! Primitive types shared by the registry, the allow list and the precompile.
//!
//! - [`address`]: 20-byte account addresses
//! - [`hash`]: 32-byte digests (SHA3-256 and Keccak-256)
//! - [`bytes`]: shared output buffers
//! - [`encoding`]: deterministic binary codec for stored values

pub mod address;
pub mod bytes;
pub mod encoding;
pub mod hash;
