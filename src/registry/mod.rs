//! Asset registry store.
//!
//! [`AssetRegistry`] is a typed view over a [`State`](crate::state::State) that
//! keeps the primary `id -> Asset` table and the per-owner index consistent. It
//! owns no data itself: the precompile builds one per call over the call's
//! overlay, so a failed call leaves nothing behind.

mod asset;
mod store;

pub use asset::{Asset, DEFAULT_LOCATION};
pub use store::{AssetRegistry, RegistryError};
