//! Asset registry stateful precompile.
//!
//! Provides a gas-metered, admin-gated asset registry exposed to on-chain callers
//! at a fixed address, together with the state, access control and activation
//! plumbing it runs on.

pub mod access;
pub mod precompile;
pub mod registry;
pub mod state;
pub mod types;
pub mod utils;
