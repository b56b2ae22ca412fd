//! Derive macros for the asset registry precompile crate.
//!
//! - `#[derive(BinaryCodec)]`: deterministic `Encode`/`Decode` impls for stored records
//! - `#[derive(Error)]`: `Display` and `std::error::Error` for error enums

mod binary_codec;
mod error;

use proc_macro::TokenStream;

/// Implements `crate::types::encoding::{Encode, Decode}` field by field.
#[proc_macro_derive(BinaryCodec)]
pub fn derive_binary_codec(input: TokenStream) -> TokenStream {
    binary_codec::derive_binary_codec(input)
}

/// Implements `Display` from `#[error("...")]` attributes, plus `std::error::Error`.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
