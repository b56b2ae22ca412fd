//! `BinaryCodec` derive.
//!
//! Fields are written in declaration order through the crate's `Encode` impls and
//! read back in the same order through `Decode`. Only structs are supported.
//!
//! ```ignore
//! #[derive(BinaryCodec)]
//! pub struct Asset {
//!     pub id: Hash,
//!     pub name: String,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

pub fn derive_binary_codec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (encode_body, decode_body) = match &input.data {
        Data::Struct(data) => {
            let (pattern, writes) = bind_fields(&data.fields);
            let build = construct(quote!(Self), &data.fields);
            (
                quote! {
                    let Self #pattern = self;
                    #(#writes)*
                },
                quote! { Ok(#build) },
            )
        }
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "BinaryCodec can only be derived for structs",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics crate::types::encoding::Encode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn encode<S: crate::types::encoding::EncodeSink>(&self, out: &mut S) {
                #encode_body
            }
        }

        impl #impl_generics crate::types::encoding::Decode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn decode(
                input: &mut &[u8],
            ) -> ::std::result::Result<Self, crate::types::encoding::DecodeError> {
                #decode_body
            }
        }
    })
}

/// Destructuring pattern for `fields` plus one `encode` call per bound field.
fn bind_fields(fields: &Fields) -> (TokenStream2, Vec<TokenStream2>) {
    let binds: Vec<_> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .filter_map(|field| field.ident.clone())
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| format_ident!("field{}", i))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    let writes = binds
        .iter()
        .map(|bind| quote! { crate::types::encoding::Encode::encode(#bind, out); })
        .collect();

    let pattern = match fields {
        Fields::Named(_) => quote! { { #(#binds),* } },
        Fields::Unnamed(_) => quote! { ( #(#binds),* ) },
        Fields::Unit => quote! {},
    };

    (pattern, writes)
}

/// Constructor expression decoding every field of `fields` in order.
fn construct(path: TokenStream2, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|field| &field.ident);
            quote! {
                #path { #( #idents: crate::types::encoding::Decode::decode(input)? ),* }
            }
        }
        Fields::Unnamed(unnamed) => {
            let reads = unnamed
                .unnamed
                .iter()
                .map(|_| quote! { crate::types::encoding::Decode::decode(input)? });
            quote! { #path( #(#reads),* ) }
        }
        Fields::Unit => path,
    }
}
