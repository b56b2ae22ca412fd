//! `Error` derive, a small stand-in for `thiserror`.
//!
//! ```ignore
//! #[derive(Debug, Error)]
//! pub enum PrecompileError {
//!     #[error("asset not found: {0}")]
//!     NotFound(Hash),
//!     #[error("out of gas: required {required}, supplied {supplied}")]
//!     OutOfGas { required: u64, supplied: u64 },
//!     #[error("write protection")]
//!     WriteProtection,
//! }
//! ```
//!
//! Messages may reference tuple fields as `{0}`, `{1}` and named fields by name,
//! with or without a format spec (`{0:?}`). Fields the message does not mention are
//! simply not bound.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let arms = match &input.data {
        Data::Enum(data) => data
            .variants
            .iter()
            .map(|variant| {
                let ident = &variant.ident;
                let message = message(&variant.attrs, &variant.ident)?;
                Ok(display_arm(quote!(Self::#ident), &variant.fields, &message))
            })
            .collect::<syn::Result<Vec<_>>>()?,
        Data::Struct(data) => {
            let message = message(&input.attrs, &input.ident)?;
            vec![display_arm(quote!(Self), &data.fields, &message)]
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Error cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, __formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#arms)*
                }
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

fn display_arm(path: TokenStream2, fields: &Fields, message: &LitStr) -> TokenStream2 {
    let text = message.value();

    match fields {
        Fields::Unit => quote! {
            #path => write!(__formatter, #message),
        },
        Fields::Named(named) => {
            let used: Vec<_> = named
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .filter(|ident| references(&text, &ident.to_string()))
                .collect();
            quote! {
                #path { #(#used,)* .. } => write!(__formatter, #message, #(#used = #used),*),
            }
        }
        Fields::Unnamed(unnamed) => {
            let mut rewritten = text.clone();
            let mut pattern = Vec::with_capacity(unnamed.unnamed.len());
            let mut used = Vec::new();

            for index in 0..unnamed.unnamed.len() {
                let position = index.to_string();
                if references(&text, &position) {
                    let bind = format_ident!("field{}", index);
                    rewritten = rewritten
                        .replace(&format!("{{{position}}}"), &format!("{{{bind}}}"))
                        .replace(&format!("{{{position}:"), &format!("{{{bind}:"));
                    pattern.push(quote!(#bind));
                    used.push(bind);
                } else {
                    pattern.push(quote!(_));
                }
            }

            let rewritten = LitStr::new(&rewritten, message.span());
            quote! {
                #path( #(#pattern),* ) => write!(__formatter, #rewritten, #(#used = #used),*),
            }
        }
    }
}

/// True when `text` interpolates `name` as `{name}` or `{name:...}`.
fn references(text: &str, name: &str) -> bool {
    text.contains(&format!("{{{name}}}")) || text.contains(&format!("{{{name}:"))
}

fn message(attrs: &[Attribute], target: &syn::Ident) -> syn::Result<LitStr> {
    attrs
        .iter()
        .find(|attr| attr.path().is_ident("error"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                target,
                format!("`{target}` is missing an #[error(\"...\")] message"),
            )
        })?
        .parse_args::<LitStr>()
}
