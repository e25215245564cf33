//! Builtin validation rules.
//!
//! Each rule expands to a statement that returns `Err(E::from(message))` from
//! the generated constructor, where `E` is the constructor's error type.
use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub(crate) fn dispatch(rule: &str, field: &Ident) -> Option<TokenStream> {
    match rule {
        "non_empty" => Some(non_empty(field)),
        "single_line" => Some(single_line(field)),
        _ => None,
    }
}

/// Rule: non_empty. Blank (whitespace-only) strings are rejected too.
fn non_empty(field: &Ident) -> TokenStream {
    quote! {
        if #field.trim().is_empty() {
            return Err(E::from(format!("{} must be non-empty", stringify!(#field))));
        }
    }
}

/// Rule: single_line
fn single_line(field: &Ident) -> TokenStream {
    quote! {
        if #field.contains(['\n', '\r']) {
            return Err(E::from(format!("{} must be a single line", stringify!(#field))));
        }
    }
}
