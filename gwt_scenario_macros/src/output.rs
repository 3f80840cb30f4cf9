//! Expansion of `#[derive(StepOutput)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_quote};

use crate::crate_path;

/// Implements `StepOutput` for `input`, storing the value itself.
///
/// A `Self: 'static` bound is added because stored values are type-erased.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let krate = crate_path::resolve(&input.attrs)?;
    let ident = &input.ident;
    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: 'static));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::StepOutput for #ident #ty_generics #where_clause {
            fn into_output(
                self,
            ) -> #krate::ScenarioResult<::core::option::Option<#krate::Value>> {
                ::core::result::Result::Ok(::core::option::Option::Some(#krate::Value::new(self)))
            }
        }
    })
}
