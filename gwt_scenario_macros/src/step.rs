//! Expansion of the `step!` macro.
//!
//! The closure is emitted unchanged apart from stripped `#[one_of]`
//! attributes. A wrapper closure reads each argument from `Args` in
//! declaration order and forwards them to it.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Attribute, ExprClosure, Ident, Pat, PatType, Token, Type};

use crate::type_utils::option_inner;

const ONE_OF: &str = "one_of";
const UNNAMED: &str = "_";

/// How the wrapper reads a parameter from `Args`.
#[derive(Debug)]
pub(crate) enum ParamKind {
    /// `args.required::<T>()`.
    Required(Type),
    /// `args.optional::<T>()` for an `Option<T>` parameter.
    Optional(Type),
    /// `args.value()` for a `#[one_of(..)]` parameter.
    OneOf(Vec<Type>),
}

/// A closure parameter as the signature describes it.
#[derive(Debug)]
pub(crate) struct StepParam {
    pub(crate) name: Option<String>,
    pub(crate) kind: ParamKind,
}

impl StepParam {
    fn accepted(&self) -> Vec<&Type> {
        match &self.kind {
            ParamKind::Required(ty) | ParamKind::Optional(ty) => vec![ty],
            ParamKind::OneOf(types) => types.iter().collect(),
        }
    }

    fn spec(&self) -> TokenStream {
        let base = self.name.as_ref().map_or_else(
            || quote! { ::gwt_scenario::ParamSpec::unnamed() },
            |name| quote! { ::gwt_scenario::ParamSpec::named(#name) },
        );
        let accepts = self.accepted().into_iter().map(|ty| quote! { .accepts::<#ty>() });
        quote! { #base #(#accepts)* }
    }

    fn read(&self, binding: &Ident) -> TokenStream {
        let label = self.name.as_deref().unwrap_or(UNNAMED);
        let read = match &self.kind {
            ParamKind::Required(ty) => quote! { __gwt_args.required::<#ty>(#label)? },
            ParamKind::Optional(ty) => quote! { __gwt_args.optional::<#ty>(#label)? },
            ParamKind::OneOf(_) => quote! { __gwt_args.value(#label)? },
        };
        quote! { let #binding = #read; }
    }
}

/// Expands `step!(closure)` into a `Step` constructor.
pub(crate) fn expand(mut closure: ExprClosure) -> syn::Result<TokenStream> {
    let params = closure
        .inputs
        .iter_mut()
        .map(parse_param)
        .collect::<syn::Result<Vec<_>>>()?;
    let specs = params.iter().map(StepParam::spec);
    let bindings: Vec<Ident> = (0..params.len())
        .map(|index| format_ident!("__gwt_arg{}", index))
        .collect();
    let reads = params
        .iter()
        .zip(&bindings)
        .map(|(param, binding)| param.read(binding));

    Ok(quote! {
        {
            #[allow(unused_mut, reason = "Fn closures are also called through FnMut")]
            let mut __gwt_call = #closure;
            ::gwt_scenario::Step::new(
                ::gwt_scenario::Signature::Described(::std::vec![#(#specs),*]),
                move |__gwt_args: &mut ::gwt_scenario::Args| {
                    #(#reads)*
                    ::gwt_scenario::StepOutput::into_output(__gwt_call(#(#bindings),*))
                },
            )
        }
    })
}

/// Reads one closure parameter, removing the `#[one_of]` attribute from it.
pub(crate) fn parse_param(input: &mut Pat) -> syn::Result<StepParam> {
    let Pat::Type(PatType { attrs, pat, ty, .. }) = input else {
        return Err(syn::Error::new_spanned(
            &*input,
            "step! parameters need a type annotation",
        ));
    };
    let union = take_one_of(attrs)?;
    let name = match &**pat {
        Pat::Ident(binding) => Some(binding.ident.to_string()),
        _ => None,
    };
    let kind = match union {
        Some(types) => ParamKind::OneOf(types),
        None => option_inner(ty).map_or_else(
            || ParamKind::Required((**ty).clone()),
            |inner| ParamKind::Optional(inner.clone()),
        ),
    };
    Ok(StepParam { name, kind })
}

fn take_one_of(attrs: &mut Vec<Attribute>) -> syn::Result<Option<Vec<Type>>> {
    let Some(index) = attrs.iter().position(|attr| attr.path().is_ident(ONE_OF)) else {
        return Ok(None);
    };
    let attr = attrs.remove(index);
    let types = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
    if types.is_empty() {
        return Err(syn::Error::new_spanned(attr, "#[one_of] needs at least one type"));
    }
    Ok(Some(types.into_iter().collect()))
}
