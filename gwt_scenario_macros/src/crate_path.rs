//! Path under which generated code refers to `gwt_scenario`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, LitStr, Path};

/// Resolves the crate path from `#[step_output(crate = "...")]`, defaulting to
/// `::gwt_scenario`.
pub(crate) fn resolve(attrs: &[Attribute]) -> syn::Result<TokenStream> {
    let mut custom: Option<Path> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("step_output")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let literal: LitStr = meta.value()?.parse()?;
                custom = Some(literal.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported step_output attribute"))
            }
        })?;
    }
    Ok(custom.map_or_else(|| quote! { ::gwt_scenario }, |path| quote! { #path }))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use rstest::rstest;
    use syn::{DeriveInput, parse_quote};

    use super::resolve;

    #[rstest]
    fn defaults_to_the_absolute_crate_path() -> Result<()> {
        let input: DeriveInput = parse_quote! { struct Receipt; };
        assert_eq!(resolve(&input.attrs)?.to_string(), ":: gwt_scenario");
        Ok(())
    }

    #[rstest]
    fn honours_renamed_crates() -> Result<()> {
        let input: DeriveInput = parse_quote! {
            #[step_output(crate = "scenarios")]
            struct Receipt;
        };
        assert_eq!(resolve(&input.attrs)?.to_string(), "scenarios");
        Ok(())
    }

    #[rstest]
    fn rejects_unknown_keys() {
        let input: DeriveInput = parse_quote! {
            #[step_output(path = "scenarios")]
            struct Receipt;
        };
        assert!(resolve(&input.attrs).is_err());
    }
}
