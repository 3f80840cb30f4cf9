//! Procedural macros for `gwt_scenario`.
//!
//! `step!` turns a closure into a `gwt_scenario::Step` whose signature lists
//! the closure's parameter names and types, so the resolver can inject stored
//! values by name before falling back to type. `#[derive(StepOutput)]` lets a
//! user type be returned from a step and stored as-is.

use proc_macro::TokenStream;
use syn::{DeriveInput, ExprClosure, parse_macro_input};

mod crate_path;
mod output;
mod step;
mod type_utils;

/// Builds a `gwt_scenario::Step` from a closure with annotated parameters.
///
/// Each parameter becomes a named parameter of the step signature:
///
/// - `name: T` is required and accepts `T`;
/// - `name: Option<T>` accepts `T` and receives `None` when nothing matches;
/// - `#[one_of(A, B)] name: Value` accepts either type and receives the
///   untyped `gwt_scenario::Value`.
///
/// Parameters bound to `_` or to a destructuring pattern are injected by type
/// only. The closure's return value is converted with
/// `gwt_scenario::StepOutput`.
///
/// ```rust,ignore
/// let step = step!(|amount: u64, note: Option<String>| amount * 2);
/// ```
#[proc_macro]
pub fn step(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);
    step::expand(closure)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive macro implementing `gwt_scenario::StepOutput` by storing the value
/// itself.
///
/// Use `#[step_output(crate = "path")]` when `gwt_scenario` is renamed in
/// `Cargo.toml`.
#[proc_macro_derive(StepOutput, attributes(step_output))]
pub fn derive_step_output(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    output::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
