//! Procedural macros for `fx_config`.
//!
//! `#[derive(Populate)]` generates the field walk that fills a struct from a
//! configuration subtree. Each public named field becomes one
//! `FieldSpec` visited in declaration order; private fields and fields
//! marked `#[config(skip)]` are left alone.
//!
//! Field attributes:
//!
//! - `key = "name"` resolves the field from `name` instead of the field
//!   name. Dotted sub-keys are allowed.
//! - `default = "literal"` (or a bare integer, float or boolean literal) is
//!   used when no provider has the key.
//! - `optional` tolerates absence without a default.
//! - `skip` excludes the field.
//! - `from_str` parses the field's text with `FromStr`, for types such as a
//!   user-defined identifier that have no `Field` impl.
//!
//! The struct attribute `#[config(crate = "path")]` points generated code at
//! a renamed dependency.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod generate;
mod parse;
#[cfg(test)]
mod tests;

/// Derive `fx_config::Populate` and `fx_config::Field` for a struct with
/// named fields.
#[proc_macro_derive(Populate, attributes(config))]
pub fn derive_populate(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    parse::parse_input(&input)
        .map_or_else(syn::Error::into_compile_error, |parsed| {
            generate::expand(&parsed)
        })
        .into()
}
