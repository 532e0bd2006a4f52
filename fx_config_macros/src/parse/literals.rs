//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a literal from a field attribute using `extractor`, naming
/// `expected` in the error when the literal has the wrong kind.
fn parse_lit<T, F>(
    meta: &ParseNestedMeta,
    key: &str,
    expected: &str,
    extractor: F,
) -> Result<T, syn::Error>
where
    F: FnOnce(Lit) -> Option<T>,
{
    let literal = meta.value()?.parse::<Lit>()?;
    let span = literal.span();
    extractor(literal).ok_or_else(|| syn::Error::new(span, format!("{key} must be {expected}")))
}

/// Parses a string literal from a field attribute.
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> Result<LitStr, syn::Error> {
    parse_lit(meta, key, "a string", |lit| match lit {
        Lit::Str(s) => Some(s),
        _ => None,
    })
}

/// Parses a default literal, keeping its source text.
///
/// Strings are taken verbatim; integer, float and boolean literals are
/// rendered so the runtime parses them with the field type's rules.
pub(crate) fn lit_default(meta: &ParseNestedMeta, key: &str) -> Result<String, syn::Error> {
    parse_lit(
        meta,
        key,
        "a string, integer, float or boolean literal",
        |lit| match lit {
            Lit::Str(s) => Some(s.value()),
            Lit::Int(i) => Some(i.base10_digits().to_owned()),
            Lit::Float(f) => Some(f.base10_digits().to_owned()),
            Lit::Bool(b) => Some(b.value.to_string()),
            _ => None,
        },
    )
}
