//! Unit tests for attribute parsing and code generation.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use syn::{Attribute, DeriveInput, parse_quote};

use crate::generate::{crate_path, expand};
use crate::parse::{FieldAttrs, parse_field_attrs, parse_input};

#[rstest]
#[case::none(parse_quote!(#[doc = "field"]), FieldAttrs::default())]
#[case::key(
    parse_quote!(#[config(key = "Number")]),
    FieldAttrs { key: Some("Number".to_owned()), ..FieldAttrs::default() },
)]
#[case::string_default(
    parse_quote!(#[config(default = "8080")]),
    FieldAttrs { default: Some("8080".to_owned()), ..FieldAttrs::default() },
)]
#[case::int_default(
    parse_quote!(#[config(default = 42)]),
    FieldAttrs { default: Some("42".to_owned()), ..FieldAttrs::default() },
)]
#[case::bool_default(
    parse_quote!(#[config(default = true)]),
    FieldAttrs { default: Some("true".to_owned()), ..FieldAttrs::default() },
)]
#[case::flags(
    parse_quote!(#[config(optional, skip)]),
    FieldAttrs { optional: true, skip: true, ..FieldAttrs::default() },
)]
#[case::from_str(
    parse_quote!(#[config(from_str, default = "0.0.0.0:80")]),
    FieldAttrs { from_str: true, default: Some("0.0.0.0:80".to_owned()), ..FieldAttrs::default() },
)]
fn parses_field_attributes(#[case] attr: Attribute, #[case] expected: FieldAttrs) -> Result<()> {
    let parsed = parse_field_attrs(&[attr]).map_err(|err| anyhow!("parse failed: {err}"))?;
    ensure!(parsed == expected, "unexpected attributes: {parsed:?}");
    Ok(())
}

#[rstest]
#[case::unknown(parse_quote!(#[config(rename = "x")]), "unknown field attribute")]
#[case::empty_segment(parse_quote!(#[config(key = "a..b")]), "non-empty")]
#[case::bad_default(parse_quote!(#[config(default = 'x')]), "default must be")]
fn rejects_bad_field_attributes(#[case] attr: Attribute, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_field_attrs(&[attr]) else {
        return Err(anyhow!("expected attribute parsing to fail"));
    };
    ensure!(err.to_string().contains(message), "unexpected error: {err}");
    Ok(())
}

#[test]
fn only_public_unskipped_fields_are_populated() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Hello {
            pub world: bool,
            #[config(key = "count")]
            pub number: i64,
            #[config(skip)]
            pub cache: Vec<u8>,
            hidden: String,
            pub(crate) internal: u8,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!("parse failed: {err}"))?;
    let keys: Vec<String> = parsed.fields.iter().map(crate::parse::PopulatedField::key).collect();
    ensure!(keys == ["world", "count"], "unexpected keys: {keys:?}");
    Ok(())
}

#[rstest]
#[case::enumeration(parse_quote!(enum Mode { A, B }), "only be derived for structs")]
#[case::tuple(parse_quote!(struct Pair(pub u8, pub u8);), "requires named fields")]
fn rejects_unsupported_shapes(#[case] input: DeriveInput, #[case] message: &str) -> Result<()> {
    let Err(err) = parse_input(&input) else {
        return Err(anyhow!("expected derive input to be rejected"));
    };
    ensure!(err.to_string().contains(message), "unexpected error: {err}");
    Ok(())
}

#[rstest]
#[case::default(None, ":: fx_config")]
#[case::custom(Some("my_alias"), "my_alias")]
#[case::nested(Some("deps::fx_config"), "deps :: fx_config")]
fn resolves_crate_path(#[case] input: Option<&str>, #[case] expected: &str) -> Result<()> {
    let parsed = input
        .map(syn::parse_str::<syn::Path>)
        .transpose()
        .map_err(|err| anyhow!("invalid path: {err}"))?;
    let tokens = crate_path(parsed.as_ref()).to_string();
    ensure!(tokens == expected, "unexpected tokens: {tokens}");
    Ok(())
}

#[test]
fn expansion_describes_each_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        #[config(crate = "cfg")]
        struct Server {
            #[config(default = 8080)]
            pub port: u16,
            #[config(optional)]
            pub greeting: String,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!("parse failed: {err}"))?;
    let tokens = expand(&parsed).to_string();
    ensure!(tokens.contains("impl cfg :: Populate for Server"), "{tokens}");
    ensure!(tokens.contains("impl cfg :: Field for Server"), "{tokens}");
    ensure!(
        tokens.contains(":: core :: option :: Option :: Some (\"8080\")"),
        "{tokens}"
    );
    ensure!(tokens.contains("optional : true"), "{tokens}");
    ensure!(!tokens.contains("let _ = populator"), "{tokens}");
    Ok(())
}

#[test]
fn from_str_fields_expand_to_parsed_calls() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Upstream {
            #[config(from_str)]
            pub addr: std::net::SocketAddr,
            pub retries: u8,
        }
    };
    let parsed = parse_input(&input).map_err(|err| anyhow!("parse failed: {err}"))?;
    let tokens = expand(&parsed).to_string();
    ensure!(tokens.contains("populator . parsed (& mut self . addr"), "{tokens}");
    ensure!(tokens.contains("populator . field (& mut self . retries"), "{tokens}");
    Ok(())
}

#[test]
fn expansion_of_fieldless_struct_uses_populator() -> Result<()> {
    let input: DeriveInput = parse_quote!(struct Marker;);
    let parsed = parse_input(&input).map_err(|err| anyhow!("parse failed: {err}"))?;
    let tokens = expand(&parsed).to_string();
    ensure!(tokens.contains("let _ = populator"), "{tokens}");
    Ok(())
}
