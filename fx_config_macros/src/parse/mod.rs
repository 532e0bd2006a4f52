//! Parsing `#[derive(Populate)]` input and its `#[config(...)]` attributes.

mod literals;

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, Generics, Ident, Visibility};

use literals::{lit_default, lit_str};

/// Struct-level attributes.
#[derive(Default)]
pub(crate) struct StructAttrs {
    /// Overrides the crate path used by generated code.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes.
#[derive(Default, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub key: Option<String>,
    pub default: Option<String>,
    pub optional: bool,
    pub skip: bool,
    /// Parse the field's text through `FromStr` instead of `Field`.
    pub from_str: bool,
}

/// A field that takes part in population.
pub(crate) struct PopulatedField {
    pub ident: Ident,
    pub attrs: FieldAttrs,
}

impl PopulatedField {
    /// The key resolved for this field.
    pub(crate) fn key(&self) -> String {
        self.attrs
            .key
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }
}

/// Everything code generation needs from the derive input.
pub(crate) struct PopulateInput {
    pub ident: Ident,
    pub generics: Generics,
    pub attrs: StructAttrs,
    pub fields: Vec<PopulatedField>,
}

/// Iterate all `#[config(...)]` attributes once and apply a callback.
fn parse_config<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("config")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_config(attrs, |meta| {
        if meta.path.is_ident("crate") {
            out.crate_path = Some(lit_str(meta, "crate")?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unknown struct attribute; expected `crate`"))
        }
    })?;
    Ok(out)
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_config(attrs, |meta| {
        if meta.path.is_ident("key") {
            let lit = lit_str(meta, "key")?;
            let key = lit.value();
            if key.split('.').any(str::is_empty) {
                return Err(syn::Error::new(
                    lit.span(),
                    "key segments must be non-empty",
                ));
            }
            out.key = Some(key);
        } else if meta.path.is_ident("default") {
            out.default = Some(lit_default(meta, "default")?);
        } else if meta.path.is_ident("optional") {
            out.optional = true;
        } else if meta.path.is_ident("skip") {
            out.skip = true;
        } else if meta.path.is_ident("from_str") {
            out.from_str = true;
        } else {
            return Err(meta.error(
                "unknown field attribute; expected `key`, `default`, `optional`, `skip` or `from_str`",
            ));
        }
        Ok(())
    })?;
    Ok(out)
}

/// Parse the derive input, keeping only public, non-skipped fields.
///
/// # Errors
///
/// Fails for enums, unions, tuple structs and malformed attributes.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<PopulateInput> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Populate can only be derived for structs",
        ));
    };
    let named = match &data.fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => {
            return Ok(PopulateInput {
                ident: input.ident.clone(),
                generics: input.generics.clone(),
                attrs: parse_struct_attrs(&input.attrs)?,
                fields: Vec::new(),
            });
        }
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                data.struct_token,
                "Populate requires named fields",
            ));
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let attrs = parse_field_attrs(&field.attrs)?;
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if attrs.skip || !matches!(field.vis, Visibility::Public(_)) {
            continue;
        }
        fields.push(PopulatedField { ident, attrs });
    }

    Ok(PopulateInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        attrs: parse_struct_attrs(&input.attrs)?,
        fields,
    })
}
