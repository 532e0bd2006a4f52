//! Code generation for `#[derive(Populate)]`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{PopulateInput, PopulatedField};

/// Resolve the crate path from the parsed struct attribute, defaulting to
/// `::fx_config`.
pub(crate) fn crate_path(path: Option<&syn::Path>) -> TokenStream {
    path.map_or_else(|| quote! { ::fx_config }, |custom| quote! { #custom })
}

fn field_call(krate: &TokenStream, field: &PopulatedField) -> TokenStream {
    let ident = &field.ident;
    let name = ident.to_string();
    let key = field.key();
    let optional = field.attrs.optional;
    let default = field.attrs.default.as_ref().map_or_else(
        || quote! { ::core::option::Option::None },
        |lit| quote! { ::core::option::Option::Some(#lit) },
    );
    let method = if field.attrs.from_str {
        quote! { parsed }
    } else {
        quote! { field }
    };
    quote! {
        populator.#method(
            &mut self.#ident,
            &#krate::FieldSpec {
                name: #name,
                key: #key,
                default: #default,
                optional: #optional,
            },
        );
    }
}

/// Generate the `Populate` and `Field` impls for `input`.
pub(crate) fn expand(input: &PopulateInput) -> TokenStream {
    let krate = crate_path(input.attrs.crate_path.as_ref());
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let calls = input.fields.iter().map(|field| field_call(&krate, field));
    let unused = input
        .fields
        .is_empty()
        .then(|| quote! { let _ = populator; });

    quote! {
        impl #impl_generics #krate::Populate for #ident #ty_generics #where_clause {
            fn populate_fields(&mut self, populator: &mut #krate::Populator<'_>) {
                #unused
                #( #calls )*
            }
        }

        impl #impl_generics #krate::Field for #ident #ty_generics #where_clause {
            fn populate_field(
                &mut self,
                populator: &mut #krate::Populator<'_>,
                spec: &#krate::FieldSpec,
            ) {
                populator.nested(self, spec);
            }
        }
    }
}
