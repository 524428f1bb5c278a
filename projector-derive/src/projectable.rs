//! Implementation of the `#[derive(Projectable)]` macro.
//!
//! Generates a by-name accessor table for a struct so that it can serve as
//! the source of a projection, and exposes the struct itself as an object
//! value so that other sources can reference it.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, LitStr, parse_macro_input, parse_quote};

/// Main implementation of the Projectable derive macro.
pub fn derive_projectable_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    generate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// A readable field and the name it is exposed under.
struct Readable<'a> {
    field: &'a Field,
    exposed: String,
}

fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => &named_fields.named,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Projectable can only be derived for structs with named fields, not tuple structs.",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Projectable cannot be derived for unit structs (structs with no fields).",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Projectable can only be derived for structs.",
            ));
        }
    };

    let mut readable = Vec::new();
    for field in fields {
        if let Some(exposed) = readable_field(field)? {
            readable.push(exposed);
        }
    }

    let arms = readable.iter().map(|Readable { field, exposed }| {
        let ident = &field.ident;
        quote! {
            #exposed => ::core::result::Result::Ok(::projector::ToValue::to_value(&self.#ident)),
        }
    });

    let by_value = by_value(input)?;
    if by_value && let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`by_value` needs an owned type, the struct cannot borrow",
        ));
    }

    let mut generics = input.generics.clone();
    let type_parameters: Vec<_> = generics
        .type_params()
        .map(|parameter| parameter.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for parameter in type_parameters {
        where_clause
            .predicates
            .push(parse_quote!(#parameter: ::projector::ToValue));
        if by_value {
            where_clause
                .predicates
                .push(parse_quote!(#parameter: 'static));
        }
    }
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let (as_any, from_value) = if by_value {
        let mut cloneable = generics.clone();
        cloneable
            .make_where_clause()
            .predicates
            .push(parse_quote!(Self: ::core::clone::Clone));
        let clone_bound = &cloneable.where_clause;
        (
            quote! {
                fn as_any(&self) -> ::core::option::Option<&dyn ::core::any::Any> {
                    ::core::option::Option::Some(self)
                }
            },
            quote! {
                impl #impl_generics ::projector::FromValue for #name #type_generics #clone_bound {
                    fn from_value(
                        value: ::projector::Value<'_>,
                    ) -> ::core::result::Result<Self, ::projector::ConversionError> {
                        ::projector::value::clone_object(value)
                    }
                }
            },
        )
    } else {
        (TokenStream2::new(), TokenStream2::new())
    };

    Ok(quote! {
        impl #impl_generics ::projector::Projectable for #name #type_generics #where_clause {
            fn property(
                &self,
                name: &str,
            ) -> ::core::result::Result<::projector::Value<'_>, ::projector::ProjectionError> {
                match name {
                    #(#arms)*
                    _ => ::core::result::Result::Err(::projector::ProjectionError::unknown_property(
                        ::projector::Projectable::type_name(self),
                        name,
                    )),
                }
            }

            #as_any
        }

        impl #impl_generics ::projector::ToValue for #name #type_generics #where_clause {
            fn to_value(&self) -> ::projector::Value<'_> {
                ::projector::Value::Object(self)
            }
        }

        #from_value
    })
}

/// Reads the container attribute `#[projectable(by_value)]`.
fn by_value(input: &DeriveInput) -> syn::Result<bool> {
    let mut by_value = false;
    for attr in &input.attrs {
        if !attr.path().is_ident("projectable") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("by_value") {
                by_value = true;
                Ok(())
            } else {
                Err(meta.error("unsupported projectable attribute, expected `by_value`"))
            }
        })?;
    }
    Ok(by_value)
}

/// Reads `#[projectable(...)]`; `None` when the field is hidden.
fn readable_field(field: &Field) -> syn::Result<Option<Readable<'_>>> {
    let mut exposed = field
        .ident
        .as_ref()
        .map(|ident| ident.unraw().to_string())
        .unwrap_or_default();
    let mut hidden = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("projectable") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                hidden = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                exposed = meta.value()?.parse::<LitStr>()?.value();
                Ok(())
            } else {
                Err(meta.error("unsupported projectable attribute, expected `skip` or `rename = \"...\"`"))
            }
        })?;
    }

    Ok((!hidden).then_some(Readable { field, exposed }))
}
