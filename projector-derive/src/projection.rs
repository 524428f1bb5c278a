//! Implementation of the `#[derive(Projection)]` macro.
//!
//! Turns field attributes into the target's property table: one
//! `::projector::Property` per field, in declaration order, each with the
//! attached rule and a setter generated for the field's declared type.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Data, DeriveInput, Field, Fields, Ident, LitStr, parse_macro_input};

use crate::types::{projected_value, vec_element};

/// Main implementation of the Projection derive macro.
pub fn derive_projection_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    generate(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Skip,
    Copy,
    Reference,
    Nested,
    EachReference,
    EachNested,
}

impl Strategy {
    fn from_path(meta: &ParseNestedMeta<'_>) -> Option<Self> {
        let ident = meta.path.get_ident()?.to_string();
        let strategy = match ident.as_str() {
            "skip" => Self::Skip,
            "copy" => Self::Copy,
            "reference" => Self::Reference,
            "nested" => Self::Nested,
            "each_reference" => Self::EachReference,
            "each_nested" => Self::EachNested,
            _ => return None,
        };
        Some(strategy)
    }

    fn variant(self) -> Ident {
        let name = match self {
            Self::Skip => "Skip",
            Self::Copy => "CopyAsIs",
            Self::Reference => "ByReferenceKey",
            Self::Nested => "NestedProjection",
            Self::EachReference => "ElementwiseByReferenceKey",
            Self::EachNested => "ElementwiseNestedProjection",
        };
        Ident::new(name, Span::call_site())
    }

    const fn dereferences(self) -> bool {
        matches!(self, Self::Reference | Self::EachReference)
    }
}

/// Everything the attributes of one field declare.
struct Declaration<'a> {
    field: &'a Field,
    ident: &'a Ident,
    excluded: bool,
    read_only: bool,
    /// `None` when no rule is attached.
    strategy: Option<Strategy>,
    source: Option<LitStr>,
    key: Option<LitStr>,
}

impl Declaration<'_> {
    fn has_rule(&self) -> bool {
        self.strategy.is_some() || self.source.is_some() || self.key.is_some()
    }

    fn strategy(&self) -> Strategy {
        self.strategy.unwrap_or(Strategy::Copy)
    }

    /// Excluded, skipped and read-only fields are never written, so they get no setter.
    fn writable(&self) -> bool {
        !(self.excluded || self.read_only || self.strategy() == Strategy::Skip)
    }
}

fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(named_fields) => &named_fields.named,
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Projection can only be derived for structs with named fields, not tuple structs.",
                ));
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Projection cannot be derived for unit structs (structs with no fields).",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Projection can only be derived for structs.",
            ));
        }
    };

    let declarations = fields
        .iter()
        .map(declaration)
        .collect::<syn::Result<Vec<_>>>()?;

    let mut setters = Vec::new();
    let mut properties = Vec::new();
    for declaration in &declarations {
        let (setter, property) = generate_property(declaration)?;
        setters.extend(setter);
        properties.push(property);
    }

    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #name #type_generics #where_clause {
            #(#setters)*
        }

        impl #impl_generics ::projector::Projection for #name #type_generics #where_clause {
            const PROPERTIES: &'static [::projector::Property<Self>] = &[
                #(#properties),*
            ];

            fn construct() -> ::core::result::Result<Self, ::projector::ProjectionError> {
                ::core::result::Result::Ok(<Self as ::core::default::Default>::default())
            }
        }
    })
}

/// Reads `#[no_projection]` and `#[projection(...)]` off a field.
fn declaration(field: &Field) -> syn::Result<Declaration<'_>> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "Projection fields must be named"))?;
    let mut declaration = Declaration {
        field,
        ident,
        excluded: false,
        read_only: false,
        strategy: None,
        source: None,
        key: None,
    };

    for attr in &field.attrs {
        if attr.path().is_ident("no_projection") {
            attr.meta.require_path_only()?;
            declaration.excluded = true;
        } else if attr.path().is_ident("projection") {
            attr.parse_nested_meta(|meta| {
                if let Some(strategy) = Strategy::from_path(&meta) {
                    if declaration.strategy.replace(strategy).is_some() {
                        return Err(meta.error("a field can only declare one projection strategy"));
                    }
                    Ok(())
                } else if meta.path.is_ident("source") {
                    declaration.source = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("key") {
                    declaration.key = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("read_only") {
                    declaration.read_only = true;
                    Ok(())
                } else {
                    Err(meta.error(
                        "unsupported projection attribute, expected one of `skip`, `copy`, \
                         `reference`, `nested`, `each_reference`, `each_nested`, `source`, \
                         `key`, `read_only`",
                    ))
                }
            })?;
        }
    }

    if let Some(key) = &declaration.key
        && !declaration.strategy().dereferences()
    {
        return Err(syn::Error::new_spanned(
            key,
            "`key` only applies to `reference` and `each_reference`",
        ));
    }

    Ok(declaration)
}

/// Generates the setter function (if any) and the property descriptor of one field.
fn generate_property(
    declaration: &Declaration<'_>,
) -> syn::Result<(Option<TokenStream2>, TokenStream2)> {
    let ident = declaration.ident;
    let ty = &declaration.field.ty;
    let property_name = ident.unraw().to_string();
    let setter_name = format_ident!("__projector_{}", ident.unraw());

    let setter = if declaration.writable() {
        Some(match declaration.strategy() {
            Strategy::Copy | Strategy::Reference => (
                quote!(Assign),
                quote! {
                    fn #setter_name(
                        target: &mut Self,
                        value: ::projector::Value<'_>,
                    ) -> ::core::result::Result<(), ::projector::ConversionError> {
                        target.#ident = ::projector::FromValue::from_value(value)?;
                        ::core::result::Result::Ok(())
                    }
                },
            ),
            Strategy::Nested => {
                let value = projected_value(ty);
                (
                    quote!(Project),
                    quote! {
                        fn #setter_name(
                            target: &mut Self,
                            below: &::projector::Descent<'_>,
                            source: &dyn ::projector::Projectable,
                        ) -> ::core::result::Result<(), ::projector::ProjectionError> {
                            target.#ident = #value;
                            ::core::result::Result::Ok(())
                        }
                    },
                )
            }
            Strategy::EachReference => {
                require_vec(declaration, "each_reference")?;
                (
                    quote!(Append),
                    quote! {
                        fn #setter_name(
                            target: &mut Self,
                            value: ::projector::Value<'_>,
                        ) -> ::core::result::Result<(), ::projector::ConversionError> {
                            target.#ident.push(::projector::FromValue::from_value(value)?);
                            ::core::result::Result::Ok(())
                        }
                    },
                )
            }
            Strategy::EachNested => {
                let element = require_vec(declaration, "each_nested")?;
                let value = projected_value(element);
                (
                    quote!(AppendProjected),
                    quote! {
                        fn #setter_name(
                            target: &mut Self,
                            below: &::projector::Descent<'_>,
                            source: &dyn ::projector::Projectable,
                        ) -> ::core::result::Result<(), ::projector::ProjectionError> {
                            target.#ident.push(#value);
                            ::core::result::Result::Ok(())
                        }
                    },
                )
            }
            Strategy::Skip => unreachable!("skipped fields are not writable"),
        })
    } else {
        None
    };

    let mut property = match &setter {
        Some((variant, _)) => quote! {
            ::projector::Property::new(
                #property_name,
                ::projector::Setter::#variant(Self::#setter_name),
            )
        },
        None => quote! { ::projector::Property::read_only(#property_name) },
    };

    if declaration.has_rule() {
        let variant = declaration.strategy().variant();
        let mut rule = quote! { ::projector::MappingRule::new(::projector::Strategy::#variant) };
        if let Some(source) = &declaration.source {
            rule = quote! { #rule.with_source_property(#source) };
        }
        if let Some(key) = &declaration.key {
            rule = quote! { #rule.with_reference_key(#key) };
        }
        property = quote! { #property.with_rule(#rule) };
    }
    if declaration.excluded {
        property = quote! { #property.excluded() };
    }

    let function = setter.map(|(_, function)| {
        quote! {
            #[doc(hidden)]
            #function
        }
    });

    Ok((function, property))
}

/// Returns the element type of the field, which must be a `Vec<_>`.
fn require_vec<'a>(declaration: &Declaration<'a>, strategy: &str) -> syn::Result<&'a syn::Type> {
    let field: &'a Field = declaration.field;
    vec_element(&field.ty).ok_or_else(|| {
        syn::Error::new_spanned(
            &field.ty,
            format!("`{strategy}` requires a `Vec<_>` field so the element type is known"),
        )
    })
}
