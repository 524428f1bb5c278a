//! Inspection of declared field types.
//!
//! Projection needs the *static* type a nested value is projected into. These
//! helpers peel the wrappers the derive understands (`Option`, `Box`, `Vec`)
//! off a field type.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{GenericArgument, PathArguments, Type};

/// Returns `T` if `ty` is `wrapper<T>` (matched on the last path segment).
pub fn single_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    let mut arguments = arguments.args.iter();
    match (arguments.next(), arguments.next()) {
        (Some(GenericArgument::Type(inner)), None) => Some(inner),
        _ => None,
    }
}

/// Returns the element type of a `Vec<E>` field.
pub fn vec_element(ty: &Type) -> Option<&Type> {
    single_argument(ty, "Vec")
}

/// Builds an expression of type `ty` holding the projection of `source`.
///
/// `Option<T>` becomes `Some(..)`, `Box<T>` becomes `Box::new(..)`, and the
/// innermost type is projected through the descent named `below`.
pub fn projected_value(ty: &Type) -> TokenStream2 {
    if let Some(inner) = single_argument(ty, "Option") {
        let value = projected_value(inner);
        return quote! { ::core::option::Option::Some(#value) };
    }
    if let Some(inner) = single_argument(ty, "Box") {
        let value = projected_value(inner);
        return quote! { ::std::boxed::Box::new(#value) };
    }
    quote! { below.project::<#ty>(source)? }
}
