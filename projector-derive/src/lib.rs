//! Derive macros for projector sources and projection targets.
//!
//! # Available Derive Macros
//!
//! - [`Projectable`]: Makes a struct readable by property name, so it can be projected
//! - [`Projection`]: Attaches mapping rules to a struct's fields, so it can be projected onto
//!
//! # Example
//!
//! ```rust,ignore
//! use projector::{Projectable, Projection, project};
//!
//! #[derive(Projectable)]
//! struct Address {
//!     city: String,
//!     street: String,
//! }
//!
//! #[derive(Projectable)]
//! struct Person {
//!     id: u64,
//!     login: String,
//!     #[projectable(skip)]
//!     password: String,
//!     address: Option<Address>,
//! }
//!
//! #[derive(Default, Projection)]
//! struct AddressDto {
//!     city: String,
//!     #[no_projection]
//!     street: String,
//! }
//!
//! #[derive(Default, Projection)]
//! struct PersonDto {
//!     id: u64,
//!     #[projection(source = "login")]
//!     email: String,
//!     #[projection(nested)]
//!     address: Option<AddressDto>,
//! }
//!
//! let dto: PersonDto = project(&person)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod projectable;
mod projection;
mod types;

use proc_macro::TokenStream;

/// Derive macro that exposes a struct's fields as readable properties.
///
/// Every named field becomes a property of the same name, read through
/// `ToValue`. The struct itself also becomes usable as a nested object in
/// other sources.
///
/// # Container Attributes
///
/// - `#[projectable(by_value)]`: the struct can also be copied whole into a
///   property of the same type (it must be `Clone` and own its data)
///
/// # Field Attributes
///
/// - `#[projectable(skip)]`: the field is not readable (reading it is an error)
/// - `#[projectable(rename = "name")]`: the field is readable under another name
///
/// # Requirements
///
/// - The struct must be a named struct (not a tuple struct)
/// - Every readable field type must implement `ToValue`
///
/// # Example
///
/// ```rust,ignore
/// use projector::{Projectable, Value};
///
/// #[derive(Projectable)]
/// struct Person {
///     id: u64,
///     #[projectable(rename = "email")]
///     login: String,
///     #[projectable(skip)]
///     password: String,
/// }
///
/// let person = Person { id: 34, login: "a@x.com".into(), password: "secret".into() };
/// assert_eq!(person.property("email")?, Value::from("a@x.com"));
/// assert!(person.property("password").is_err());
/// ```
#[proc_macro_derive(Projectable, attributes(projectable))]
pub fn derive_projectable(input: TokenStream) -> TokenStream {
    projectable::derive_projectable_impl(input)
}

/// Derive macro that turns a struct into a projection target.
///
/// Generates the `Projection` property table in field declaration order.
/// Construction goes through `Default`, so collection fields start out empty
/// and receive elements in source order.
///
/// # Field Attributes
///
/// - `#[no_projection]`: exclusion marker; the field keeps its default value
/// - `#[projection(STRATEGY, source = "...", key = "...")]` where `STRATEGY` is one of:
///   - `copy` (the default when only `source` is given): assign the source value
///   - `reference`: assign the `key` (default `"id"`) of the referenced object
///   - `nested`: project the referenced object into the field's type
///     (`T`, `Option<T>`, or `Box<T>` of a `Projection`)
///   - `each_reference`: push the `key` of every element (field must be `Vec<_>`)
///   - `each_nested`: push the projection of every element (field must be `Vec<_>`)
///   - `skip`: leave the field alone
/// - `#[projection(read_only)]`: the field is not writable and is left out of projection
///
/// # Requirements
///
/// - The struct must be a named struct implementing `Default`
/// - Copied and referenced field types must implement `FromValue`
///
/// # Example
///
/// ```rust,ignore
/// use projector::Projection;
///
/// #[derive(Default, Projection)]
/// struct PersonDto {
///     #[projection(reference, source = "married_to", key = "id")]
///     husband_id: u64,
///     #[projection(each_nested)]
///     homes: Vec<RealEstateDto>,
/// }
/// ```
#[proc_macro_derive(Projection, attributes(projection, no_projection))]
pub fn derive_projection(input: TokenStream) -> TokenStream {
    projection::derive_projection_impl(input)
}
