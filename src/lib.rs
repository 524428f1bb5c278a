//! # projector
//!
//! Rule-driven projection of object graphs onto data-transfer shapes.
//!
//! ## Overview
//!
//! A projection builds a fresh target value from a source object. The target
//! declares, per property, how its value is obtained:
//!
//! - **Copy**: take the source property with the same (or an overridden) name
//! - **Reference**: keep only the identifier of a referenced object
//! - **Nested**: project a referenced object into the property's own shape
//! - **Elementwise**: do either of the above for every element of a collection
//! - **Skip / exclude**: leave the property alone
//!
//! Sources and targets are matched by property name only, so the domain model
//! and its transfer shapes never have to know about each other.
//!
//! Objects are read property by property, so copying a whole object into a
//! property only works for types deriving `Projectable` with
//! `#[projectable(by_value)]`; everything else is projected with `nested`.
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(Projectable)]` and `#[derive(Projection)]` (default)
//! - `json`: `serde_json::Value` documents as sources
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use projector::prelude::*;
//!
//! #[derive(Projectable)]
//! struct Person {
//!     id: u64,
//!     login: String,
//!     married_to: Option<Box<Person>>,
//!     children: Vec<Person>,
//! }
//!
//! #[derive(Debug, Default, Projection)]
//! struct PersonDto {
//!     #[projection(source = "login")]
//!     email: String,
//!     #[projection(reference, source = "married_to")]
//!     husband_id: u64,
//!     #[projection(each_reference, source = "children")]
//!     children_ids: Vec<u64>,
//! }
//!
//! let child = |id| Person { id, login: String::new(), married_to: None, children: vec![] };
//! let person = Person {
//!     id: 1,
//!     login: "a@x.com".to_string(),
//!     married_to: Some(Box::new(child(34))),
//!     children: vec![child(1), child(2)],
//! };
//!
//! let dto: PersonDto = project(&person).unwrap();
//! assert_eq!(dto.email, "a@x.com");
//! assert_eq!(dto.husband_id, 34);
//! assert_eq!(dto.children_ids, vec![1, 2]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

extern crate self as projector;

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use projector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::access::Projectable;
    pub use crate::engine::{Projector, project};
    pub use crate::error::ProjectionError;
    pub use crate::rule::{MappingRule, Strategy};
    pub use crate::shape::Projection;
    pub use crate::value::{FromValue, ToValue, Value};

    #[cfg(feature = "derive")]
    pub use projector_derive::{Projectable, Projection};
}

pub mod access;
pub mod config;
pub mod engine;
pub mod error;
pub mod rule;
pub mod shape;
pub mod value;

pub use access::Projectable;
pub use config::{ConfigError, ProjectorConfig};
pub use engine::{Descent, Projector, project};
pub use error::{ConversionError, ProjectionError};
pub use rule::{DEFAULT_REFERENCE_KEY, MappingRule, Strategy};
pub use shape::{Projection, Property, Setter};
pub use value::{FromValue, ToValue, Value};

#[cfg(feature = "derive")]
pub use projector_derive::{Projectable, Projection};
