//! Read access to the properties of source objects.
//!
//! The engine never knows the concrete type of a source. It asks a
//! [`Projectable`] for properties by name, and nested objects come back as
//! [`Value::Object`] so they can be read the same way. Matching between
//! source and target is therefore structural: any type exposing the right
//! names can be projected.
//!
//! Implementations usually come from `#[derive(Projectable)]`; hand-written
//! ones only have to answer [`Projectable::property`].
//!
//! # Examples
//!
//! ```
//! use projector::{Projectable, ProjectionError, Value};
//!
//! struct Person {
//!     id: u64,
//!     login: String,
//! }
//!
//! impl Projectable for Person {
//!     fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError> {
//!         match name {
//!             "id" => Ok(Value::UInt(self.id)),
//!             "login" => Ok(Value::from(self.login.as_str())),
//!             _ => Err(ProjectionError::unknown_property(self.type_name(), name)),
//!         }
//!     }
//! }
//!
//! let person = Person { id: 34, login: "a@x.com".to_string() };
//! assert_eq!(person.property("id").unwrap(), Value::UInt(34));
//! assert!(person.property("password").unwrap_err().is_property_access());
//! ```

use std::any::Any;

use crate::error::ProjectionError;
use crate::value::Value;

/// An object whose properties can be read by name.
pub trait Projectable {
    /// Reads the property called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::PropertyAccess`] when the object has no
    /// readable property with that name. A property that exists but holds
    /// nothing is `Ok(Value::Null)`, not an error.
    fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError>;

    /// The name used for this object in error messages and logs.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// The object itself, for types that can be copied as a whole.
    ///
    /// `None` means the object can only be read property by property, which
    /// is all `NestedProjection` needs. `#[projectable(by_value)]` returns
    /// `Some(self)` so that `CopyAsIs` can clone the object into a property of
    /// the same type.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }
}

impl<T: Projectable + ?Sized> Projectable for &T {
    fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError> {
        (**self).property(name)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

impl<T: Projectable + ?Sized> Projectable for Box<T> {
    fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError> {
        (**self).property(name)
    }

    fn type_name(&self) -> &'static str {
        (**self).type_name()
    }

    fn as_any(&self) -> Option<&dyn Any> {
        (**self).as_any()
    }
}

#[cfg(feature = "json")]
mod json {
    use std::borrow::Cow;

    use serde_json::{Number, Value as Json};

    use super::Projectable;
    use crate::error::ProjectionError;
    use crate::value::{ToValue, Value};

    /// JSON objects are sources; their keys are the property names.
    ///
    /// A missing key is a [`ProjectionError::PropertyAccess`] like on any other
    /// source, and reading a property off a non-object document fails the same way.
    impl Projectable for Json {
        fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError> {
            match self {
                Json::Object(members) => members
                    .get(name)
                    .map(ToValue::to_value)
                    .ok_or_else(|| ProjectionError::unknown_property("json object", name)),
                other => Err(ProjectionError::inaccessible(
                    "json value",
                    name,
                    format!("{} has no properties", kind(other)),
                )),
            }
        }

        fn type_name(&self) -> &'static str {
            kind(self)
        }
    }

    impl ToValue for Json {
        fn to_value(&self) -> Value<'_> {
            match self {
                Json::Null => Value::Null,
                Json::Bool(flag) => Value::Bool(*flag),
                Json::Number(number) => number_value(number),
                Json::String(text) => Value::Str(Cow::Borrowed(text.as_str())),
                Json::Array(items) => Value::List(items.iter().map(ToValue::to_value).collect()),
                Json::Object(_) => Value::Object(self),
            }
        }
    }

    /// Numbers outside `i64`, `u64` and `f64` keep their text, so assigning
    /// them to a numeric property fails instead of reading as absent.
    fn number_value(number: &Number) -> Value<'static> {
        number
            .as_i64()
            .map(Value::Int)
            .or_else(|| number.as_u64().map(Value::UInt))
            .or_else(|| number.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::Str(Cow::Owned(number.to_string())))
    }

    const fn kind(json: &Json) -> &'static str {
        match json {
            Json::Null => "json null",
            Json::Bool(_) => "json bool",
            Json::Number(_) => "json number",
            Json::String(_) => "json string",
            Json::Array(_) => "json array",
            Json::Object(_) => "json object",
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    struct Address {
        city: String,
    }

    impl Projectable for Address {
        fn property(&self, name: &str) -> Result<Value<'_>, ProjectionError> {
            match name {
                "city" => Ok(Value::from(self.city.as_str())),
                _ => Err(ProjectionError::unknown_property(self.type_name(), name)),
            }
        }
    }

    #[test]
    fn reads_through_references_and_boxes() {
        let address = Address {
            city: "Leipzig".to_string(),
        };
        let boxed: Box<dyn Projectable> = Box::new(Address {
            city: "Berlin".to_string(),
        });

        assert_eq!((&address).property("city").unwrap(), Value::from("Leipzig"));
        assert_eq!(boxed.property("city").unwrap(), Value::from("Berlin"));
    }

    #[test]
    fn unknown_property_names_the_type() {
        let address = Address {
            city: String::new(),
        };

        let error = address.property("zip").unwrap_err();

        assert_eq!(
            error,
            ProjectionError::unknown_property(std::any::type_name::<Address>(), "zip")
        );
    }
}
