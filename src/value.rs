//! Dynamic values read from sources and written into targets.
//!
//! Source objects hand out their properties as [`Value`]s that borrow from the
//! source, and target properties take them back through [`FromValue`]. The
//! conversions are deliberately strict: integers are range checked, and
//! [`Value::Null`] only converts into `Option`.
//!
//! # Examples
//!
//! ```
//! use projector::value::{FromValue, ToValue, Value};
//!
//! let login = String::from("a@x.com");
//! let value = login.to_value();
//! assert_eq!(value, Value::from("a@x.com"));
//!
//! let copied = String::from_value(value).unwrap();
//! assert_eq!(copied, "a@x.com");
//!
//! assert_eq!(Option::<u32>::from_value(Value::Null).unwrap(), None);
//! assert!(u8::from_value(Value::Int(300)).is_err());
//! ```

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use crate::access::Projectable;
use crate::error::ConversionError;

/// A property value borrowed from a source object.
#[derive(Clone)]
pub enum Value<'a> {
    /// An absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A single character.
    Char(char),
    /// A string.
    Str(Cow<'a, str>),
    /// Another object whose properties can be read in turn.
    Object(&'a dyn Projectable),
    /// An ordered collection.
    List(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name for the kind of value, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::UInt(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::Char(_) => "char",
            Self::Str(_) => "string",
            Self::Object(_) => "object",
            Self::List(_) => "list",
        }
    }

    /// Returns the referenced object, if this value is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&'a dyn Projectable> {
        match self {
            Self::Object(object) => Some(*object),
            _ => None,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => formatter.write_str("Null"),
            Self::Bool(value) => formatter.debug_tuple("Bool").field(value).finish(),
            Self::Int(value) => formatter.debug_tuple("Int").field(value).finish(),
            Self::UInt(value) => formatter.debug_tuple("UInt").field(value).finish(),
            Self::Float(value) => formatter.debug_tuple("Float").field(value).finish(),
            Self::Char(value) => formatter.debug_tuple("Char").field(value).finish(),
            Self::Str(value) => formatter.debug_tuple("Str").field(value).finish(),
            Self::Object(object) => formatter
                .debug_tuple("Object")
                .field(&object.type_name())
                .finish(),
            Self::List(values) => formatter.debug_tuple("List").field(values).finish(),
        }
    }
}

/// Objects compare by identity, everything else structurally.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::UInt(left), Self::UInt(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Char(left), Self::Char(right)) => left == right,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Object(left), Self::Object(right)) => std::ptr::addr_eq(*left, *right),
            (Self::List(left), Self::List(right)) => left == right,
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl From<i64> for Value<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// =============================================================================
// ToValue
// =============================================================================

/// Exposes a field of a source object as a [`Value`].
pub trait ToValue {
    /// Returns the value, borrowing from `self` where possible.
    fn to_value(&self) -> Value<'_>;
}

macro_rules! impl_to_value_lossless {
    ($variant:ident, $wide:ty; $($source:ty),*) => {
        $(
            impl ToValue for $source {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(<$wide>::from(*self))
                }
            }
        )*
    };
}

impl_to_value_lossless!(Int, i64; i8, i16, i32, i64);
impl_to_value_lossless!(UInt, u64; u8, u16, u32, u64);
impl_to_value_lossless!(Float, f64; f32, f64);

impl ToValue for isize {
    #[allow(clippy::cast_possible_truncation)]
    fn to_value(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl ToValue for usize {
    #[allow(clippy::cast_possible_truncation)]
    fn to_value(&self) -> Value<'_> {
        Value::UInt(*self as u64)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(Cow::Borrowed(self.as_str()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for std::rc::Rc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for std::sync::Arc<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

// =============================================================================
// FromValue
// =============================================================================

/// Converts a [`Value`] into the declared type of a target property.
pub trait FromValue: Sized {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when the value's kind or range does not
    /// fit `Self`.
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError>;
}

macro_rules! impl_from_value_integer {
    ($($target:ty),*) => {
        $(
            impl FromValue for $target {
                fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
                    match value {
                        Value::Int(number) => <$target>::try_from(number)
                            .map_err(|_| ConversionError::to::<$target>("out-of-range integer")),
                        Value::UInt(number) => <$target>::try_from(number)
                            .map_err(|_| ConversionError::to::<$target>("out-of-range integer")),
                        other => Err(ConversionError::to::<$target>(other.kind())),
                    }
                }
            }
        )*
    };
}

impl_from_value_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl FromValue for f64 {
    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Float(number) => Ok(number),
            Value::Int(number) => Ok(number as Self),
            Value::UInt(number) => Ok(number as Self),
            other => Err(ConversionError::to::<Self>(other.kind())),
        }
    }
}

impl FromValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        let number =
            f64::from_value(value).map_err(|error| ConversionError::to::<Self>(error.found))?;
        if number.is_finite() && number.abs() > f64::from(Self::MAX) {
            return Err(ConversionError::to::<Self>("out-of-range float"));
        }
        Ok(number as Self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(ConversionError::to::<Self>(other.kind())),
        }
    }
}

impl FromValue for char {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Char(character) => Ok(character),
            other => Err(ConversionError::to::<Self>(other.kind())),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Str(text) => Ok(text.into_owned()),
            other => Err(ConversionError::to::<Self>(other.kind())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        match value {
            Value::List(values) => values.into_iter().map(T::from_value).collect(),
            other => Err(ConversionError::to::<Self>(other.kind())),
        }
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: Value<'_>) -> Result<Self, ConversionError> {
        T::from_value(value).map(Box::new)
    }
}

/// Clones the object held by `value` when it is a `T`.
///
/// This is the `FromValue` conversion of `#[projectable(by_value)]` types:
/// it lets `CopyAsIs` copy a whole object into a property of the same type.
///
/// # Errors
///
/// Returns a [`ConversionError`] when `value` is not an object, or is an
/// object of another type or one that does not expose itself through
/// [`Projectable::as_any`].
pub fn clone_object<T: Any + Clone>(value: Value<'_>) -> Result<T, ConversionError> {
    match value {
        Value::Object(object) => object
            .as_any()
            .and_then(|any| any.downcast_ref::<T>())
            .cloned()
            .ok_or_else(|| ConversionError::to::<T>(object.type_name())),
        other => Err(ConversionError::to::<T>(other.kind())),
    }
}
