//! Error types for projection.
//!
//! A projection either succeeds completely or fails with exactly one
//! [`ProjectionError`]. The variant tells the caller which contract was broken:
//!
//! - [`ProjectionError::Construction`]: the target shape could not be instantiated
//! - [`ProjectionError::PropertyAccess`]: a property is missing or cannot be used as the rule requires
//! - [`ProjectionError::TypeMismatch`]: a source value does not fit the target property's type
//! - [`ProjectionError::ElementTypeResolution`]: a collection property has no known element shape
//! - [`ProjectionError::DepthLimitExceeded`]: the source graph nests deeper than allowed
//!
//! # Examples
//!
//! ```
//! use projector::ProjectionError;
//!
//! let error = ProjectionError::unknown_property("Person", "login");
//! assert!(error.is_property_access());
//! assert_eq!(error.to_string(), "property `login` of Person is not accessible: no such property");
//! ```

use thiserror::Error;

/// A value could not be converted into the requested Rust type.
///
/// This is the raw failure of a single conversion. The engine lifts it into
/// [`ProjectionError::TypeMismatch`] together with the property it was writing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}")]
pub struct ConversionError {
    /// The Rust type that was requested.
    pub expected: &'static str,
    /// The kind of value that was supplied.
    pub found: &'static str,
}

impl ConversionError {
    /// Creates a conversion error for the target type `T`.
    #[must_use]
    pub fn to<T: ?Sized>(found: &'static str) -> Self {
        Self {
            expected: std::any::type_name::<T>(),
            found,
        }
    }
}

/// Errors that abort a projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The target shape could not be instantiated.
    #[error("cannot construct {shape}: {reason}")]
    Construction {
        /// The shape being constructed.
        shape: &'static str,
        /// Why construction failed.
        reason: String,
    },

    /// A property does not exist or is not usable as the resolved rule requires.
    #[error("property `{property}` of {shape} is not accessible: {reason}")]
    PropertyAccess {
        /// The type the property was looked up on.
        shape: &'static str,
        /// The property name.
        property: String,
        /// What went wrong.
        reason: String,
    },

    /// A source value cannot be assigned to the target property.
    #[error("cannot assign to `{property}` of {shape}: {source}")]
    TypeMismatch {
        /// The target shape.
        shape: &'static str,
        /// The target property.
        property: String,
        /// The failed conversion.
        source: ConversionError,
    },

    /// An elementwise projection is declared on a property with no known element shape.
    #[error("cannot resolve the element type of `{property}` on {shape}")]
    ElementTypeResolution {
        /// The target shape.
        shape: &'static str,
        /// The collection property.
        property: String,
    },

    /// Nested projection went deeper than the configured limit.
    #[error("projection of {shape} exceeds the depth limit of {limit}")]
    DepthLimitExceeded {
        /// The shape that would have been projected past the limit.
        shape: &'static str,
        /// The configured limit.
        limit: usize,
    },
}

impl ProjectionError {
    /// Creates an error for a property name that the object does not expose.
    #[must_use]
    pub fn unknown_property(shape: &'static str, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            shape,
            property: property.into(),
            reason: "no such property".to_string(),
        }
    }

    /// Creates a property access error with a custom reason.
    #[must_use]
    pub fn inaccessible(
        shape: &'static str,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PropertyAccess {
            shape,
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Creates a construction error.
    #[must_use]
    pub fn construction(shape: &'static str, reason: impl Into<String>) -> Self {
        Self::Construction {
            shape,
            reason: reason.into(),
        }
    }

    /// Attaches the target property to a failed conversion.
    #[must_use]
    pub fn type_mismatch(
        shape: &'static str,
        property: impl Into<String>,
        source: ConversionError,
    ) -> Self {
        Self::TypeMismatch {
            shape,
            property: property.into(),
            source,
        }
    }

    /// Returns `true` if this is a construction error.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(self, Self::Construction { .. })
    }

    /// Returns `true` if this is a property access error.
    #[must_use]
    pub const fn is_property_access(&self) -> bool {
        matches!(self, Self::PropertyAccess { .. })
    }

    /// Returns `true` if this is a type mismatch.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns `true` if this is an element type resolution error.
    #[must_use]
    pub const fn is_element_type_resolution(&self) -> bool {
        matches!(self, Self::ElementTypeResolution { .. })
    }

    /// Returns `true` if the depth limit was exceeded.
    #[must_use]
    pub const fn is_depth_limit_exceeded(&self) -> bool {
        matches!(self, Self::DepthLimitExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_property_and_types() {
        let error = ProjectionError::type_mismatch(
            "PersonDto",
            "id",
            ConversionError::to::<i64>("string"),
        );

        assert!(error.is_type_mismatch());
        assert_eq!(
            error.to_string(),
            "cannot assign to `id` of PersonDto: expected i64, found string"
        );
    }

    #[test]
    fn predicates_match_only_their_variant() {
        let error = ProjectionError::construction("AddressDto", "no default");

        assert!(error.is_construction());
        assert!(!error.is_property_access());
        assert!(!error.is_depth_limit_exceeded());
    }
}
