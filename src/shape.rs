//! Target shapes: constructible types with a table of writable properties.
//!
//! A [`Projection`] describes itself through [`Projection::PROPERTIES`], one
//! [`Property`] per field in declaration order. Each entry carries the
//! exclusion marker, the attached [`MappingRule`] (if any), and a [`Setter`]
//! that knows the field's static type. The setter is what lets the engine
//! recurse into the *declared* type of a property rather than the source's
//! runtime type.
//!
//! `#[derive(Projection)]` builds this table from field attributes. Writing it
//! by hand looks like this:
//!
//! ```
//! use projector::shape::{Property, Setter};
//! use projector::{ConversionError, FromValue, MappingRule, Projection, ProjectionError, Strategy, Value};
//!
//! #[derive(Default)]
//! struct PersonDto {
//!     email: String,
//!     husband_id: u64,
//! }
//!
//! impl PersonDto {
//!     fn set_email(target: &mut Self, value: Value<'_>) -> Result<(), ConversionError> {
//!         target.email = FromValue::from_value(value)?;
//!         Ok(())
//!     }
//!
//!     fn set_husband_id(target: &mut Self, value: Value<'_>) -> Result<(), ConversionError> {
//!         target.husband_id = FromValue::from_value(value)?;
//!         Ok(())
//!     }
//! }
//!
//! impl Projection for PersonDto {
//!     const PROPERTIES: &'static [Property<Self>] = &[
//!         Property::new("email", Setter::Assign(Self::set_email))
//!             .with_rule(MappingRule::new(Strategy::CopyAsIs).with_source_property("login")),
//!         Property::new("husband_id", Setter::Assign(Self::set_husband_id)).with_rule(
//!             MappingRule::new(Strategy::ByReferenceKey).with_source_property("married_to"),
//!         ),
//!     ];
//!
//!     fn construct() -> Result<Self, ProjectionError> {
//!         Ok(Self::default())
//!     }
//! }
//!
//! assert_eq!(PersonDto::PROPERTIES.len(), 2);
//! ```

use crate::access::Projectable;
use crate::engine::Descent;
use crate::error::{ConversionError, ProjectionError};
use crate::rule::{MappingRule, Strategy};
use crate::value::Value;

/// Writes a converted value into a property.
pub type AssignFn<T> = fn(&mut T, Value<'_>) -> Result<(), ConversionError>;

/// Projects a nested source into a property's declared shape and writes the result.
pub type ProjectFn<T> = fn(&mut T, &Descent<'_>, &dyn Projectable) -> Result<(), ProjectionError>;

/// How a property is written.
///
/// The variant is fixed by the field's type: only a field whose declared type
/// is itself a [`Projection`] can offer [`Setter::Project`], and only a `Vec`
/// of projections can offer [`Setter::AppendProjected`].
pub enum Setter<T> {
    /// Replace the property with a converted value.
    Assign(AssignFn<T>),
    /// Replace the property with the projection of a nested source.
    Project(ProjectFn<T>),
    /// Push a converted value onto the collection the constructed target holds.
    Append(AssignFn<T>),
    /// Push the projection of a source element onto the collection.
    AppendProjected(ProjectFn<T>),
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Setter<T> {}

impl<T> std::fmt::Debug for Setter<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Assign(_) => "Assign",
            Self::Project(_) => "Project",
            Self::Append(_) => "Append",
            Self::AppendProjected(_) => "AppendProjected",
        };
        formatter.write_str(name)
    }
}

/// Descriptor of one property of a target shape.
pub struct Property<T> {
    /// The property name, also the default source property name.
    pub name: &'static str,
    /// The exclusion marker. Excluded properties are never read or written.
    pub excluded: bool,
    /// The attached rule. `None` behaves like [`MappingRule::default`].
    pub rule: Option<MappingRule>,
    /// How to write the property. `None` means it is read-only.
    pub setter: Option<Setter<T>>,
}

impl<T> Property<T> {
    /// A writable property with no rule attached.
    #[must_use]
    pub const fn new(name: &'static str, setter: Setter<T>) -> Self {
        Self {
            name,
            excluded: false,
            rule: None,
            setter: Some(setter),
        }
    }

    /// A property without a setter; it is not part of the projected surface.
    #[must_use]
    pub const fn read_only(name: &'static str) -> Self {
        Self {
            name,
            excluded: false,
            rule: None,
            setter: None,
        }
    }

    /// Attaches a rule.
    #[must_use]
    pub const fn with_rule(mut self, rule: MappingRule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Marks the property as excluded from projection.
    #[must_use]
    pub const fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    /// The attached rule, or the implicit copy rule.
    #[must_use]
    pub fn effective_rule(&self) -> MappingRule {
        self.rule.unwrap_or_default()
    }

    /// The strategy the engine will apply, taking the exclusion marker into account.
    #[must_use]
    pub fn effective_strategy(&self) -> Strategy {
        if self.excluded {
            Strategy::Skip
        } else {
            self.effective_rule().strategy
        }
    }
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Property<T> {}

impl<T> std::fmt::Debug for Property<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Property")
            .field("name", &self.name)
            .field("excluded", &self.excluded)
            .field("rule", &self.rule)
            .field("setter", &self.setter)
            .finish()
    }
}

/// A target shape the engine can construct and populate.
pub trait Projection: Sized + 'static {
    /// The properties of the shape in declaration order.
    const PROPERTIES: &'static [Property<Self>];

    /// Creates a fresh, default-initialised instance.
    ///
    /// Collection properties targeted by elementwise rules must already hold an
    /// empty collection here; the engine appends to it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::Construction`] if no instance can be created.
    fn construct() -> Result<Self, ProjectionError>;

    /// The name used for this shape in error messages and logs.
    fn shape_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
