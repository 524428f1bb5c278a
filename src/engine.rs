//! The mapping engine.
//!
//! [`Projector::project`] constructs a fresh target and walks its
//! [`PROPERTIES`](Projection::PROPERTIES) in declaration order. For every
//! writable, non-excluded property it resolves the rule, reads from the source
//! by name, and applies the strategy:
//!
//! | Strategy | Source value | Effect |
//! |----------|--------------|--------|
//! | `CopyAsIs` | anything | converted and assigned |
//! | `ByReferenceKey` | object | its reference key is assigned |
//! | `NestedProjection` | object | projected into the declared type and assigned |
//! | `ElementwiseByReferenceKey` | list of objects | each reference key appended |
//! | `ElementwiseNestedProjection` | list of objects | each projection appended |
//! | `Skip` | not read | nothing |
//!
//! A `Null` source value leaves reference, nested, and elementwise properties
//! at whatever [`Projection::construct`] put there. Every other failure aborts
//! the whole projection, nested levels included; the caller never sees a
//! partially populated target.
//!
//! The engine holds no state besides its configuration, so one [`Projector`]
//! can serve any number of threads.

use tracing::{debug, debug_span, trace, warn};

use crate::access::Projectable;
use crate::config::ProjectorConfig;
use crate::error::{ConversionError, ProjectionError};
use crate::rule::{MappingRule, Strategy, resolve_reference_key, resolve_source_name};
use crate::shape::{AssignFn, ProjectFn, Projection, Property, Setter};
use crate::value::Value;

/// Projects source objects onto target shapes.
///
/// # Examples
///
/// ```
/// use projector::{Projectable, Projection, Projector};
///
/// #[derive(Projectable)]
/// struct Person {
///     name: String,
///     login: String,
/// }
///
/// #[derive(Default, Projection)]
/// struct PersonDto {
///     name: String,
///     #[projection(source = "login")]
///     email: String,
/// }
///
/// let person = Person { name: "Ann".into(), login: "a@x.com".into() };
/// let dto: PersonDto = Projector::new().project(&person).unwrap();
///
/// assert_eq!(dto.name, "Ann");
/// assert_eq!(dto.email, "a@x.com");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Projector {
    config: ProjectorConfig,
}

impl Projector {
    /// Creates a projector with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(ProjectorConfig::new())
    }

    /// Creates a projector with the given configuration.
    #[must_use]
    pub const fn with_config(config: ProjectorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Projects `source` onto a new instance of `T`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProjectionError`] raised anywhere in the object
    /// graph; see the [module documentation](self) for what counts as a failure.
    pub fn project<T: Projection>(&self, source: &dyn Projectable) -> Result<T, ProjectionError> {
        Descent {
            projector: self,
            depth: 0,
        }
        .project(source)
    }
}

/// Projects `source` onto a new instance of `T` with the default configuration.
///
/// # Errors
///
/// See [`Projector::project`].
pub fn project<T: Projection>(source: &dyn Projectable) -> Result<T, ProjectionError> {
    Projector::new().project(source)
}

/// One level of an ongoing projection.
///
/// Nested setters receive the descent for the level below them and call
/// [`Descent::project`] with the property's declared type.
#[derive(Debug, Clone, Copy)]
pub struct Descent<'p> {
    projector: &'p Projector,
    depth: usize,
}

impl Descent<'_> {
    /// How many nested projections sit above this level.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Projects `source` onto a new instance of `T` at this depth.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::DepthLimitExceeded`] past the configured
    /// limit, and otherwise whatever the projection of `source` fails with.
    pub fn project<T: Projection>(&self, source: &dyn Projectable) -> Result<T, ProjectionError> {
        let limit = self.projector.config.max_depth;
        if self.depth > limit {
            warn!(shape = T::shape_name(), limit, "projection depth limit exceeded");
            return Err(ProjectionError::DepthLimitExceeded {
                shape: T::shape_name(),
                limit,
            });
        }

        let span = debug_span!(
            "project",
            shape = T::shape_name(),
            source = source.type_name(),
            depth = self.depth
        );
        let _entered = span.enter();

        let mut target = T::construct()?;
        let below = Descent {
            projector: self.projector,
            depth: self.depth + 1,
        };
        for property in T::PROPERTIES {
            project_property(&mut target, property, source, &below)?;
        }
        Ok(target)
    }
}

fn project_property<T: Projection>(
    target: &mut T,
    property: &Property<T>,
    source: &dyn Projectable,
    below: &Descent<'_>,
) -> Result<(), ProjectionError> {
    let Some(setter) = property.setter else {
        trace!(property = property.name, "read-only property");
        return Ok(());
    };
    if property.excluded {
        trace!(property = property.name, "excluded property");
        return Ok(());
    }

    let rule = property.effective_rule();
    let source_name = resolve_source_name(&rule, property.name);
    trace!(
        property = property.name,
        strategy = %rule.strategy,
        source = source_name,
        "projecting property"
    );

    match rule.strategy {
        Strategy::Skip => Ok(()),
        Strategy::CopyAsIs => {
            let assign = assign_setter(property, setter, rule.strategy)?;
            let value = source.property(source_name)?;
            write(target, property, assign, value)
        }
        Strategy::ByReferenceKey => {
            let assign = assign_setter(property, setter, rule.strategy)?;
            match source.property(source_name)? {
                Value::Null => {
                    leave_unset(property, source_name);
                    Ok(())
                }
                Value::Object(referenced) => {
                    let key = referenced.property(resolve_reference_key(&rule))?;
                    write(target, property, assign, key)
                }
                other => Err(not_dereferenceable(source, source_name, &rule, &other)),
            }
        }
        Strategy::NestedProjection => {
            let Setter::Project(nest) = setter else {
                return Err(unusable_setter(property, setter, rule.strategy));
            };
            match source.property(source_name)? {
                Value::Null => {
                    leave_unset(property, source_name);
                    Ok(())
                }
                Value::Object(nested) => nest(target, below, nested),
                other => Err(ProjectionError::type_mismatch(
                    T::shape_name(),
                    property.name,
                    ConversionError {
                        expected: "object",
                        found: other.kind(),
                    },
                )),
            }
        }
        Strategy::ElementwiseByReferenceKey => {
            let Setter::Append(append) = setter else {
                return Err(unusable_setter(property, setter, rule.strategy));
            };
            let Some(elements) = collection_elements(property, source.property(source_name)?)? else {
                leave_unset(property, source_name);
                return Ok(());
            };
            let key = resolve_reference_key(&rule);
            for element in elements {
                match element {
                    Value::Object(referenced) => {
                        write(target, property, append, referenced.property(key)?)?;
                    }
                    other => return Err(not_dereferenceable(source, source_name, &rule, &other)),
                }
            }
            Ok(())
        }
        Strategy::ElementwiseNestedProjection => {
            let Setter::AppendProjected(append) = setter else {
                return Err(ProjectionError::ElementTypeResolution {
                    shape: T::shape_name(),
                    property: property.name.to_string(),
                });
            };
            let Some(elements) = collection_elements(property, source.property(source_name)?)? else {
                leave_unset(property, source_name);
                return Ok(());
            };
            for element in elements {
                append_projected(target, property, append, below, &element)?;
            }
            Ok(())
        }
    }
}

fn assign_setter<T: Projection>(
    property: &Property<T>,
    setter: Setter<T>,
    strategy: Strategy,
) -> Result<AssignFn<T>, ProjectionError> {
    match setter {
        Setter::Assign(assign) => Ok(assign),
        other => Err(unusable_setter(property, other, strategy)),
    }
}

fn write<T: Projection>(
    target: &mut T,
    property: &Property<T>,
    assign: AssignFn<T>,
    value: Value<'_>,
) -> Result<(), ProjectionError> {
    assign(target, value)
        .map_err(|mismatch| ProjectionError::type_mismatch(T::shape_name(), property.name, mismatch))
}

fn append_projected<T: Projection>(
    target: &mut T,
    property: &Property<T>,
    append: ProjectFn<T>,
    below: &Descent<'_>,
    element: &Value<'_>,
) -> Result<(), ProjectionError> {
    match element {
        Value::Object(nested) => append(target, below, *nested),
        other => Err(ProjectionError::type_mismatch(
            T::shape_name(),
            property.name,
            ConversionError {
                expected: "object",
                found: other.kind(),
            },
        )),
    }
}

/// `None` when the source collection is absent.
fn collection_elements<'a, T: Projection>(
    property: &Property<T>,
    value: Value<'a>,
) -> Result<Option<Vec<Value<'a>>>, ProjectionError> {
    match value {
        Value::Null => Ok(None),
        Value::List(elements) => Ok(Some(elements)),
        other => Err(ProjectionError::type_mismatch(
            T::shape_name(),
            property.name,
            ConversionError {
                expected: "list",
                found: other.kind(),
            },
        )),
    }
}

fn leave_unset<T>(property: &Property<T>, source_name: &str) {
    debug!(
        property = property.name,
        source = source_name,
        "source value absent, property left unset"
    );
}

fn unusable_setter<T: Projection>(
    property: &Property<T>,
    setter: Setter<T>,
    strategy: Strategy,
) -> ProjectionError {
    ProjectionError::inaccessible(
        T::shape_name(),
        property.name,
        format!("a {setter:?} setter cannot apply the `{strategy}` strategy"),
    )
}

fn not_dereferenceable(
    source: &dyn Projectable,
    source_name: &str,
    rule: &MappingRule,
    value: &Value<'_>,
) -> ProjectionError {
    ProjectionError::inaccessible(
        source.type_name(),
        source_name,
        format!(
            "cannot read `{}` off a {}",
            resolve_reference_key(rule),
            value.kind()
        ),
    )
}
