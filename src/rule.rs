//! The vocabulary for declaring how one target property is derived from the source.
//!
//! A [`MappingRule`] pairs a [`Strategy`] with the optional names the strategy
//! needs. Rules are plain `const` data so that derived shapes can keep them in
//! static descriptor tables.
//!
//! # Examples
//!
//! ```
//! use projector::rule::{MappingRule, Strategy, resolve_reference_key, resolve_source_name};
//!
//! let rule = MappingRule::new(Strategy::ByReferenceKey).with_source_property("married_to");
//!
//! assert_eq!(resolve_source_name(&rule, "husband_id"), "married_to");
//! assert_eq!(resolve_reference_key(&rule), "id");
//! ```

/// The reference key read off a referenced object when a rule names none.
pub const DEFAULT_REFERENCE_KEY: &str = "id";

/// How the value of a target property is obtained from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Leave the property untouched.
    Skip,
    /// Copy the source property's value verbatim.
    #[default]
    CopyAsIs,
    /// Read the referenced object and keep only its reference key.
    ByReferenceKey,
    /// Project the referenced object into the property's declared shape.
    NestedProjection,
    /// Collect the reference key of every element of a source collection.
    ElementwiseByReferenceKey,
    /// Project every element of a source collection into the declared element shape.
    ElementwiseNestedProjection,
}

impl Strategy {
    /// Returns `true` for the strategies that walk a source collection.
    #[must_use]
    pub const fn is_elementwise(self) -> bool {
        matches!(
            self,
            Self::ElementwiseByReferenceKey | Self::ElementwiseNestedProjection
        )
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Skip => "skip",
            Self::CopyAsIs => "copy",
            Self::ByReferenceKey => "reference",
            Self::NestedProjection => "nested",
            Self::ElementwiseByReferenceKey => "each_reference",
            Self::ElementwiseNestedProjection => "each_nested",
        };
        formatter.write_str(name)
    }
}

/// The declared strategy and parameters for one target property.
///
/// An empty override string behaves exactly like an absent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MappingRule {
    /// The strategy applied to the property.
    pub strategy: Strategy,
    /// Name of the source property to read, when it differs from the target's.
    pub source_property: Option<&'static str>,
    /// Name of the property read off a referenced object.
    pub reference_key: Option<&'static str>,
}

impl MappingRule {
    /// Creates a rule with the given strategy and no name overrides.
    #[must_use]
    pub const fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            source_property: None,
            reference_key: None,
        }
    }

    /// Reads the value from `name` on the source instead of the target property's name.
    #[must_use]
    pub const fn with_source_property(mut self, name: &'static str) -> Self {
        self.source_property = Some(name);
        self
    }

    /// Reads `name` off referenced objects instead of [`DEFAULT_REFERENCE_KEY`].
    #[must_use]
    pub const fn with_reference_key(mut self, name: &'static str) -> Self {
        self.reference_key = Some(name);
        self
    }
}

/// Returns the source property name the rule reads for `target_property`.
#[must_use]
pub fn resolve_source_name<'a>(rule: &MappingRule, target_property: &'a str) -> &'a str {
    match rule.source_property {
        Some(name) if !name.is_empty() => name,
        _ => target_property,
    }
}

/// Returns the property name read off referenced objects.
#[must_use]
pub fn resolve_reference_key(rule: &MappingRule) -> &'static str {
    match rule.reference_key {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_REFERENCE_KEY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_rule_copies_under_the_same_name() {
        let rule = MappingRule::default();

        assert_eq!(rule.strategy, Strategy::CopyAsIs);
        assert_eq!(resolve_source_name(&rule, "name"), "name");
    }

    #[rstest]
    #[case(None, "email")]
    #[case(Some(""), "email")]
    #[case(Some("login"), "login")]
    fn source_name_falls_back_to_target_name(
        #[case] source_property: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let rule = MappingRule {
            source_property,
            ..MappingRule::default()
        };

        assert_eq!(resolve_source_name(&rule, "email"), expected);
    }

    #[rstest]
    #[case(None, "id")]
    #[case(Some(""), "id")]
    #[case(Some("code"), "code")]
    fn reference_key_falls_back_to_id(
        #[case] reference_key: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let rule = MappingRule {
            reference_key,
            ..MappingRule::new(Strategy::ByReferenceKey)
        };

        assert_eq!(resolve_reference_key(&rule), expected);
    }

    #[test]
    fn only_collection_strategies_are_elementwise() {
        assert!(Strategy::ElementwiseByReferenceKey.is_elementwise());
        assert!(Strategy::ElementwiseNestedProjection.is_elementwise());
        assert!(!Strategy::NestedProjection.is_elementwise());
        assert!(!Strategy::Skip.is_elementwise());
    }
}
