//! Projector configuration.
//!
//! The only tunable is the recursion bound. Source graphs are walked without
//! cycle detection, so [`ProjectorConfig::max_depth`] is what turns a cyclic
//! graph under a nested rule into a [`DepthLimitExceeded`] error instead of a
//! stack overflow.
//!
//! [`DepthLimitExceeded`]: crate::ProjectionError::DepthLimitExceeded
//!
//! # Example
//!
//! ```rust
//! use projector::config::ProjectorConfig;
//!
//! let config = ProjectorConfig::new().with_max_depth(8);
//! assert_eq!(config.max_depth, 8);
//! ```

use std::env;

use thiserror::Error;

/// Environment variable read by [`ProjectorConfig::from_env`].
pub const MAX_DEPTH_VAR: &str = "PROJECTOR_MAX_DEPTH";

/// Nesting depth allowed when no limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Settings shared by every projection a [`Projector`](crate::Projector) performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectorConfig {
    /// How many levels of nested projection may sit below the top-level target.
    ///
    /// `0` allows only flat projection.
    pub max_depth: usize,
}

impl ProjectorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROJECTOR_MAX_DEPTH`: nesting limit (optional, default: 64)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_depth = match lookup(MAX_DEPTH_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|error| ConfigError::InvalidValue {
                    key: MAX_DEPTH_VAR.to_string(),
                    message: error.to_string(),
                })?,
            None => DEFAULT_MAX_DEPTH,
        };

        Ok(Self { max_depth })
    }
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = ProjectorConfig::from_lookup(|_| None).unwrap();

        assert_eq!(config, ProjectorConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("12", 12)]
    #[case(" 7 ", 7)]
    fn max_depth_is_parsed(#[case] raw: &str, #[case] expected: usize) {
        let config = ProjectorConfig::from_lookup(|key| {
            (key == MAX_DEPTH_VAR).then(|| raw.to_string())
        })
        .unwrap();

        assert_eq!(config.max_depth, expected);
    }

    #[rstest]
    #[case("-1")]
    #[case("deep")]
    #[case("")]
    fn invalid_max_depth_is_reported(#[case] raw: &str) {
        let error = ProjectorConfig::from_lookup(|_| Some(raw.to_string())).unwrap_err();

        let ConfigError::InvalidValue { key, .. } = error;
        assert_eq!(key, MAX_DEPTH_VAR);
    }
}
