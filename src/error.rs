//! Error types for the sweepcfg configuration system.
//!
//! Loading a sweep document can fail in exactly two interesting ways: the
//! file is not well-formed YAML (a parse error, surfaced immediately), or it
//! is well-formed but violates a schema invariant (collected as a list so
//! every violation is reported at once).

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for sweepcfg operations.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Sweep file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The document is not well-formed YAML.
    #[error("Failed to parse sweep document: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// The document is well-formed but violates the schema.
    #[error("Sweep document failed schema validation: {}", format_schema_errors(.errors))]
    Schema {
        /// Every violation found, in document order.
        errors: Vec<SchemaError>,
    },

    /// An environment override carried an unparseable value.
    #[error("Invalid override {name}: {message}")]
    InvalidOverride {
        /// Name of the environment variable.
        name: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A single schema violation, tied to the field path that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// The field path that failed validation (e.g. `hyperparameters.lr`).
    pub field: String,
    /// The error message.
    pub message: String,
}

impl SchemaError {
    /// Creates a schema error for a specific field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_schema_errors(errors: &[SchemaError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for sweepcfg operations.
pub type Result<T> = std::result::Result<T, SweepError>;

impl SweepError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns the schema violations carried by this error, if any.
    #[must_use]
    pub fn schema_errors(&self) -> Option<&[SchemaError]> {
        match self {
            Self::Config(ConfigError::Schema { errors }) => Some(errors),
            _ => None,
        }
    }

    /// Returns true if this error is a parse (malformed document) error.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Config(ConfigError::Parse { .. }))
    }
}

impl ConfigError {
    /// Creates a parse error with an optional source location.
    #[must_use]
    pub fn parse(message: impl Into<String>, location: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            location,
        }
    }

    /// Creates a schema error carrying a single violation.
    #[must_use]
    pub fn schema_single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            errors: vec![SchemaError::new(field, message)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::new("hyperparameters.lr", "lower_bound must be positive");
        assert_eq!(
            err.to_string(),
            "hyperparameters.lr: lower_bound must be positive"
        );
    }

    #[test]
    fn test_schema_errors_accessor() {
        let err = SweepError::Config(ConfigError::Schema {
            errors: vec![
                SchemaError::new("dataset.pair_id", "must not be empty"),
                SchemaError::new(
                    "hyperparameters.lag",
                    "lower_bound must be less than upper_bound",
                ),
            ],
        });
        let errors = err.schema_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "dataset.pair_id");
    }

    #[test]
    fn test_parse_error_kind() {
        let err = SweepError::Config(ConfigError::parse("unexpected end of stream", None));
        assert!(err.is_parse_error());
        assert!(err.schema_errors().is_none());
    }
}
