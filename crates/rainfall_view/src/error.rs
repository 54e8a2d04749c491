//! Error types for rainfall_view

use thiserror::Error;

/// Errors raised while building a view configuration
///
/// These are fatal at construction time: a view is never created from an
/// invalid configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Direction code that names no direction
    #[error("Undefined direction: {0}")]
    UndefinedDirection(i64),

    /// Interpolator code that names no easing curve
    #[error("Undefined interpolator: {0}")]
    UndefinedInterpolator(i64),

    /// Attribute holds a value of the wrong kind
    #[error("Attribute `{name}` expects {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
    },

    /// Attribute value is outside its allowed range
    #[error("Attribute `{name}` out of range: {reason}")]
    OutOfRange { name: String, reason: &'static str },

    /// Attribute source could not be parsed
    #[error("Failed to parse attributes: {0}")]
    Parse(String),
}

/// Result type for rainfall_view operations
pub type Result<T> = std::result::Result<T, ConfigError>;
