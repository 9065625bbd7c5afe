// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for flexjson.
//!
//! Provides the decode error taxonomy:
//! - Container shape and type mismatches
//! - Missing keys and null values
//! - Numeric representability
//! - Polymorphic dispatch failures
//! - Aggregated multi-attempt failures

use thiserror::Error;

use super::accumulator::AccumulatedErrors;

/// Errors that can occur while decoding or encoding JSON documents.
///
/// Every positional variant carries a rendered document path (e.g.
/// `$.animals[2].kind`) so failures deep in a payload stay diagnosable.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The value at a position cannot produce the requested container shape.
    #[error("no {expected} container at {path}: found {found}")]
    NoContainer {
        /// Requested container shape ("keyed", "unkeyed")
        expected: &'static str,
        /// Type name of the value actually present
        found: &'static str,
        /// Document path of the position
        path: String,
    },

    /// The value at a position has the wrong type for the target.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Target type description
        expected: &'static str,
        /// Rendering of the offending value
        found: String,
        /// Document path of the position
        path: String,
    },

    /// A keyed container has no entry for the requested key.
    #[error("key '{key}' not found at {path}")]
    KeyNotFound {
        /// Missing key name
        key: String,
        /// Document path of the keyed container
        path: String,
    },

    /// A value was required but the position holds null (or an unkeyed
    /// container is exhausted).
    #[error("no value for {expected} at {path}")]
    ValueNotFound {
        /// Target type description
        expected: &'static str,
        /// Document path of the position
        path: String,
    },

    /// A numeric value cannot be losslessly represented.
    #[error("number {value} is not losslessly representable at {path}")]
    IrrepresentableNumber {
        /// Rendering of the offending number
        value: String,
        /// Document path of the position
        path: String,
    },

    /// Internal dynamic-cast failure during polymorphic dispatch.
    #[error("invalid type cast from {from} to {to}")]
    InvalidTypeCast {
        /// Source type name
        from: &'static str,
        /// Target type name
        to: &'static str,
    },

    /// No candidate matched the discriminant and no fallback was declared.
    #[error("no covariant of supertype {supertype} matches discriminant {discriminant}, and no fallback is declared")]
    NoFallbackCovariant {
        /// Supertype name
        supertype: &'static str,
        /// Rendering of the extracted discriminant
        discriminant: String,
    },

    /// An expected-empty recovery probe found content.
    #[error("expected an empty value at {path}, found {found}")]
    NotEmpty {
        /// Rendering of the non-empty value
        found: String,
        /// Document path of the position
        path: String,
    },

    /// Every attempt of a multi-attempt decode failed.
    #[error("{0}")]
    Aggregated(AccumulatedErrors),

    /// The raw document is not syntactically valid JSON.
    #[error("JSON parse error: {message}")]
    Parse {
        /// Parser error message
        message: String,
    },

    /// Subtype directory or resolver cache failure (lock poisoning,
    /// duplicate registration).
    #[error("registry error: {message}")]
    Registry {
        /// What went wrong
        message: String,
    },
}

impl DecodeError {
    /// Create a "no container" error.
    pub fn no_container(
        expected: &'static str,
        found: &'static str,
        path: impl Into<String>,
    ) -> Self {
        DecodeError::NoContainer {
            expected,
            found,
            path: path.into(),
        }
    }

    /// Create a type mismatch error.
    pub fn type_mismatch(
        expected: &'static str,
        found: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        DecodeError::TypeMismatch {
            expected,
            found: found.into(),
            path: path.into(),
        }
    }

    /// Create a "key not found" error.
    pub fn key_not_found(key: impl Into<String>, path: impl Into<String>) -> Self {
        DecodeError::KeyNotFound {
            key: key.into(),
            path: path.into(),
        }
    }

    /// Create a "value not found" error.
    pub fn value_not_found(expected: &'static str, path: impl Into<String>) -> Self {
        DecodeError::ValueNotFound {
            expected,
            path: path.into(),
        }
    }

    /// Create an irrepresentable number error.
    pub fn irrepresentable(value: impl Into<String>, path: impl Into<String>) -> Self {
        DecodeError::IrrepresentableNumber {
            value: value.into(),
            path: path.into(),
        }
    }

    /// Create an invalid type cast error.
    pub fn invalid_cast(from: &'static str, to: &'static str) -> Self {
        DecodeError::InvalidTypeCast { from, to }
    }

    /// Create a "no fallback covariant" error.
    pub fn no_fallback_covariant(supertype: &'static str, discriminant: impl Into<String>) -> Self {
        DecodeError::NoFallbackCovariant {
            supertype,
            discriminant: discriminant.into(),
        }
    }

    /// Create a "not empty" error.
    pub fn not_empty(found: impl Into<String>, path: impl Into<String>) -> Self {
        DecodeError::NotEmpty {
            found: found.into(),
            path: path.into(),
        }
    }

    /// Create a registry error.
    pub fn registry(message: impl Into<String>) -> Self {
        DecodeError::Registry {
            message: message.into(),
        }
    }

    /// Short kind name for this error, used for aggregate naming.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::NoContainer { .. } => "NoContainer",
            DecodeError::TypeMismatch { .. } => "TypeMismatch",
            DecodeError::KeyNotFound { .. } => "KeyNotFound",
            DecodeError::ValueNotFound { .. } => "ValueNotFound",
            DecodeError::IrrepresentableNumber { .. } => "IrrepresentableNumber",
            DecodeError::InvalidTypeCast { .. } => "InvalidTypeCast",
            DecodeError::NoFallbackCovariant { .. } => "NoFallbackCovariant",
            DecodeError::NotEmpty { .. } => "NotEmpty",
            DecodeError::Aggregated(_) => "AggregatedErrors",
            DecodeError::Parse { .. } => "Parse",
            DecodeError::Registry { .. } => "Registry",
        }
    }

    /// Whether this error kind is offered to the recovery policies.
    ///
    /// Only shape-level failures are recoverable: type and container
    /// mismatches, missing keys, and missing values. Everything else
    /// propagates immediately.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DecodeError::NoContainer { .. }
                | DecodeError::TypeMismatch { .. }
                | DecodeError::KeyNotFound { .. }
                | DecodeError::ValueNotFound { .. }
        )
    }

    /// Replace the rendered value in a type mismatch with a fuller
    /// rendering of the offending document fragment.
    pub(crate) fn with_rendered_value(self, rendered: String) -> Self {
        match self {
            DecodeError::TypeMismatch { expected, path, .. } => DecodeError::TypeMismatch {
                expected,
                found: rendered,
                path,
            },
            other => other,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DecodeError::NoContainer {
                expected,
                found,
                path,
            } => vec![
                ("expected", (*expected).to_string()),
                ("found", (*found).to_string()),
                ("path", path.clone()),
            ],
            DecodeError::TypeMismatch {
                expected,
                found,
                path,
            } => vec![
                ("expected", (*expected).to_string()),
                ("found", found.clone()),
                ("path", path.clone()),
            ],
            DecodeError::KeyNotFound { key, path } => {
                vec![("key", key.clone()), ("path", path.clone())]
            }
            DecodeError::ValueNotFound { expected, path } => vec![
                ("expected", (*expected).to_string()),
                ("path", path.clone()),
            ],
            DecodeError::IrrepresentableNumber { value, path } => {
                vec![("value", value.clone()), ("path", path.clone())]
            }
            DecodeError::InvalidTypeCast { from, to } => {
                vec![("from", (*from).to_string()), ("to", (*to).to_string())]
            }
            DecodeError::NoFallbackCovariant {
                supertype,
                discriminant,
            } => vec![
                ("supertype", (*supertype).to_string()),
                ("discriminant", discriminant.clone()),
            ],
            DecodeError::NotEmpty { found, path } => {
                vec![("found", found.clone()), ("path", path.clone())]
            }
            DecodeError::Aggregated(errors) => {
                vec![("attempts", errors.len().to_string())]
            }
            DecodeError::Parse { message } => vec![("message", message.clone())],
            DecodeError::Registry { message } => vec![("message", message.clone())],
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Parse {
            message: err.to_string(),
        }
    }
}

impl From<AccumulatedErrors> for DecodeError {
    fn from(errors: AccumulatedErrors) -> Self {
        DecodeError::Aggregated(errors)
    }
}

/// Result type for flexjson operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let err = DecodeError::type_mismatch("bool", "\"yes\"", "$.flag");
        assert_eq!(
            err.to_string(),
            "type mismatch at $.flag: expected bool, found \"yes\""
        );
        assert_eq!(err.kind(), "TypeMismatch");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_key_not_found_display() {
        let err = DecodeError::key_not_found("id", "$.user");
        assert_eq!(err.to_string(), "key 'id' not found at $.user");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_no_fallback_covariant_display() {
        let err = DecodeError::no_fallback_covariant("Animal", "\"unicorn\"");
        assert_eq!(
            err.to_string(),
            "no covariant of supertype Animal matches discriminant \"unicorn\", and no fallback is declared"
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_irrepresentable_number() {
        let err = DecodeError::irrepresentable("18446744073709551615", "$");
        assert_eq!(err.kind(), "IrrepresentableNumber");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_not_empty_display() {
        let err = DecodeError::not_empty("{\"a\":1}", "$.config");
        assert_eq!(
            err.to_string(),
            "expected an empty value at $.config, found {\"a\":1}"
        );
    }

    #[test]
    fn test_from_parse_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DecodeError = parse_err.into();
        assert!(matches!(err, DecodeError::Parse { .. }));
    }

    #[test]
    fn test_with_rendered_value() {
        let err = DecodeError::type_mismatch("number", "string", "$.n");
        let enriched = err.with_rendered_value("\"oops\"".to_string());
        assert_eq!(
            enriched.to_string(),
            "type mismatch at $.n: expected number, found \"oops\""
        );

        // Non-mismatch kinds pass through untouched.
        let err = DecodeError::key_not_found("k", "$");
        let same = err.clone().with_rendered_value("ignored".to_string());
        assert_eq!(same.to_string(), err.to_string());
    }

    #[test]
    fn test_log_fields() {
        let err = DecodeError::type_mismatch("bool", "1", "$.x");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0], ("expected", "bool".to_string()));
        assert_eq!(fields[1], ("found", "1".to_string()));
        assert_eq!(fields[2], ("path", "$.x".to_string()));
    }

    #[test]
    fn test_error_clone() {
        let err = DecodeError::value_not_found("string", "$.name");
        assert_eq!(err.clone().to_string(), err.to_string());
    }
}
