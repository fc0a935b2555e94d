//! Whitelist error types
//!
//! Error classes:
//! - Configuration: the schema itself is wrong (never swallowed)
//! - Structure: the input has the wrong shape for the schema (never swallowed)
//! - Disallow: a value or field was rejected (swallowed by `omit_disallowed`)

use std::fmt;

use thiserror::Error;

use super::options::join_field;

/// Classification of whitelist failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Programming mistake in the schema
    Configuration,
    /// Input is not an array/object where the schema expects one
    Structure,
    /// A value or field was rejected
    Disallow,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::Configuration => write!(f, "CONFIGURATION"),
            ErrorClass::Structure => write!(f, "STRUCTURE"),
            ErrorClass::Disallow => write!(f, "DISALLOW"),
        }
    }
}

/// Result type for whitelist operations
pub type WhitelistResult<T> = Result<T, WhitelistError>;

/// Whitelist errors
#[derive(Debug, Error)]
pub enum WhitelistError {
    // ==================
    // Disallow
    // ==================
    /// A `false` leaf matched
    #[error("value not allowed")]
    NotAllowed { path: String },

    /// A validator rejected the value
    #[error("{message}")]
    Rejected { message: String, path: String },

    /// The input object has keys the schema does not declare
    #[error("{}", disallowed_fields_message(.path, .keys, .allowed))]
    DisallowedFields {
        /// Path of the object holding the keys
        path: String,
        /// Offending keys, unqualified
        keys: Vec<String>,
        /// Keys the schema declares
        allowed: Vec<String>,
    },

    /// Any other failure raised by a validator
    #[error("{0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),

    // ==================
    // Structure
    // ==================
    #[error("src is not an array")]
    NotAnArray { path: String },

    #[error("src is not an object")]
    NotAnObject { path: String },

    // ==================
    // Configuration
    // ==================
    #[error("allowed array not of length 1")]
    ArrayArity { path: String, len: usize },

    #[error("allowed parameter type not recognized")]
    Unrecognized { path: String },
}

impl WhitelistError {
    /// Create a validator rejection at the given path.
    ///
    /// Validators should pass `options.path()` so the error points at the
    /// rejected field.
    pub fn rejected(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Wrap an arbitrary error raised by a validator
    pub fn other(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other(Box::new(err))
    }

    /// Returns the error class
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotAllowed { .. }
            | Self::Rejected { .. }
            | Self::DisallowedFields { .. }
            | Self::Other(_) => ErrorClass::Disallow,
            Self::NotAnArray { .. } | Self::NotAnObject { .. } => ErrorClass::Structure,
            Self::ArrayArity { .. } | Self::Unrecognized { .. } => ErrorClass::Configuration,
        }
    }

    /// Returns the path at which the failure occurred.
    ///
    /// For `DisallowedFields` this is the path of the enclosing object; the
    /// offending keys are available through [`WhitelistError::keys`].
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::NotAllowed { path }
            | Self::Rejected { path, .. }
            | Self::DisallowedFields { path, .. }
            | Self::NotAnArray { path }
            | Self::NotAnObject { path }
            | Self::ArrayArity { path, .. }
            | Self::Unrecognized { path } => Some(path),
            Self::Other(_) => None,
        }
    }

    /// Returns the offending keys of a `DisallowedFields` error
    pub fn keys(&self) -> Option<&[String]> {
        match self {
            Self::DisallowedFields { keys, .. } => Some(keys),
            _ => None,
        }
    }

    /// Get error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAllowed { .. } => "WHITELIST_VALUE_NOT_ALLOWED",
            Self::Rejected { .. } => "WHITELIST_VALUE_REJECTED",
            Self::DisallowedFields { .. } => "WHITELIST_FIELDS_NOT_ALLOWED",
            Self::Other(_) => "WHITELIST_VALIDATOR_FAILED",
            Self::NotAnArray { .. } => "WHITELIST_EXPECTED_ARRAY",
            Self::NotAnObject { .. } => "WHITELIST_EXPECTED_OBJECT",
            Self::ArrayArity { .. } => "WHITELIST_ARRAY_ARITY",
            Self::Unrecognized { .. } => "WHITELIST_UNRECOGNIZED_SCHEMA",
        }
    }
}

fn disallowed_fields_message(path: &str, keys: &[String], allowed: &[String]) -> String {
    let qualified: Vec<String> = keys.iter().map(|k| join_field(path, k)).collect();
    let noun = if keys.len() == 1 {
        "field is"
    } else {
        "fields are"
    };
    format!(
        "The following {} not allowed: {}. Allowed fields: {}.",
        noun,
        qualified.join(", "),
        allowed.join(", ")
    )
}
