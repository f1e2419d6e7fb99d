//! Value validation errors
//!
//! Error codes:
//! - IDL_INVALID_ARGUMENT
//! - IDL_NUMERIC_OVERFLOW
//! - IDL_REQUIRED_FIELD_MISSING
//! - IDL_UNSUPPORTED_OPERATION
//!
//! Every failure aborts the whole construct/replace call. No partially built
//! instance is ever returned.

use std::fmt;

use thiserror::Error;

/// Result type for value operations
pub type ValueResult<T> = Result<T, ValueError>;

/// Coarse classification of a [`ValueError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueErrorKind {
    /// Wrong type, unknown name, positional argument, ambiguous union
    InvalidArgument,
    /// Integral value outside the declared width
    NumericOverflow,
    /// Required field resolved to absent
    RequiredFieldMissing,
    /// Operation not defined for this type
    UnsupportedOperation,
}

impl ValueErrorKind {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ValueErrorKind::InvalidArgument => "IDL_INVALID_ARGUMENT",
            ValueErrorKind::NumericOverflow => "IDL_NUMERIC_OVERFLOW",
            ValueErrorKind::RequiredFieldMissing => "IDL_REQUIRED_FIELD_MISSING",
            ValueErrorKind::UnsupportedOperation => "IDL_UNSUPPORTED_OPERATION",
        }
    }
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by construction, replace and comparison of values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid argument at {path}: {reason}")]
    InvalidArgument { path: String, reason: String },

    #[error("numeric overflow at {path}: {value} does not fit {width}")]
    NumericOverflow {
        path: String,
        width: String,
        value: String,
    },

    #[error("required field {type_name}.{field} is missing")]
    RequiredFieldMissing { type_name: String, field: String },

    #[error("{operation} is not supported for {type_name}")]
    UnsupportedOperation {
        type_name: String,
        operation: &'static str,
    },
}

impl ValueError {
    /// Create an invalid argument error
    pub fn invalid_argument(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ValueError::InvalidArgument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        ValueError::InvalidArgument {
            path: path.into(),
            reason: format!("expected {}, got {}", expected, actual),
        }
    }

    /// Create a numeric overflow error
    pub fn overflow(
        path: impl Into<String>,
        width: impl fmt::Display,
        value: impl fmt::Display,
    ) -> Self {
        ValueError::NumericOverflow {
            path: path.into(),
            width: width.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a required field missing error
    pub fn required_missing(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        ValueError::RequiredFieldMissing {
            type_name: type_name.into(),
            field: field.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(type_name: impl Into<String>, operation: &'static str) -> Self {
        ValueError::UnsupportedOperation {
            type_name: type_name.into(),
            operation,
        }
    }

    /// Returns the error classification
    pub fn kind(&self) -> ValueErrorKind {
        match self {
            ValueError::InvalidArgument { .. } => ValueErrorKind::InvalidArgument,
            ValueError::NumericOverflow { .. } => ValueErrorKind::NumericOverflow,
            ValueError::RequiredFieldMissing { .. } => ValueErrorKind::RequiredFieldMissing,
            ValueError::UnsupportedOperation { .. } => ValueErrorKind::UnsupportedOperation,
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

/// Joins a field or element path.
pub(crate) fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}
