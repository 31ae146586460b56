//! Marshalling errors - failures raised while turning payloads into entities
//!
//! Absence of an optional field is never an error. Only three things are:
//! a present value of the wrong shape, a required field that is missing,
//! and whatever the resolution context reports for nested entities.

use thiserror::Error;

use crate::value_objects::SnowflakeParseError;

/// Result type for marshalling operations
pub type MarshalResult<T> = Result<T, MarshalError>;

/// Failure of a single caster applied to a single raw value.
///
/// Casters know nothing about field names; the extractor attaches the key
/// when it wraps this into [`MarshalError::Cast`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastError {
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} is not a whole number")]
    NotIntegral { value: String },

    #[error("integer {value} is out of range")]
    OutOfRange { value: String },

    #[error("invalid ISO-8601 timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error(transparent)]
    InvalidSnowflake(#[from] SnowflakeParseError),
}

impl CastError {
    pub(crate) fn wrong_type(expected: &'static str, value: &serde_json::Value) -> Self {
        Self::WrongType {
            expected,
            found: json_kind(value),
        }
    }
}

/// Errors surfaced by the extractor, the entity builders and resolution contexts
#[derive(Debug, Error)]
pub enum MarshalError {
    #[error("invalid value for field `{field}`: {source}")]
    Cast {
        field: String,
        #[source]
        source: CastError,
    },

    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("payload is not a JSON object (found {0})")]
    NotAnObject(&'static str),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not resolve {kind}: {reason}")]
    Resolution { kind: &'static str, reason: String },
}

impl MarshalError {
    /// Attach a field name to a caster failure
    pub fn cast(field: impl Into<String>, source: CastError) -> Self {
        Self::Cast {
            field: field.into(),
            source,
        }
    }

    /// Create a resolution failure for the given entity kind
    pub fn resolution(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Resolution {
            kind,
            reason: reason.into(),
        }
    }

    /// Get an error code string for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cast { .. } => "INVALID_FIELD",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NotAnObject(_) => "NOT_AN_OBJECT",
            Self::Json(_) => "MALFORMED_JSON",
            Self::Resolution { .. } => "RESOLUTION_FAILED",
        }
    }

    /// Name of the offending field, when the error is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Cast { field, .. } | Self::MissingField(field) => Some(field.as_str()),
            _ => None,
        }
    }

    /// Check if this error came from the payload itself rather than the context
    pub fn is_payload_error(&self) -> bool {
        !matches!(self, Self::Resolution { .. })
    }
}

/// Human-readable name of a JSON value's kind
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;

    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
