//! Named casters from raw JSON values to typed fields
//!
//! Each caster accepts only the shapes listed on it and reports anything
//! else as a [`CastError`]. None of them ever sees JSON `null`; the
//! extractor turns that into absence before a caster runs.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::Payload;
use crate::error::CastError;
use crate::value_objects::Snowflake;

/// Integer field.
///
/// Accepts JSON integers, floats with no fractional part, and decimal
/// strings (surrounding whitespace ignored).
pub fn to_int(value: &Value) -> Result<i64, CastError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(CastError::OutOfRange {
                    value: n.to_string(),
                });
            }
            let f = n.as_f64().unwrap_or(f64::NAN);
            if !f.is_finite() || f.fract() != 0.0 {
                return Err(CastError::NotIntegral {
                    value: n.to_string(),
                });
            }
            // 2^63 is exactly representable, anything at or past it overflows
            if f < i64::MIN as f64 || f >= i64::MAX as f64 {
                return Err(CastError::OutOfRange {
                    value: n.to_string(),
                });
            }
            Ok(f as i64)
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CastError::wrong_type("integer", value)),
        other => Err(CastError::wrong_type("integer", other)),
    }
}

/// Boolean field. Accepts JSON booleans and the integers 0 and 1.
pub fn to_bool(value: &Value) -> Result<bool, CastError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(CastError::wrong_type("boolean", value)),
        },
        other => Err(CastError::wrong_type("boolean", other)),
    }
}

/// String field. Only JSON strings are accepted.
pub fn to_string(value: &Value) -> Result<String, CastError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(CastError::wrong_type("string", other)),
    }
}

/// List of strings, e.g. guild feature flags
pub fn to_string_list(value: &Value) -> Result<Vec<String>, CastError> {
    match value {
        Value::Array(items) => items.iter().map(to_string).collect(),
        other => Err(CastError::wrong_type("array of strings", other)),
    }
}

/// Snowflake ID. Accepts decimal strings and non-negative integers.
pub fn to_snowflake(value: &Value) -> Result<Snowflake, CastError> {
    match value {
        Value::String(s) => Ok(Snowflake::parse(s)?),
        Value::Number(n) => n
            .as_u64()
            .map(Snowflake::new)
            .ok_or_else(|| CastError::wrong_type("snowflake", value)),
        other => Err(CastError::wrong_type("snowflake", other)),
    }
}

/// ISO-8601 timestamp string, normalised to UTC
pub fn to_timestamp(value: &Value) -> Result<DateTime<Utc>, CastError> {
    match value {
        Value::String(s) => parse_iso8601(s),
        other => Err(CastError::wrong_type("ISO-8601 string", other)),
    }
}

/// Nested object handed to a resolution context
pub fn to_entity_ref(value: &Value) -> Result<&Payload, CastError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CastError::wrong_type("object", other)),
    }
}

/// Parse an ISO-8601 date-time with an explicit offset.
///
/// The platform sends `2020-01-01T00:00:00+00:00`, optionally with
/// fractional seconds. The result is converted to UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, CastError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CastError::InvalidTimestamp {
            value: s.to_string(),
            reason: e.to_string(),
        })
}
