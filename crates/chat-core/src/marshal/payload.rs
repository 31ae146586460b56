//! Raw payload type and decoding

use serde_json::Value;
use tracing::trace;

use crate::error::{marshal_error::json_kind, MarshalError, MarshalResult};

/// Untyped JSON object received from the remote API.
///
/// Treated as untrusted input; unknown keys are ignored by every builder.
pub type Payload = serde_json::Map<String, Value>;

/// Decode JSON text into a payload. The top level must be an object.
pub fn parse_payload(text: &str) -> MarshalResult<Payload> {
    let value: Value = serde_json::from_str(text)?;
    into_payload(value)
}

/// Unwrap an already decoded JSON value into a payload
pub fn into_payload(value: Value) -> MarshalResult<Payload> {
    match value {
        Value::Object(map) => {
            trace!(keys = map.len(), "Decoded payload");
            Ok(map)
        }
        other => Err(MarshalError::NotAnObject(json_kind(&other))),
    }
}
