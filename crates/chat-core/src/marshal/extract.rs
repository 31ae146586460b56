//! Safe field extraction

use serde_json::Value;

use super::{casters, Payload};
use crate::error::{CastError, MarshalError, MarshalResult};

/// Read `key` from `payload` through `caster`.
///
/// A missing key or a JSON `null` yields `Ok(None)` without invoking the
/// caster. A present value is always handed to the caster, and its failure
/// is returned as [`MarshalError::Cast`] naming the key.
pub fn get<'a, T, F>(payload: &'a Payload, key: &str, caster: F) -> MarshalResult<Option<T>>
where
    F: FnOnce(&'a Value) -> Result<T, CastError>,
{
    match payload.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => caster(value)
            .map(Some)
            .map_err(|source| MarshalError::cast(key, source)),
    }
}

/// Like [`get`], with a caller-chosen default for absence
pub fn get_or<'a, T, F>(payload: &'a Payload, key: &str, caster: F, default: T) -> MarshalResult<T>
where
    F: FnOnce(&'a Value) -> Result<T, CastError>,
{
    Ok(get(payload, key, caster)?.unwrap_or(default))
}

/// Like [`get`], defaulting absence to the type's zero value (`0`, `false`, ...)
pub fn get_or_default<'a, T, F>(payload: &'a Payload, key: &str, caster: F) -> MarshalResult<T>
where
    T: Default,
    F: FnOnce(&'a Value) -> Result<T, CastError>,
{
    Ok(get(payload, key, caster)?.unwrap_or_default())
}

/// Like [`get`], but absence is a [`MarshalError::MissingField`]
pub fn require<'a, T, F>(payload: &'a Payload, key: &str, caster: F) -> MarshalResult<T>
where
    F: FnOnce(&'a Value) -> Result<T, CastError>,
{
    get(payload, key, caster)?.ok_or_else(|| MarshalError::MissingField(key.to_string()))
}

/// Borrow a nested object, if present
pub fn get_object<'a>(payload: &'a Payload, key: &str) -> MarshalResult<Option<&'a Payload>> {
    get(payload, key, casters::to_entity_ref)
}
