//! Typed field readers/writers shared by the source and layer codecs.
//!
//! Optional fields are omitted from output entirely when unset; on input a
//! present field with the wrong token kind is a schema error, never a
//! silent skip.

use maplibre_geojson::SchemaError;
use serde_json::{Map, Value};

pub(crate) fn put(obj: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(v) = value {
        obj.insert(key.to_string(), v.into());
    }
}

pub(crate) fn get_bool(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(SchemaError::unexpected(field, "boolean", other)),
    }
}

pub(crate) fn get_f64(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<f64>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| SchemaError::unexpected(field, "number", v)),
    }
}

pub(crate) fn get_u32(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<u32>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| SchemaError::unexpected(field, "unsigned integer", v)),
    }
}

pub(crate) fn get_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::unexpected(field, "string", other)),
    }
}

pub(crate) fn req_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, SchemaError> {
    get_string(obj, field)?.ok_or(SchemaError::MissingField(field))
}

pub(crate) fn get_string_list(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Vec<String>>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(SchemaError::unexpected(field, "array of strings", other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(SchemaError::unexpected(field, "array of strings", other)),
    }
}

pub(crate) fn get_map(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<Map<String, Value>>, SchemaError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Object(m)) => Ok(Some(m.clone())),
        Some(other) => Err(SchemaError::unexpected(field, "object", other)),
    }
}

/// Opaque passthrough for fields whose inner shape this model does not own
/// (filter expressions, `promoteId`).
pub(crate) fn get_opaque(obj: &Map<String, Value>, field: &str) -> Option<Value> {
    obj.get(field).cloned()
}

pub(crate) fn string_list(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| Value::String(s.clone())).collect())
}
