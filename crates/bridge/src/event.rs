//! Interop event payloads raised by the map and decoded on this side.

use maplibre_geojson::lnglat::{decode_lnglat, encode_lnglat};
use maplibre_geojson::{LngLat, SchemaError};
use serde_json::{Map, Value};

use crate::query::{decode_queried_feature, encode_queried_feature, QueriedFeature};

/// A screen-space pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointLike {
    pub x: f64,
    pub y: f64,
}

/// A pointer event on the map canvas, optionally carrying the rendered
/// features under the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMouseEvent {
    /// The event name, e.g. `click` or `mousemove`.
    pub event_type: String,
    pub lng_lat: LngLat,
    pub point: PointLike,
    pub default_prevented: Option<bool>,
    pub features: Vec<QueriedFeature>,
}

/// An event on a marker: `click`, `dragstart`, `drag`, or `dragend`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerEvent {
    pub event_type: String,
    pub lng_lat: LngLat,
}

fn decode_point(field: &'static str, v: &Value) -> Result<PointLike, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected(field, "object", v))?;
    let x = obj
        .get("x")
        .and_then(Value::as_f64)
        .ok_or(SchemaError::MissingField("x"))?;
    let y = obj
        .get("y")
        .and_then(Value::as_f64)
        .ok_or(SchemaError::MissingField("y"))?;
    Ok(PointLike { x, y })
}

fn encode_point(p: PointLike) -> Value {
    let mut obj = Map::new();
    obj.insert("x".to_string(), Value::from(p.x));
    obj.insert("y".to_string(), Value::from(p.y));
    Value::Object(obj)
}

pub fn decode_map_mouse_event(v: &Value) -> Result<MapMouseEvent, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("event", "object", v))?;
    let event_type = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingField("type"))?
        .to_string();
    let lng_lat = decode_lnglat(
        "lngLat",
        obj.get("lngLat").ok_or(SchemaError::MissingField("lngLat"))?,
    )?;
    let point = decode_point(
        "point",
        obj.get("point").ok_or(SchemaError::MissingField("point"))?,
    )?;
    let default_prevented = match obj.get("_defaultPrevented") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            return Err(SchemaError::unexpected("_defaultPrevented", "boolean", other))
        }
    };
    // Absent and empty both mean "no features under the pointer".
    let features = match obj.get("features") {
        None => Vec::new(),
        Some(Value::Array(rows)) => rows
            .iter()
            .map(decode_queried_feature)
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => return Err(SchemaError::unexpected("features", "array", other)),
    };
    Ok(MapMouseEvent {
        event_type,
        lng_lat,
        point,
        default_prevented,
        features,
    })
}

pub fn encode_map_mouse_event(event: &MapMouseEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("point".to_string(), encode_point(event.point));
    obj.insert("lngLat".to_string(), encode_lnglat(event.lng_lat));
    obj.insert("type".to_string(), Value::String(event.event_type.clone()));
    if let Some(prevented) = event.default_prevented {
        obj.insert("_defaultPrevented".to_string(), Value::Bool(prevented));
    }
    obj.insert(
        "features".to_string(),
        Value::Array(event.features.iter().map(encode_queried_feature).collect()),
    );
    Value::Object(obj)
}

pub fn decode_marker_event(v: &Value) -> Result<MarkerEvent, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("event", "object", v))?;
    let event_type = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or(SchemaError::MissingField("type"))?
        .to_string();
    let lng_lat = decode_lnglat(
        "lngLat",
        obj.get("lngLat").ok_or(SchemaError::MissingField("lngLat"))?,
    )?;
    Ok(MarkerEvent {
        event_type,
        lng_lat,
    })
}

pub fn encode_marker_event(event: &MarkerEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(event.event_type.clone()));
    obj.insert("lngLat".to_string(), encode_lnglat(event.lng_lat));
    Value::Object(obj)
}
