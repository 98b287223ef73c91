//! Geographic coordinate and bounding-box primitives.

use serde_json::{Map, Value};

use crate::error::SchemaError;

/// A longitude/latitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        LngLat { lng, lat }
    }
}

/// An axis-aligned geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LngLatBounds {
    pub sw: LngLat,
    pub ne: LngLat,
}

impl LngLatBounds {
    /// The conventional empty box. Returned for bounds of an empty feature
    /// collection; not geometrically meaningful.
    pub const ZERO: LngLatBounds = LngLatBounds {
        sw: LngLat { lng: 0.0, lat: 0.0 },
        ne: LngLat { lng: 0.0, lat: 0.0 },
    };

    /// A degenerate box around a single position (southwest == northeast).
    pub fn point(p: LngLat) -> Self {
        LngLatBounds { sw: p, ne: p }
    }

    /// Grows this box to cover `other`.
    pub fn extend(&mut self, other: &LngLatBounds) {
        self.sw.lng = self.sw.lng.min(other.sw.lng);
        self.sw.lat = self.sw.lat.min(other.sw.lat);
        self.ne.lng = self.ne.lng.max(other.ne.lng);
        self.ne.lat = self.ne.lat.max(other.ne.lat);
    }

    /// Grows this box to cover a single position.
    pub fn extend_point(&mut self, p: LngLat) {
        self.extend(&LngLatBounds::point(p));
    }

    /// The style-spec array form `[sw.lng, sw.lat, ne.lng, ne.lat]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.sw.lng, self.sw.lat, self.ne.lng, self.ne.lat]
    }

    pub fn from_array(a: [f64; 4]) -> Self {
        LngLatBounds {
            sw: LngLat::new(a[0], a[1]),
            ne: LngLat::new(a[2], a[3]),
        }
    }
}

pub(crate) fn decode_f64(field: &'static str, v: &Value) -> Result<f64, SchemaError> {
    v.as_f64()
        .ok_or_else(|| SchemaError::unexpected(field, "number", v))
}

/// Decodes the `{"lng":..,"lat":..}` object shape used by map events.
pub fn decode_lnglat(field: &'static str, v: &Value) -> Result<LngLat, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected(field, "object", v))?;
    let lng = decode_f64("lng", obj.get("lng").ok_or(SchemaError::MissingField("lng"))?)?;
    let lat = decode_f64("lat", obj.get("lat").ok_or(SchemaError::MissingField("lat"))?)?;
    Ok(LngLat { lng, lat })
}

pub fn encode_lnglat(p: LngLat) -> Value {
    let mut obj = Map::new();
    obj.insert("lng".to_string(), Value::from(p.lng));
    obj.insert("lat".to_string(), Value::from(p.lat));
    Value::Object(obj)
}

/// Decodes the 4-element `[sw.lng, sw.lat, ne.lng, ne.lat]` array form used
/// by tile source `bounds` fields.
pub fn decode_bounds_array(field: &'static str, v: &Value) -> Result<LngLatBounds, SchemaError> {
    let a = v
        .as_array()
        .ok_or_else(|| SchemaError::unexpected(field, "array of 4 numbers", v))?;
    if a.len() != 4 {
        return Err(SchemaError::unexpected(field, "array of 4 numbers", v));
    }
    let mut out = [0.0; 4];
    for (slot, item) in out.iter_mut().zip(a) {
        *slot = decode_f64(field, item)?;
    }
    Ok(LngLatBounds::from_array(out))
}

pub fn encode_bounds_array(b: LngLatBounds) -> Value {
    Value::Array(b.to_array().iter().map(|x| Value::from(*x)).collect())
}
