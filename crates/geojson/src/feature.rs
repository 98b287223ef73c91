//! GeoJSON feature model and codec.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::geometry::{decode_geometry, encode_geometry, Geometry};
use crate::lnglat::LngLatBounds;
use crate::union::decode_string_or_number;

/// A single GeoJSON feature: a geometry plus an open property bag.
///
/// The identifier is always a string in the model. On the wire, a numeric
/// `id` is accepted on decode and normalized; encode only ever emits a
/// string.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub geometry: Geometry,
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            id: None,
            geometry,
            properties: None,
        }
    }

    pub fn bounds(&self) -> LngLatBounds {
        self.geometry.bounds()
    }
}

/// An ordered collection of features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { features }
    }

    /// Union of all member bounds. An empty collection yields the
    /// conventional ((0,0),(0,0)) box; callers relying on bounds must treat
    /// that literal as "no data".
    pub fn bounds(&self) -> LngLatBounds {
        let mut members = self.features.iter();
        let mut bounds = match members.next() {
            Some(f) => f.bounds(),
            None => return LngLatBounds::ZERO,
        };
        for f in members {
            bounds.extend(&f.bounds());
        }
        bounds
    }
}

/// A GeoJSON document: either a single feature or a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    pub fn bounds(&self) -> LngLatBounds {
        match self {
            GeoJson::Feature(f) => f.bounds(),
            GeoJson::FeatureCollection(fc) => fc.bounds(),
        }
    }
}

impl From<GeoJson> for crate::union::ObjectOrString<GeoJson> {
    fn from(doc: GeoJson) -> Self {
        crate::union::ObjectOrString::Object(doc)
    }
}

impl From<Feature> for crate::union::ObjectOrString<GeoJson> {
    fn from(f: Feature) -> Self {
        crate::union::ObjectOrString::Object(GeoJson::Feature(f))
    }
}

impl From<FeatureCollection> for crate::union::ObjectOrString<GeoJson> {
    fn from(fc: FeatureCollection) -> Self {
        crate::union::ObjectOrString::Object(GeoJson::FeatureCollection(fc))
    }
}

pub(crate) fn encode_feature(f: &Feature) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String("Feature".to_string()));
    if let Some(id) = &f.id {
        obj.insert("id".to_string(), Value::String(id.clone()));
    }
    obj.insert("geometry".to_string(), encode_geometry(&f.geometry));
    obj.insert(
        "properties".to_string(),
        match &f.properties {
            Some(props) => Value::Object(props.clone()),
            None => Value::Null,
        },
    );
    Value::Object(obj)
}

pub fn encode_geojson(doc: &GeoJson) -> Value {
    match doc {
        GeoJson::Feature(f) => encode_feature(f),
        GeoJson::FeatureCollection(fc) => {
            let mut obj = Map::new();
            obj.insert(
                "type".to_string(),
                Value::String("FeatureCollection".to_string()),
            );
            // Always present, even when empty.
            obj.insert(
                "features".to_string(),
                Value::Array(fc.features.iter().map(encode_feature).collect()),
            );
            Value::Object(obj)
        }
    }
}

pub(crate) fn decode_feature_fields(obj: &Map<String, Value>) -> Result<Feature, SchemaError> {
    let id = match obj.get("id") {
        Some(v) => Some(decode_string_or_number("id", v)?),
        None => None,
    };
    let geometry = decode_geometry(
        obj.get("geometry")
            .ok_or(SchemaError::MissingField("geometry"))?,
    )?;
    let properties = match obj.get("properties") {
        None | Some(Value::Null) => None,
        Some(Value::Object(props)) => Some(props.clone()),
        Some(other) => return Err(SchemaError::unexpected("properties", "object or null", other)),
    };
    Ok(Feature {
        id,
        geometry,
        properties,
    })
}

pub fn decode_geojson(v: &Value) -> Result<GeoJson, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("feature", "object", v))?;
    let tag = obj
        .get("type")
        .ok_or(SchemaError::MissingField("type"))?
        .as_str()
        .ok_or(SchemaError::MissingField("type"))?;
    match tag {
        "Feature" => Ok(GeoJson::Feature(decode_feature_fields(obj)?)),
        "FeatureCollection" => {
            let rows = obj
                .get("features")
                .ok_or(SchemaError::MissingField("features"))?
                .as_array()
                .ok_or(SchemaError::MissingField("features"))?;
            let features = rows
                .iter()
                .map(|row| {
                    let member = row
                        .as_object()
                        .ok_or_else(|| SchemaError::unexpected("features", "object", row))?;
                    decode_feature_fields(member)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(GeoJson::FeatureCollection(FeatureCollection { features }))
        }
        other => Err(SchemaError::UnknownDiscriminator(
            "feature",
            other.to_string(),
        )),
    }
}
