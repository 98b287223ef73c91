//! Rendered-feature query results.
//!
//! `queryRenderedFeatures` returns GeoJSON-shaped documents annotated with
//! the owning source id and the feature-state bag. The `type` discriminator
//! is the same `Feature`/`FeatureCollection` pair as plain GeoJSON.

use maplibre_geojson::{decode_geojson, encode_geojson, Feature, GeoJson, LngLatBounds, SchemaError};
use serde_json::{Map, Value};

/// A single rendered feature with its source annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct QueriedSingle {
    pub source: String,
    pub state: Map<String, Value>,
    pub feature: Feature,
}

/// A rendered collection; members are full GeoJSON documents because the
/// map may hand back nested collections here.
#[derive(Debug, Clone, PartialEq)]
pub struct QueriedCollection {
    pub source: String,
    pub state: Map<String, Value>,
    pub features: Vec<GeoJson>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueriedFeature {
    Feature(QueriedSingle),
    FeatureCollection(QueriedCollection),
}

impl QueriedFeature {
    pub fn source(&self) -> &str {
        match self {
            QueriedFeature::Feature(q) => &q.source,
            QueriedFeature::FeatureCollection(q) => &q.source,
        }
    }

    /// Same convention as GeoJSON bounds: an empty collection yields the
    /// ((0,0),(0,0)) box.
    pub fn bounds(&self) -> LngLatBounds {
        match self {
            QueriedFeature::Feature(q) => q.feature.bounds(),
            QueriedFeature::FeatureCollection(q) => {
                let mut members = q.features.iter();
                let mut bounds = match members.next() {
                    Some(doc) => doc.bounds(),
                    None => return LngLatBounds::ZERO,
                };
                for doc in members {
                    bounds.extend(&doc.bounds());
                }
                bounds
            }
        }
    }
}

fn decode_annotations(
    obj: &Map<String, Value>,
) -> Result<(String, Map<String, Value>), SchemaError> {
    let source = obj
        .get("source")
        .ok_or(SchemaError::MissingField("source"))?
        .as_str()
        .ok_or(SchemaError::MissingField("source"))?
        .to_string();
    let state = match obj.get("state") {
        None => Map::new(),
        Some(Value::Object(m)) => m.clone(),
        Some(other) => return Err(SchemaError::unexpected("state", "object", other)),
    };
    Ok((source, state))
}

pub fn decode_queried_feature(v: &Value) -> Result<QueriedFeature, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("feature", "object", v))?;
    let tag = obj
        .get("type")
        .ok_or(SchemaError::MissingField("type"))?
        .as_str()
        .ok_or(SchemaError::MissingField("type"))?;
    let (source, state) = decode_annotations(obj)?;
    match tag {
        "Feature" => {
            // The row is GeoJSON plus annotations; the feature codec reads
            // the GeoJSON part and ignores the rest.
            let GeoJson::Feature(feature) = decode_geojson(v)? else {
                return Err(SchemaError::UnknownDiscriminator(
                    "queried feature",
                    tag.to_string(),
                ));
            };
            Ok(QueriedFeature::Feature(QueriedSingle {
                source,
                state,
                feature,
            }))
        }
        "FeatureCollection" => {
            let rows = obj
                .get("features")
                .ok_or(SchemaError::MissingField("features"))?
                .as_array()
                .ok_or(SchemaError::MissingField("features"))?;
            let features = rows
                .iter()
                .map(decode_geojson)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(QueriedFeature::FeatureCollection(QueriedCollection {
                source,
                state,
                features,
            }))
        }
        other => Err(SchemaError::UnknownDiscriminator(
            "queried feature",
            other.to_string(),
        )),
    }
}

pub fn encode_queried_feature(q: &QueriedFeature) -> Value {
    match q {
        QueriedFeature::Feature(single) => {
            let mut obj = match encode_geojson(&GeoJson::Feature(single.feature.clone())) {
                Value::Object(obj) => obj,
                _ => unreachable!("feature encode always yields an object"),
            };
            obj.insert("source".to_string(), Value::String(single.source.clone()));
            obj.insert("state".to_string(), Value::Object(single.state.clone()));
            Value::Object(obj)
        }
        QueriedFeature::FeatureCollection(collection) => {
            let mut obj = Map::new();
            obj.insert(
                "type".to_string(),
                Value::String("FeatureCollection".to_string()),
            );
            obj.insert("source".to_string(), Value::String(collection.source.clone()));
            obj.insert("state".to_string(), Value::Object(collection.state.clone()));
            obj.insert(
                "features".to_string(),
                Value::Array(collection.features.iter().map(encode_geojson).collect()),
            );
            Value::Object(obj)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplibre_geojson::{Geometry, LngLat};
    use serde_json::json;

    #[test]
    fn queried_feature_roundtrips_with_annotations() {
        let wire = json!({
            "type": "Feature",
            "id": "bldg-9",
            "geometry": {"type": "Point", "coordinates": [2.35, 48.86]},
            "properties": {"height": 31},
            "source": "buildings",
            "state": {"hover": true}
        });
        let q = decode_queried_feature(&wire).expect("decode");
        assert_eq!(q.source(), "buildings");
        assert_eq!(encode_queried_feature(&q), wire);
    }

    #[test]
    fn numeric_queried_id_normalizes_to_string() {
        let q = decode_queried_feature(&json!({
            "type": "Feature",
            "id": 77,
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": null,
            "source": "poi"
        }))
        .expect("decode");
        let QueriedFeature::Feature(single) = q else {
            panic!("expected a single feature");
        };
        assert_eq!(single.feature.id.as_deref(), Some("77"));
    }

    #[test]
    fn empty_queried_collection_bounds_are_the_zero_box() {
        let q = decode_queried_feature(&json!({
            "type": "FeatureCollection",
            "source": "poi",
            "features": []
        }))
        .expect("decode");
        let b = q.bounds();
        assert_eq!(b.sw, LngLat::new(0.0, 0.0));
        assert_eq!(b.ne, LngLat::new(0.0, 0.0));
    }

    #[test]
    fn collection_bounds_union_member_documents() {
        let q = QueriedFeature::FeatureCollection(QueriedCollection {
            source: "poi".to_string(),
            state: Map::new(),
            features: vec![
                GeoJson::Feature(Feature::new(Geometry::Point([-5.0, 2.0]))),
                GeoJson::Feature(Feature::new(Geometry::Point([8.0, -3.0]))),
            ],
        });
        let b = q.bounds();
        assert_eq!(b.sw, LngLat::new(-5.0, -3.0));
        assert_eq!(b.ne, LngLat::new(8.0, 2.0));
    }

    #[test]
    fn missing_source_is_rejected() {
        let err = decode_queried_feature(&json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": null
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("source"));
    }
}
