//! GeoJSON geometry model and codec.
//!
//! The wire shape is `{"type": <tag>, "coordinates": <nested array>}` with
//! one extra level of array nesting per variant. Decode reads the `type`
//! discriminator first and hands the coordinate array to that variant's
//! shape parser; any depth mismatch is a [`SchemaError`].

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::lnglat::{LngLat, LngLatBounds};

/// A single `[lng, lat]` position.
pub type Position = [f64; 2];

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    LineString(Vec<Position>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// The wire discriminator for this variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Min/max longitude and latitude over every contained position. A
    /// point's bounds are degenerate (southwest == northeast).
    pub fn bounds(&self) -> LngLatBounds {
        let mut positions = self.positions();
        let first = match positions.next() {
            Some(p) => p,
            None => return LngLatBounds::ZERO,
        };
        let mut bounds = LngLatBounds::point(LngLat::new(first[0], first[1]));
        for p in positions {
            bounds.extend_point(LngLat::new(p[0], p[1]));
        }
        bounds
    }

    fn positions(&self) -> Box<dyn Iterator<Item = &Position> + '_> {
        match self {
            Geometry::Point(p) => Box::new(std::iter::once(p)),
            Geometry::LineString(line) => Box::new(line.iter()),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
            Geometry::MultiPolygon(polys) => {
                Box::new(polys.iter().flatten().flatten())
            }
        }
    }
}

fn encode_position(p: &Position) -> Value {
    Value::Array(vec![Value::from(p[0]), Value::from(p[1])])
}

fn encode_positions(line: &[Position]) -> Value {
    Value::Array(line.iter().map(encode_position).collect())
}

fn encode_rings(rings: &[Vec<Position>]) -> Value {
    Value::Array(rings.iter().map(|r| encode_positions(r)).collect())
}

pub fn encode_geometry(g: &Geometry) -> Value {
    let coordinates = match g {
        Geometry::Point(p) => encode_position(p),
        Geometry::LineString(line) => encode_positions(line),
        Geometry::Polygon(rings) => encode_rings(rings),
        Geometry::MultiPolygon(polys) => {
            Value::Array(polys.iter().map(|p| encode_rings(p)).collect())
        }
    };
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(g.type_name().to_string()));
    obj.insert("coordinates".to_string(), coordinates);
    Value::Object(obj)
}

fn decode_position(variant: &'static str, v: &Value) -> Result<Position, SchemaError> {
    let a = v
        .as_array()
        .ok_or(SchemaError::CoordinateShape(variant))?;
    // Exactly [lng, lat]; altitude or deeper nesting is rejected.
    if a.len() != 2 {
        return Err(SchemaError::CoordinateShape(variant));
    }
    let lng = a[0].as_f64().ok_or(SchemaError::CoordinateShape(variant))?;
    let lat = a[1].as_f64().ok_or(SchemaError::CoordinateShape(variant))?;
    Ok([lng, lat])
}

fn decode_positions(variant: &'static str, v: &Value) -> Result<Vec<Position>, SchemaError> {
    v.as_array()
        .ok_or(SchemaError::CoordinateShape(variant))?
        .iter()
        .map(|p| decode_position(variant, p))
        .collect()
}

fn decode_rings(variant: &'static str, v: &Value) -> Result<Vec<Vec<Position>>, SchemaError> {
    v.as_array()
        .ok_or(SchemaError::CoordinateShape(variant))?
        .iter()
        .map(|r| decode_positions(variant, r))
        .collect()
}

pub fn decode_geometry(v: &Value) -> Result<Geometry, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("geometry", "object", v))?;
    let tag = obj
        .get("type")
        .ok_or(SchemaError::MissingField("type"))?
        .as_str()
        .ok_or(SchemaError::MissingField("type"))?;
    let coords = obj
        .get("coordinates")
        .ok_or(SchemaError::MissingField("coordinates"))?;
    match tag {
        "Point" => Ok(Geometry::Point(decode_position("Point", coords)?)),
        "LineString" => {
            let line = decode_positions("LineString", coords)?;
            // A line needs at least two positions; a shorter array is a
            // malformed document, not a degenerate line.
            if line.len() < 2 {
                return Err(SchemaError::CoordinateShape("LineString"));
            }
            Ok(Geometry::LineString(line))
        }
        "Polygon" => Ok(Geometry::Polygon(decode_rings("Polygon", coords)?)),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or(SchemaError::CoordinateShape("MultiPolygon"))?
                .iter()
                .map(|p| decode_rings("MultiPolygon", p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Geometry::MultiPolygon(polys))
        }
        other => Err(SchemaError::UnknownDiscriminator(
            "geometry",
            other.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn point_bounds_are_degenerate() {
        let b = Geometry::Point([-122.4194, 37.7749]).bounds();
        assert_eq!(b.sw, b.ne);
        assert_eq!(b.sw, LngLat::new(-122.4194, 37.7749));
    }

    #[test]
    fn polygon_bounds_cover_all_rings() {
        let g = Geometry::Polygon(vec![
            vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
            vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
        ]);
        let b = g.bounds();
        assert_eq!(b.sw, LngLat::new(0.0, 0.0));
        assert_eq!(b.ne, LngLat::new(4.0, 4.0));
    }

    #[test]
    fn point_with_altitude_is_rejected() {
        let err = decode_geometry(&json!({
            "type": "Point",
            "coordinates": [1.0, 2.0, 3.0]
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::CoordinateShape("Point"));
    }

    #[test]
    fn single_position_linestring_is_rejected() {
        let err = decode_geometry(&json!({
            "type": "LineString",
            "coordinates": [[0.0, 0.0]]
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::CoordinateShape("LineString"));
    }

    #[test]
    fn linestring_with_point_nesting_is_rejected() {
        let err = decode_geometry(&json!({
            "type": "LineString",
            "coordinates": [0.0, 0.0]
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::CoordinateShape("LineString"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = decode_geometry(&json!({
            "type": "Pointy",
            "coordinates": [0.0, 0.0]
        }))
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownDiscriminator("geometry", "Pointy".to_string())
        );
    }
}
