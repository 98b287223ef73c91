//! Source model and codec for the style JSON dialect.
//!
//! Every variant is keyed by its `type` discriminator on the wire. Unset
//! optional fields are omitted from output entirely; the external library
//! treats an explicit `null` differently from an absent key, so no null
//! placeholders are ever emitted.

use maplibre_geojson::lnglat::{decode_bounds_array, encode_bounds_array};
use maplibre_geojson::{
    decode_geojson, encode_geojson, GeoJson, LngLatBounds, ObjectOrString, SchemaError,
};
use serde_json::{Map, Value};

use crate::fields::{
    get_bool, get_f64, get_map, get_opaque, get_string, get_string_list, get_u32, put, req_string,
    string_list,
};

/// The `data` field of a GeoJSON source: inline GeoJSON or a URL string.
pub type GeoJsonData = ObjectOrString<GeoJson>;

/// The four `[lng, lat]` corner pairs used by image/video/canvas sources,
/// clockwise from top-left.
pub type Corners = [[f64; 2]; 4];

#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonSource {
    pub data: GeoJsonData,
    pub cluster: Option<bool>,
    pub cluster_max_zoom: Option<f64>,
    pub cluster_radius: Option<f64>,
    pub cluster_min_points: Option<u32>,
    pub cluster_properties: Option<Map<String, Value>>,
    pub generate_id: Option<bool>,
    pub buffer: Option<u32>,
    pub tolerance: Option<f64>,
    pub line_metrics: Option<bool>,
    pub promote_id: Option<Value>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub tile_size: Option<u32>,
    pub attribution: Option<String>,
}

impl GeoJsonSource {
    pub fn new(data: impl Into<GeoJsonData>) -> Self {
        GeoJsonSource {
            data: data.into(),
            cluster: None,
            cluster_max_zoom: None,
            cluster_radius: None,
            cluster_min_points: None,
            cluster_properties: None,
            generate_id: None,
            buffer: None,
            tolerance: None,
            line_metrics: None,
            promote_id: None,
            minzoom: None,
            maxzoom: None,
            tile_size: None,
            attribution: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterSource {
    pub url: Option<String>,
    pub tiles: Option<Vec<String>>,
    pub bounds: Option<LngLatBounds>,
    pub scheme: Option<String>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub tile_size: Option<u32>,
    pub attribution: Option<String>,
    pub round_zoom: Option<bool>,
    pub is_tile_clipped: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterDemSource {
    pub url: Option<String>,
    pub tiles: Option<Vec<String>>,
    pub bounds: Option<LngLatBounds>,
    pub scheme: Option<String>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub tile_size: Option<u32>,
    pub attribution: Option<String>,
    /// Elevation encoding: `mapbox`, `terrarium`, or `custom`.
    pub encoding: Option<String>,
    pub red_factor: Option<f64>,
    pub green_factor: Option<f64>,
    pub blue_factor: Option<f64>,
    pub base_shift: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorSource {
    pub url: Option<String>,
    pub tiles: Option<Vec<String>>,
    pub bounds: Option<LngLatBounds>,
    pub scheme: Option<String>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub tile_size: Option<u32>,
    pub attribution: Option<String>,
    pub promote_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
    pub coordinates: Corners,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSource {
    pub urls: Vec<String>,
    pub coordinates: Corners,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSource {
    pub coordinates: Corners,
    pub canvas: Option<String>,
    pub animate: Option<bool>,
}

/// A map data source, keyed by the `type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    GeoJson(GeoJsonSource),
    Raster(RasterSource),
    RasterDem(RasterDemSource),
    Vector(VectorSource),
    Image(ImageSource),
    Video(VideoSource),
    Canvas(CanvasSource),
}

impl Source {
    pub fn type_name(&self) -> &'static str {
        match self {
            Source::GeoJson(_) => "geojson",
            Source::Raster(_) => "raster",
            Source::RasterDem(_) => "raster-dem",
            Source::Vector(_) => "vector",
            Source::Image(_) => "image",
            Source::Video(_) => "video",
            Source::Canvas(_) => "canvas",
        }
    }
}

fn encode_corners(corners: &Corners) -> Value {
    Value::Array(
        corners
            .iter()
            .map(|c| Value::Array(vec![Value::from(c[0]), Value::from(c[1])]))
            .collect(),
    )
}

fn decode_corners(v: &Value) -> Result<Corners, SchemaError> {
    let rows = v
        .as_array()
        .filter(|r| r.len() == 4)
        .ok_or_else(|| SchemaError::unexpected("coordinates", "array of 4 corner pairs", v))?;
    let mut out = [[0.0; 2]; 4];
    for (slot, row) in out.iter_mut().zip(rows) {
        let pair = row
            .as_array()
            .filter(|p| p.len() == 2)
            .ok_or_else(|| SchemaError::unexpected("coordinates", "array of 4 corner pairs", row))?;
        for (axis, item) in slot.iter_mut().zip(pair) {
            *axis = item
                .as_f64()
                .ok_or_else(|| SchemaError::unexpected("coordinates", "number", item))?;
        }
    }
    Ok(out)
}

fn tagged(tag: &str) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(tag.to_string()));
    obj
}

fn put_tile_fields(
    obj: &mut Map<String, Value>,
    url: &Option<String>,
    tiles: &Option<Vec<String>>,
    bounds: Option<LngLatBounds>,
    scheme: &Option<String>,
    minzoom: Option<f64>,
    maxzoom: Option<f64>,
    tile_size: Option<u32>,
    attribution: &Option<String>,
) {
    put(obj, "url", url.clone());
    put(obj, "tiles", tiles.as_deref().map(string_list));
    put(obj, "bounds", bounds.map(encode_bounds_array));
    put(obj, "scheme", scheme.clone());
    put(obj, "minzoom", minzoom);
    put(obj, "maxzoom", maxzoom);
    put(obj, "tileSize", tile_size);
    put(obj, "attribution", attribution.clone());
}

pub fn encode_source(source: &Source) -> Value {
    let mut obj = tagged(source.type_name());
    match source {
        Source::GeoJson(s) => {
            obj.insert("data".to_string(), s.data.encode(encode_geojson));
            put(&mut obj, "cluster", s.cluster);
            put(&mut obj, "clusterMaxZoom", s.cluster_max_zoom);
            put(&mut obj, "clusterRadius", s.cluster_radius);
            put(&mut obj, "clusterMinPoints", s.cluster_min_points);
            put(
                &mut obj,
                "clusterProperties",
                s.cluster_properties.clone().map(Value::Object),
            );
            put(&mut obj, "generateId", s.generate_id);
            put(&mut obj, "buffer", s.buffer);
            put(&mut obj, "tolerance", s.tolerance);
            put(&mut obj, "lineMetrics", s.line_metrics);
            put(&mut obj, "promoteId", s.promote_id.clone());
            put(&mut obj, "minzoom", s.minzoom);
            put(&mut obj, "maxzoom", s.maxzoom);
            put(&mut obj, "tileSize", s.tile_size);
            put(&mut obj, "attribution", s.attribution.clone());
        }
        Source::Raster(s) => {
            put_tile_fields(
                &mut obj,
                &s.url,
                &s.tiles,
                s.bounds,
                &s.scheme,
                s.minzoom,
                s.maxzoom,
                s.tile_size,
                &s.attribution,
            );
            put(&mut obj, "roundZoom", s.round_zoom);
            put(&mut obj, "isTileClipped", s.is_tile_clipped);
        }
        Source::RasterDem(s) => {
            put_tile_fields(
                &mut obj,
                &s.url,
                &s.tiles,
                s.bounds,
                &s.scheme,
                s.minzoom,
                s.maxzoom,
                s.tile_size,
                &s.attribution,
            );
            put(&mut obj, "encoding", s.encoding.clone());
            put(&mut obj, "redFactor", s.red_factor);
            put(&mut obj, "greenFactor", s.green_factor);
            put(&mut obj, "blueFactor", s.blue_factor);
            put(&mut obj, "baseShift", s.base_shift);
        }
        Source::Vector(s) => {
            put_tile_fields(
                &mut obj,
                &s.url,
                &s.tiles,
                s.bounds,
                &s.scheme,
                s.minzoom,
                s.maxzoom,
                s.tile_size,
                &s.attribution,
            );
            put(&mut obj, "promoteId", s.promote_id.clone());
        }
        Source::Image(s) => {
            obj.insert("url".to_string(), Value::String(s.url.clone()));
            obj.insert("coordinates".to_string(), encode_corners(&s.coordinates));
        }
        Source::Video(s) => {
            obj.insert("urls".to_string(), string_list(&s.urls));
            obj.insert("coordinates".to_string(), encode_corners(&s.coordinates));
        }
        Source::Canvas(s) => {
            obj.insert("coordinates".to_string(), encode_corners(&s.coordinates));
            put(&mut obj, "canvas", s.canvas.clone());
            put(&mut obj, "animate", s.animate);
        }
    }
    Value::Object(obj)
}

fn decode_bounds_field(obj: &Map<String, Value>) -> Result<Option<LngLatBounds>, SchemaError> {
    match obj.get("bounds") {
        None => Ok(None),
        Some(v) => decode_bounds_array("bounds", v).map(Some),
    }
}

fn req_corners(obj: &Map<String, Value>) -> Result<Corners, SchemaError> {
    decode_corners(
        obj.get("coordinates")
            .ok_or(SchemaError::MissingField("coordinates"))?,
    )
}

pub fn decode_source(v: &Value) -> Result<Source, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("source", "object", v))?;
    let tag = obj
        .get("type")
        .ok_or(SchemaError::MissingField("type"))?
        .as_str()
        .ok_or(SchemaError::MissingField("type"))?;
    match tag {
        "geojson" => {
            let data = obj.get("data").ok_or(SchemaError::MissingField("data"))?;
            Ok(Source::GeoJson(GeoJsonSource {
                data: GeoJsonData::decode("data", data, decode_geojson)?,
                cluster: get_bool(obj, "cluster")?,
                cluster_max_zoom: get_f64(obj, "clusterMaxZoom")?,
                cluster_radius: get_f64(obj, "clusterRadius")?,
                cluster_min_points: get_u32(obj, "clusterMinPoints")?,
                cluster_properties: get_map(obj, "clusterProperties")?,
                generate_id: get_bool(obj, "generateId")?,
                buffer: get_u32(obj, "buffer")?,
                tolerance: get_f64(obj, "tolerance")?,
                line_metrics: get_bool(obj, "lineMetrics")?,
                promote_id: get_opaque(obj, "promoteId"),
                minzoom: get_f64(obj, "minzoom")?,
                maxzoom: get_f64(obj, "maxzoom")?,
                tile_size: get_u32(obj, "tileSize")?,
                attribution: get_string(obj, "attribution")?,
            }))
        }
        "raster" => Ok(Source::Raster(RasterSource {
            url: get_string(obj, "url")?,
            tiles: get_string_list(obj, "tiles")?,
            bounds: decode_bounds_field(obj)?,
            scheme: get_string(obj, "scheme")?,
            minzoom: get_f64(obj, "minzoom")?,
            maxzoom: get_f64(obj, "maxzoom")?,
            tile_size: get_u32(obj, "tileSize")?,
            attribution: get_string(obj, "attribution")?,
            round_zoom: get_bool(obj, "roundZoom")?,
            is_tile_clipped: get_bool(obj, "isTileClipped")?,
        })),
        "raster-dem" => Ok(Source::RasterDem(RasterDemSource {
            url: get_string(obj, "url")?,
            tiles: get_string_list(obj, "tiles")?,
            bounds: decode_bounds_field(obj)?,
            scheme: get_string(obj, "scheme")?,
            minzoom: get_f64(obj, "minzoom")?,
            maxzoom: get_f64(obj, "maxzoom")?,
            tile_size: get_u32(obj, "tileSize")?,
            attribution: get_string(obj, "attribution")?,
            encoding: get_string(obj, "encoding")?,
            red_factor: get_f64(obj, "redFactor")?,
            green_factor: get_f64(obj, "greenFactor")?,
            blue_factor: get_f64(obj, "blueFactor")?,
            base_shift: get_f64(obj, "baseShift")?,
        })),
        "vector" => Ok(Source::Vector(VectorSource {
            url: get_string(obj, "url")?,
            tiles: get_string_list(obj, "tiles")?,
            bounds: decode_bounds_field(obj)?,
            scheme: get_string(obj, "scheme")?,
            minzoom: get_f64(obj, "minzoom")?,
            maxzoom: get_f64(obj, "maxzoom")?,
            tile_size: get_u32(obj, "tileSize")?,
            attribution: get_string(obj, "attribution")?,
            promote_id: get_opaque(obj, "promoteId"),
        })),
        "image" => Ok(Source::Image(ImageSource {
            url: req_string(obj, "url")?,
            coordinates: req_corners(obj)?,
        })),
        "video" => Ok(Source::Video(VideoSource {
            urls: get_string_list(obj, "urls")?.ok_or(SchemaError::MissingField("urls"))?,
            coordinates: req_corners(obj)?,
        })),
        "canvas" => Ok(Source::Canvas(CanvasSource {
            coordinates: req_corners(obj)?,
            canvas: get_string(obj, "canvas")?,
            animate: get_bool(obj, "animate")?,
        })),
        other => Err(SchemaError::UnknownDiscriminator(
            "source",
            other.to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplibre_geojson::TokenKind;
    use serde_json::json;

    #[test]
    fn geojson_data_url_encodes_as_bare_string() {
        let source = Source::GeoJson(GeoJsonSource::new("https://example.com/data.geojson"));
        let wire = encode_source(&source);
        assert_eq!(wire["data"], json!("https://example.com/data.geojson"));
        // Only the discriminator and the required field; nothing else.
        assert_eq!(wire.as_object().map(Map::len), Some(2));
    }

    #[test]
    fn geojson_data_number_is_a_schema_error() {
        let err = decode_source(&json!({"type": "geojson", "data": 42})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnexpectedToken {
                field: "data",
                expected: "object or string",
                actual: TokenKind::Number,
            }
        );
    }

    #[test]
    fn geojson_data_object_routes_through_the_feature_codec() {
        let wire = json!({
            "type": "geojson",
            "data": {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
                "properties": null
            }
        });
        let Source::GeoJson(s) = decode_source(&wire).expect("decode") else {
            panic!("expected a geojson source");
        };
        assert!(matches!(s.data, GeoJsonData::Object(GeoJson::Feature(_))));
    }

    #[test]
    fn unset_optionals_are_omitted_not_null() {
        let wire = encode_source(&Source::Raster(RasterSource {
            url: Some("https://tiles.example.com/tiles.json".to_string()),
            ..RasterSource::default()
        }));
        assert_eq!(
            wire,
            json!({"type": "raster", "url": "https://tiles.example.com/tiles.json"})
        );
    }

    #[test]
    fn unknown_source_tag_is_rejected() {
        let err = decode_source(&json!({"type": "webgl", "data": {}})).unwrap_err();
        assert_eq!(err, SchemaError::UnknownDiscriminator("source", "webgl".to_string()));
    }

    #[test]
    fn video_requires_urls() {
        let err = decode_source(&json!({
            "type": "video",
            "coordinates": [[0.0,1.0],[1.0,1.0],[1.0,0.0],[0.0,0.0]]
        }))
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingField("urls"));
    }
}
