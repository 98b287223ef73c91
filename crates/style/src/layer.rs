//! Layer model and codec for the style JSON dialect.
//!
//! Nine variants keyed by `type`. `layout` and `paint` are opaque key/value
//! maps and `filter` is an opaque expression tree; the property schema they
//! follow is large and versioned independently of this model, so they pass
//! through verbatim.

use maplibre_geojson::{decode_string_or_number, SchemaError};
use serde_json::{Map, Value};

use crate::fields::{get_f64, get_map, get_opaque, get_string, put, req_string};

/// Payload of a layer that draws from a vector-capable source and may name
/// a layer inside the tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorStyleLayer {
    pub id: String,
    pub source: String,
    pub source_layer: Option<String>,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub filter: Option<Value>,
    pub layout: Option<Map<String, Value>>,
    pub paint: Option<Map<String, Value>>,
}

impl VectorStyleLayer {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        VectorStyleLayer {
            id: id.into(),
            source: source.into(),
            source_layer: None,
            minzoom: None,
            maxzoom: None,
            filter: None,
            layout: None,
            paint: None,
        }
    }
}

/// Payload of a layer backed by a raster or raster-DEM source; no
/// source-layer applies.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterStyleLayer {
    pub id: String,
    pub source: String,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub filter: Option<Value>,
    pub layout: Option<Map<String, Value>>,
    pub paint: Option<Map<String, Value>>,
}

impl RasterStyleLayer {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        RasterStyleLayer {
            id: id.into(),
            source: source.into(),
            minzoom: None,
            maxzoom: None,
            filter: None,
            layout: None,
            paint: None,
        }
    }
}

/// Payload of the background layer; it draws no source data.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStyleLayer {
    pub id: String,
    pub minzoom: Option<f64>,
    pub maxzoom: Option<f64>,
    pub filter: Option<Value>,
    pub layout: Option<Map<String, Value>>,
    pub paint: Option<Map<String, Value>>,
}

impl BackgroundStyleLayer {
    pub fn new(id: impl Into<String>) -> Self {
        BackgroundStyleLayer {
            id: id.into(),
            minzoom: None,
            maxzoom: None,
            filter: None,
            layout: None,
            paint: None,
        }
    }
}

/// A style layer, keyed by the `type` discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Fill(VectorStyleLayer),
    Line(VectorStyleLayer),
    Circle(VectorStyleLayer),
    Symbol(VectorStyleLayer),
    Heatmap(VectorStyleLayer),
    FillExtrusion(VectorStyleLayer),
    Raster(RasterStyleLayer),
    Hillshade(RasterStyleLayer),
    Background(BackgroundStyleLayer),
}

impl Layer {
    pub fn type_name(&self) -> &'static str {
        match self {
            Layer::Fill(_) => "fill",
            Layer::Line(_) => "line",
            Layer::Circle(_) => "circle",
            Layer::Symbol(_) => "symbol",
            Layer::Heatmap(_) => "heatmap",
            Layer::FillExtrusion(_) => "fill-extrusion",
            Layer::Raster(_) => "raster",
            Layer::Hillshade(_) => "hillshade",
            Layer::Background(_) => "background",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Layer::Fill(l)
            | Layer::Line(l)
            | Layer::Circle(l)
            | Layer::Symbol(l)
            | Layer::Heatmap(l)
            | Layer::FillExtrusion(l) => &l.id,
            Layer::Raster(l) | Layer::Hillshade(l) => &l.id,
            Layer::Background(l) => &l.id,
        }
    }
}

fn put_common(
    obj: &mut Map<String, Value>,
    minzoom: Option<f64>,
    maxzoom: Option<f64>,
    filter: &Option<Value>,
    layout: &Option<Map<String, Value>>,
    paint: &Option<Map<String, Value>>,
) {
    put(obj, "minzoom", minzoom);
    put(obj, "maxzoom", maxzoom);
    put(obj, "filter", filter.clone());
    put(obj, "layout", layout.clone().map(Value::Object));
    put(obj, "paint", paint.clone().map(Value::Object));
}

pub fn encode_layer(layer: &Layer) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "type".to_string(),
        Value::String(layer.type_name().to_string()),
    );
    obj.insert("id".to_string(), Value::String(layer.id().to_string()));
    match layer {
        Layer::Fill(l)
        | Layer::Line(l)
        | Layer::Circle(l)
        | Layer::Symbol(l)
        | Layer::Heatmap(l)
        | Layer::FillExtrusion(l) => {
            obj.insert("source".to_string(), Value::String(l.source.clone()));
            put(&mut obj, "source-layer", l.source_layer.clone());
            put_common(&mut obj, l.minzoom, l.maxzoom, &l.filter, &l.layout, &l.paint);
        }
        Layer::Raster(l) | Layer::Hillshade(l) => {
            obj.insert("source".to_string(), Value::String(l.source.clone()));
            put_common(&mut obj, l.minzoom, l.maxzoom, &l.filter, &l.layout, &l.paint);
        }
        Layer::Background(l) => {
            put_common(&mut obj, l.minzoom, l.maxzoom, &l.filter, &l.layout, &l.paint);
        }
    }
    Value::Object(obj)
}

fn decode_vector_layer(obj: &Map<String, Value>, id: String) -> Result<VectorStyleLayer, SchemaError> {
    Ok(VectorStyleLayer {
        id,
        source: req_string(obj, "source")?,
        source_layer: get_string(obj, "source-layer")?,
        minzoom: get_f64(obj, "minzoom")?,
        maxzoom: get_f64(obj, "maxzoom")?,
        filter: get_opaque(obj, "filter"),
        layout: get_map(obj, "layout")?,
        paint: get_map(obj, "paint")?,
    })
}

fn decode_raster_layer(obj: &Map<String, Value>, id: String) -> Result<RasterStyleLayer, SchemaError> {
    Ok(RasterStyleLayer {
        id,
        source: req_string(obj, "source")?,
        minzoom: get_f64(obj, "minzoom")?,
        maxzoom: get_f64(obj, "maxzoom")?,
        filter: get_opaque(obj, "filter"),
        layout: get_map(obj, "layout")?,
        paint: get_map(obj, "paint")?,
    })
}

pub fn decode_layer(v: &Value) -> Result<Layer, SchemaError> {
    let obj = v
        .as_object()
        .ok_or_else(|| SchemaError::unexpected("layer", "object", v))?;
    let tag = obj
        .get("type")
        .ok_or(SchemaError::MissingField("type"))?
        .as_str()
        .ok_or(SchemaError::MissingField("type"))?;
    let id = decode_string_or_number("id", obj.get("id").ok_or(SchemaError::MissingField("id"))?)?;
    match tag {
        "fill" => Ok(Layer::Fill(decode_vector_layer(obj, id)?)),
        "line" => Ok(Layer::Line(decode_vector_layer(obj, id)?)),
        "circle" => Ok(Layer::Circle(decode_vector_layer(obj, id)?)),
        "symbol" => Ok(Layer::Symbol(decode_vector_layer(obj, id)?)),
        "heatmap" => Ok(Layer::Heatmap(decode_vector_layer(obj, id)?)),
        "fill-extrusion" => Ok(Layer::FillExtrusion(decode_vector_layer(obj, id)?)),
        "raster" => Ok(Layer::Raster(decode_raster_layer(obj, id)?)),
        "hillshade" => Ok(Layer::Hillshade(decode_raster_layer(obj, id)?)),
        "background" => Ok(Layer::Background(BackgroundStyleLayer {
            id,
            minzoom: get_f64(obj, "minzoom")?,
            maxzoom: get_f64(obj, "maxzoom")?,
            filter: get_opaque(obj, "filter"),
            layout: get_map(obj, "layout")?,
            paint: get_map(obj, "paint")?,
        })),
        other => Err(SchemaError::UnknownDiscriminator("layer", other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_layer_id_normalizes_to_string() {
        let layer = decode_layer(&json!({
            "type": "fill",
            "id": 42,
            "source": "parcels"
        }))
        .expect("decode");
        assert_eq!(layer.id(), "42");
        assert_eq!(encode_layer(&layer)["id"], json!("42"));
    }

    #[test]
    fn filter_passes_through_verbatim() {
        let filter = json!(["==", ["get", "color"], "polygon"]);
        let wire = json!({
            "type": "circle",
            "id": "dots",
            "source": "points",
            "filter": filter.clone()
        });
        let layer = decode_layer(&wire).expect("decode");
        assert_eq!(encode_layer(&layer)["filter"], filter);
    }

    #[test]
    fn missing_source_is_rejected_for_sourced_layers() {
        let err = decode_layer(&json!({"type": "line", "id": "roads"})).unwrap_err();
        assert_eq!(err, SchemaError::MissingField("source"));
    }

    #[test]
    fn background_needs_no_source() {
        let layer = decode_layer(&json!({
            "type": "background",
            "id": "bg",
            "paint": {"background-color": "#f8f4f0"}
        }))
        .expect("decode");
        assert!(matches!(layer, Layer::Background(_)));
    }

    #[test]
    fn unknown_layer_tag_is_rejected() {
        let err = decode_layer(&json!({"type": "sky", "id": "sky"})).unwrap_err();
        assert_eq!(err, SchemaError::UnknownDiscriminator("layer", "sky".to_string()));
    }
}
