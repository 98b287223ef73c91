//! GeoJSON primitives for the MapLibre style wire format.
//!
//! The model types here are plain sum types; the wire contract lives in the
//! hand-written codecs (`encode_*` / `decode_*`), which dispatch on the
//! `type` discriminator string exactly as the external library does.
//!
//! # Example
//!
//! ```
//! use maplibre_geojson::{decode_geojson, encode_geojson, GeoJson, Geometry, Feature};
//! use serde_json::json;
//!
//! let doc = GeoJson::Feature(Feature::new(Geometry::Point([-122.4194, 37.7749])));
//! let wire = encode_geojson(&doc);
//! assert_eq!(wire["type"], json!("Feature"));
//! assert_eq!(decode_geojson(&wire).unwrap(), doc);
//! ```

pub mod error;
pub mod feature;
pub mod geometry;
pub mod lnglat;
pub mod union;

pub use error::{SchemaError, TokenKind};
pub use feature::{decode_geojson, encode_geojson, Feature, FeatureCollection, GeoJson};
pub use geometry::{decode_geometry, encode_geometry, Geometry, Position};
pub use lnglat::{LngLat, LngLatBounds};
pub use union::{decode_string_or_number, ObjectOrString};
