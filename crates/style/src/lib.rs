//! Typed source and layer models for the MapLibre style JSON dialect.
//!
//! Wire contract notes:
//! - every variant is keyed by its `type` discriminator string;
//! - optional fields are omitted when unset, never emitted as `null`;
//! - `layout`, `paint`, `filter`, and `promoteId` are opaque passthroughs.

mod fields;
pub mod layer;
pub mod source;

pub use layer::{
    decode_layer, encode_layer, BackgroundStyleLayer, Layer, RasterStyleLayer, VectorStyleLayer,
};
pub use source::{
    decode_source, encode_source, CanvasSource, Corners, GeoJsonData, GeoJsonSource, ImageSource,
    RasterDemSource, RasterSource, Source, VectorSource, VideoSource,
};
