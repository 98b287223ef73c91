//! Interop-boundary payloads for the map bridge: bulk transaction batching,
//! pointer/marker events, and rendered-feature query results.
//!
//! Everything here is synchronous data transformation. The bridge that
//! actually dispatches a serialized batch (and whatever asynchrony or
//! retries that involves) lives outside this crate.

pub mod event;
pub mod query;
pub mod transaction;

pub use event::{
    decode_map_mouse_event, decode_marker_event, encode_map_mouse_event, encode_marker_event,
    MapMouseEvent, MarkerEvent, PointLike,
};
pub use query::{
    decode_queried_feature, encode_queried_feature, QueriedCollection, QueriedFeature,
    QueriedSingle,
};
pub use transaction::{BulkTransaction, TransactionEntry};
