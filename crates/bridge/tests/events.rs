use maplibre_bridge::{decode_map_mouse_event, QueriedFeature};
use maplibre_geojson::LngLat;
use serde_json::json;

#[test]
fn click_event_carries_rendered_features() {
    let event = decode_map_mouse_event(&json!({
        "point": {"x": 512.0, "y": 384.0},
        "lngLat": {"lng": -73.97, "lat": 40.78},
        "type": "click",
        "features": [
            {
                "type": "Feature",
                "id": 1001,
                "geometry": {"type": "Point", "coordinates": [-73.97, 40.78]},
                "properties": {"name": "The Met"},
                "source": "poi",
                "state": {}
            }
        ]
    }))
    .expect("decode");

    assert_eq!(event.lng_lat, LngLat::new(-73.97, 40.78));
    assert_eq!(event.features.len(), 1);
    let QueriedFeature::Feature(single) = &event.features[0] else {
        panic!("expected a single feature");
    };
    assert_eq!(single.source, "poi");
    // Numeric wire id, string model id.
    assert_eq!(single.feature.id.as_deref(), Some("1001"));
    let b = single.feature.bounds();
    assert_eq!(b.sw, b.ne);
}

#[test]
fn malformed_feature_rows_reject_the_whole_event() {
    let err = decode_map_mouse_event(&json!({
        "point": {"x": 0.0, "y": 0.0},
        "lngLat": {"lng": 0.0, "lat": 0.0},
        "type": "click",
        "features": [{"type": "Feature", "source": "poi"}]
    }))
    .unwrap_err();
    assert_eq!(err, maplibre_geojson::SchemaError::MissingField("geometry"));
}
