use maplibre_bridge::BulkTransaction;
use maplibre_geojson::{encode_geojson, Feature, FeatureCollection, GeoJson, Geometry};
use maplibre_style::{encode_source, GeoJsonSource, Source};
use serde_json::json;

#[test]
fn batch_preserves_insertion_order_exactly() {
    let mut tx = BulkTransaction::new();
    for name in ["source-A", "source-B", "source-C"] {
        tx.add(
            "setSourceData",
            [json!(name), json!({"type": "FeatureCollection", "features": []})],
        );
    }
    let wire = tx.serialize();
    let rows = wire.as_array().expect("array");
    assert_eq!(rows.len(), 3);
    for (row, name) in rows.iter().zip(["source-A", "source-B", "source-C"]) {
        assert_eq!(row["event"], json!("setSourceData"));
        assert_eq!(row["data"][0], json!(name));
    }
}

#[test]
fn duplicate_entries_are_not_deduplicated() {
    let mut tx = BulkTransaction::new();
    tx.add("setZoom", [json!(10.0)]);
    tx.add("setZoom", [json!(10.0)]);
    assert_eq!(tx.serialize().as_array().map(Vec::len), Some(2));
}

#[test]
fn set_source_data_carries_a_pre_encoded_fragment() {
    let source = Source::GeoJson(GeoJsonSource::new(GeoJson::FeatureCollection(
        FeatureCollection::new(vec![{
            let mut f = Feature::new(Geometry::Point([10.0, 20.0]));
            f.id = Some("bulk-test".to_string());
            f
        }]),
    )));
    // What the component does before dispatch: encode, pull out `data`.
    let data = encode_source(&source)["data"].clone();

    let mut tx = BulkTransaction::new();
    tx.add("setSourceData", [json!("source-id"), data]);

    let wire = tx.serialize();
    assert_eq!(wire[0]["event"], json!("setSourceData"));
    assert_eq!(wire[0]["data"][0], json!("source-id"));
    assert_eq!(wire[0]["data"][1]["type"], json!("FeatureCollection"));
    assert_eq!(
        wire[0]["data"][1]["features"][0]["id"],
        json!("bulk-test")
    );
}

#[test]
fn url_and_inline_fragments_coexist_in_one_batch() {
    let inline = encode_source(&Source::GeoJson(GeoJsonSource::new(GeoJson::Feature(
        Feature::new(Geometry::Point([0.0, 0.0])),
    ))))["data"]
        .clone();
    let url = encode_source(&Source::GeoJson(GeoJsonSource::new(
        "https://example.com/data.geojson",
    )))["data"]
        .clone();

    let mut tx = BulkTransaction::new();
    tx.add("setSourceData", [json!("source1"), inline]);
    tx.add("setSourceData", [json!("source2"), url]);

    let wire = tx.serialize();
    assert!(wire[0]["data"][1].is_object());
    assert_eq!(wire[1]["data"][1], json!("https://example.com/data.geojson"));
}

#[test]
fn large_collection_flushes_in_one_entry() {
    let features = (0..1000)
        .map(|i| Feature::new(Geometry::Point([i as f64 * 0.01, 0.0])))
        .collect();
    let doc = GeoJson::FeatureCollection(FeatureCollection::new(features));

    let mut tx = BulkTransaction::new();
    tx.add("setSourceData", [json!("big"), encode_geojson(&doc)]);

    let wire = tx.into_value();
    let rows = wire.as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0]["data"][1]["features"].as_array().map(Vec::len),
        Some(1000)
    );
}

#[test]
fn mixed_operations_replay_in_call_order() {
    let mut tx = BulkTransaction::new();
    tx.add("addSource", [json!("s"), json!({"type": "geojson", "data": "https://x/d.geojson"})]);
    tx.add("addLayer", [json!({"type": "circle", "id": "dots", "source": "s"})]);
    tx.add("setFilter", [json!("dots"), json!(["==", ["get", "kind"], "poi"])]);

    let wire = tx.serialize();
    let names: Vec<_> = wire
        .as_array()
        .expect("array")
        .iter()
        .map(|row| row["event"].as_str().map(str::to_string))
        .collect();
    assert_eq!(
        names,
        [
            Some("addSource".to_string()),
            Some("addLayer".to_string()),
            Some("setFilter".to_string())
        ]
    );
}
