//! Configuration loading, placeholder fallback and key order.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod fixtures;

use fixtures::{two_region_config, ConfigBuilder, ForecastTypeBuilder};
use nusawave_viewer::config::{ConfigOrigin, ConfigStore, ConfigTree};
use nusawave_viewer::regions::RegionRegistry;
use nusawave_viewer::ViewerError;

// ============================================================================
// Fetched configuration
// ============================================================================

#[test]
fn test_fetched_regions_keep_document_order() {
    let registry = RegionRegistry::builtin();
    let store = ConfigStore::resolve(Ok(two_region_config()), &registry);

    assert_eq!(store.origin(), ConfigOrigin::Fetched);
    let ids: Vec<&str> = store.region_ids().collect();
    assert_eq!(&ids[..2], &["java_sea", "malacca_strait"]);
    assert_eq!(ids.len(), registry.len());
}

#[test]
fn test_fetched_data_wins_over_placeholders() {
    let store = ConfigStore::resolve(Ok(two_region_config()), &RegionRegistry::builtin());

    assert!(!store.is_placeholder("java_sea"));
    let types: Vec<&str> = store
        .region("java_sea")
        .unwrap()
        .forecast_types
        .keys()
        .collect();
    assert_eq!(types, vec!["weather", "wave"]);

    let weather = store.forecast_type("java_sea", "weather").unwrap();
    assert_eq!(weather.timestamps, vec!["2025010100", "2025010103"]);
    assert_eq!(weather.unit_of("mslp"), "hPa");
}

#[test]
fn test_missing_regions_are_patched_with_placeholders() {
    let store = ConfigStore::resolve(Ok(two_region_config()), &RegionRegistry::builtin());

    assert!(store.is_placeholder("banda_sea"));
    let banda = store.region("banda_sea").unwrap();
    assert!(!banda.forecast_types.is_empty());
    for ft in banda.forecast_types.values() {
        assert!(ft.timestamps.is_empty());
        assert!(!ft.models.is_empty());
    }
}

#[test]
fn test_parameter_keys_keep_document_order() {
    let json = ConfigBuilder::new()
        .region("java_sea")
        .forecast_type(
            "weather",
            ForecastTypeBuilder::new()
                .parameter("wind", "m/s")
                .parameter("mslp", "hPa")
                .parameter("rainrate", "mm/h"),
        )
        .build();
    let wind = json.find("\"wind\"").unwrap();
    let mslp = json.find("\"mslp\"").unwrap();
    assert!(wind < mslp);

    let tree = ConfigTree::from_json(&json).unwrap();
    let keys: Vec<&str> = tree
        .forecast_type("java_sea", "weather")
        .unwrap()
        .parameters
        .keys()
        .collect();
    assert_eq!(keys, vec!["wind", "mslp", "rainrate"]);
}

#[test]
fn test_null_unit_reads_as_empty() {
    let json = ConfigBuilder::new()
        .region("java_sea")
        .forecast_type(
            "weather",
            ForecastTypeBuilder::new()
                .parameter_without_unit("rainrate")
                .models(&["gfs"]),
        )
        .build();
    let tree = ConfigTree::from_json(&json).unwrap();
    let ft = tree.forecast_type("java_sea", "weather").unwrap();
    assert!(ft.parameters.contains_key("rainrate"));
    assert_eq!(ft.unit_of("rainrate"), "");
}

#[test]
fn test_unknown_region_ids_are_kept() {
    let json = ConfigBuilder::new()
        .region("celebes_offshore")
        .forecast_type("wave", ForecastTypeBuilder::new().parameter("swh", "m"))
        .build();
    let store = ConfigStore::resolve(Ok(json), &RegionRegistry::builtin());
    assert_eq!(store.region_ids().next(), Some("celebes_offshore"));
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_transport_failure_falls_back() {
    let registry = RegionRegistry::builtin();
    let store = ConfigStore::resolve(
        Err(ViewerError::HttpStatus {
            status: 404,
            url: "assets/config/config.json".into(),
        }),
        &registry,
    );

    assert_eq!(store.origin(), ConfigOrigin::Fallback);
    let ids: Vec<&str> = store.region_ids().collect();
    let builtin: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, builtin);
    for id in ids {
        assert!(store.is_placeholder(id));
        assert!(!store.region(id).unwrap().forecast_types.is_empty());
    }
}

#[test]
fn test_malformed_payload_falls_back() {
    let store = ConfigStore::resolve(Ok("{not json".into()), &RegionRegistry::builtin());
    assert_eq!(store.origin(), ConfigOrigin::Fallback);
}

#[test]
fn test_missing_regions_key_falls_back() {
    let store = ConfigStore::resolve(Ok(r#"{"areas": {}}"#.into()), &RegionRegistry::builtin());
    assert_eq!(store.origin(), ConfigOrigin::Fallback);
}

#[test]
fn test_patched_tree_serializes_in_order() {
    let store = ConfigStore::resolve(Ok(two_region_config()), &RegionRegistry::builtin());
    let json = store.to_json().unwrap();
    let java = json.find("\"java_sea\"").unwrap();
    let malacca = json.find("\"malacca_strait\"").unwrap();
    let banda = json.find("\"banda_sea\"").unwrap();
    assert!(java < malacca && malacca < banda);

    let reparsed = ConfigTree::from_json(&json).unwrap();
    assert_eq!(&reparsed, store.tree());
}
