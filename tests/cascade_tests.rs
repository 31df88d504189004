//! Selector cascade driven the way the page drives it.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

mod fixtures;

use fixtures::two_region_config;
use nusawave_viewer::cascade::{
    Cascade, CascadeStage, Refresh, FORECAST_TYPE_PLACEHOLDER, REGION_PLACEHOLDER,
};
use nusawave_viewer::config::ConfigStore;
use nusawave_viewer::geo::{ElementSize, MapExtent};
use nusawave_viewer::options::{MapPaths, ViewerOptions};
use nusawave_viewer::overlay::Overlay;
use nusawave_viewer::regions::RegionRegistry;
use test_case::test_case;

const SIZE: ElementSize = ElementSize::new(600.0, 450.0);

fn fetched() -> Cascade {
    let registry = RegionRegistry::builtin();
    let store = ConfigStore::resolve(Ok(two_region_config()), &registry);
    Cascade::new(store, registry, MapPaths::default())
}

// ============================================================================
// Region changes
// ============================================================================

#[test]
fn test_initial_state_is_unselected() {
    let cascade = fetched();
    assert_eq!(cascade.stage(), CascadeStage::NoRegion);
    assert!(cascade.is_fallback_image());
    assert_eq!(cascade.image_src(), "assets/maps/staticmap.png");
    assert_eq!(cascade.region_choices()[0].label, REGION_PLACEHOLDER);
    assert_eq!(
        cascade.forecast_types().placeholder_text(),
        Some(FORECAST_TYPE_PLACEHOLDER)
    );
}

#[test]
fn test_region_change_recomputes_once() {
    let mut cascade = fetched();
    let before = cascade.path_revision();

    assert_eq!(cascade.select_region("java_sea"), Refresh::ALL);
    assert_eq!(cascade.path_revision(), before + 1);
    assert_eq!(cascade.stage(), CascadeStage::FullySpecified);
    assert_eq!(
        cascade.image_src(),
        "assets/maps/java_sea/java_sea_weather_wind_gfs_2025010100.png"
    );
}

#[test]
fn test_region_change_leaves_no_stale_selection() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    cascade.select_forecast_type("wave");
    assert_eq!(cascade.selection().parameter.as_deref(), Some("swh"));

    cascade.select_region("malacca_strait");
    let sel = cascade.selection();
    assert_eq!(sel.forecast_type.as_deref(), Some("ocean"));
    assert_eq!(sel.parameter.as_deref(), Some("seatemp"));
    assert_eq!(sel.model.as_deref(), Some("hycom"));
    assert_eq!(sel.timestamp.as_deref(), Some("2025010200"));
    for value in cascade.parameters().values() {
        assert_ne!(value, "swh");
    }
}

#[test_case("" ; "empty")]
#[test_case(REGION_PLACEHOLDER ; "sentinel")]
#[test_case("atlantis" ; "unknown")]
fn test_unselecting_region_resets(id: &str) {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    cascade.select_region(id);

    assert_eq!(cascade.stage(), CascadeStage::NoRegion);
    assert!(cascade.is_fallback_image());
    assert!(cascade.parameters().placeholder_text().is_some());
}

#[test]
fn test_placeholder_region_has_no_timestamp() {
    let mut cascade = fetched();
    cascade.select_region("banda_sea");
    assert_eq!(cascade.stage(), CascadeStage::TypeChosen);
    assert!(cascade.timestamps().is_empty());
    assert!(cascade.image_src().ends_with("_.png"));
}

#[test]
fn test_first_region_shown_after_load() {
    let mut cascade = fetched();
    assert_eq!(cascade.select_first_region(), Refresh::ALL);

    assert_eq!(cascade.region(), Some("java_sea"));
    assert_eq!(cascade.stage(), CascadeStage::FullySpecified);
    assert!(!cascade.is_fallback_image());
    assert_eq!(
        cascade.image_src(),
        "assets/maps/java_sea/java_sea_weather_wind_gfs_2025010100.png"
    );
}

#[test]
fn test_every_region_selectable_after_failed_fetch() {
    let registry = RegionRegistry::builtin();
    let mut cascade = Cascade::new(
        ConfigStore::fallback(&registry),
        registry,
        MapPaths::default(),
    );

    for id in registry.ids() {
        assert_eq!(cascade.select_region(id), Refresh::ALL);
        assert_eq!(cascade.region(), Some(id));
        assert!(!cascade.forecast_types().is_empty(), "{id}");
        assert!(cascade.forecast_types().placeholder_text().is_none(), "{id}");
        assert_eq!(cascade.stage(), CascadeStage::TypeChosen, "{id}");
    }
}

// ============================================================================
// Downstream changes
// ============================================================================

#[test]
fn test_forecast_type_change_rebuilds_children() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    let refresh = cascade.select_forecast_type("wave");

    assert!(refresh.parameters && refresh.models && refresh.timestamps && refresh.image);
    assert!(!refresh.region && !refresh.forecast_types);
    assert_eq!(
        cascade.image_src(),
        "assets/maps/java_sea/java_sea_wave_swh_gfswave_2025010106.png"
    );
}

#[test]
fn test_leaf_changes_only_touch_image() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");

    let refresh = cascade.select_model("ecmwf");
    assert!(refresh.image && !refresh.parameters && !refresh.timestamps);
    cascade.select_parameter("mslp");
    cascade.select_timestamp("2025010103");
    assert_eq!(
        cascade.image_src(),
        "assets/maps/java_sea/java_sea_weather_mslp_ecmwf_2025010103.png"
    );
}

#[test]
fn test_value_not_offered_is_ignored() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    let revision = cascade.path_revision();

    assert!(cascade.select_model("hycom").is_empty());
    assert!(cascade.select_forecast_type("ocean").is_empty());
    assert_eq!(cascade.path_revision(), revision);
}

#[test]
fn test_parameter_order_follows_document() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    let values: Vec<&str> = cascade.parameters().values().collect();
    // Document order, not alphabetical
    assert_eq!(values, vec!["wind", "mslp"]);
    assert_eq!(cascade.selection().parameter.as_deref(), Some("wind"));
}

#[test]
fn test_parameter_labels_carry_units() {
    let mut cascade = fetched();
    cascade.select_region("java_sea");
    let labels: Vec<&str> = cascade
        .parameters()
        .choices()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(labels, vec!["wind (m/s)", "mslp (hPa)"]);
}

// ============================================================================
// Overlay and cycling
// ============================================================================

#[test]
fn test_overlay_click_selects_region() {
    let overlay = Overlay::new(MapExtent::default(), RegionRegistry::builtin());
    let mut cascade = fetched();

    // lon 100, lat 3: inside Malacca Strait and the Andaman box; first wins
    let refresh = overlay.click(&mut cascade, 100.0, 220.0, SIZE);
    assert_eq!(refresh, Refresh::ALL);
    assert_eq!(cascade.region(), Some("malacca_strait"));

    assert!(overlay.click(&mut cascade, 550.0, 50.0, SIZE).is_empty());
    assert_eq!(cascade.region(), Some("malacca_strait"));
}

#[test]
fn test_next_region_wraps() {
    let mut cascade = fetched();
    let count = cascade.config().region_ids().count();

    cascade.next_region();
    assert_eq!(cascade.region(), Some("java_sea"));
    for _ in 0..count {
        cascade.next_region();
    }
    assert_eq!(cascade.region(), Some("java_sea"));
}

#[test]
fn test_custom_asset_paths() {
    let options: ViewerOptions = serde_json::from_str(
        r#"{"mapAssetRoot": "/static/maps", "imageExtension": "webp"}"#,
    )
    .unwrap();
    let registry = RegionRegistry::builtin();
    let store = ConfigStore::resolve(Ok(two_region_config()), &registry);
    let mut cascade = Cascade::new(store, registry, options.map_paths());

    cascade.select_region("malacca_strait");
    assert_eq!(
        cascade.image_src(),
        "/static/maps/malacca_strait/malacca_strait_ocean_seatemp_hycom_2025010200.webp"
    );
}
