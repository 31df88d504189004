//! Pixel ⇄ geographic mapping and region hit-testing through the overlay.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic
)]

use nusawave_viewer::geo::{
    geo_bounds_to_pixel_rect, geo_to_pixel, pixel_to_geo, ElementSize, GeoPoint, MapExtent,
};
use nusawave_viewer::overlay::{HoverFeedback, Overlay, LABEL_OFFSET_PX};
use nusawave_viewer::regions::{RegionRegistry, BUILTIN_REGIONS};
use test_case::test_case;

const SIZE: ElementSize = ElementSize::new(600.0, 450.0);
const EPS: f64 = 1e-9;

// ============================================================================
// Pixel → Geo
// ============================================================================

#[test_case(0.0, 0.0, 90.0, 25.0 ; "top left")]
#[test_case(600.0, 0.0, 150.0, 25.0 ; "top right")]
#[test_case(0.0, 450.0, 90.0, -20.0 ; "bottom left")]
#[test_case(600.0, 450.0, 150.0, -20.0 ; "bottom right")]
#[test_case(300.0, 225.0, 120.0, 2.5 ; "center")]
fn test_pixel_to_geo_corners(px: f64, py: f64, lon: f64, lat: f64) {
    let p = pixel_to_geo(px, py, SIZE, &MapExtent::default());
    assert!((p.lon - lon).abs() < EPS, "lon {} != {}", p.lon, lon);
    assert!((p.lat - lat).abs() < EPS, "lat {} != {}", p.lat, lat);
}

#[test_case(-60.0, 0.0 ; "left of element")]
#[test_case(660.0, 495.0 ; "beyond bottom right")]
fn test_pixel_to_geo_extrapolates(px: f64, py: f64) {
    let p = pixel_to_geo(px, py, SIZE, &MapExtent::default());
    let (x, y) = geo_to_pixel(p, SIZE, &MapExtent::default());
    assert!((x - px).abs() < EPS);
    assert!((y - py).abs() < EPS);
}

#[test]
fn test_round_trip_over_grid() {
    let extent = MapExtent::default();
    for py in (0..=450).step_by(45) {
        for px in (0..=600).step_by(60) {
            let (px, py) = (f64::from(px), f64::from(py));
            let (x, y) = geo_to_pixel(pixel_to_geo(px, py, SIZE, &extent), SIZE, &extent);
            assert!((x - px).abs() < 1e-6 && (y - py).abs() < 1e-6);
        }
    }
}

#[test]
fn test_mapping_follows_element_size() {
    let extent = MapExtent::default();
    let small = ElementSize::new(300.0, 225.0);
    let a = pixel_to_geo(150.0, 100.0, small, &extent);
    let b = pixel_to_geo(300.0, 200.0, SIZE, &extent);
    assert!((a.lon - b.lon).abs() < EPS && (a.lat - b.lat).abs() < EPS);
}

// ============================================================================
// Highlight rectangles
// ============================================================================

#[test]
fn test_every_region_rect_maps_back_inside() {
    let extent = MapExtent::default();
    for region in &BUILTIN_REGIONS {
        let rect = geo_bounds_to_pixel_rect(&region.bounds, SIZE, &extent);
        assert!(rect.width > 0.0 && rect.height > 0.0, "{}", region.id);

        let (cx, cy) = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        let p = pixel_to_geo(cx, cy, SIZE, &extent);
        assert!(region.contains(p.lon, p.lat), "{} center escapes", region.id);
    }
}

#[test]
fn test_rect_uses_north_west_origin() {
    let malacca = RegionRegistry::builtin().get("malacca_strait").unwrap();
    let rect = geo_bounds_to_pixel_rect(&malacca.bounds, SIZE, &MapExtent::default());
    // 10 px per degree on both axes
    assert!((rect.x - 50.0).abs() < EPS);
    assert!((rect.y - 190.0).abs() < EPS);
    assert!((rect.width - 100.0).abs() < EPS);
    assert!((rect.height - 60.0).abs() < EPS);
}

// ============================================================================
// Overlay hover
// ============================================================================

#[test]
fn test_hover_over_region_shows_label_offset() {
    let overlay = Overlay::new(MapExtent::default(), RegionRegistry::builtin());
    match overlay.hover(100.0, 220.0, SIZE) {
        HoverFeedback::Show {
            region_id,
            label,
            label_x,
            label_y,
            ..
        } => {
            assert_eq!(region_id, "malacca_strait");
            assert_eq!(label, "Malacca Strait");
            assert_eq!(label_x, 100.0 + LABEL_OFFSET_PX);
            assert_eq!(label_y, 220.0 + LABEL_OFFSET_PX);
        }
        HoverFeedback::Hidden => panic!("expected a region under the pointer"),
    }
}

#[test]
fn test_hover_outside_every_region_hides() {
    let overlay = Overlay::new(MapExtent::default(), RegionRegistry::builtin());
    // lon 145, lat 20: open ocean north of Papua
    assert_eq!(overlay.hover(550.0, 50.0, SIZE), HoverFeedback::Hidden);
}

#[test]
fn test_zero_sized_overlay_has_no_regions() {
    let overlay = Overlay::new(MapExtent::default(), RegionRegistry::builtin());
    assert!(overlay
        .region_at(10.0, 10.0, ElementSize::new(0.0, 0.0))
        .is_none());
}

#[test]
fn test_geo_to_pixel_of_extent_center() {
    let (x, y) = geo_to_pixel(GeoPoint::new(120.0, 2.5), SIZE, &MapExtent::default());
    assert!((x - 300.0).abs() < EPS && (y - 225.0).abs() < EPS);
}
