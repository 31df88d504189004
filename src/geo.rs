//! Linear pixel ⇄ longitude/latitude mapping for the region overlay.
//!
//! The overlay image is treated as a plain rectangle-to-rectangle transform of
//! the configured [`MapExtent`]: the left edge is `lon_min`, the top edge is
//! `lat_max`. Pixel Y grows downward while latitude grows upward, so the
//! vertical axis is inverted. Nothing is clamped; points outside the element
//! extrapolate past the extent.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// A longitude/latitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl GeoBounds {
    pub const fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Self {
        Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        }
    }

    /// Point-in-box test, inclusive on all four edges.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }

    /// True when `other` lies entirely within `self`.
    pub fn encloses(&self, other: &GeoBounds) -> bool {
        other.lon_min >= self.lon_min
            && other.lon_max <= self.lon_max
            && other.lat_min >= self.lat_min
            && other.lat_max <= self.lat_max
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.lon_min + self.lon_max) / 2.0,
            (self.lat_min + self.lat_max) / 2.0,
        )
    }
}

/// The geographic rectangle the overlay image represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapExtent {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl Default for MapExtent {
    /// Indonesian maritime continent, as drawn on `staticmap.png`.
    fn default() -> Self {
        Self {
            lon_min: 90.0,
            lon_max: 150.0,
            lat_min: -20.0,
            lat_max: 25.0,
        }
    }
}

impl MapExtent {
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn bounds(&self) -> GeoBounds {
        GeoBounds::new(self.lon_min, self.lon_max, self.lat_min, self.lat_max)
    }

    /// Both spans are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        let lon = self.lon_span();
        let lat = self.lat_span();
        lon.is_finite() && lat.is_finite() && lon > 0.0 && lat > 0.0
    }
}

/// Rendered size of the overlay element in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

impl ElementSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// An element that has not been laid out yet (hidden section, image still loading).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle in element pixel space, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict interior test.
    pub fn contains_interior(&self, px: f64, py: f64) -> bool {
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }
}

/// Convert a pixel offset within the overlay element to a geographic point.
pub fn pixel_to_geo(px: f64, py: f64, size: ElementSize, extent: &MapExtent) -> GeoPoint {
    let lon = extent.lon_min + (px / size.width) * extent.lon_span();
    let lat = extent.lat_max - (py / size.height) * extent.lat_span();
    GeoPoint { lon, lat }
}

/// Convert a geographic point to a pixel offset; the inverse of [`pixel_to_geo`].
pub fn geo_to_pixel(point: GeoPoint, size: ElementSize, extent: &MapExtent) -> (f64, f64) {
    let x = (point.lon - extent.lon_min) / extent.lon_span() * size.width;
    let y = (extent.lat_max - point.lat) / extent.lat_span() * size.height;
    (x, y)
}

/// Map a bounding box onto the overlay element, edge by edge.
///
/// The north-west corner becomes the rectangle origin and the south-east corner
/// its far edge, so any interior pixel maps back inside `bounds` through
/// [`pixel_to_geo`].
pub fn geo_bounds_to_pixel_rect(
    bounds: &GeoBounds,
    size: ElementSize,
    extent: &MapExtent,
) -> PixelRect {
    let (left, top) = geo_to_pixel(GeoPoint::new(bounds.lon_min, bounds.lat_max), size, extent);
    let (right, bottom) =
        geo_to_pixel(GeoPoint::new(bounds.lon_max, bounds.lat_min), size, extent);
    PixelRect {
        x: left,
        y: top,
        width: right - left,
        height: bottom - top,
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn overlay() -> ElementSize {
        ElementSize::new(600.0, 450.0)
    }

    #[test]
    fn test_top_left_corner() {
        let p = pixel_to_geo(0.0, 0.0, overlay(), &MapExtent::default());
        assert!((p.lon - 90.0).abs() < EPS);
        assert!((p.lat - 25.0).abs() < EPS);
    }

    #[test]
    fn test_bottom_right_corner() {
        let p = pixel_to_geo(600.0, 450.0, overlay(), &MapExtent::default());
        assert!((p.lon - 150.0).abs() < EPS);
        assert!((p.lat + 20.0).abs() < EPS);
    }

    #[test]
    fn test_outside_element_extrapolates() {
        let p = pixel_to_geo(-60.0, 900.0, overlay(), &MapExtent::default());
        assert!((p.lon - 84.0).abs() < EPS);
        assert!((p.lat + 65.0).abs() < EPS);
    }

    #[test]
    fn test_rect_for_full_extent_covers_element() {
        let extent = MapExtent::default();
        let rect = geo_bounds_to_pixel_rect(&extent.bounds(), overlay(), &extent);
        assert!(rect.x.abs() < EPS);
        assert!(rect.y.abs() < EPS);
        assert!((rect.width - 600.0).abs() < EPS);
        assert!((rect.height - 450.0).abs() < EPS);
    }

    #[test]
    fn test_rect_orientation() {
        // 10 px per degree in both axes
        let extent = MapExtent::default();
        let rect = geo_bounds_to_pixel_rect(
            &GeoBounds::new(95.0, 105.0, 0.0, 6.0),
            overlay(),
            &extent,
        );
        assert!((rect.x - 50.0).abs() < EPS);
        assert!((rect.y - 190.0).abs() < EPS);
        assert!((rect.width - 100.0).abs() < EPS);
        assert!((rect.height - 60.0).abs() < EPS);
    }

    #[test]
    fn test_geo_to_pixel_inverts_pixel_to_geo() {
        let extent = MapExtent::default();
        let p = pixel_to_geo(123.0, 321.0, overlay(), &extent);
        let (x, y) = geo_to_pixel(p, overlay(), &extent);
        assert!((x - 123.0).abs() < 1e-6);
        assert!((y - 321.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_contains_is_inclusive() {
        let b = GeoBounds::new(95.0, 105.0, 0.0, 6.0);
        assert!(b.contains(95.0, 0.0));
        assert!(b.contains(105.0, 6.0));
        assert!(!b.contains(105.000_001, 3.0));
    }

    #[test]
    fn test_extent_validity() {
        assert!(MapExtent::default().is_valid());
        let flipped = MapExtent {
            lon_min: 150.0,
            lon_max: 90.0,
            ..MapExtent::default()
        };
        assert!(!flipped.is_valid());
    }

    #[test]
    fn test_empty_element() {
        assert!(ElementSize::new(0.0, 450.0).is_empty());
        assert!(!overlay().is_empty());
    }
}
