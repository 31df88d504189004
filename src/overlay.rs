//! Click and hover hit-testing on the region overlay.
//!
//! Pointer offsets are mapped to lon/lat, resolved against the region
//! registry, and turned into a cascade update (click) or highlight geometry
//! (hover). Nothing here touches the DOM.

use serde::Serialize;

use crate::cascade::{Cascade, Refresh};
use crate::geo::{geo_bounds_to_pixel_rect, pixel_to_geo, ElementSize, MapExtent, PixelRect};
use crate::regions::{RegionDef, RegionRegistry};

/// Distance of the floating label from the pointer, in CSS pixels.
pub const LABEL_OFFSET_PX: f64 = 12.0;

/// What to draw for the current pointer position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HoverFeedback {
    Hidden,
    #[serde(rename_all = "camelCase")]
    Show {
        region_id: &'static str,
        label: &'static str,
        highlight: PixelRect,
        label_x: f64,
        label_y: f64,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    extent: MapExtent,
    registry: RegionRegistry<'static>,
}

impl Overlay {
    pub fn new(extent: MapExtent, registry: RegionRegistry<'static>) -> Self {
        Self { extent, registry }
    }

    pub fn extent(&self) -> &MapExtent {
        &self.extent
    }

    /// Region under a pixel offset; `None` off-region or before layout.
    pub fn region_at(&self, px: f64, py: f64, size: ElementSize) -> Option<&'static RegionDef> {
        if size.is_empty() {
            return None;
        }
        let point = pixel_to_geo(px, py, size, &self.extent);
        let hit = self.registry.find_region_at(point.lon, point.lat);
        if hit.is_none() {
            log::debug!(
                "no region at ({:.2}, {:.2}) for pixel ({px:.0}, {py:.0})",
                point.lon,
                point.lat
            );
        }
        hit
    }

    pub fn highlight_rect(&self, region: &RegionDef, size: ElementSize) -> PixelRect {
        geo_bounds_to_pixel_rect(&region.bounds, size, &self.extent)
    }

    pub fn hover(&self, px: f64, py: f64, size: ElementSize) -> HoverFeedback {
        match self.region_at(px, py, size) {
            Some(region) => HoverFeedback::Show {
                region_id: region.id,
                label: region.display_name,
                highlight: self.highlight_rect(region, size),
                label_x: px + LABEL_OFFSET_PX,
                label_y: py + LABEL_OFFSET_PX,
            },
            None => HoverFeedback::Hidden,
        }
    }

    /// Select the clicked region and rerun the whole cascade. Misses are ignored.
    pub fn click(&self, cascade: &mut Cascade, px: f64, py: f64, size: ElementSize) -> Refresh {
        match self.region_at(px, py, size) {
            Some(region) => cascade.select_region(region.id),
            None => Refresh::NONE,
        }
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

    fn overlay() -> Overlay {
        Overlay::new(MapExtent::default(), RegionRegistry::builtin())
    }

    const SIZE: ElementSize = ElementSize::new(600.0, 450.0);

    #[test]
    fn test_pixel_resolves_to_malacca() {
        // lon 100, lat 3 at 10 px per degree
        let region = overlay().region_at(100.0, 220.0, SIZE).unwrap();
        assert_eq!(region.id, "malacca_strait");
    }

    #[test]
    fn test_hover_positions_label_near_pointer() {
        match overlay().hover(100.0, 220.0, SIZE) {
            HoverFeedback::Show {
                region_id,
                label,
                highlight,
                label_x,
                label_y,
            } => {
                assert_eq!(region_id, "malacca_strait");
                assert_eq!(label, "Malacca Strait");
                assert!((highlight.x - 50.0).abs() < 1e-9);
                assert!((label_x - 112.0).abs() < 1e-9);
                assert!((label_y - 232.0).abs() < 1e-9);
            }
            HoverFeedback::Hidden => panic!("expected a highlighted region"),
        }
    }

    #[test]
    fn test_hover_off_region_hides() {
        // lon 145, lat 20
        assert_eq!(overlay().hover(550.0, 50.0, SIZE), HoverFeedback::Hidden);
    }

    #[test]
    fn test_unlaid_out_element_never_hits() {
        assert!(overlay()
            .region_at(0.0, 0.0, ElementSize::new(0.0, 0.0))
            .is_none());
    }
}
