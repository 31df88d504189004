//! Static registry of selectable forecast regions.
//!
//! Regions are plain longitude/latitude boxes. Boxes may overlap; lookups scan
//! the list in order and the first containing region wins, so list order is
//! part of the observable behavior.

use crate::config::{ForecastTypeConfig, RegionConfig};
use crate::geo::GeoBounds;

/// A named region of the overlay map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionDef {
    /// Stable key, used in configuration and image paths.
    pub id: &'static str,
    /// Human readable label shown on hover and in the region selector.
    pub display_name: &'static str,
    pub bounds: GeoBounds,
}

impl RegionDef {
    pub const fn new(id: &'static str, display_name: &'static str, bounds: GeoBounds) -> Self {
        Self {
            id,
            display_name,
            bounds,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.bounds.contains(lon, lat)
    }
}

/// Built-in regions, in tie-break order.
pub static BUILTIN_REGIONS: [RegionDef; 13] = [
    RegionDef::new(
        "malacca_strait",
        "Malacca Strait",
        GeoBounds::new(95.0, 105.0, 0.0, 6.0),
    ),
    RegionDef::new(
        "andaman_gulf_thailand",
        "Andaman Sea & Gulf of Thailand",
        GeoBounds::new(92.0, 106.0, 1.0, 15.0),
    ),
    RegionDef::new(
        "natuna_sea",
        "Natuna & South China Sea",
        GeoBounds::new(103.0, 118.0, 0.0, 12.0),
    ),
    RegionDef::new(
        "west_sumatra",
        "West Sumatra Waters",
        GeoBounds::new(90.0, 100.0, -8.0, 0.0),
    ),
    RegionDef::new(
        "karimata_strait",
        "Karimata Strait",
        GeoBounds::new(104.0, 111.0, -4.0, 0.0),
    ),
    RegionDef::new(
        "java_sea",
        "Java Sea",
        GeoBounds::new(105.0, 118.0, -8.0, -3.0),
    ),
    RegionDef::new(
        "south_java",
        "Indian Ocean South of Java",
        GeoBounds::new(100.0, 125.0, -20.0, -8.0),
    ),
    RegionDef::new(
        "makassar_strait",
        "Makassar Strait",
        GeoBounds::new(116.0, 120.0, -6.0, 3.0),
    ),
    RegionDef::new(
        "sulawesi_sea",
        "Sulawesi Sea",
        GeoBounds::new(118.0, 127.0, 1.0, 8.0),
    ),
    RegionDef::new(
        "maluku_sea",
        "Maluku & Halmahera Seas",
        GeoBounds::new(124.0, 131.0, -3.0, 4.0),
    ),
    RegionDef::new(
        "banda_sea",
        "Banda & Flores Seas",
        GeoBounds::new(118.0, 132.0, -9.0, -3.0),
    ),
    RegionDef::new(
        "arafura_sea",
        "Arafura & Timor Seas",
        GeoBounds::new(124.0, 141.0, -13.0, -5.0),
    ),
    RegionDef::new(
        "pacific_papua",
        "Pacific North of Papua",
        GeoBounds::new(131.0, 150.0, -3.0, 10.0),
    ),
];

/// An ordered, read-only view over a list of regions.
#[derive(Debug, Clone, Copy)]
pub struct RegionRegistry<'a> {
    regions: &'a [RegionDef],
}

impl Default for RegionRegistry<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionRegistry<'static> {
    /// The compiled-in region list.
    pub fn builtin() -> Self {
        Self {
            regions: &BUILTIN_REGIONS,
        }
    }
}

impl<'a> RegionRegistry<'a> {
    pub fn new(regions: &'a [RegionDef]) -> Self {
        Self { regions }
    }

    /// First region whose box contains the point (edges inclusive).
    pub fn find_region_at(&self, lon: f64, lat: f64) -> Option<&'a RegionDef> {
        self.regions.iter().find(|r| r.contains(lon, lat))
    }

    pub fn get(&self, id: &str) -> Option<&'a RegionDef> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Display label for a region id, falling back to the id itself.
    pub fn display_name<'s>(&self, id: &'s str) -> &'s str {
        self.get(id).map(|r| r.display_name).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RegionDef> {
        self.regions.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + 'a {
        self.regions.iter().map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Stand-in forecast tree for a region the configuration does not describe.
///
/// The output is identical for every call so regions stay selectable (with
/// empty timestamp lists) before real products exist for them.
pub fn synthesize_placeholder(region_id: &str) -> RegionConfig {
    log::debug!("synthesizing placeholder config for region '{region_id}'");

    let mut config = RegionConfig::default();
    config.forecast_types.insert(
        "weather".to_string(),
        ForecastTypeConfig::placeholder(
            &[
                ("wind", "m/s"),
                ("mslp", "hPa"),
                ("rainrate", "mm/h"),
                ("temp", "°C"),
                ("rh", "%"),
            ],
            &["gfs", "ecmwf"],
        ),
    );
    config.forecast_types.insert(
        "wave".to_string(),
        ForecastTypeConfig::placeholder(
            &[("swh", "m"), ("swell", "m"), ("wind", "m/s")],
            &["gfswave", "ecmwfwave"],
        ),
    );
    config.forecast_types.insert(
        "ocean".to_string(),
        ForecastTypeConfig::placeholder(
            &[
                ("seacurrent", "m/s"),
                ("seatemp", "°C"),
                ("ssh", "m"),
                ("seasalt", "psu"),
            ],
            &["hycom", "cmems"],
        ),
    );
    config
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
    use crate::geo::MapExtent;
    use std::collections::HashSet;

    #[test]
    fn test_malacca_wins_overlap_with_andaman() {
        let registry = RegionRegistry::builtin();
        let andaman = registry.get("andaman_gulf_thailand").unwrap();
        assert!(andaman.contains(100.0, 3.0));
        let hit = registry.find_region_at(100.0, 3.0).unwrap();
        assert_eq!(hit.id, "malacca_strait");
    }

    #[test]
    fn test_no_region_in_open_pacific() {
        let registry = RegionRegistry::builtin();
        assert!(registry.find_region_at(145.0, 20.0).is_none());
    }

    #[test]
    fn test_edges_are_inclusive() {
        let registry = RegionRegistry::builtin();
        assert_eq!(
            registry.find_region_at(150.0, 10.0).map(|r| r.id),
            Some("pacific_papua")
        );
    }

    #[test]
    fn test_builtin_ids_unique_and_inside_extent() {
        let extent = MapExtent::default().bounds();
        let mut seen = HashSet::new();
        for region in RegionRegistry::builtin().iter() {
            assert!(seen.insert(region.id), "duplicate id {}", region.id);
            assert!(extent.encloses(&region.bounds), "{} outside extent", region.id);
        }
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let registry = RegionRegistry::builtin();
        assert_eq!(registry.display_name("java_sea"), "Java Sea");
        assert_eq!(registry.display_name("atlantis"), "atlantis");
    }

    #[test]
    fn test_placeholder_is_deterministic() {
        let a = synthesize_placeholder("java_sea");
        let b = synthesize_placeholder("java_sea");
        assert_eq!(a, b);
        let types: Vec<&str> = a.forecast_types.keys().collect();
        assert_eq!(types, vec!["weather", "wave", "ocean"]);
        for (_, ft) in a.forecast_types.iter() {
            assert!(!ft.parameters.is_empty());
            assert!(!ft.models.is_empty());
            assert!(ft.timestamps.is_empty());
        }
    }
}
