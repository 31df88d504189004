//! Viewer options passed from JavaScript at construction time.
//!
//! Every field has a default, so `new MapViewer()` and
//! `new MapViewer({ closeSidebarOnSelect: false })` are both valid.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_CONFIG_URL;
use crate::error::{Result, ViewerError};
use crate::geo::MapExtent;
use crate::navigation::{DEFAULT_SECTION, SECTION_STORAGE_KEY};

/// Width (CSS px) at or below which the layout is treated as mobile.
pub const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerOptions {
    /// URL of the configuration document.
    pub config_url: String,
    /// Directory that holds one sub-directory of rendered maps per region.
    pub map_asset_root: String,
    /// Extension of rendered map images, without the dot.
    pub image_extension: String,
    /// Image shown while no region is selected.
    pub fallback_image: String,
    /// Geographic bounds of the overlay image.
    pub extent: MapExtent,
    pub default_section: String,
    pub section_storage_key: String,
    /// Show the first region's maps once the configuration has loaded,
    /// instead of waiting on the region selector.
    pub select_first_region: bool,
    /// Close the sidebar after choosing a section on narrow viewports.
    pub close_sidebar_on_select: bool,
    pub mobile_breakpoint_px: f64,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            config_url: DEFAULT_CONFIG_URL.to_string(),
            map_asset_root: "assets/maps".to_string(),
            image_extension: "png".to_string(),
            fallback_image: "assets/maps/staticmap.png".to_string(),
            extent: MapExtent::default(),
            default_section: DEFAULT_SECTION.to_string(),
            section_storage_key: SECTION_STORAGE_KEY.to_string(),
            select_first_region: true,
            close_sidebar_on_select: true,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            log_level: "info".to_string(),
        }
    }
}

impl ViewerOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.extent.is_valid() {
            return Err(ViewerError::Options(format!(
                "map extent must have positive spans, got {:?}",
                self.extent
            )));
        }
        if self.image_extension.trim().is_empty() {
            return Err(ViewerError::Options("image extension is empty".into()));
        }
        if !(self.mobile_breakpoint_px.is_finite() && self.mobile_breakpoint_px > 0.0) {
            return Err(ViewerError::Options(format!(
                "mobile breakpoint must be positive, got {}",
                self.mobile_breakpoint_px
            )));
        }
        if self.section_storage_key.is_empty() {
            return Err(ViewerError::Options("section storage key is empty".into()));
        }
        Ok(())
    }

    /// Parsed log level; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn map_paths(&self) -> MapPaths {
        MapPaths {
            asset_root: self.map_asset_root.trim_end_matches('/').to_string(),
            extension: self.image_extension.trim_start_matches('.').to_string(),
            fallback_image: self.fallback_image.clone(),
        }
    }
}

/// Naming convention of rendered map images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPaths {
    pub asset_root: String,
    pub extension: String,
    pub fallback_image: String,
}

impl Default for MapPaths {
    fn default() -> Self {
        ViewerOptions::default().map_paths()
    }
}

impl MapPaths {
    /// `{root}/{region}/{region}_{type}_{parameter}_{model}_{timestamp}.{ext}`
    pub fn image_path(
        &self,
        region: &str,
        forecast_type: &str,
        parameter: &str,
        model: &str,
        timestamp: &str,
    ) -> String {
        format!(
            "{root}/{region}/{region}_{forecast_type}_{parameter}_{model}_{timestamp}.{ext}",
            root = self.asset_root,
            ext = self.extension,
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ViewerOptions::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: ViewerOptions =
            serde_json::from_str(r#"{"closeSidebarOnSelect": false, "imageExtension": "webp"}"#)
                .unwrap();
        assert!(!opts.close_sidebar_on_select);
        assert_eq!(opts.image_extension, "webp");
        assert_eq!(opts.config_url, DEFAULT_CONFIG_URL);
        assert_eq!(opts.section_storage_key, "nw_section");
        assert!(opts.select_first_region);
    }

    #[test]
    fn test_first_region_selection_can_be_disabled() {
        let opts: ViewerOptions =
            serde_json::from_str(r#"{"selectFirstRegion": false}"#).unwrap();
        assert!(!opts.select_first_region);
    }

    #[test]
    fn test_rejects_degenerate_extent() {
        let opts = ViewerOptions {
            extent: MapExtent {
                lat_min: 25.0,
                lat_max: 25.0,
                ..MapExtent::default()
            },
            ..ViewerOptions::default()
        };
        assert!(matches!(opts.validate(), Err(ViewerError::Options(_))));
    }

    #[test]
    fn test_image_path_convention() {
        let paths = MapPaths::default();
        assert_eq!(
            paths.image_path("java_sea", "wave", "swh", "gfswave", "2025010100"),
            "assets/maps/java_sea/java_sea_wave_swh_gfswave_2025010100.png"
        );
        assert_eq!(paths.fallback_image, "assets/maps/staticmap.png");
    }

    #[test]
    fn test_map_paths_normalizes_separators() {
        let opts = ViewerOptions {
            map_asset_root: "maps/".into(),
            image_extension: ".webp".into(),
            ..ViewerOptions::default()
        };
        assert_eq!(
            opts.map_paths().image_path("r", "t", "p", "m", "0"),
            "maps/r/r_t_p_m_0.webp"
        );
    }

    #[test]
    fn test_unknown_log_level_defaults_to_info() {
        let opts = ViewerOptions {
            log_level: "chatty".into(),
            ..ViewerOptions::default()
        };
        assert_eq!(opts.level_filter(), log::LevelFilter::Info);
    }
}
