//! nusawave-viewer - forecast map viewer for the web
//!
//! Lets a user pick a region on a static overview map (click or dropdown),
//! then drill into forecast type, parameter, model and timestamp to show the
//! matching pre-rendered map image:
//! - Linear pixel ⇄ lon/lat mapping for click and hover hit-testing
//! - Ordered region registry with first-match tie-breaking
//! - Configuration tree with placeholder fallback when it cannot be loaded
//! - Cascading selectors that keep the image path in sync
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { MapViewer } from 'nusawave-viewer';
//! await init();
//! const viewer = new MapViewer({ closeSidebarOnSelect: true });
//! ```

// Display-independent core
pub mod cascade;
pub mod config;
pub mod error;
pub mod geo;
pub mod navigation;
pub mod options;
pub mod overlay;
pub mod regions;
pub mod storage;

// Browser glue
#[cfg(target_arch = "wasm32")]
pub mod logging;
#[cfg(target_arch = "wasm32")]
pub mod viewer;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
pub use viewer::MapViewer;

pub use cascade::{Cascade, CascadeStage, Refresh, SelectionState};
pub use config::{ConfigStore, ConfigTree};
pub use error::{Result, ViewerError};
pub use geo::{ElementSize, GeoBounds, GeoPoint, MapExtent, PixelRect};
pub use regions::{RegionDef, RegionRegistry};

/// Parse a configuration document and return it patched with placeholder regions
///
/// # Arguments
/// * `json` - The configuration document text
///
/// # Returns
/// The patched configuration tree as a JSON string
///
/// # Errors
/// Returns an error if the document is not valid JSON or has no `regions` map.
#[wasm_bindgen(js_name = parseConfig)]
pub fn parse_config(json: &str) -> std::result::Result<String, JsValue> {
    let store = ConfigStore::from_json(json, &RegionRegistry::builtin())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    store
        .to_json()
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Id of the first built-in region containing a lon/lat point
#[must_use]
#[wasm_bindgen(js_name = regionAt)]
pub fn region_at(lon: f64, lat: f64) -> Option<String> {
    RegionRegistry::builtin()
        .find_region_at(lon, lat)
        .map(|r| r.id.to_string())
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
