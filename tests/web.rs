//! Browser-only tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use nusawave_viewer::storage::{KeyValueStore, LocalStore};
use nusawave_viewer::{parse_config, region_at};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_store_keeps_plain_strings() {
    let mut store = LocalStore;
    store.set("nw_section_test", "about").unwrap();
    assert_eq!(store.get("nw_section_test").as_deref(), Some("about"));

    let raw = web_sys::window()
        .unwrap()
        .local_storage()
        .unwrap()
        .unwrap()
        .get_item("nw_section_test")
        .unwrap();
    assert_eq!(raw.as_deref(), Some("about"));
}

#[wasm_bindgen_test]
fn region_at_prefers_first_region() {
    assert_eq!(region_at(100.0, 3.0).as_deref(), Some("malacca_strait"));
    assert_eq!(region_at(145.0, 20.0), None);
}

#[wasm_bindgen_test]
fn parse_config_patches_placeholders() {
    let json = parse_config(r#"{"regions": {}}"#).unwrap();
    assert!(json.contains("\"pacific_papua\""));
    assert!(parse_config("[]").is_err());
}
