//! Benchmarks for overlay hit-testing and cascade updates.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nusawave_viewer::cascade::Cascade;
use nusawave_viewer::config::ConfigStore;
use nusawave_viewer::geo::{ElementSize, MapExtent};
use nusawave_viewer::options::MapPaths;
use nusawave_viewer::overlay::Overlay;
use nusawave_viewer::regions::RegionRegistry;

const SIZE: ElementSize = ElementSize::new(600.0, 450.0);

/// Pointer sweep across the overlay, one hover per pixel row sample
fn bench_hover_sweep(c: &mut Criterion) {
    let overlay = Overlay::new(MapExtent::default(), RegionRegistry::builtin());

    c.bench_function("hover_sweep_600x450", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for y in (0..450).step_by(5) {
                for x in (0..600).step_by(5) {
                    if overlay
                        .region_at(black_box(f64::from(x)), black_box(f64::from(y)), SIZE)
                        .is_some()
                    {
                        hits += 1;
                    }
                }
            }
            hits
        })
    });
}

/// Region changes against the placeholder tree
fn bench_region_cycle(c: &mut Criterion) {
    let registry = RegionRegistry::builtin();
    let mut cascade = Cascade::new(
        ConfigStore::fallback(&registry),
        registry,
        MapPaths::default(),
    );

    c.bench_function("cascade_next_region", |b| {
        b.iter(|| black_box(cascade.next_region()))
    });
}

/// Parse and patch a small configuration document
fn bench_config_parse(c: &mut Criterion) {
    let registry = RegionRegistry::builtin();
    let json = r#"{"regions": {"java_sea": {"forecast_types": {"wave": {
        "parameters": {"swh": "m", "swell": "m"},
        "models": ["gfswave"],
        "timestamps": ["2025010100", "2025010103", "2025010106"]
    }}}}}"#;

    c.bench_function("config_parse_and_patch", |b| {
        b.iter(|| ConfigStore::from_json(black_box(json), &registry).expect("valid config"))
    });
}

criterion_group!(
    benches,
    bench_hover_sweep,
    bench_region_cycle,
    bench_config_parse
);
criterion_main!(benches);
