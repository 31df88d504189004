//! Test fixtures for building configuration documents in memory.
//!
//! # Example
//!
//! ```rust
//! use fixtures::{ConfigBuilder, ForecastTypeBuilder};
//!
//! let json = ConfigBuilder::new()
//!     .region("java_sea")
//!     .forecast_type(
//!         "wave",
//!         ForecastTypeBuilder::new()
//!             .parameter("swh", "m")
//!             .models(&["gfswave"])
//!             .timestamps(&["2025010100"]),
//!     )
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use serde_json::{json, Value};

// ============================================================================
// Forecast Type Builder
// ============================================================================

/// Builder for one `forecast_types` entry. Parameters are written in the
/// order they were added.
#[derive(Debug, Clone, Default)]
pub struct ForecastTypeBuilder {
    parameters: Vec<(String, Value)>,
    models: Vec<String>,
    timestamps: Vec<String>,
}

impl ForecastTypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parameter(mut self, name: &str, unit: &str) -> Self {
        self.parameters
            .push((name.to_string(), Value::String(unit.to_string())));
        self
    }

    /// Parameter whose unit is JSON `null`.
    pub fn parameter_without_unit(mut self, name: &str) -> Self {
        self.parameters.push((name.to_string(), Value::Null));
        self
    }

    pub fn models(mut self, models: &[&str]) -> Self {
        self.models = models.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn timestamps(mut self, timestamps: &[&str]) -> Self {
        self.timestamps = timestamps.iter().map(|t| t.to_string()).collect();
        self
    }

    fn to_json(&self) -> String {
        let parameters: Vec<String> = self
            .parameters
            .iter()
            .map(|(name, unit)| format!("{}: {}", json!(name), unit))
            .collect();
        format!(
            "{{\"parameters\": {{{}}}, \"models\": {}, \"timestamps\": {}}}",
            parameters.join(", "),
            json!(self.models),
            json!(self.timestamps)
        )
    }
}

// ============================================================================
// Config Builder
// ============================================================================

/// Builder for a whole configuration document. Keys are emitted in insertion
/// order.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    regions: Vec<(String, Vec<(String, ForecastTypeBuilder)>)>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new region; following `forecast_type` calls attach to it.
    pub fn region(mut self, id: &str) -> Self {
        self.regions.push((id.to_string(), Vec::new()));
        self
    }

    pub fn forecast_type(mut self, name: &str, ft: ForecastTypeBuilder) -> Self {
        let (_, types) = self
            .regions
            .last_mut()
            .expect("call region() before forecast_type()");
        types.push((name.to_string(), ft));
        self
    }

    pub fn build(&self) -> String {
        let regions: Vec<String> = self
            .regions
            .iter()
            .map(|(id, types)| {
                let types: Vec<String> = types
                    .iter()
                    .map(|(name, ft)| format!("{}: {}", json!(name), ft.to_json()))
                    .collect();
                format!(
                    "{}: {{\"forecast_types\": {{{}}}}}",
                    json!(id),
                    types.join(", ")
                )
            })
            .collect();
        format!("{{\"regions\": {{{}}}}}", regions.join(", "))
    }
}

/// Two fetched regions with distinct products.
pub fn two_region_config() -> String {
    ConfigBuilder::new()
        .region("java_sea")
        .forecast_type(
            "weather",
            ForecastTypeBuilder::new()
                .parameter("wind", "m/s")
                .parameter("mslp", "hPa")
                .models(&["gfs", "ecmwf"])
                .timestamps(&["2025010100", "2025010103"]),
        )
        .forecast_type(
            "wave",
            ForecastTypeBuilder::new()
                .parameter("swh", "m")
                .models(&["gfswave"])
                .timestamps(&["2025010106"]),
        )
        .region("malacca_strait")
        .forecast_type(
            "ocean",
            ForecastTypeBuilder::new()
                .parameter("seatemp", "°C")
                .models(&["hycom"])
                .timestamps(&["2025010200"]),
        )
        .build()
}
