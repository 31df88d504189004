//! Forecast configuration tree and its load-and-patch store.
//!
//! The configuration document is a nested `regions → forecast_types →
//! {parameters, models, timestamps}` tree. It is loaded once, patched with
//! placeholder entries for registry regions it does not mention, and never
//! mutated afterwards.

#[cfg(target_arch = "wasm32")]
mod fetch;
mod ordered;

pub use ordered::OrderedMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};
use crate::regions::{synthesize_placeholder, RegionRegistry};

/// Relative URL the browser viewer fetches by default.
pub const DEFAULT_CONFIG_URL: &str = "assets/config/config.json";

/// Display unit of a parameter. `null` and missing units are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct Unit(String);

impl Unit {
    pub fn new(unit: impl Into<String>) -> Self {
        Self(unit.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Option<String>> for Unit {
    fn from(value: Option<String>) -> Self {
        Self(value.unwrap_or_default())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.0
    }
}

/// Products available for one forecast type of one region.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastTypeConfig {
    #[serde(default)]
    pub parameters: OrderedMap<Unit>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub timestamps: Vec<String>,
}

impl ForecastTypeConfig {
    /// Build a timestamp-less entry from static parameter/unit pairs.
    pub fn placeholder(parameters: &[(&str, &str)], models: &[&str]) -> Self {
        Self {
            parameters: parameters
                .iter()
                .map(|(name, unit)| ((*name).to_string(), Unit::new(*unit)))
                .collect(),
            models: models.iter().map(|m| (*m).to_string()).collect(),
            timestamps: Vec::new(),
        }
    }

    /// Unit of a parameter, empty when unknown.
    pub fn unit_of(&self, parameter: &str) -> &str {
        self.parameters
            .get(parameter)
            .map(Unit::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionConfig {
    #[serde(default)]
    pub forecast_types: OrderedMap<ForecastTypeConfig>,
}

/// Root of the configuration document. `regions` is mandatory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigTree {
    pub regions: OrderedMap<RegionConfig>,
}

impl ConfigTree {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn region(&self, id: &str) -> Option<&RegionConfig> {
        self.regions.get(id)
    }

    pub fn forecast_type(&self, region: &str, forecast_type: &str) -> Option<&ForecastTypeConfig> {
        self.region(region)?.forecast_types.get(forecast_type)
    }

    /// Append placeholders for registry regions absent from the tree.
    ///
    /// Existing entries are never touched. Returns the ids that were added,
    /// in registry order.
    pub fn patch_missing(&mut self, registry: &RegionRegistry<'_>) -> Vec<String> {
        let mut added = Vec::new();
        for id in registry.ids() {
            if self.regions.contains_key(id) {
                continue;
            }
            self.regions
                .insert(id.to_string(), synthesize_placeholder(id));
            added.push(id.to_string());
        }
        added
    }
}

/// Where the active tree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    /// Parsed from the configuration document (possibly patched).
    Fetched,
    /// The document was unavailable; every region is a placeholder.
    Fallback,
}

/// The loaded, patched and frozen configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    tree: ConfigTree,
    origin: ConfigOrigin,
    placeholders: Vec<String>,
}

impl ConfigStore {
    /// Patch a fetched tree with placeholders for missing registry regions.
    pub fn from_tree(mut tree: ConfigTree, registry: &RegionRegistry<'_>) -> Self {
        let placeholders = tree.patch_missing(registry);
        Self {
            tree,
            origin: ConfigOrigin::Fetched,
            placeholders,
        }
    }

    pub fn from_json(text: &str, registry: &RegionRegistry<'_>) -> Result<Self> {
        let tree = ConfigTree::from_json(text)?;
        Ok(Self::from_tree(tree, registry))
    }

    /// Tree made only of placeholders, one per registry region.
    pub fn fallback(registry: &RegionRegistry<'_>) -> Self {
        let mut tree = ConfigTree::default();
        let placeholders = tree.patch_missing(registry);
        Self {
            tree,
            origin: ConfigOrigin::Fallback,
            placeholders,
        }
    }

    /// Turn the outcome of a single fetch attempt into a usable store.
    ///
    /// Any failure, whether transport or payload, degrades to [`Self::fallback`].
    pub fn resolve(fetched: Result<String>, registry: &RegionRegistry<'_>) -> Self {
        let parsed = fetched.and_then(|text| Self::from_json(&text, registry));
        match parsed {
            Ok(store) => {
                log::info!(
                    "loaded configuration: {} regions ({} placeholders)",
                    store.tree.regions.len(),
                    store.placeholders.len()
                );
                store
            }
            Err(e) => {
                log::warn!("configuration unavailable, using placeholder regions: {e}");
                Self::fallback(registry)
            }
        }
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn origin(&self) -> ConfigOrigin {
        self.origin
    }

    pub fn region(&self, id: &str) -> Option<&RegionConfig> {
        self.tree.region(id)
    }

    pub fn forecast_type(&self, region: &str, forecast_type: &str) -> Option<&ForecastTypeConfig> {
        self.tree.forecast_type(region, forecast_type)
    }

    /// Region ids in selector order: fetched regions first, then placeholders.
    pub fn region_ids(&self) -> impl Iterator<Item = &str> {
        self.tree.regions.keys()
    }

    /// True when the region's entry was synthesized rather than fetched.
    pub fn is_placeholder(&self, region: &str) -> bool {
        self.placeholders.iter().any(|id| id == region)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.tree).map_err(ViewerError::from)
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

    const SAMPLE: &str = r#"{
        "regions": {
            "java_sea": {
                "forecast_types": {
                    "wave": {
                        "parameters": {"swh": "m", "dir": null},
                        "models": ["gfswave"],
                        "timestamps": ["2025010100", "2025010103"]
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_null_unit_is_empty() {
        let tree = ConfigTree::from_json(SAMPLE).unwrap();
        let wave = tree.forecast_type("java_sea", "wave").unwrap();
        assert_eq!(wave.unit_of("swh"), "m");
        assert_eq!(wave.unit_of("dir"), "");
        assert_eq!(wave.unit_of("missing"), "");
    }

    #[test]
    fn test_missing_nested_members_default_empty() {
        let tree =
            ConfigTree::from_json(r#"{"regions": {"a": {"forecast_types": {"t": {}}}, "b": {}}}"#)
                .unwrap();
        let t = tree.forecast_type("a", "t").unwrap();
        assert!(t.parameters.is_empty());
        assert!(t.models.is_empty());
        assert!(tree.region("b").unwrap().forecast_types.is_empty());
    }

    #[test]
    fn test_missing_regions_key_is_error() {
        assert!(ConfigTree::from_json(r#"{"areas": {}}"#).is_err());
    }

    #[test]
    fn test_fetched_data_wins_over_placeholder() {
        let store = ConfigStore::from_json(SAMPLE, &RegionRegistry::builtin()).unwrap();
        let java = store.region("java_sea").unwrap();
        assert_eq!(java.forecast_types.keys().collect::<Vec<_>>(), vec!["wave"]);
        assert!(!store.is_placeholder("java_sea"));
        assert!(store.is_placeholder("malacca_strait"));
        assert_eq!(store.region_ids().next(), Some("java_sea"));
        assert_eq!(store.origin(), ConfigOrigin::Fetched);
    }

    #[test]
    fn test_resolve_falls_back_on_error() {
        let registry = RegionRegistry::builtin();
        let store = ConfigStore::resolve(Err(ViewerError::Fetch("offline".into())), &registry);
        assert_eq!(store.origin(), ConfigOrigin::Fallback);
        assert_eq!(store.region_ids().count(), registry.len());
    }

    #[test]
    fn test_resolve_falls_back_on_malformed_payload() {
        let store = ConfigStore::resolve(Ok("{not json".into()), &RegionRegistry::builtin());
        assert_eq!(store.origin(), ConfigOrigin::Fallback);
    }

    #[test]
    fn test_to_json_round_trips_unit_as_string() {
        let store = ConfigStore::from_json(SAMPLE, &RegionRegistry::builtin()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        assert_eq!(
            value["regions"]["java_sea"]["forecast_types"]["wave"]["parameters"]["dir"],
            ""
        );
    }
}
