//! Cascading forecast selectors.
//!
//! Region → forecast type → {parameter, model} → timestamp. Each level's
//! options come from the configuration lookup of every level to its left, so
//! an upstream change always rebuilds everything downstream before the image
//! path is recomputed from all five current tokens.
//!
//! The cascade owns the frozen [`ConfigStore`] and is the only place selection
//! state changes. Every mutator returns a [`Refresh`] naming what the display
//! layer has to redraw.

use crate::config::{ConfigStore, ForecastTypeConfig};
use crate::options::MapPaths;
use crate::regions::RegionRegistry;

/// Label of the "nothing selected" region entry.
pub const REGION_PLACEHOLDER: &str = "Select Region";
pub const FORECAST_TYPE_PLACEHOLDER: &str = "Type (Region First)";
pub const PARAMETER_PLACEHOLDER: &str = "Parameter (Region First)";
pub const MODEL_PLACEHOLDER: &str = "Model (Region First)";
pub const TIMESTAMP_PLACEHOLDER: &str = "Time (Region First)";

/// One `<option>` of a selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    fn plain(value: &str) -> Self {
        Self::new(value, value)
    }
}

/// Options and current selection of one downstream selector.
///
/// A placeholder dropdown shows a single non-value entry (`"Type (Region
/// First)"`) and has no selection; an empty dropdown has no entries at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dropdown {
    choices: Vec<Choice>,
    selected: Option<usize>,
    placeholder: Option<&'static str>,
}

impl Dropdown {
    fn placeholder(text: &'static str) -> Self {
        Self {
            choices: Vec::new(),
            selected: None,
            placeholder: Some(text),
        }
    }

    /// Options in the given order, first one selected.
    fn from_choices(choices: Vec<Choice>) -> Self {
        let selected = if choices.is_empty() { None } else { Some(0) };
        Self {
            choices,
            selected,
            placeholder: None,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.choices.get(i))
            .map(|c| c.value.as_str())
    }

    pub fn placeholder_text(&self) -> Option<&'static str> {
        self.placeholder
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Select by value; `false` when the value is not one of the options.
    fn select(&mut self, value: &str) -> bool {
        match self.choices.iter().position(|c| c.value == value) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }
}

/// Snapshot of the five selected tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub region: Option<String>,
    pub forecast_type: Option<String>,
    pub parameter: Option<String>,
    pub model: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStage {
    NoRegion,
    RegionChosen,
    TypeChosen,
    FullySpecified,
}

/// What changed as a result of one selection event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    pub region: bool,
    pub forecast_types: bool,
    pub parameters: bool,
    pub models: bool,
    pub timestamps: bool,
    pub image: bool,
}

impl Refresh {
    pub const NONE: Refresh = Refresh {
        region: false,
        forecast_types: false,
        parameters: false,
        models: false,
        timestamps: false,
        image: false,
    };

    /// Everything: used on region changes and for the first render.
    pub const ALL: Refresh = Refresh {
        region: true,
        forecast_types: true,
        parameters: true,
        models: true,
        timestamps: true,
        image: true,
    };

    const FORECAST_TYPE: Refresh = Refresh {
        region: false,
        forecast_types: false,
        parameters: true,
        models: true,
        timestamps: true,
        image: true,
    };

    const IMAGE: Refresh = Refresh {
        image: true,
        ..Refresh::NONE
    };

    pub fn is_empty(&self) -> bool {
        *self == Refresh::NONE
    }
}

pub struct Cascade {
    config: ConfigStore,
    registry: RegionRegistry<'static>,
    paths: MapPaths,
    region: Option<String>,
    forecast_types: Dropdown,
    parameters: Dropdown,
    models: Dropdown,
    timestamps: Dropdown,
    image_src: String,
    path_revision: u64,
}

impl Cascade {
    /// A cascade with no region selected, showing the fallback image.
    pub fn new(config: ConfigStore, registry: RegionRegistry<'static>, paths: MapPaths) -> Self {
        let image_src = paths.fallback_image.clone();
        Self {
            config,
            registry,
            paths,
            region: None,
            forecast_types: Dropdown::placeholder(FORECAST_TYPE_PLACEHOLDER),
            parameters: Dropdown::placeholder(PARAMETER_PLACEHOLDER),
            models: Dropdown::placeholder(MODEL_PLACEHOLDER),
            timestamps: Dropdown::placeholder(TIMESTAMP_PLACEHOLDER),
            image_src,
            path_revision: 0,
        }
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn registry(&self) -> RegionRegistry<'static> {
        self.registry
    }

    /// Region selector entries: the unselected sentinel, then every configured region.
    pub fn region_choices(&self) -> Vec<Choice> {
        std::iter::once(Choice::new("", REGION_PLACEHOLDER))
            .chain(
                self.config
                    .region_ids()
                    .map(|id| Choice::new(id, self.registry.display_name(id))),
            )
            .collect()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn forecast_types(&self) -> &Dropdown {
        &self.forecast_types
    }

    pub fn parameters(&self) -> &Dropdown {
        &self.parameters
    }

    pub fn models(&self) -> &Dropdown {
        &self.models
    }

    pub fn timestamps(&self) -> &Dropdown {
        &self.timestamps
    }

    /// Current `src` of the map image.
    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    pub fn is_fallback_image(&self) -> bool {
        self.region.is_none()
    }

    /// Number of times the image path has been recomputed from a selection.
    pub fn path_revision(&self) -> u64 {
        self.path_revision
    }

    pub fn selection(&self) -> SelectionState {
        SelectionState {
            region: self.region.clone(),
            forecast_type: self.forecast_types.selected_value().map(str::to_string),
            parameter: self.parameters.selected_value().map(str::to_string),
            model: self.models.selected_value().map(str::to_string),
            timestamp: self.timestamps.selected_value().map(str::to_string),
        }
    }

    pub fn stage(&self) -> CascadeStage {
        if self.region.is_none() {
            return CascadeStage::NoRegion;
        }
        if self.forecast_types.selected_value().is_none() {
            return CascadeStage::RegionChosen;
        }
        let complete = self.parameters.selected_value().is_some()
            && self.models.selected_value().is_some()
            && self.timestamps.selected_value().is_some();
        if complete {
            CascadeStage::FullySpecified
        } else {
            CascadeStage::TypeChosen
        }
    }

    /// Region change: rebuild every downstream level, then the image.
    ///
    /// The empty string, the sentinel label and ids with no configuration all
    /// reset the cascade to its placeholder state.
    pub fn select_region(&mut self, region: &str) -> Refresh {
        let known = !region.is_empty()
            && region != REGION_PLACEHOLDER
            && self.config.region(region).is_some();
        if !known {
            if !region.is_empty() && region != REGION_PLACEHOLDER {
                log::debug!("region '{region}' has no configuration, resetting selectors");
            }
            self.reset();
            return Refresh::ALL;
        }

        self.region = Some(region.to_string());
        let types: Vec<Choice> = self
            .config
            .region(region)
            .map(|rc| rc.forecast_types.keys().map(Choice::plain).collect())
            .unwrap_or_default();
        self.forecast_types = Dropdown::from_choices(types);
        self.rebuild_type_children();
        self.recompute_image();
        Refresh::ALL
    }

    /// Forecast type change: rebuild parameter, model and timestamp options.
    pub fn select_forecast_type(&mut self, forecast_type: &str) -> Refresh {
        if self.region.is_none() || !self.forecast_types.select(forecast_type) {
            log::warn!("ignoring forecast type '{forecast_type}' not offered for current region");
            return Refresh::NONE;
        }
        self.rebuild_type_children();
        self.recompute_image();
        Refresh::FORECAST_TYPE
    }

    pub fn select_parameter(&mut self, parameter: &str) -> Refresh {
        if !Self::select_leaf(&mut self.parameters, parameter, "parameter") {
            return Refresh::NONE;
        }
        self.recompute_image();
        Refresh::IMAGE
    }

    pub fn select_model(&mut self, model: &str) -> Refresh {
        if !Self::select_leaf(&mut self.models, model, "model") {
            return Refresh::NONE;
        }
        self.recompute_image();
        Refresh::IMAGE
    }

    pub fn select_timestamp(&mut self, timestamp: &str) -> Refresh {
        if !Self::select_leaf(&mut self.timestamps, timestamp, "timestamp") {
            return Refresh::NONE;
        }
        self.recompute_image();
        Refresh::IMAGE
    }

    /// Select the first configured region, as done right after loading.
    pub fn select_first_region(&mut self) -> Refresh {
        let Some(first) = self.config.region_ids().next().map(str::to_string) else {
            return Refresh::NONE;
        };
        self.select_region(&first)
    }

    /// Advance to the next configured region, wrapping after the last.
    pub fn next_region(&mut self) -> Refresh {
        let ids: Vec<&str> = self.config.region_ids().collect();
        if ids.is_empty() {
            return Refresh::NONE;
        }
        let next = match self
            .region
            .as_deref()
            .and_then(|r| ids.iter().position(|id| *id == r))
        {
            Some(i) => (i + 1) % ids.len(),
            None => 0,
        };
        let Some(id) = ids.get(next).map(|id| (*id).to_string()) else {
            return Refresh::NONE;
        };
        self.select_region(&id)
    }

    fn select_leaf(dropdown: &mut Dropdown, value: &str, level: &str) -> bool {
        if dropdown.placeholder_text().is_some() || !dropdown.select(value) {
            log::warn!("ignoring {level} '{value}' not offered for current forecast type");
            return false;
        }
        true
    }

    fn reset(&mut self) {
        self.region = None;
        self.forecast_types = Dropdown::placeholder(FORECAST_TYPE_PLACEHOLDER);
        self.parameters = Dropdown::placeholder(PARAMETER_PLACEHOLDER);
        self.models = Dropdown::placeholder(MODEL_PLACEHOLDER);
        self.timestamps = Dropdown::placeholder(TIMESTAMP_PLACEHOLDER);
        self.image_src.clone_from(&self.paths.fallback_image);
    }

    fn rebuild_type_children(&mut self) {
        let ft = match (self.region.as_deref(), self.forecast_types.selected_value()) {
            (Some(region), Some(forecast_type)) => self.config.forecast_type(region, forecast_type),
            _ => None,
        };
        let (parameters, models, timestamps) = derive_children(ft);
        self.parameters = parameters;
        self.models = models;
        self.timestamps = timestamps;
    }

    fn recompute_image(&mut self) {
        self.image_src = self.paths.image_path(
            self.region.as_deref().unwrap_or_default(),
            self.forecast_types.selected_value().unwrap_or_default(),
            self.parameters.selected_value().unwrap_or_default(),
            self.models.selected_value().unwrap_or_default(),
            self.timestamps.selected_value().unwrap_or_default(),
        );
        self.path_revision += 1;
    }
}

/// Parameter, model and timestamp selectors for a forecast type; empty when it is missing.
fn derive_children(ft: Option<&ForecastTypeConfig>) -> (Dropdown, Dropdown, Dropdown) {
    let Some(ft) = ft else {
        return (Dropdown::default(), Dropdown::default(), Dropdown::default());
    };
    let parameters = ft
        .parameters
        .iter()
        .map(|(name, unit)| {
            if unit.is_empty() {
                Choice::plain(name)
            } else {
                Choice::new(name, format!("{name} ({})", unit.as_str()))
            }
        })
        .collect();
    let models = ft.models.iter().map(|m| Choice::plain(m)).collect();
    let timestamps = ft.timestamps.iter().map(|t| Choice::plain(t)).collect();
    (
        Dropdown::from_choices(parameters),
        Dropdown::from_choices(models),
        Dropdown::from_choices(timestamps),
    )
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

    fn cascade(json: &str) -> Cascade {
        let registry = RegionRegistry::builtin();
        let config = ConfigStore::from_json(json, &registry).unwrap();
        Cascade::new(config, registry, MapPaths::default())
    }

    const ONE_REGION: &str = r#"{"regions": {"java_sea": {"forecast_types": {
        "weather": {"parameters": {"wind": "m/s", "rh": ""}, "models": ["gfs", "ecmwf"], "timestamps": ["00", "03"]},
        "wave": {"parameters": {"swh": "m"}, "models": ["gfswave"], "timestamps": ["06"]}
    }}}}"#;

    #[test]
    fn test_starts_without_region() {
        let c = cascade(ONE_REGION);
        assert_eq!(c.stage(), CascadeStage::NoRegion);
        assert_eq!(c.image_src(), "assets/maps/staticmap.png");
        assert_eq!(c.models().placeholder_text(), Some(MODEL_PLACEHOLDER));
        assert_eq!(c.path_revision(), 0);
    }

    #[test]
    fn test_region_selects_first_of_everything() {
        let mut c = cascade(ONE_REGION);
        let refresh = c.select_region("java_sea");
        assert!(refresh.forecast_types && refresh.parameters && refresh.models);
        assert!(refresh.timestamps && refresh.image);
        assert_eq!(c.stage(), CascadeStage::FullySpecified);
        assert_eq!(
            c.image_src(),
            "assets/maps/java_sea/java_sea_weather_wind_gfs_00.png"
        );
        assert_eq!(c.path_revision(), 1);
    }

    #[test]
    fn test_parameter_labels_carry_units() {
        let mut c = cascade(ONE_REGION);
        c.select_region("java_sea");
        let labels: Vec<&str> = c
            .parameters()
            .choices()
            .iter()
            .map(|ch| ch.label.as_str())
            .collect();
        assert_eq!(labels, vec!["wind (m/s)", "rh"]);
    }

    #[test]
    fn test_forecast_type_rebuilds_children() {
        let mut c = cascade(ONE_REGION);
        c.select_region("java_sea");
        c.select_model("ecmwf");
        let refresh = c.select_forecast_type("wave");
        assert!(!refresh.forecast_types);
        assert!(refresh.parameters && refresh.models && refresh.timestamps);
        assert_eq!(c.models().values().collect::<Vec<_>>(), vec!["gfswave"]);
        assert_eq!(
            c.image_src(),
            "assets/maps/java_sea/java_sea_wave_swh_gfswave_06.png"
        );
    }

    #[test]
    fn test_parameter_and_model_are_independent() {
        let mut c = cascade(ONE_REGION);
        c.select_region("java_sea");
        c.select_model("ecmwf");
        let refresh = c.select_parameter("rh");
        assert_eq!(refresh, Refresh::IMAGE);
        let sel = c.selection();
        assert_eq!(sel.parameter.as_deref(), Some("rh"));
        assert_eq!(sel.model.as_deref(), Some("ecmwf"));
        assert_eq!(sel.timestamp.as_deref(), Some("00"));
    }

    #[test]
    fn test_sentinel_resets_to_placeholders() {
        let mut c = cascade(ONE_REGION);
        c.select_region("java_sea");
        let revision = c.path_revision();
        c.select_region(REGION_PLACEHOLDER);
        assert_eq!(c.stage(), CascadeStage::NoRegion);
        assert!(c.is_fallback_image());
        assert_eq!(
            c.forecast_types().placeholder_text(),
            Some(FORECAST_TYPE_PLACEHOLDER)
        );
        assert_eq!(c.path_revision(), revision);
    }

    #[test]
    fn test_unknown_values_are_ignored() {
        let mut c = cascade(ONE_REGION);
        assert!(c.select_parameter("wind").is_empty());
        c.select_region("java_sea");
        assert!(c.select_forecast_type("ocean").is_empty());
        assert!(c.select_timestamp("99").is_empty());
        assert_eq!(c.path_revision(), 1);
    }

    #[test]
    fn test_type_without_products_gives_empty_dropdowns() {
        let mut c = cascade(r#"{"regions": {"x": {"forecast_types": {"bare": {}}}}}"#);
        c.select_region("x");
        assert!(c.parameters().is_empty());
        assert!(c.parameters().placeholder_text().is_none());
        assert_eq!(c.stage(), CascadeStage::TypeChosen);
        assert_eq!(c.image_src(), "assets/maps/x/x_bare___.png");
    }

    #[test]
    fn test_region_without_types() {
        let mut c = cascade(r#"{"regions": {"x": {}}}"#);
        c.select_region("x");
        assert_eq!(c.stage(), CascadeStage::RegionChosen);
        assert!(c.forecast_types().is_empty());
        assert_eq!(c.image_src(), "assets/maps/x/x____.png");
    }

    #[test]
    fn test_next_region_wraps() {
        let mut c = cascade(ONE_REGION);
        let ids: Vec<String> = c.config().region_ids().map(str::to_string).collect();
        c.next_region();
        assert_eq!(c.region(), ids.first().map(String::as_str));
        for _ in 1..ids.len() {
            c.next_region();
        }
        assert_eq!(c.region(), ids.last().map(String::as_str));
        c.next_region();
        assert_eq!(c.region(), ids.first().map(String::as_str));
    }

    #[test]
    fn test_select_first_region_after_load() {
        let mut c = cascade(ONE_REGION);
        let before = c.path_revision();
        assert_eq!(c.select_first_region(), Refresh::ALL);
        assert_eq!(c.region(), Some("java_sea"));
        assert_eq!(c.stage(), CascadeStage::FullySpecified);
        assert_eq!(c.path_revision(), before + 1);
    }

    #[test]
    fn test_region_choices_start_with_sentinel() {
        let c = cascade(ONE_REGION);
        let choices = c.region_choices();
        assert_eq!(choices[0], Choice::new("", REGION_PLACEHOLDER));
        assert_eq!(choices[1], Choice::new("java_sea", "Java Sea"));
    }
}
