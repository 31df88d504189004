//! `MapViewer` - the browser entry point.
//!
//! This module provides the WASM-exported `MapViewer` struct that:
//! - Restores the last active section and wires the navigation controls
//! - Wires click/hover hit-testing on the region overlay
//! - Fetches the forecast configuration once, then wires the five selectors
//!
//! All event handlers are registered by the constructor; the page only has to
//! provide the markup and call `new MapViewer(options)`.

mod dom;
mod events;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlSelectElement, MouseEvent};

use crate::cascade::{Cascade, Refresh};
use crate::config::ConfigStore;
use crate::error::ViewerError;
use crate::logging;
use crate::navigation::{SectionNav, Sidebar};
use crate::options::ViewerOptions;
use crate::overlay::Overlay;
use crate::regions::RegionRegistry;
use crate::storage::LocalStore;

use dom::Dom;

/// Which selector fired a `change` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorLevel {
    Region,
    ForecastType,
    Parameter,
    Model,
    Timestamp,
}

/// State shared by every event handler.
pub(crate) struct SharedState {
    pub(crate) options: ViewerOptions,
    pub(crate) overlay: Overlay,
    /// `None` until the configuration fetch has resolved.
    pub(crate) cascade: Option<Cascade>,
    pub(crate) nav: SectionNav<LocalStore>,
    pub(crate) sidebar: Sidebar,
    /// Selector listeners, registered after the configuration has loaded.
    pub(crate) select_closures: Vec<Closure<dyn FnMut(Event)>>,
}

/// The viewer exported to JavaScript.
#[wasm_bindgen]
pub struct MapViewer {
    state: Rc<RefCell<SharedState>>,
    dom: Rc<Dom>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

#[wasm_bindgen]
impl MapViewer {
    /// Create the viewer and start loading the configuration.
    ///
    /// `options` is a plain object of `ViewerOptions` fields in camelCase;
    /// `undefined` or `null` selects all defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MapViewer, JsValue> {
        console_error_panic_hook::set_once();

        let options: ViewerOptions = if options.is_undefined() || options.is_null() {
            ViewerOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| ViewerError::Options(e.to_string()))?
        };
        logging::init(options.level_filter());
        options.validate()?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| ViewerError::Dom("no document".into()))?;
        let dom = Rc::new(Dom::from_document(&document)?);

        let nav = SectionNav::restore(
            dom.section_ids(),
            LocalStore,
            &options.section_storage_key,
            &options.default_section,
        );
        dom.show_section(nav.active());
        dom.hide_hover();

        let mut sidebar = Sidebar::from_options(&options);
        sidebar.set_open(dom.sidebar_is_open());

        let state = Rc::new(RefCell::new(SharedState {
            overlay: Overlay::new(options.extent, RegionRegistry::builtin()),
            sidebar,
            options,
            cascade: None,
            nav,
            select_closures: Vec::new(),
        }));

        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();
        Self::wire_navigation(&state, &dom, &mut closures);
        Self::wire_overlay(&state, &dom, &mut closures);
        Self::spawn_config_load(&state, &dom);

        Ok(MapViewer {
            state,
            dom,
            closures,
        })
    }

    /// Id of the currently active section.
    #[wasm_bindgen(js_name = activeSection)]
    pub fn active_section(&self) -> String {
        self.state.borrow().nav.active().to_string()
    }

    /// Activate a section programmatically, as if its navigation control was clicked.
    #[wasm_bindgen(js_name = activateSection)]
    pub fn activate_section(&self, id: &str) -> bool {
        Self::internal_section_select(&self.state, &self.dom, id)
    }

    /// Whether the configuration has loaded and the selectors are live.
    #[wasm_bindgen(js_name = isLoaded)]
    pub fn is_loaded(&self) -> bool {
        self.state.borrow().cascade.is_some()
    }

    /// Current map image `src`, `undefined` before the configuration has loaded.
    #[wasm_bindgen(js_name = imageSrc)]
    pub fn image_src(&self) -> Option<String> {
        self.state
            .borrow()
            .cascade
            .as_ref()
            .map(|c| c.image_src().to_string())
    }

    /// Select a region by id and rerun the cascade.
    #[wasm_bindgen(js_name = selectRegion)]
    pub fn select_region(&self, id: &str) {
        Self::internal_select_change(&self.state, &self.dom, SelectorLevel::Region, id);
    }

    /// Step to the next configured region, wrapping around.
    #[wasm_bindgen(js_name = nextRegion)]
    pub fn next_region(&self) {
        Self::internal_next_region(&self.state, &self.dom);
    }
}

impl MapViewer {
    /// Section navigation buttons and the hamburger toggle.
    fn wire_navigation(
        state: &Rc<RefCell<SharedState>>,
        dom: &Rc<Dom>,
        closures: &mut Vec<Closure<dyn FnMut(MouseEvent)>>,
    ) {
        for control in &dom.nav_controls {
            let Some(section) = Dom::nav_target(control) else {
                continue;
            };
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_section_select(&state, &dom_ref, &section);
            }) as Box<dyn FnMut(MouseEvent)>);
            control
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        if let Some(hamburger) = &dom.hamburger {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                let open = state.borrow_mut().sidebar.toggle();
                dom_ref.set_sidebar_open(open);
            }) as Box<dyn FnMut(MouseEvent)>);
            hamburger
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
    }

    /// Click, hover and leave on the region overlay.
    fn wire_overlay(
        state: &Rc<RefCell<SharedState>>,
        dom: &Rc<Dom>,
        closures: &mut Vec<Closure<dyn FnMut(MouseEvent)>>,
    ) {
        // Click
        {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = dom_ref.pointer_offset(&event);
                Self::internal_overlay_click(&state, &dom_ref, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            dom.overlay
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move (hover highlight + label)
        {
            let state = state.clone();
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let (x, y) = dom_ref.pointer_offset(&event);
                Self::internal_overlay_hover(&state, &dom_ref, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            dom.overlay
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse leave
        {
            let dom_ref = dom.clone();
            let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
                dom_ref.hide_hover();
            }) as Box<dyn FnMut(MouseEvent)>);
            dom.overlay
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
    }

    /// Fetch the configuration, then populate and wire the selectors.
    fn spawn_config_load(state: &Rc<RefCell<SharedState>>, dom: &Rc<Dom>) {
        let (url, paths, select_first) = {
            let s = state.borrow();
            (
                s.options.config_url.clone(),
                s.options.map_paths(),
                s.options.select_first_region,
            )
        };
        let state = state.clone();
        let dom = dom.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let registry = RegionRegistry::builtin();
            let config = ConfigStore::load(&url, registry).await;
            let mut cascade = Cascade::new(config, registry, paths);
            if select_first {
                cascade.select_first_region();
            }

            dom.populate_regions(&cascade.region_choices());
            dom.render_cascade(&cascade, Refresh::ALL);

            let select_closures = Self::wire_selectors(&state, &dom);
            let mut s = state.borrow_mut();
            s.cascade = Some(cascade);
            s.select_closures = select_closures;
        });
    }

    fn wire_selectors(
        state: &Rc<RefCell<SharedState>>,
        dom: &Rc<Dom>,
    ) -> Vec<Closure<dyn FnMut(Event)>> {
        let selectors: [(&HtmlSelectElement, SelectorLevel); 5] = [
            (&dom.region_select, SelectorLevel::Region),
            (&dom.forecast_select, SelectorLevel::ForecastType),
            (&dom.parameter_select, SelectorLevel::Parameter),
            (&dom.model_select, SelectorLevel::Model),
            (&dom.time_select, SelectorLevel::Timestamp),
        ];
        let mut closures = Vec::with_capacity(selectors.len());
        for (select, level) in selectors {
            let state = state.clone();
            let dom_ref = dom.clone();
            let select_ref = select.clone();
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                let value = select_ref.value();
                Self::internal_select_change(&state, &dom_ref, level, &value);
            }) as Box<dyn FnMut(Event)>);
            select
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }
        closures
    }
}
