//! Event handlers for `MapViewer`.
//!
//! Each handler borrows the shared state for the duration of one event, calls
//! the matching display-independent operation and renders its result.

use std::cell::RefCell;
use std::rc::Rc;

use super::dom::{viewport_width, Dom};
use super::{MapViewer, SelectorLevel, SharedState};

impl MapViewer {
    pub(crate) fn internal_section_select(
        state: &Rc<RefCell<SharedState>>,
        dom: &Dom,
        section: &str,
    ) -> bool {
        let mut s = state.borrow_mut();
        if !s.nav.activate(section) {
            return false;
        }
        dom.show_section(section);
        if s.sidebar.on_section_selected(viewport_width()) {
            dom.set_sidebar_open(false);
        }
        true
    }

    pub(crate) fn internal_select_change(
        state: &Rc<RefCell<SharedState>>,
        dom: &Dom,
        level: SelectorLevel,
        value: &str,
    ) {
        let mut s = state.borrow_mut();
        let Some(cascade) = s.cascade.as_mut() else {
            return;
        };
        let refresh = match level {
            SelectorLevel::Region => cascade.select_region(value),
            SelectorLevel::ForecastType => cascade.select_forecast_type(value),
            SelectorLevel::Parameter => cascade.select_parameter(value),
            SelectorLevel::Model => cascade.select_model(value),
            SelectorLevel::Timestamp => cascade.select_timestamp(value),
        };
        dom.render_cascade(cascade, refresh);
    }

    pub(crate) fn internal_next_region(state: &Rc<RefCell<SharedState>>, dom: &Dom) {
        let mut s = state.borrow_mut();
        let Some(cascade) = s.cascade.as_mut() else {
            return;
        };
        let refresh = cascade.next_region();
        dom.render_cascade(cascade, refresh);
    }

    /// Region click. Before the configuration has loaded this does nothing.
    pub(crate) fn internal_overlay_click(
        state: &Rc<RefCell<SharedState>>,
        dom: &Dom,
        x: f64,
        y: f64,
    ) {
        let size = dom.overlay_size();
        let mut s = state.borrow_mut();
        let overlay = s.overlay;
        let Some(cascade) = s.cascade.as_mut() else {
            return;
        };
        let refresh = overlay.click(cascade, x, y, size);
        dom.render_cascade(cascade, refresh);
    }

    pub(crate) fn internal_overlay_hover(
        state: &Rc<RefCell<SharedState>>,
        dom: &Dom,
        x: f64,
        y: f64,
    ) {
        let feedback = state.borrow().overlay.hover(x, y, dom.overlay_size());
        dom.show_hover(&feedback);
    }
}
