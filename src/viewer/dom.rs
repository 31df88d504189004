//! DOM element lookup and rendering for `MapViewer`.
//!
//! The page owns the markup; this module only finds elements by id or
//! attribute and writes state into them.

use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlImageElement, HtmlOptionElement, HtmlSelectElement,
    MouseEvent,
};

use crate::cascade::{Cascade, Choice, Dropdown, Refresh};
use crate::error::{Result, ViewerError};
use crate::geo::ElementSize;
use crate::overlay::HoverFeedback;

pub(crate) const REGION_SELECT_ID: &str = "regionSelect";
pub(crate) const FORECAST_SELECT_ID: &str = "forecastSelect";
pub(crate) const PARAMETER_SELECT_ID: &str = "parameterSelect";
pub(crate) const MODEL_SELECT_ID: &str = "modelSelect";
pub(crate) const TIME_SELECT_ID: &str = "timeSelect";
pub(crate) const MAP_IMAGE_ID: &str = "mapImage";
pub(crate) const OVERLAY_ID: &str = "regionMap";
pub(crate) const HIGHLIGHT_ID: &str = "regionHighlight";
pub(crate) const LABEL_ID: &str = "regionLabel";
pub(crate) const HAMBURGER_ID: &str = "hamburger";
pub(crate) const SIDEBAR_ID: &str = "sidebar";

const SECTION_SELECTOR: &str = ".section";
const NAV_SELECTOR: &str = "[data-section]";
const SECTION_ATTR: &str = "data-section";
const ACTIVE_CLASS: &str = "active";
const OPEN_CLASS: &str = "open";

/// Handles to every element the viewer reads or writes.
pub(crate) struct Dom {
    pub(crate) document: Document,
    pub(crate) region_select: HtmlSelectElement,
    pub(crate) forecast_select: HtmlSelectElement,
    pub(crate) parameter_select: HtmlSelectElement,
    pub(crate) model_select: HtmlSelectElement,
    pub(crate) time_select: HtmlSelectElement,
    pub(crate) map_image: HtmlImageElement,
    pub(crate) overlay: HtmlElement,
    pub(crate) highlight: Option<HtmlElement>,
    pub(crate) label: Option<HtmlElement>,
    pub(crate) hamburger: Option<HtmlElement>,
    pub(crate) sidebar: Option<HtmlElement>,
    pub(crate) sections: Vec<HtmlElement>,
    pub(crate) nav_controls: Vec<HtmlElement>,
}

fn required<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ViewerError::Dom(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| ViewerError::Dom(format!("element #{id} has an unexpected type")))
}

fn optional<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn set_display(element: &HtmlElement, visible: bool) {
    let value = if visible { "block" } else { "none" };
    let _ = element.style().set_property("display", value);
}

fn set_px(element: &HtmlElement, property: &str, value: f64) {
    let _ = element.style().set_property(property, &format!("{value}px"));
}

impl Dom {
    pub(crate) fn from_document(document: &Document) -> Result<Self> {
        Ok(Self {
            document: document.clone(),
            region_select: required(document, REGION_SELECT_ID)?,
            forecast_select: required(document, FORECAST_SELECT_ID)?,
            parameter_select: required(document, PARAMETER_SELECT_ID)?,
            model_select: required(document, MODEL_SELECT_ID)?,
            time_select: required(document, TIME_SELECT_ID)?,
            map_image: required(document, MAP_IMAGE_ID)?,
            overlay: required(document, OVERLAY_ID)?,
            highlight: optional(document, HIGHLIGHT_ID),
            label: optional(document, LABEL_ID),
            hamburger: optional(document, HAMBURGER_ID),
            sidebar: optional(document, SIDEBAR_ID),
            sections: query_all(document, SECTION_SELECTOR),
            nav_controls: query_all(document, NAV_SELECTOR),
        })
    }

    pub(crate) fn section_ids(&self) -> Vec<String> {
        self.sections
            .iter()
            .map(|section| section.id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    pub(crate) fn nav_target(control: &HtmlElement) -> Option<String> {
        control.get_attribute(SECTION_ATTR)
    }

    /// Mark one section and its navigation controls active, clear the rest.
    pub(crate) fn show_section(&self, active: &str) {
        for section in &self.sections {
            let _ = section
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, section.id() == active);
        }
        for control in &self.nav_controls {
            let is_active = Self::nav_target(control).as_deref() == Some(active);
            let _ = control
                .class_list()
                .toggle_with_force(ACTIVE_CLASS, is_active);
        }
    }

    pub(crate) fn set_sidebar_open(&self, open: bool) {
        if let Some(sidebar) = &self.sidebar {
            let _ = sidebar.class_list().toggle_with_force(OPEN_CLASS, open);
        }
    }

    /// Whether the page starts with the side panel open.
    pub(crate) fn sidebar_is_open(&self) -> bool {
        self.sidebar
            .as_ref()
            .is_some_and(|sidebar| sidebar.class_list().contains(OPEN_CLASS))
    }

    fn fill(&self, select: &HtmlSelectElement, choices: &[Choice], selected: Option<usize>) {
        select.set_inner_html("");
        for choice in choices {
            let Ok(option) = self
                .document
                .create_element("option")
                .map(|element| element.unchecked_into::<HtmlOptionElement>())
            else {
                continue;
            };
            option.set_value(&choice.value);
            option.set_text(&choice.label);
            let _ = select.append_child(&option);
        }
        let index = selected
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1);
        select.set_selected_index(index);
    }

    fn fill_dropdown(&self, select: &HtmlSelectElement, dropdown: &Dropdown) {
        match dropdown.placeholder_text() {
            Some(text) => self.fill(select, &[Choice::new("", text)], Some(0)),
            None => self.fill(select, dropdown.choices(), dropdown.selected_index()),
        }
    }

    pub(crate) fn populate_regions(&self, choices: &[Choice]) {
        self.fill(&self.region_select, choices, Some(0));
    }

    /// Redraw whatever the cascade reported as changed.
    pub(crate) fn render_cascade(&self, cascade: &Cascade, refresh: Refresh) {
        if refresh.region {
            self.region_select.set_value(cascade.region().unwrap_or_default());
        }
        if refresh.forecast_types {
            self.fill_dropdown(&self.forecast_select, cascade.forecast_types());
        }
        if refresh.parameters {
            self.fill_dropdown(&self.parameter_select, cascade.parameters());
        }
        if refresh.models {
            self.fill_dropdown(&self.model_select, cascade.models());
        }
        if refresh.timestamps {
            self.fill_dropdown(&self.time_select, cascade.timestamps());
        }
        if refresh.image {
            self.map_image.set_src(cascade.image_src());
        }
    }

    pub(crate) fn show_hover(&self, feedback: &HoverFeedback) {
        let HoverFeedback::Show {
            label,
            highlight,
            label_x,
            label_y,
            ..
        } = feedback
        else {
            self.hide_hover();
            return;
        };
        if let Some(element) = &self.highlight {
            set_px(element, "left", highlight.x);
            set_px(element, "top", highlight.y);
            set_px(element, "width", highlight.width);
            set_px(element, "height", highlight.height);
            set_display(element, true);
        }
        if let Some(element) = &self.label {
            element.set_text_content(Some(*label));
            set_px(element, "left", *label_x);
            set_px(element, "top", *label_y);
            set_display(element, true);
        }
    }

    pub(crate) fn hide_hover(&self) {
        for element in [&self.highlight, &self.label].into_iter().flatten() {
            set_display(element, false);
        }
    }

    /// Laid-out size of the overlay in CSS pixels.
    pub(crate) fn overlay_size(&self) -> ElementSize {
        let rect = self.overlay.get_bounding_client_rect();
        ElementSize::new(rect.width(), rect.height())
    }

    /// Pointer position relative to the overlay's top-left corner.
    pub(crate) fn pointer_offset(&self, event: &MouseEvent) -> (f64, f64) {
        let rect = self.overlay.get_bounding_client_rect();
        (
            f64::from(event.client_x()) - rect.left(),
            f64::from(event.client_y()) - rect.top(),
        )
    }
}

/// Current viewport width, or infinity when unknown (treated as wide).
pub(crate) fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::INFINITY)
}
