//! Section tabs and the collapsible sidebar.
//!
//! Exactly one section is active at a time. The active id is written to
//! durable storage on every change and read back once at startup.

use crate::options::ViewerOptions;
use crate::storage::KeyValueStore;

/// Storage key holding the last active section id.
pub const SECTION_STORAGE_KEY: &str = "nw_section";

/// Section shown when nothing valid was stored.
pub const DEFAULT_SECTION: &str = "map";

pub struct SectionNav<S> {
    sections: Vec<String>,
    active: String,
    store: S,
    storage_key: String,
}

impl<S: KeyValueStore> SectionNav<S> {
    /// Restore the persisted section, or fall back to `default_section`.
    ///
    /// A stored id that no longer names a known section is ignored.
    pub fn restore(
        sections: Vec<String>,
        store: S,
        storage_key: &str,
        default_section: &str,
    ) -> Self {
        let stored = store
            .get(storage_key)
            .filter(|id| sections.iter().any(|s| s == id));
        let active = stored.unwrap_or_else(|| default_section.to_string());
        Self {
            sections,
            active,
            store,
            storage_key: storage_key.to_string(),
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active == id
    }

    /// Make `id` the active section and persist it.
    ///
    /// Unknown ids are refused. A failed write keeps the in-memory change.
    pub fn activate(&mut self, id: &str) -> bool {
        if !self.sections.iter().any(|s| s == id) {
            log::warn!("refusing to activate unknown section '{id}'");
            return false;
        }
        self.active = id.to_string();
        if let Err(e) = self.store.set(&self.storage_key, id) {
            log::warn!("could not persist active section: {e}");
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Open/closed state of the side navigation panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sidebar {
    open: bool,
    close_on_select: bool,
    breakpoint_px: f64,
}

impl Sidebar {
    pub fn new(close_on_select: bool, breakpoint_px: f64) -> Self {
        Self {
            open: false,
            close_on_select,
            breakpoint_px,
        }
    }

    pub fn from_options(options: &ViewerOptions) -> Self {
        Self::new(options.close_sidebar_on_select, options.mobile_breakpoint_px)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Sync with the panel's state as found in the page markup.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Flip the panel; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.breakpoint_px
    }

    /// Auto-close after a section was chosen on a narrow viewport.
    ///
    /// Returns `true` when the panel was open and is now closed.
    pub fn on_section_selected(&mut self, viewport_width: f64) -> bool {
        if self.open && self.close_on_select && self.is_narrow(viewport_width) {
            self.open = false;
            return true;
        }
        false
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
    use crate::storage::MemoryStore;

    fn sections() -> Vec<String> {
        ["map", "forecast", "about"].map(String::from).to_vec()
    }

    #[test]
    fn test_default_when_nothing_stored() {
        let nav = SectionNav::restore(sections(), MemoryStore::new(), SECTION_STORAGE_KEY, "map");
        assert_eq!(nav.active(), "map");
    }

    #[test]
    fn test_stale_stored_id_is_ignored() {
        let mut store = MemoryStore::new();
        store.set(SECTION_STORAGE_KEY, "removed").unwrap();
        let nav = SectionNav::restore(sections(), store, SECTION_STORAGE_KEY, "map");
        assert_eq!(nav.active(), "map");
    }

    #[test]
    fn test_activate_unknown_is_refused() {
        let mut nav =
            SectionNav::restore(sections(), MemoryStore::new(), SECTION_STORAGE_KEY, "map");
        assert!(!nav.activate("settings"));
        assert_eq!(nav.active(), "map");
        assert_eq!(nav.store().get(SECTION_STORAGE_KEY), None);
    }

    #[test]
    fn test_sidebar_closes_only_on_narrow_viewports() {
        let mut sidebar = Sidebar::new(true, 768.0);
        sidebar.toggle();
        assert!(!sidebar.on_section_selected(1280.0));
        assert!(sidebar.is_open());
        assert!(sidebar.on_section_selected(768.0));
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_sidebar_seeded_open_closes_on_first_toggle() {
        let mut sidebar = Sidebar::new(true, 768.0);
        sidebar.set_open(true);
        assert!(!sidebar.toggle());
        assert!(!sidebar.is_open());
    }

    #[test]
    fn test_sidebar_close_disabled() {
        let mut sidebar = Sidebar::new(false, 768.0);
        sidebar.toggle();
        assert!(!sidebar.on_section_selected(320.0));
        assert!(sidebar.is_open());
    }
}
