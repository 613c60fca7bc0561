#![allow(dead_code)]

use medsearch_core::collab::{
    Collaborators, RecordingClipboard, RecordingIcons, RecordingModals, RecordingTooltips,
};
use medsearch_core::config::Config;
use medsearch_core::controller::PageController;
use medsearch_core::dom::{MemoryPage, Page};

pub struct Harness {
    pub controller: PageController<MemoryPage>,
    pub icons: RecordingIcons,
    pub modals: RecordingModals,
    pub tooltips: RecordingTooltips,
    pub clipboard: RecordingClipboard,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MemoryPage::default(), RecordingClipboard::insecure())
    }

    pub fn with_page(page: MemoryPage) -> Self {
        Self::with(page, RecordingClipboard::insecure())
    }

    pub fn with(page: MemoryPage, clipboard: RecordingClipboard) -> Self {
        Self::with_config(&Config::default(), page, clipboard)
    }

    pub fn with_config(config: &Config, page: MemoryPage, clipboard: RecordingClipboard) -> Self {
        let icons = RecordingIcons::default();
        let modals = RecordingModals::default();
        let tooltips = RecordingTooltips::default();
        let collaborators = Collaborators {
            icons: Box::new(icons.clone()),
            modals: Box::new(modals.clone()),
            tooltips: Box::new(tooltips.clone()),
            clipboard: Box::new(clipboard.clone()),
        };
        let controller = PageController::new(config, page, collaborators).unwrap();
        Self {
            controller,
            icons,
            modals,
            tooltips,
            clipboard,
        }
    }

    /// Sets the query field without firing an input event.
    pub fn set_query(&mut self, value: &str) {
        self.controller.page_mut().set_query_value(value);
    }

    /// Types `value` into the query field the way a browser would: the field
    /// changes, then the input event fires.
    pub fn type_query(&mut self, value: &str) {
        self.controller.page_mut().set_query_value(value);
        self.controller.on_input(value);
    }

    /// Advances the clock by `delta` milliseconds.
    pub fn wait(&mut self, delta: u64) {
        let now = self.controller.now() + delta;
        self.controller.advance_to(now);
    }

    pub fn page(&self) -> &MemoryPage {
        self.controller.page()
    }

    pub fn alert_classes(&self) -> Vec<String> {
        self.page()
            .alerts()
            .iter()
            .map(|alert| alert.view.class.clone())
            .collect()
    }
}
