use crate::dom::{Page, SuggestionPanel};
use crate::model::{normalize_query, Millis};
use crate::timer::{CancellableTimer, TimerId, TimerPurpose, TimerWheel};

pub const DEFAULT_CATALOG: [&str; 20] = [
    "What are the latest treatments for type 2 diabetes?",
    "Diabetes management in elderly patients",
    "Side effects of metformin in diabetes",
    "Gestational diabetes screening guidelines",
    "Insulin resistance and diabetes prevention",
    "Diabetes and cardiovascular disease risk",
    "Hypertension first-line medications",
    "Blood pressure targets for older adults",
    "Statin therapy for primary prevention",
    "Early symptoms of Alzheimer's disease",
    "COVID-19 long-term effects",
    "Antibiotic resistance mechanisms",
    "Immunotherapy for lung cancer",
    "Breast cancer screening recommendations",
    "Asthma management in children",
    "Migraine prevention strategies",
    "Depression treatment with SSRIs",
    "Rheumatoid arthritis biologic therapy",
    "Chronic kidney disease progression",
    "Vitamin D deficiency and bone health",
];

pub fn default_catalog() -> Vec<String> {
    DEFAULT_CATALOG.iter().map(|entry| entry.to_string()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionLimits {
    pub min_chars: usize,
    pub max_results: usize,
    pub debounce_ms: Millis,
}

impl Default for SuggestionLimits {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_results: 5,
            debounce_ms: 300,
        }
    }
}

#[derive(Debug)]
pub struct SuggestionEngine {
    catalog: Vec<String>,
    lowered: Vec<String>,
    limits: SuggestionLimits,
    debounce: CancellableTimer,
    pending_query: Option<String>,
    shown: Option<Vec<String>>,
}

impl SuggestionEngine {
    pub fn new(catalog: Vec<String>, limits: SuggestionLimits) -> Self {
        let lowered = catalog.iter().map(|entry| entry.to_lowercase()).collect();
        Self {
            catalog,
            lowered,
            limits,
            debounce: CancellableTimer::default(),
            pending_query: None,
            shown: None,
        }
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn matches(&self, query: &str) -> Vec<&str> {
        let needle = normalize_query(query);
        if needle.is_empty() || self.limits.max_results == 0 {
            return Vec::new();
        }

        self.lowered
            .iter()
            .zip(self.catalog.iter())
            .filter(|(lowered, _)| lowered.contains(&needle))
            .take(self.limits.max_results)
            .map(|(_, entry)| entry.as_str())
            .collect()
    }

    pub fn on_input(&mut self, page: &mut dyn Page, timers: &mut TimerWheel, value: &str) {
        let normalized = normalize_query(value);
        if normalized.chars().count() < self.limits.min_chars {
            self.debounce.cancel(timers);
            self.pending_query = None;
            self.remove_panel(page);
            return;
        }

        self.pending_query = Some(normalized);
        self.debounce
            .arm(timers, self.limits.debounce_ms, TimerPurpose::Debounce);
    }

    pub fn on_debounce(&mut self, page: &mut dyn Page, fired: TimerId) {
        if !self.debounce.claim(fired) {
            return;
        }
        let Some(query) = self.pending_query.take() else {
            return;
        };

        let items: Vec<String> = self
            .matches(&query)
            .into_iter()
            .map(str::to_string)
            .collect();
        if items.is_empty() {
            self.remove_panel(page);
            return;
        }

        self.remove_panel(page);
        tracing::debug!(query = %query, matches = items.len(), "showing suggestions");
        page.render_suggestions(&SuggestionPanel {
            items: items.clone(),
        });
        self.shown = Some(items);
    }

    pub fn pick(&mut self, page: &mut dyn Page, index: usize) -> Option<String> {
        let text = self.shown.as_ref()?.get(index)?.clone();
        page.set_query_value(&text);
        self.remove_panel(page);
        page.focus_query();
        Some(text)
    }

    pub fn suppress(&mut self, page: &mut dyn Page, timers: &mut TimerWheel) {
        self.debounce.cancel(timers);
        self.pending_query = None;
        self.remove_panel(page);
    }

    pub fn remove_panel(&mut self, page: &mut dyn Page) -> bool {
        let had_panel = self.shown.take().is_some();
        page.remove_suggestions() || had_panel
    }

    pub fn is_panel_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn is_debounce_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}
