use serde::{Deserialize, Serialize};

use crate::accessibility;
use crate::alerts::{AlertManager, Severity};
use crate::clipboard::{
    ClipboardBridge, ClipboardError, CopyOutcome, CopyProgress, COPY_FAILURE_MESSAGE,
    COPY_SUCCESS_MESSAGE,
};
use crate::collab::Collaborators;
use crate::config::{validate, Config, ConfigError};
use crate::dom::Page;
use crate::enhancements;
use crate::keyboard::{classify, is_submit_key, KeyCommand, KeyPress};
use crate::model::{AlertId, ClipboardTicket, Millis, NodeId};
use crate::submission::{SubmissionController, SubmitDecision, EMPTY_QUERY_MESSAGE};
use crate::suggestions::SuggestionEngine;
use crate::timer::{TimerPurpose, TimerWheel};

pub const RUNTIME_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please refresh the page and try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    pub prevent_default: bool,
    pub navigate: Option<String>,
    pub next_deadline: Option<Millis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "node", rename_all = "snake_case")]
pub enum ClickTarget {
    SuggestionItem(usize),
    SuggestionPanel,
    QueryInput,
    QuickSearch(NodeId),
    CopyControl(NodeId),
    Elsewhere,
}

pub struct PageController<P: Page> {
    page: P,
    collaborators: Collaborators,
    timers: TimerWheel,
    suggestions: SuggestionEngine,
    submission: SubmissionController,
    alerts: AlertManager,
    clipboard: ClipboardBridge,
    card_stagger_ms: Millis,
    skip_link_target: String,
    modal_id: String,
    initialized: bool,
}

impl<P: Page> PageController<P> {
    pub fn new(config: &Config, page: P, collaborators: Collaborators) -> Result<Self, ConfigError> {
        validate(config)?;
        let submission = SubmissionController::new(&page.submit_label());
        Ok(Self {
            page,
            collaborators,
            timers: TimerWheel::default(),
            suggestions: SuggestionEngine::new(config.catalog.clone(), config.suggestion_limits()),
            submission,
            alerts: AlertManager::new(config.alert_visible_ms, config.alert_fade_ms),
            clipboard: ClipboardBridge::default(),
            card_stagger_ms: config.card_stagger_ms,
            skip_link_target: config.skip_link_target.clone(),
            modal_id: config.modal_id.clone(),
            initialized: false,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn timers(&self) -> &TimerWheel {
        &self.timers
    }

    pub fn suggestions(&self) -> &SuggestionEngine {
        &self.suggestions
    }

    pub fn submission(&self) -> &SubmissionController {
        &self.submission
    }

    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    pub fn pending_copies(&self) -> usize {
        self.clipboard.pending_count()
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    pub fn init(&mut self) -> Dispatch {
        if self.initialized {
            tracing::debug!("page already initialized");
            return self.dispatch(false);
        }
        self.initialized = true;

        let tooltips = self.collaborators.tooltips.init_tooltips();
        let labelled = accessibility::label_quick_search(&mut self.page);
        let skip_target = accessibility::insert_skip_link(&mut self.page, &self.skip_link_target);
        let copy_controls = enhancements::install_copy_controls(&mut self.page);
        let cards =
            enhancements::schedule_card_reveal(&mut self.page, &mut self.timers, self.card_stagger_ms);
        self.collaborators.icons.replace_icons();

        tracing::info!(
            tooltips,
            labelled,
            copy_controls,
            cards,
            skip_target = skip_target.as_deref().unwrap_or("none"),
            "search page initialized"
        );
        self.dispatch(false)
    }

    pub fn on_input(&mut self, value: &str) -> Dispatch {
        self.suggestions.on_input(&mut self.page, &mut self.timers, value);
        self.dispatch(false)
    }

    pub fn on_submit(&mut self) -> Dispatch {
        self.suggestions.suppress(&mut self.page, &mut self.timers);
        match self.submission.decide(&mut self.page) {
            SubmitDecision::Proceed(query) => {
                self.collaborators.icons.replace_icons();
                tracing::info!(query = %query, "submitting search");
                Dispatch {
                    navigate: Some(query),
                    ..self.dispatch(false)
                }
            }
            SubmitDecision::Empty => {
                self.show_alert(EMPTY_QUERY_MESSAGE, Severity::Warning);
                self.page.focus_query();
                self.dispatch(true)
            }
        }
    }

    pub fn on_query_key(&mut self, key: &KeyPress) -> Dispatch {
        if !is_submit_key(key) {
            return self.dispatch(false);
        }
        Dispatch {
            prevent_default: true,
            ..self.on_submit()
        }
    }

    pub fn on_key_down(&mut self, key: &KeyPress) -> Dispatch {
        match classify(key) {
            KeyCommand::FocusSearch => {
                self.page.focus_query();
                self.page.select_query();
                self.dispatch(true)
            }
            KeyCommand::Dismiss => {
                self.suggestions.remove_panel(&mut self.page);
                if self.collaborators.modals.is_open(&self.modal_id) {
                    self.collaborators.modals.hide(&self.modal_id);
                }
                self.dispatch(false)
            }
            KeyCommand::Ignored => self.dispatch(false),
        }
    }

    pub fn on_click(&mut self, target: ClickTarget) -> Dispatch {
        match target {
            ClickTarget::SuggestionItem(index) => {
                if self.suggestions.pick(&mut self.page, index).is_none() {
                    tracing::debug!(index, "click on a suggestion that is no longer shown");
                }
                self.dispatch(false)
            }
            ClickTarget::SuggestionPanel | ClickTarget::QueryInput => self.dispatch(false),
            ClickTarget::QuickSearch(node) => {
                self.suggestions.remove_panel(&mut self.page);
                let text = self
                    .page
                    .quick_search_controls()
                    .into_iter()
                    .find(|control| control.node == node)
                    .map(|control| control.text.trim().to_string());
                match text {
                    Some(text) => {
                        self.page.set_query_value(&text);
                        Dispatch {
                            prevent_default: true,
                            ..self.on_submit()
                        }
                    }
                    None => self.dispatch(false),
                }
            }
            ClickTarget::CopyControl(node) => {
                self.suggestions.remove_panel(&mut self.page);
                match enhancements::copyable_text(&self.page, node) {
                    Some(text) => self.copy(&text),
                    None => self.dispatch(false),
                }
            }
            ClickTarget::Elsewhere => {
                self.suggestions.remove_panel(&mut self.page);
                self.dispatch(false)
            }
        }
    }

    pub fn on_link_focus(&mut self, card: NodeId, focused: bool) -> Dispatch {
        accessibility::set_card_focus(&mut self.page, card, focused);
        self.dispatch(false)
    }

    pub fn advance_to(&mut self, now: Millis) -> Dispatch {
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.purpose {
                TimerPurpose::Debounce => self.suggestions.on_debounce(&mut self.page, fired.id),
                TimerPurpose::AlertFade(id) => self.alerts.on_fade(&mut self.page, &mut self.timers, id),
                TimerPurpose::AlertRemove(id) => self.alerts.on_remove(&mut self.page, id),
                TimerPurpose::CardReveal(card) => enhancements::reveal_card(&mut self.page, card),
            }
        }
        self.timers.settle(now);
        self.dispatch(false)
    }

    pub fn show_alert(&mut self, message: &str, severity: Severity) -> AlertId {
        self.alerts.show(
            &mut self.page,
            self.collaborators.icons.as_mut(),
            &mut self.timers,
            message,
            severity,
        )
    }

    /// Copies `text`. Exactly one alert follows, either now or when the
    /// pending write is settled.
    pub fn copy(&mut self, text: &str) -> Dispatch {
        let progress = self
            .clipboard
            .copy(self.collaborators.clipboard.as_mut(), &mut self.page, text);
        match progress {
            CopyProgress::Settled(outcome) => self.announce_copy(outcome),
            CopyProgress::Pending(ticket) => {
                tracing::debug!(ticket = ticket.0, "clipboard write pending");
            }
        }
        self.dispatch(false)
    }

    pub fn clipboard_settled(
        &mut self,
        ticket: ClipboardTicket,
        result: Result<(), ClipboardError>,
    ) -> Dispatch {
        match self.clipboard.settle(&mut self.page, ticket, result) {
            Some(outcome) => self.announce_copy(outcome),
            None => tracing::warn!(ticket = ticket.0, "ignoring unknown clipboard ticket"),
        }
        self.dispatch(false)
    }

    pub fn show_feature_info(&mut self, title: &str, body: &str) -> Dispatch {
        enhancements::show_feature_info(
            &mut self.page,
            self.collaborators.modals.as_mut(),
            &self.modal_id,
            title,
            body,
        );
        self.dispatch(false)
    }

    pub fn report_runtime_error(&mut self, message: Option<&str>) -> Dispatch {
        let message = message.map(str::trim).filter(|m| !m.is_empty());
        match message {
            Some(message) => {
                tracing::error!(%message, "uncaught runtime error");
                self.show_alert(RUNTIME_ERROR_MESSAGE, Severity::Error);
            }
            None => tracing::error!("uncaught runtime error without message"),
        }
        self.dispatch(false)
    }

    pub fn report_unhandled_rejection(&mut self, reason: &str) -> Dispatch {
        tracing::error!(%reason, "unhandled rejection");
        self.dispatch(true)
    }

    fn announce_copy(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => {
                self.show_alert(COPY_SUCCESS_MESSAGE, Severity::Success);
            }
            CopyOutcome::Failed => {
                self.show_alert(COPY_FAILURE_MESSAGE, Severity::Error);
            }
        }
    }

    fn dispatch(&self, prevent_default: bool) -> Dispatch {
        Dispatch {
            prevent_default,
            navigate: None,
            next_deadline: self.timers.next_deadline(),
        }
    }
}
