use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alerts::AlertView;
use crate::model::{AlertId, ElementText, NodeId};
use crate::submission::LoadingState;

pub const SKIP_LINK_TEXT: &str = "Skip to main content";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionPanel {
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStyle {
    pub opacity: String,
    pub transform: String,
    pub transition: Option<String>,
}

impl CardStyle {
    pub fn hidden() -> Self {
        Self {
            opacity: "0".to_string(),
            transform: "translateY(20px)".to_string(),
            transition: Some("opacity 0.6s ease, transform 0.6s ease".to_string()),
        }
    }

    pub fn revealed() -> Self {
        Self {
            opacity: "1".to_string(),
            transform: "translateY(0)".to_string(),
            transition: Some("opacity 0.6s ease, transform 0.6s ease".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainRegion {
    pub node: NodeId,
    pub id: Option<String>,
}

pub trait Page {
    fn query_value(&self) -> String;
    fn set_query_value(&mut self, value: &str);
    fn focus_query(&mut self);
    fn select_query(&mut self);

    fn submit_label(&self) -> String;
    fn render_submit_button(&mut self, state: &LoadingState);

    fn render_suggestions(&mut self, panel: &SuggestionPanel);
    fn remove_suggestions(&mut self) -> bool;

    fn insert_alert(&mut self, alert: &AlertView);
    fn fade_alert(&mut self, id: AlertId);
    fn remove_alert(&mut self, id: AlertId);

    /// Mounts an invisible, off-screen, read-only input holding `text`.
    fn mount_scratch_input(&mut self, text: &str) -> NodeId;
    fn select_node_text(&mut self, node: NodeId);
    /// Runs the synchronous copy command over the current selection.
    fn exec_copy(&mut self) -> bool;
    fn unmount(&mut self, node: NodeId);

    fn quick_search_controls(&self) -> Vec<ElementText>;
    fn copyable_blocks(&self) -> Vec<ElementText>;
    fn result_cards(&self) -> Vec<NodeId>;
    fn main_region(&self) -> Option<MainRegion>;

    fn set_aria_label(&mut self, node: NodeId, label: &str);
    fn set_outline(&mut self, node: NodeId, outline: Option<&str>);
    fn set_card_style(&mut self, node: NodeId, style: &CardStyle);
    fn set_element_id(&mut self, node: NodeId, id: &str);
    fn has_copy_control(&self, node: NodeId) -> bool;
    fn insert_copy_control(&mut self, node: NodeId);
    fn has_skip_link(&self) -> bool;
    fn prepend_skip_link(&mut self, target_id: &str);
    /// Replaces the text of the element with the given id. Returns false
    /// when no such element exists.
    fn set_text_by_id(&mut self, element_id: &str, text: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryElement {
    pub node: NodeId,
    pub text: String,
    pub id: Option<String>,
    pub aria_label: Option<String>,
    pub outline: Option<String>,
    pub style: Option<CardStyle>,
    pub copy_control: bool,
}

impl MemoryElement {
    fn new(node: NodeId, text: &str) -> Self {
        Self {
            node,
            text: text.to_string(),
            id: None,
            aria_label: None,
            outline: None,
            style: None,
            copy_control: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryAlert {
    pub view: AlertView,
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
    pub spinner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScratchInput {
    pub node: NodeId,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryPage {
    query: String,
    query_focused: bool,
    query_selected: bool,
    submit: SubmitButton,
    suggestions: Option<SuggestionPanel>,
    panels_rendered: usize,
    alerts: Vec<MemoryAlert>,
    alerts_inserted: usize,
    scratch: Option<ScratchInput>,
    selection: Option<String>,
    copy_command_supported: bool,
    copied: Option<String>,
    quick_search: Vec<MemoryElement>,
    copyable: Vec<MemoryElement>,
    cards: Vec<MemoryElement>,
    main: Option<MemoryElement>,
    body: Vec<String>,
    texts_by_id: BTreeMap<String, String>,
    next_node: u32,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new("Search")
    }
}

impl MemoryPage {
    pub fn new(submit_label: &str) -> Self {
        Self {
            query: String::new(),
            query_focused: false,
            query_selected: false,
            submit: SubmitButton {
                label: submit_label.to_string(),
                disabled: false,
                spinner: false,
            },
            suggestions: None,
            panels_rendered: 0,
            alerts: Vec::new(),
            alerts_inserted: 0,
            scratch: None,
            selection: None,
            copy_command_supported: true,
            copied: None,
            quick_search: Vec::new(),
            copyable: Vec::new(),
            cards: Vec::new(),
            main: None,
            body: vec!["header".to_string(), "main".to_string(), "footer".to_string()],
            texts_by_id: BTreeMap::new(),
            next_node: 0,
        }
    }

    pub fn with_quick_search(mut self, text: &str) -> Self {
        let node = self.allocate();
        self.quick_search.push(MemoryElement::new(node, text));
        self
    }

    pub fn with_copyable(mut self, text: &str) -> Self {
        let node = self.allocate();
        self.copyable.push(MemoryElement::new(node, text));
        self
    }

    pub fn with_result_cards(mut self, count: usize) -> Self {
        for index in 0..count {
            let node = self.allocate();
            self.cards
                .push(MemoryElement::new(node, &format!("result {}", index + 1)));
        }
        self
    }

    pub fn with_main_region(mut self, id: Option<&str>) -> Self {
        let node = self.allocate();
        let mut main = MemoryElement::new(node, "");
        main.id = id.map(str::to_string);
        self.main = Some(main);
        self
    }

    pub fn with_text_element(mut self, id: &str, text: &str) -> Self {
        self.texts_by_id.insert(id.to_string(), text.to_string());
        self
    }

    pub fn with_copy_command(mut self, supported: bool) -> Self {
        self.copy_command_supported = supported;
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_query_focused(&self) -> bool {
        self.query_focused
    }

    pub fn is_query_selected(&self) -> bool {
        self.query_selected
    }

    pub fn blur_query(&mut self) {
        self.query_focused = false;
        self.query_selected = false;
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    pub fn suggestions(&self) -> Option<&SuggestionPanel> {
        self.suggestions.as_ref()
    }

    pub fn panels_rendered(&self) -> usize {
        self.panels_rendered
    }

    pub fn alerts(&self) -> &[MemoryAlert] {
        &self.alerts
    }

    pub fn alerts_inserted(&self) -> usize {
        self.alerts_inserted
    }

    pub fn scratch_input(&self) -> Option<&ScratchInput> {
        self.scratch.as_ref()
    }

    pub fn copied_text(&self) -> Option<&str> {
        self.copied.as_deref()
    }

    pub fn quick_search(&self) -> &[MemoryElement] {
        &self.quick_search
    }

    pub fn copyable(&self) -> &[MemoryElement] {
        &self.copyable
    }

    pub fn cards(&self) -> &[MemoryElement] {
        &self.cards
    }

    pub fn main(&self) -> Option<&MemoryElement> {
        self.main.as_ref()
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    pub fn text_by_id(&self, id: &str) -> Option<&str> {
        self.texts_by_id.get(id).map(String::as_str)
    }

    fn allocate(&mut self) -> NodeId {
        self.next_node += 1;
        NodeId(self.next_node)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut MemoryElement> {
        self.quick_search
            .iter_mut()
            .chain(self.copyable.iter_mut())
            .chain(self.cards.iter_mut())
            .chain(self.main.iter_mut())
            .find(|element| element.node == node)
    }

    fn element(&self, node: NodeId) -> Option<&MemoryElement> {
        self.quick_search
            .iter()
            .chain(self.copyable.iter())
            .chain(self.cards.iter())
            .chain(self.main.iter())
            .find(|element| element.node == node)
    }
}

impl Page for MemoryPage {
    fn query_value(&self) -> String {
        self.query.clone()
    }

    fn set_query_value(&mut self, value: &str) {
        self.query = value.to_string();
        self.query_selected = false;
    }

    fn focus_query(&mut self) {
        self.query_focused = true;
    }

    fn select_query(&mut self) {
        self.query_selected = true;
        self.selection = Some(self.query.clone());
    }

    fn submit_label(&self) -> String {
        self.submit.label.clone()
    }

    fn render_submit_button(&mut self, state: &LoadingState) {
        match state {
            LoadingState::Idle { label } => {
                self.submit = SubmitButton {
                    label: label.clone(),
                    disabled: false,
                    spinner: false,
                };
            }
            LoadingState::Loading => {
                self.submit = SubmitButton {
                    label: crate::submission::LOADING_LABEL.to_string(),
                    disabled: true,
                    spinner: true,
                };
            }
        }
    }

    fn render_suggestions(&mut self, panel: &SuggestionPanel) {
        self.suggestions = Some(panel.clone());
        self.panels_rendered += 1;
    }

    fn remove_suggestions(&mut self) -> bool {
        self.suggestions.take().is_some()
    }

    fn insert_alert(&mut self, alert: &AlertView) {
        self.alerts.push(MemoryAlert {
            view: alert.clone(),
            fading: false,
        });
        self.alerts_inserted += 1;
    }

    fn fade_alert(&mut self, id: AlertId) {
        if let Some(alert) = self.alerts.iter_mut().find(|alert| alert.view.id == id) {
            alert.fading = true;
        }
    }

    fn remove_alert(&mut self, id: AlertId) {
        self.alerts.retain(|alert| alert.view.id != id);
    }

    fn mount_scratch_input(&mut self, text: &str) -> NodeId {
        let node = self.allocate();
        self.scratch = Some(ScratchInput {
            node,
            text: text.to_string(),
        });
        node
    }

    fn select_node_text(&mut self, node: NodeId) {
        self.selection = self
            .scratch
            .as_ref()
            .filter(|scratch| scratch.node == node)
            .map(|scratch| scratch.text.clone())
            .or_else(|| self.element(node).map(|element| element.text.clone()));
    }

    fn exec_copy(&mut self) -> bool {
        if !self.copy_command_supported {
            return false;
        }
        match self.selection.clone() {
            Some(selection) => {
                self.copied = Some(selection);
                true
            }
            None => false,
        }
    }

    fn unmount(&mut self, node: NodeId) {
        if self.scratch.as_ref().is_some_and(|scratch| scratch.node == node) {
            self.scratch = None;
        }
    }

    fn quick_search_controls(&self) -> Vec<ElementText> {
        self.quick_search
            .iter()
            .map(|element| ElementText::new(element.node, &element.text))
            .collect()
    }

    fn copyable_blocks(&self) -> Vec<ElementText> {
        self.copyable
            .iter()
            .map(|element| ElementText::new(element.node, &element.text))
            .collect()
    }

    fn result_cards(&self) -> Vec<NodeId> {
        self.cards.iter().map(|card| card.node).collect()
    }

    fn main_region(&self) -> Option<MainRegion> {
        self.main.as_ref().map(|main| MainRegion {
            node: main.node,
            id: main.id.clone(),
        })
    }

    fn set_aria_label(&mut self, node: NodeId, label: &str) {
        if let Some(element) = self.element_mut(node) {
            element.aria_label = Some(label.to_string());
        }
    }

    fn set_outline(&mut self, node: NodeId, outline: Option<&str>) {
        if let Some(element) = self.element_mut(node) {
            element.outline = outline.map(str::to_string);
        }
    }

    fn set_card_style(&mut self, node: NodeId, style: &CardStyle) {
        if let Some(element) = self.element_mut(node) {
            element.style = Some(style.clone());
        }
    }

    fn set_element_id(&mut self, node: NodeId, id: &str) {
        if let Some(element) = self.element_mut(node) {
            element.id = Some(id.to_string());
        }
    }

    fn has_copy_control(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.copy_control)
    }

    fn insert_copy_control(&mut self, node: NodeId) {
        if let Some(element) = self.element_mut(node) {
            element.copy_control = true;
        }
    }

    fn has_skip_link(&self) -> bool {
        self.body.iter().any(|child| child.starts_with("a.skip-link"))
    }

    fn prepend_skip_link(&mut self, target_id: &str) {
        self.body.insert(0, format!("a.skip-link[href=#{target_id}] {SKIP_LINK_TEXT}"));
    }

    fn set_text_by_id(&mut self, element_id: &str, text: &str) -> bool {
        match self.texts_by_id.get_mut(element_id) {
            Some(slot) => {
                *slot = text.to_string();
                true
            }
            None => false,
        }
    }
}
