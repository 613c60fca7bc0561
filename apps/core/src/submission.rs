use serde::{Deserialize, Serialize};

use crate::dom::Page;
use crate::model::submittable_query;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a medical question or search term.";
pub const LOADING_LABEL: &str = "Searching...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadingState {
    Idle { label: String },
    Loading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed(String),
    Empty,
}

#[derive(Debug)]
pub struct SubmissionController {
    state: LoadingState,
}

impl SubmissionController {
    pub fn new(idle_label: &str) -> Self {
        Self {
            state: LoadingState::Idle {
                label: idle_label.to_string(),
            },
        }
    }

    pub fn state(&self) -> &LoadingState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadingState::Loading
    }

    pub fn decide(&mut self, page: &mut dyn Page) -> SubmitDecision {
        let raw = page.query_value();
        let Some(query) = submittable_query(&raw) else {
            return SubmitDecision::Empty;
        };

        if let LoadingState::Idle { .. } = self.state {
            self.state = LoadingState::Loading;
            page.render_submit_button(&self.state);
        }
        SubmitDecision::Proceed(query.to_string())
    }
}
