use super::View;
use crate::api::{EvaluationDetails, SelectedFile};
use std::sync::{Mutex, MutexGuard};

/// Everything the form shows, inputs and outputs alike.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub selected_file: Option<SelectedFile>,
    pub case_text: String,
    pub analysis: String,
    pub user_response: String,
    pub ai_score: String,
    pub user_score: String,
    pub ai_confidence: String,
    pub user_confidence: String,
    pub general_comment: String,
    pub evaluation_details: EvaluationDetails,
    pub evaluation_modal_open: bool,
}

/// In-memory form backing the terminal front-end.
#[derive(Debug, Default)]
pub struct FormView {
    state: Mutex<FormState>,
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        // Every write replaces a whole field, so a poisoned state is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn select_file(&self, file: SelectedFile) {
        self.state().selected_file = Some(file);
    }

    pub fn set_case_text(&self, text: impl Into<String>) {
        self.state().case_text = text.into();
    }

    pub fn set_user_response(&self, text: impl Into<String>) {
        self.state().user_response = text.into();
    }

    pub fn close_evaluation_modal(&self) {
        self.state().evaluation_modal_open = false;
    }

    pub fn snapshot(&self) -> FormState {
        self.state().clone()
    }
}

impl View for FormView {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.state().selected_file.clone()
    }

    fn case_text(&self) -> String {
        self.state().case_text.clone()
    }

    fn set_analysis(&self, analysis: &str) {
        self.state().analysis = analysis.to_string();
    }

    fn user_response(&self) -> String {
        self.state().user_response.clone()
    }

    fn set_ai_score(&self, value: &str) {
        self.state().ai_score = value.to_string();
    }

    fn set_user_score(&self, value: &str) {
        self.state().user_score = value.to_string();
    }

    fn set_ai_confidence(&self, value: &str) {
        self.state().ai_confidence = value.to_string();
    }

    fn set_user_confidence(&self, value: &str) {
        self.state().user_confidence = value.to_string();
    }

    fn set_general_comment(&self, value: &str) {
        self.state().general_comment = value.to_string();
    }

    fn set_evaluation_details(&self, details: &EvaluationDetails) {
        self.state().evaluation_details = details.clone();
    }

    fn show_evaluation_modal(&self) {
        self.state().evaluation_modal_open = true;
    }
}
