//! Application state definitions

use super::forms::FormState;
use crate::prediction::Verdict;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Form,
    Result,
}

/// Verdict shown on the result view
#[derive(Debug, Clone)]
pub struct ResultRecord {
    pub verdict: Verdict,
    pub received_at: DateTime<Utc>,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub form: FormState,
    pub result: Option<ResultRecord>,
    /// Queued error notices, shown one at a time
    errors: VecDeque<String>,
}

impl AppState {
    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Move to the result view; the form session ends here
    pub fn show_result(&mut self, verdict: Verdict) {
        self.result = Some(ResultRecord {
            verdict,
            received_at: Utc::now(),
        });
        self.form.clear();
        self.current_view = View::Result;
    }

    /// Leave the result view with a fresh form
    pub fn start_new_form(&mut self) {
        self.result = None;
        self.form = FormState::new();
        self.current_view = View::Form;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldName;
    use serde_json::json;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Form);
        assert!(state.result.is_none());
        assert!(!state.has_errors());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }

    #[test]
    fn test_show_result_discards_form() {
        let mut state = AppState::default();
        state.form.update_field(FieldName::Age, "54");
        state.show_result(Verdict::new(json!({"prediction": 1})));
        assert_eq!(state.current_view, View::Result);
        assert_eq!(state.form.raw(FieldName::Age), "");
        assert!(state.result.is_some());
    }

    #[test]
    fn test_start_new_form() {
        let mut state = AppState::default();
        state.show_result(Verdict::new(json!({"prediction": 0})));
        state.start_new_form();
        assert_eq!(state.current_view, View::Form);
        assert!(state.result.is_none());
    }
}
