//! Application state and core logic

use crate::prediction::{SubmissionHandle, SubmissionResult, Submitter};
use crate::state::{AppState, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Builds and sends submissions
    submitter: Submitter,
    /// Submission running in the background, if any
    pending: Option<SubmissionHandle>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(submitter: Submitter) -> Self {
        Self {
            state: AppState::default(),
            submitter,
            pending: None,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Check if a submission is outstanding
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Form => self.handle_form_key(key),
            View::Result => self.handle_result_key(key),
        }
        Ok(())
    }

    /// Handle keys in the Form view
    fn handle_form_key(&mut self, key: KeyEvent) {
        let on_submit_row = self.state.form.is_submit_row_active();

        match key.code {
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) =>
            {
                self.start_submission();
            }
            KeyCode::Enter if on_submit_row => self.start_submission(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Left => self.state.form.cycle_option(false),
            // Space steps choice fields forward
            KeyCode::Right | KeyCode::Char(' ') => self.state.form.cycle_option(true),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.state.form.input_char(c)
            }
            KeyCode::Backspace => self.state.form.backspace(),
            _ => {}
        }
    }

    /// Handle keys in the Result view
    fn handle_result_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('n')) {
            self.state.start_new_form();
        }
    }

    /// Gate the form and hand the request to a background task
    fn start_submission(&mut self) {
        match self.submitter.prepare(&mut self.state.form) {
            Ok(prepared) => {
                self.status_message = Some("Submitting...".to_string());
                self.pending = Some(SubmissionHandle::spawn(self.submitter.clone(), prepared));
            }
            Err(result) => self.apply_result(result),
        }
    }

    /// Poll the background submission for its outcome
    pub fn poll_submission(&mut self) {
        let Some(result) = self.pending.as_mut().and_then(SubmissionHandle::try_recv) else {
            return;
        };
        self.pending = None;
        self.state.form.finish_submission();
        self.status_message = None;
        self.apply_result(result);
    }

    fn apply_result(&mut self, result: SubmissionResult) {
        match result {
            SubmissionResult::Success(verdict) => {
                self.status_message = Some("Prediction received".to_string());
                self.state.show_result(verdict);
            }
            SubmissionResult::Failure { kind, detail } => {
                self.push_error(format!("{} ({kind})\n\n{detail}", kind.title()));
            }
        }
    }
}
