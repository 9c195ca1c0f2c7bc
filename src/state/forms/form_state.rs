//! Risk assessment form state

use super::field::{FieldName, FormField, InvalidField};
use thiserror::Error;

/// Errors raised by form operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("a submission is already in progress")]
    SubmissionInProgress,
}

/// Whether the form has a request outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    InFlight,
}

/// Index of the submit button row, after the twelve fields
pub const SUBMIT_ROW: usize = FieldName::ALL.len();

/// The twelve raw clinical inputs of one form session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    fields: [FormField; 12],
    pub active_field_index: usize,
    phase: SubmissionPhase,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            fields: FieldName::ALL.map(FormField::new),
            active_field_index: 0,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn field(&self, name: FieldName) -> &FormField {
        &self.fields[name.index()]
    }

    pub fn field_mut(&mut self, name: FieldName) -> &mut FormField {
        &mut self.fields[name.index()]
    }

    /// Fields in feature-vector order
    #[cfg(test)]
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter()
    }

    pub fn raw(&self, name: FieldName) -> &str {
        self.field(name).raw()
    }

    /// Store a raw value as entered; no validation happens here
    pub fn update_field(&mut self, name: FieldName, raw: impl Into<String>) {
        self.field_mut(name).set_raw(raw);
    }

    /// Like [`FormState::update_field`], resolving the field by its wire name
    #[allow(dead_code)]
    pub fn update_field_by_name(
        &mut self,
        name: &str,
        raw: impl Into<String>,
    ) -> Result<(), FormError> {
        let name = name
            .parse::<FieldName>()
            .map_err(FormError::UnknownField)?;
        self.update_field(name, raw);
        Ok(())
    }

    /// Every field that fails the completeness check, in vector order
    pub fn invalid_fields(&self) -> Vec<InvalidField> {
        self.fields
            .iter()
            .filter_map(|f| {
                f.issue().map(|issue| InvalidField {
                    field: f.name,
                    issue,
                })
            })
            .collect()
    }

    /// Reset every field to unset
    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_field_index = 0;
    }

    // Submission guard

    #[cfg(test)]
    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::InFlight
    }

    pub fn begin_submission(&mut self) -> Result<(), FormError> {
        if self.is_submitting() {
            return Err(FormError::SubmissionInProgress);
        }
        self.phase = SubmissionPhase::InFlight;
        Ok(())
    }

    pub fn finish_submission(&mut self) {
        self.phase = SubmissionPhase::Idle;
    }

    // Focus handling

    /// Number of focusable rows: the fields plus the submit button
    pub fn row_count(&self) -> usize {
        SUBMIT_ROW + 1
    }

    pub fn next_field(&mut self) {
        self.active_field_index = (self.active_field_index + 1) % self.row_count();
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.row_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    #[cfg(test)]
    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }

    /// Returns true if the submit button row is currently active
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    pub fn active_field(&self) -> Option<&FormField> {
        self.fields.get(self.active_field_index)
    }

    /// Apply an edit to the focused field through [`FormState::update_field`]
    fn edit_active(&mut self, edit: impl FnOnce(&FormField) -> Option<String>) {
        let Some(field) = self.active_field() else {
            return;
        };
        let name = field.name;
        if let Some(raw) = edit(field) {
            self.update_field(name, raw);
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.edit_active(|field| field.typed(c));
    }

    pub fn backspace(&mut self) {
        self.edit_active(|field| Some(field.erased()));
    }

    pub fn cycle_option(&mut self, forward: bool) {
        self.edit_active(|field| field.stepped(forward).map(str::to_string));
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::field::{FieldIssue, FieldValue};

    #[test]
    fn test_new_form_is_unset_and_idle() {
        let form = FormState::new();
        assert!(form.fields().all(|f| f.raw().is_empty()));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_update_field_stores_raw_value() {
        let mut form = FormState::new();
        form.update_field(FieldName::Age, "not validated");
        assert_eq!(form.raw(FieldName::Age), "not validated");
    }

    #[test]
    fn test_update_field_by_name() {
        let mut form = FormState::new();
        form.update_field_by_name("Fasting_BS", "1").unwrap();
        assert_eq!(form.raw(FieldName::FastingBs), "1");

        let err = form.update_field_by_name("fasting_bs", "1").unwrap_err();
        assert_eq!(err, FormError::UnknownField("fasting_bs".to_string()));
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let form = FormState::new();
        let invalid = form.invalid_fields();
        assert_eq!(invalid.len(), 11);
        assert!(invalid.iter().all(|i| i.issue == FieldIssue::Missing));
        assert!(invalid.iter().all(|i| i.field != FieldName::ZscoreChol));
    }

    #[test]
    fn test_begin_submission_guards_overlap() {
        let mut form = FormState::new();
        assert!(form.begin_submission().is_ok());
        assert!(form.is_submitting());
        assert_eq!(
            form.begin_submission(),
            Err(FormError::SubmissionInProgress)
        );
        form.finish_submission();
        assert!(form.begin_submission().is_ok());
    }

    #[test]
    fn test_update_allowed_while_in_flight() {
        let mut form = FormState::new();
        form.begin_submission().unwrap();
        form.update_field(FieldName::Age, "60");
        assert_eq!(form.raw(FieldName::Age), "60");
    }

    #[test]
    fn test_clear_keeps_phase() {
        let mut form = FormState::new();
        form.update_field(FieldName::Gender, "M");
        form.set_active_field(4);
        form.begin_submission().unwrap();
        form.clear();
        assert_eq!(form.raw(FieldName::Gender), "");
        assert_eq!(form.active_field_index, 0);
        assert!(form.is_submitting());
    }

    #[test]
    fn test_next_field_cycles_through_submit_row() {
        let mut form = FormState::new();
        for _ in 0..SUBMIT_ROW {
            form.next_field();
        }
        assert!(form.is_submit_row_active());
        assert!(form.active_field().is_none());
        form.next_field();
        assert_eq!(form.active_field_index, 0);
    }

    #[test]
    fn test_prev_field_wraps_to_submit_row() {
        let mut form = FormState::new();
        form.prev_field();
        assert!(form.is_submit_row_active());
    }

    #[test]
    fn test_set_active_field_clamps() {
        let mut form = FormState::new();
        form.set_active_field(100);
        assert_eq!(form.active_field_index, SUBMIT_ROW);
    }

    #[test]
    fn test_input_goes_to_active_field() {
        let mut form = FormState::new();
        form.set_active_field(FieldName::BloodPressure.index());
        form.input_char('1');
        form.input_char('3');
        form.input_char('0');
        form.backspace();
        assert_eq!(form.raw(FieldName::BloodPressure), "13");

        form.set_active_field(FieldName::StSlope.index());
        form.cycle_option(true);
        assert_eq!(form.raw(FieldName::StSlope), "Up");
    }

    #[test]
    fn test_editing_helpers_keep_field_kind() {
        let mut form = FormState::new();
        form.set_active_field(FieldName::Gender.index());
        form.input_char('1');
        assert_eq!(form.raw(FieldName::Gender), "");
        form.cycle_option(false);
        assert_eq!(form.field(FieldName::Gender).value, FieldValue::Token("F".to_string()));
        form.backspace();
        assert_eq!(form.raw(FieldName::Gender), "");

        form.set_active_field(FieldName::Oldpeak.index());
        for c in "-1.5".chars() {
            form.input_char(c);
        }
        assert_eq!(
            form.field(FieldName::Oldpeak).value,
            FieldValue::Numeric("-1.5".to_string())
        );
    }

    #[test]
    fn test_input_on_submit_row_is_ignored() {
        let mut form = FormState::new();
        form.set_active_field(SUBMIT_ROW);
        form.input_char('1');
        form.backspace();
        form.cycle_option(true);
        assert!(form.fields().all(|f| f.raw().is_empty()));
    }
}
