//! Form domain layer
//!
//! Typed form fields for the risk assessment form, with an explicit parse
//! step from raw input to typed values.

mod field;
mod form_state;

pub use field::{FieldName, FormField, InvalidField, ParsedValue};
pub use form_state::FormState;

#[cfg(test)]
pub use form_state::SUBMIT_ROW;
