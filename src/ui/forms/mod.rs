//! Form rendering

mod field_renderer;
mod risk_form;

pub use risk_form::draw;
