//! Form rendering module
//!
//! - `field_renderer`: one widget per field kind
//! - `step_form`: lays out the current step's fields

mod field_renderer;
mod step_form;

pub use step_form::draw_step_form;
