//! Form focus layer
//!
//! Describes which fields each step shows and where keyboard focus sits.

mod field;
mod form_state;

pub use field::{step_fields, FieldId};
pub use form_state::{NavButton, StepFocus};
