//! Form metadata layer
//!
//! Text inputs for the form's own name and slug, plus focus cycling between
//! those inputs and the step list.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{EditorFocus, Form, FormMetaForm};
