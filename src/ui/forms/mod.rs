//! Form rendering module
//!
//! - `field_renderer`: single-line text inputs
//! - `step_editor`: the form editor page (metadata and step list)

mod field_renderer;
mod step_editor;

pub use step_editor::draw_form_editor;
