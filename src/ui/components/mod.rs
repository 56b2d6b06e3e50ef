//! Reusable UI components

mod dialog;

pub use dialog::{render_confirm_dialog, render_picker_dialog, wrap_text};
