//! Application state module

mod app_state;
mod editor;
mod forms;
mod history;
mod models;
mod picker;

pub use app_state::*;
pub use editor::*;
pub use forms::*;
pub use models::*;
pub use picker::*;
