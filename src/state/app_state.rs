//! Application state definitions

use super::editor::{reduce, EditorState, Intent};
use super::forms::FormMetaForm;
use super::history::SnapshotHistory;
use super::models::FormPayload;
use super::picker::DefinitionPicker;
use crate::api::FieldErrors;
use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

/// Identity of the form being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    pub form_uuid: Uuid,
    /// Not yet persisted; the next save creates it
    pub is_new: bool,
}

/// Step awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteStep {
    /// Storage index of the step
    pub index: usize,
    pub label: String,
    /// `false` = Cancel, `true` = Delete
    pub selected_option: bool,
}

impl PendingDeleteStep {
    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub session: FormSession,
    pub meta: FormMetaForm,

    // Step editor
    pub editor: EditorState,
    pub history: SnapshotHistory,

    // Selection (position in `order`, not storage index)
    pub selected_index: usize,

    // Modals
    pub picker: Option<DefinitionPicker>,
    pub pending_delete: Option<PendingDeleteStep>,

    // Feedback
    pub errors: FieldErrors,
    pub loading: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(session: FormSession, name: String, slug: String) -> Self {
        Self {
            session,
            meta: FormMetaForm::new(name, slug),
            editor: EditorState::default(),
            history: SnapshotHistory::default(),
            selected_index: 0,
            picker: None,
            pending_delete: None,
            errors: FieldErrors::new(),
            loading: false,
            last_saved_at: None,
            status_message: None,
        }
    }

    /// Apply an intent to the editor, keeping the previous snapshot for undo
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(intent = intent.name(), "dispatch");
        if intent.is_edit() {
            self.history.record(self.editor.clone());
        }
        self.editor = reduce(&self.editor, intent);
        self.clamp_selection();
    }

    /// Restore the snapshot before the last edit
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.editor = previous;
                self.clamp_selection();
                true
            }
            None => false,
        }
    }

    /// Lay the steps out in storage by `order`, so storage index and position agree
    pub fn realign_steps(&mut self) {
        let steps = self.editor.steps_by_order();
        self.editor = reduce(&self.editor, Intent::Load { steps });
    }

    /// Storage index of the step under the cursor
    pub fn selected_step_index(&self) -> Option<usize> {
        self.editor
            .indexed_steps_by_order()
            .get(self.selected_index)
            .map(|(index, _)| *index)
    }

    /// Display label of the step stored at `index`
    pub fn step_label(&self, index: usize) -> String {
        match self.editor.steps.get(index) {
            Some(step) => format!(
                "Step {}: {}",
                step.order + 1,
                step.form_definition.name().unwrap_or("(no definition)")
            ),
            None => String::new(),
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.editor.len();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.editor.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.editor.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors = FieldErrors::new();
    }

    /// Request body for saving the current snapshot
    pub fn payload(&self) -> FormPayload {
        FormPayload {
            uuid: self.session.form_uuid,
            name: self.meta.name.as_text().to_string(),
            slug: self.meta.slug.as_text().to_string(),
            form_steps: self.editor.steps.clone(),
        }
    }
}
