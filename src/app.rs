//! Application state and core logic

use crate::api::{FieldErrors, FormsApi, NON_FIELD_ERRORS};
use crate::config::SessionParams;
use crate::platform::is_command;
use crate::state::{
    AppState, DefinitionPicker, EditorFocus, Form, FormSession, Intent, PendingDeleteStep,
};
use anyhow::Result;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Window in which a second Ctrl+C quits
const DOUBLE_CTRL_C_WINDOW: Duration = Duration::from_millis(1000);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Gateway to the forms API
    api: Box<dyn FormsApi>,
    /// Whether the app should quit
    quit: bool,
    /// Timestamp of last Ctrl+C press for double-tap quit
    pub last_ctrl_c: Option<Instant>,
}

impl App {
    /// Create a new App instance for the given session
    pub fn new(api: Box<dyn FormsApi>, session: SessionParams) -> Self {
        let state = AppState::new(
            FormSession {
                form_uuid: session.form_uuid,
                is_new: session.is_new,
            },
            session.name,
            session.slug,
        );

        Self {
            state,
            api,
            quit: false,
            last_ctrl_c: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Fetch the form's steps and all definitions.
    ///
    /// Both requests run concurrently; each result lands in its own slice of
    /// the state, failures end up in the error map. A new form has no steps
    /// on the server and starts empty.
    pub async fn load(&mut self) {
        let FormSession { form_uuid, is_new } = self.state.session.clone();
        self.state.loading = true;

        let api = &self.api;
        let fetch_steps = async move {
            if is_new {
                Ok(Vec::new())
            } else {
                api.fetch_form_steps(form_uuid).await
            }
        };
        let (steps, definitions) = tokio::join!(fetch_steps, api.fetch_form_definitions());

        let mut errors = FieldErrors::new();
        match definitions {
            Ok(definitions) => self.state.dispatch(Intent::LoadDefinitions { definitions }),
            Err(e) => {
                warn!("Failed to load form definitions: {e}");
                errors.merge(e.field_errors());
            }
        }
        match steps {
            Ok(mut steps) => {
                steps.sort_by_key(|step| step.order);
                self.state.dispatch(Intent::Load { steps });
                if !self.state.editor.is_order_contiguous() {
                    warn!(%form_uuid, "Loaded steps have gaps or duplicates in their order");
                }
            }
            Err(e) => {
                warn!(%form_uuid, "Failed to load form steps: {e}");
                errors.merge(e.field_errors());
            }
        }

        self.state.history.clear();
        self.state.loading = false;
        if errors.is_empty() {
            self.state.clear_errors();
            info!(%form_uuid, steps = self.state.editor.len(), "form loaded");
        } else {
            self.state.set_errors(errors);
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }
        self.last_ctrl_c = None;

        // Modals first
        if self.state.picker.is_some() {
            self.handle_picker_key(key);
            return Ok(());
        }
        if self.state.pending_delete.is_some() {
            self.handle_delete_dialog_key(key);
            return Ok(());
        }

        self.state.status_message = None;

        if is_command(key.modifiers) {
            match key.code {
                KeyCode::Char('s') => self.save().await,
                KeyCode::Char('d') => self.copy_form().await,
                KeyCode::Char('r') => self.load().await,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.state.meta.next_field();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.meta.prev_field();
                return Ok(());
            }
            _ => {}
        }

        match self.state.meta.focus {
            EditorFocus::Steps => self.handle_steps_key(key),
            EditorFocus::Name | EditorFocus::Slug => self.handle_meta_key(key),
        }

        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(last) if now.duration_since(last) <= DOUBLE_CTRL_C_WINDOW => self.quit = true,
            _ => {
                self.last_ctrl_c = Some(now);
                self.state.status_message = Some("Press Ctrl+C again to quit".to_string());
            }
        }
    }

    /// Keys while a name/slug input has focus
    fn handle_meta_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.state.meta.input_char(c),
            KeyCode::Backspace => self.state.meta.backspace(),
            KeyCode::Enter => self.state.meta.next_field(),
            KeyCode::Esc => self.state.meta.focus = EditorFocus::Steps,
            _ => {}
        }
    }

    /// Keys while the step list has focus
    fn handle_steps_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('a') => {
                self.state.dispatch(Intent::AddStep);
                self.state.select_last();
            }
            KeyCode::Char('d') | KeyCode::Delete => self.start_delete_step(),
            KeyCode::Char('K') => self.move_selected_step(true),
            KeyCode::Char('J') => self.move_selected_step(false),
            KeyCode::Enter => self.open_picker(),
            KeyCode::Char('x') => {
                if let Some(index) = self.state.selected_step_index() {
                    self.state.dispatch(Intent::ChangeStepDefinition {
                        index,
                        definition_id: None,
                    });
                }
            }
            KeyCode::Char('u') => {
                if !self.state.undo() {
                    self.state.status_message = Some("Nothing to undo".to_string());
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    /// Move the selected step one slot up or down, keeping the cursor on it
    fn move_selected_step(&mut self, up: bool) {
        let Some(index) = self.state.selected_step_index() else {
            return;
        };
        let len = self.state.editor.len();
        let intent = if up {
            if index == 0 {
                return;
            }
            Intent::MoveStepUp { index }
        } else {
            if index + 1 >= len {
                return;
            }
            Intent::move_step_down(index)
        };

        self.state.dispatch(intent);
        self.state.realign_steps();
        if up {
            self.state.move_selection_up();
        } else {
            self.state.move_selection_down();
        }
    }

    fn start_delete_step(&mut self) {
        if let Some(index) = self.state.selected_step_index() {
            self.state.pending_delete = Some(PendingDeleteStep {
                index,
                label: self.state.step_label(index),
                selected_option: false,
            });
        }
    }

    fn handle_delete_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = self.state.pending_delete.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => pending.toggle(),
            KeyCode::Char('y') => self.confirm_delete_step(),
            KeyCode::Enter => {
                if pending.selected_option {
                    self.confirm_delete_step();
                } else {
                    self.state.pending_delete = None;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.state.pending_delete = None,
            _ => {}
        }
    }

    fn confirm_delete_step(&mut self) {
        if let Some(pending) = self.state.pending_delete.take() {
            self.state.dispatch(Intent::DeleteStep {
                index: pending.index,
            });
            self.state.status_message = Some(format!("Deleted {}", pending.label));
        }
    }

    fn open_picker(&mut self) {
        let Some(index) = self.state.selected_step_index() else {
            return;
        };
        let current = self.state.editor.steps[index].form_definition.uuid();
        self.state.picker = Some(DefinitionPicker::open(
            index,
            &self.state.editor.definition_choices,
            current,
        ));
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let choices = Arc::clone(&self.state.editor.definition_choices);
        let Some(picker) = self.state.picker.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => picker.select_next(choices.len()),
            KeyCode::Char('k') | KeyCode::Up => picker.select_prev(),
            KeyCode::Enter => {
                if let Some(definition_id) = picker.confirm(&choices) {
                    let index = picker.step_index;
                    self.state.picker = None;
                    self.state.dispatch(Intent::ChangeStepDefinition {
                        index,
                        definition_id: Some(definition_id),
                    });
                }
            }
            KeyCode::Esc => self.state.picker = None,
            _ => {}
        }
    }

    /// Persist the current snapshot.
    ///
    /// On failure the steps stay as they are and the errors are shown at the
    /// top of the view.
    pub async fn save(&mut self) {
        let payload = self.state.payload();
        let is_new = self.state.session.is_new;

        match self.api.save_form(&payload, is_new).await {
            Ok(()) => {
                self.state.session.is_new = false;
                self.state.clear_errors();
                self.state.last_saved_at = Some(Utc::now());
                self.state.status_message = Some("Form saved".to_string());
            }
            Err(e) => {
                warn!(form_uuid = %payload.uuid, "Failed to save form: {e}");
                self.state.set_errors(e.field_errors());
            }
        }
    }

    /// Duplicate the form on the server and continue editing the copy
    pub async fn copy_form(&mut self) {
        if self.state.session.is_new {
            self.state.set_errors(FieldErrors::single(
                NON_FIELD_ERRORS,
                "Save the form before copying it.",
            ));
            return;
        }

        let source = self.state.session.form_uuid;
        match self.api.copy_form(source).await {
            Ok(copy) => {
                info!(%source, %copy, "switching to copied form");
                self.state.session.form_uuid = copy;
                self.state.selected_index = 0;
                self.load().await;
                if !self.state.has_errors() {
                    self.state.status_message = Some(format!("Editing copy {copy}"));
                }
            }
            Err(e) => {
                warn!(%source, "Failed to copy form: {e}");
                self.state.set_errors(e.field_errors());
            }
        }
    }
}
