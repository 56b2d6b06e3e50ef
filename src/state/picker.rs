//! Definition picker dialog state

use super::editor::DefinitionChoice;

/// Message shown when the picker is confirmed on the empty choice
pub const DEFINITION_REQUIRED: &str = "You must select a form definition.";

/// Modal for choosing the form definition of one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionPicker {
    /// Storage index of the step being edited
    pub step_index: usize,
    /// Highlighted position in the choice list
    pub selected: usize,
    /// Validation messages from the last confirm attempt
    pub validation_messages: Vec<String>,
}

impl DefinitionPicker {
    /// Open the picker with `current` pre-selected when it is one of `choices`
    pub fn open(step_index: usize, choices: &[DefinitionChoice], current: Option<&str>) -> Self {
        let selected = current
            .and_then(|id| choices.iter().position(|c| c.id == id))
            .unwrap_or(0);
        Self {
            step_index,
            selected,
            validation_messages: Vec::new(),
        }
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Validate the highlighted choice.
    ///
    /// Returns the picked definition id, or records a validation message and
    /// returns `None` when nothing usable is highlighted.
    pub fn confirm(&mut self, choices: &[DefinitionChoice]) -> Option<String> {
        match choices.get(self.selected) {
            Some(choice) if !choice.is_empty() => {
                self.validation_messages.clear();
                Some(choice.id.clone())
            }
            _ => {
                self.validation_messages = vec![DEFINITION_REQUIRED.to_string()];
                None
            }
        }
    }
}
