//! Form field value objects

/// A single-line text input with its label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: String,
}

impl FormField {
    /// Create a text field with initial value
    pub fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
