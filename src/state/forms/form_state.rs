//! Form metadata (name and slug) and editor focus handling

use super::field::FormField;

/// Trait for common focus cycling over a form's input slots
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Which part of the editor receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    Name,
    Slug,
    #[default]
    Steps,
}

impl EditorFocus {
    const ORDER: [EditorFocus; 3] = [EditorFocus::Name, EditorFocus::Slug, EditorFocus::Steps];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn from_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }
}

/// Name and slug of the form being edited
#[derive(Debug, Clone)]
pub struct FormMetaForm {
    pub name: FormField,
    pub slug: FormField,
    pub focus: EditorFocus,
    /// Set once the slug was typed by hand; until then it follows the name
    pub slug_touched: bool,
}

impl FormMetaForm {
    pub fn new(name: String, slug: String) -> Self {
        let slug_touched = !slug.is_empty() && slug != slugify(&name);
        Self {
            name: FormField::new("Name", name),
            slug: FormField::new("Slug", slug),
            focus: EditorFocus::default(),
            slug_touched,
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            EditorFocus::Name => {
                self.name.push_char(c);
                self.sync_slug();
            }
            EditorFocus::Slug => {
                self.slug.push_char(c);
                self.slug_touched = true;
            }
            EditorFocus::Steps => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EditorFocus::Name => {
                self.name.pop_char();
                self.sync_slug();
            }
            EditorFocus::Slug => {
                self.slug.pop_char();
                self.slug_touched = !self.slug.is_blank();
            }
            EditorFocus::Steps => {}
        }
    }

    fn sync_slug(&mut self) {
        if !self.slug_touched {
            self.slug.set_text(slugify(self.name.as_text()));
        }
    }
}

impl Form for FormMetaForm {
    fn field_count(&self) -> usize {
        EditorFocus::ORDER.len()
    }
    fn active_field(&self) -> usize {
        self.focus.index()
    }
    fn set_active_field(&mut self, index: usize) {
        self.focus = EditorFocus::from_index(index);
    }
}

/// Lowercase ASCII slug with single dashes between words
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Aanvraag Parkeervergunning"), "aanvraag-parkeervergunning");
        assert_eq!(slugify("  Multiple   spaces -- and dashes "), "multiple-spaces-and-dashes");
        assert_eq!(slugify("Ünïcode"), "n-code");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_default_focus_is_steps() {
        let form = FormMetaForm::new(String::new(), String::new());
        assert_eq!(form.focus, EditorFocus::Steps);
        assert_eq!(form.active_field(), 2);
    }

    #[test]
    fn test_next_field_wraps() {
        let mut form = FormMetaForm::new(String::new(), String::new());
        form.next_field();
        assert_eq!(form.focus, EditorFocus::Name);
        form.next_field();
        assert_eq!(form.focus, EditorFocus::Slug);
        form.next_field();
        assert_eq!(form.focus, EditorFocus::Steps);
    }

    #[test]
    fn test_prev_field_wraps() {
        let mut form = FormMetaForm::new(String::new(), String::new());
        form.prev_field();
        assert_eq!(form.focus, EditorFocus::Slug);
        form.set_active_field(0);
        form.prev_field();
        assert_eq!(form.focus, EditorFocus::Steps);
    }

    #[test]
    fn test_slug_follows_name_until_touched() {
        let mut form = FormMetaForm::new(String::new(), String::new());
        form.focus = EditorFocus::Name;
        for c in "My Form".chars() {
            form.input_char(c);
        }
        assert_eq!(form.slug.as_text(), "my-form");

        form.focus = EditorFocus::Slug;
        form.input_char('x');
        assert!(form.slug_touched);

        form.focus = EditorFocus::Name;
        form.input_char('s');
        assert_eq!(form.name.as_text(), "My Forms");
        assert_eq!(form.slug.as_text(), "my-formx");
    }

    #[test]
    fn test_clearing_slug_reattaches_it_to_name() {
        let mut form = FormMetaForm::new("Intake".to_string(), "custom".to_string());
        assert!(form.slug_touched);

        form.focus = EditorFocus::Slug;
        for _ in 0.."custom".len() {
            form.backspace();
        }
        assert!(!form.slug_touched);

        form.focus = EditorFocus::Name;
        form.backspace();
        assert_eq!(form.slug.as_text(), "intak");
    }

    #[test]
    fn test_matching_initial_slug_is_not_touched() {
        let form = FormMetaForm::new("Intake Form".to_string(), "intake-form".to_string());
        assert!(!form.slug_touched);
    }

    #[test]
    fn test_input_ignored_on_steps_focus() {
        let mut form = FormMetaForm::new("Name".to_string(), String::new());
        form.input_char('z');
        form.backspace();
        assert_eq!(form.name.as_text(), "Name");
        assert_eq!(form.slug.as_text(), "");
    }
}
