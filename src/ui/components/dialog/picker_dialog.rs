//! Form definition picker dialog

use super::base::{key_hints, render_dialog, wrap_text, DialogConfig};
use crate::state::{DefinitionChoice, DefinitionPicker};
use crate::ui::widgets::truncate_str;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const DIALOG_WIDTH: u16 = 56;
/// Choices shown at once; the window follows the highlighted entry
const VISIBLE_CHOICES: usize = 10;

/// Render the definition picker for one step
pub fn render_picker_dialog(
    frame: &mut Frame,
    picker: &DefinitionPicker,
    choices: &[DefinitionChoice],
    step_label: &str,
) {
    let inner_width = (DIALOG_WIDTH - 4) as usize;

    let mut body = vec![Line::from(Span::styled(
        truncate_str(step_label, inner_width),
        Style::default().fg(Color::Cyan),
    ))];
    body.push(Line::from(""));

    let first = picker
        .selected
        .saturating_sub(VISIBLE_CHOICES.saturating_sub(1));
    for (i, choice) in choices.iter().enumerate().skip(first).take(VISIBLE_CHOICES) {
        let is_selected = i == picker.selected;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = match (is_selected, choice.is_empty()) {
            (true, _) => Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::DarkGray),
            (false, false) => Style::default().fg(Color::White),
        };
        body.push(Line::from(Span::styled(
            format!("{prefix}{}", truncate_str(&choice.label, inner_width - 2)),
            style,
        )));
    }

    for message in &picker.validation_messages {
        body.push(Line::from(""));
        for line in wrap_text(message, inner_width) {
            body.push(Line::from(Span::styled(line, Style::default().fg(Color::Red))));
        }
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Select Form Definition",
            title_color: Color::Cyan,
            border_color: Color::Cyan,
            body,
            hint: Some(key_hints(&[
                ("↑↓", "select"),
                ("Enter", "confirm"),
                ("Esc", "cancel"),
            ])),
            width: DIALOG_WIDTH,
        },
    );
}
