//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw a single-line text field, with its server-side errors in the title
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    errors: &[String],
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let border_style = match (errors.is_empty(), is_active) {
        (false, _) => Style::default().fg(Color::Red),
        (true, true) => Style::default().fg(Color::Cyan),
        (true, false) => Style::default().fg(Color::DarkGray),
    };

    let (display_value, value_style) = if field.is_blank() && !is_active {
        ("(empty)", Style::default().fg(Color::DarkGray))
    } else {
        (field.as_text(), style)
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value, value_style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let title = if errors.is_empty() {
        format!(" {} ", field.label)
    } else {
        format!(" {} - {} ", field.label, errors.join(" "))
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.block(block), area);
}
