//! Confirmation dialog for deleting a step

use super::base::{key_hints, render_dialog, DialogConfig};
use crate::state::PendingDeleteStep;
use crate::ui::widgets::truncate_str;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const DIALOG_WIDTH: u16 = 50;

/// Render a confirmation dialog for the pending step delete
pub fn render_confirm_dialog(frame: &mut Frame, pending: &PendingDeleteStep) {
    let max_display_len = (DIALOG_WIDTH - 6) as usize;

    let mut body = vec![
        Line::from(Span::styled(
            "Are you sure you want to delete",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("{}?", truncate_str(&pending.label, max_display_len)),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];

    // Cancel, Delete
    for (is_delete, label, color) in [(false, "Cancel", Color::White), (true, "Delete", Color::Red)] {
        let is_selected = pending.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        body.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    render_dialog(
        frame,
        DialogConfig {
            title: "Delete Step",
            title_color: Color::Red,
            border_color: Color::Red,
            body,
            hint: Some(key_hints(&[
                ("↑↓", "select"),
                ("Enter", "confirm"),
                ("y/n", "delete/keep"),
            ])),
            width: DIALOG_WIDTH,
        },
    );
}
