//! Layout components (header, error banner, status bar)

use super::components::wrap_text;
use crate::app::App;
use crate::platform::{COPY_FORM_SHORTCUT, RELOAD_SHORTCUT, SAVE_SHORTCUT};
use crate::state::EditorFocus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Most error lines shown before the banner is cut off
const MAX_BANNER_LINES: usize = 6;

/// Areas of the main screen
pub struct ScreenAreas {
    pub header: Rect,
    pub banner: Option<Rect>,
    pub content: Rect,
    pub status: Rect,
}

/// Split the screen; the banner row only exists while `banner_lines > 0`
pub fn create_layout(area: Rect, banner_lines: usize) -> ScreenAreas {
    let banner_height = if banner_lines == 0 {
        0
    } else {
        banner_lines.min(MAX_BANNER_LINES) as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Header
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    ScreenAreas {
        header: chunks[0],
        banner: (banner_height > 0).then_some(chunks[1]),
        content: chunks[2],
        status: chunks[3],
    }
}

/// Error lines wrapped to the banner's inner width
pub fn banner_lines(app: &App, width: u16) -> Vec<String> {
    let inner = width.saturating_sub(4).max(10) as usize;
    app.state
        .errors
        .display_lines()
        .iter()
        .flat_map(|line| wrap_text(line, inner))
        .collect()
}

/// Draw the header with the form identity
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.state.session;
    let name = app.state.meta.name.as_text();

    let mut spans = vec![
        Span::styled(
            " Form Admin ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            if name.is_empty() { "(untitled form)" } else { name },
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", session.form_uuid),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if session.is_new {
        spans.push(Span::styled("  [new]", Style::default().fg(Color::Yellow)));
    }

    if let Some(saved_at) = app.state.last_saved_at {
        spans.push(Span::styled(
            format!("  saved {}", saved_at.with_timezone(&chrono::Local).format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the error banner
pub fn draw_error_banner(frame: &mut Frame, area: Rect, lines: &[String]) {
    let content: Vec<Line> = lines
        .iter()
        .take(MAX_BANNER_LINES)
        .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(Color::Red))))
        .collect();

    let banner = Paragraph::new(content).block(
        Block::default()
            .title(" Errors ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(banner, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Undo depth
    let undo_marker = if app.state.history.can_undo() {
        Span::styled(
            format!(" ↶{} ", app.state.history.len()),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Gray))
    };
    spans.push(undo_marker);

    spans.push(Span::styled(
        get_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current focus
fn get_hints(app: &App) -> String {
    if app.state.picker.is_some() || app.state.pending_delete.is_some() {
        return "j/k:select  Enter:confirm  Esc:cancel".to_string();
    }
    match app.state.meta.focus {
        EditorFocus::Steps => format!(
            "j/k:nav  a:add  d:delete  K/J:move  Enter:definition  x:clear  u:undo  {SAVE_SHORTCUT}:save  {COPY_FORM_SHORTCUT}:copy  {RELOAD_SHORTCUT}:reload  Tab:fields"
        ),
        EditorFocus::Name | EditorFocus::Slug => {
            format!("Tab:next  Esc:steps  {SAVE_SHORTCUT}:save")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_errors_has_no_banner() {
        let areas = create_layout(Rect::new(0, 0, 80, 24), 0);
        assert!(areas.banner.is_none());
        assert_eq!(areas.header.height, 1);
        assert_eq!(areas.status.y, 23);
        assert_eq!(areas.content.height, 22);
    }

    #[test]
    fn test_banner_height_is_capped() {
        let areas = create_layout(Rect::new(0, 0, 80, 24), 20);
        assert_eq!(areas.banner.map(|b| b.height), Some(MAX_BANNER_LINES as u16 + 2));
    }
}
