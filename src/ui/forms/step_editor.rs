//! Form editor page: name/slug inputs above the ordered step list
//!
//! Layout:
//! +------------------------------------------+
//! | Name                 | Slug              |
//! +------------------------------------------+
//! | Steps                                    |
//! |  1. Personal details                     |
//! |  2. (select a form definition)           |
//! +------------------------------------------+

use super::field_renderer::draw_field;
use crate::app::App;
use crate::state::{EditorFocus, FormStep, StepDefinition};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Error key of a step's definition, as returned by the forms API
fn step_error_key(index: usize) -> String {
    format!("formSteps.{index}.formDefinition")
}

/// Draw the editor page
pub fn draw_form_editor(frame: &mut Frame, area: Rect, app: &App) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name / slug
            Constraint::Min(3),    // Steps
        ])
        .split(area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[0]);

    let meta = &app.state.meta;
    let errors = &app.state.errors;
    draw_field(
        frame,
        h_chunks[0],
        &meta.name,
        meta.focus == EditorFocus::Name,
        errors.messages_for("name"),
    );
    draw_field(
        frame,
        h_chunks[1],
        &meta.slug,
        meta.focus == EditorFocus::Slug,
        errors.messages_for("slug"),
    );

    draw_step_list(frame, v_chunks[1], app);
}

fn step_item<'a>(step: &'a FormStep, errors: &'a [String]) -> ListItem<'a> {
    let mut spans = vec![Span::styled(
        format!("{:>3}. ", step.order + 1),
        Style::default().fg(Color::DarkGray),
    )];

    match &step.form_definition {
        StepDefinition::Definition(definition) => {
            spans.push(Span::styled(
                definition.name.as_str(),
                Style::default().fg(Color::White),
            ));
            if !definition.slug.is_empty() {
                spans.push(Span::styled(
                    format!("  /{}", definition.slug),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
        StepDefinition::Empty => spans.push(Span::styled(
            "(select a form definition)",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )),
    }

    if !errors.is_empty() {
        spans.push(Span::styled(
            format!("  ✗ {}", errors.join(" ")),
            Style::default().fg(Color::Red),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn draw_step_list(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let focused = state.meta.focus == EditorFocus::Steps;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let title = format!(" Steps ({}) ", state.editor.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if state.editor.is_empty() {
        let message = if state.loading {
            "Loading..."
        } else {
            "This form has no steps yet.\nPress 'a' to add a step."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = state
        .editor
        .indexed_steps_by_order()
        .into_iter()
        .map(|(index, step)| step_item(step, state.errors.messages_for(&step_error_key(index))))
        .collect();

    let highlight = if focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, area, list, Some(state.selected_index));
}
