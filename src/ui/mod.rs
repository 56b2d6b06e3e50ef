//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use components::{render_confirm_dialog, render_picker_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let banner = layout::banner_lines(app, area.width);
    let areas = layout::create_layout(area, banner.len());

    layout::draw_header(frame, areas.header, app);
    if let Some(banner_area) = areas.banner {
        layout::draw_error_banner(frame, banner_area, &banner);
    }
    forms::draw_form_editor(frame, areas.content, app);
    layout::draw_status_bar(frame, areas.status, app);

    // Modals on top
    if let Some(picker) = &app.state.picker {
        let label = app.state.step_label(picker.step_index);
        render_picker_dialog(frame, picker, &app.state.editor.definition_choices, &label);
    } else if let Some(pending) = &app.state.pending_delete {
        render_confirm_dialog(frame, pending);
    }
}
