//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod success;

use crate::app::App;
use crate::state::Phase;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let regions = layout::create_layout(frame.area());

    match app.wizard.phase() {
        Phase::Submitted(delivery) => {
            let area = regions.header.union(regions.buttons);
            success::draw(frame, area, delivery);
        }
        Phase::Editing | Phase::Submitting => {
            layout::draw_header(frame, regions.header, app.wizard.step());
            forms::draw_step_form(frame, regions.body, app);
            layout::draw_button_row(frame, regions.buttons, app);
        }
    }

    layout::draw_status_bar(frame, app);

    // Error dialog overlays everything
    if let Some(message) = app.current_error() {
        render_error_dialog(frame, message);
    }
}
