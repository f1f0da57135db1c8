pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// Width of the form column on the left.
const FORM_WIDTH: u16 = 42;

pub fn render(frame: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form and output
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    let form = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Topic
            Constraint::Length(3), // Blog type
            Constraint::Length(3), // Word count
            Constraint::Length(3), // Tone
            Constraint::Length(3), // Audience
            Constraint::Length(3), // Generate button
            Constraint::Length(3), // Copy button
            Constraint::Min(0),
            Constraint::Length(6), // Stats
        ])
        .split(columns[0]);

    widgets::render_form(frame, app, &form[..5]);
    widgets::render_generate_button(frame, app, form[5]);
    if app.copy_visible {
        widgets::render_copy_button(frame, app, form[6]);
    }
    widgets::render_stats(frame, app, form[8]);
    widgets::render_output(frame, app, columns[1]);
    widgets::render_status_bar(frame, app, rows[1]);
    widgets::render_bottom_bar(frame, app, rows[2]);

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }

    if let Some(message) = &app.alert {
        widgets::render_alert(frame, message, frame.area());
    }
}
