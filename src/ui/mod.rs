mod detail;
mod filters;
mod grid;
mod help;
mod sort;

use crate::app::{App, Menu};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Top-level render dispatch: the browse grid is always the backdrop,
/// overlays stack on top of it.
pub fn render(app: &App, frame: &mut Frame) {
    grid::render(app, frame);

    if app.session.selection.is_some() {
        detail::render(app, frame);
    }

    match app.menu {
        Menu::Filter => filters::render(app, frame),
        Menu::Sort => sort::render(app, frame),
        Menu::None => {}
    }

    if app.show_help {
        help::render(frame);
    }
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
