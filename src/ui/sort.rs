use crate::app::App;
use crate::query::SortKey;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = super::centered_rect(40, 40, frame.area());
    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = SortKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| {
            let active = *key == app.session.query.sort;
            let marker = if active { "(•)" } else { "( )" };
            let style = if i == app.sort_cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if active {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {marker} {}", key.label()),
                style,
            )))
        })
        .collect();

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Sort by ")
            .title_bottom(
                Line::from(" Enter apply · Esc close ")
                    .style(Style::default().fg(Color::DarkGray)),
            ),
    );
    frame.render_widget(menu, area);
}
