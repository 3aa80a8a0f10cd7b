use crate::app::{App, PriceEntry};
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    layout::{Constraint, Direction, Layout},
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = super::centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Filters ")
        .title_bottom(
            Line::from(" Space toggle · c clear · p price · r reset · Esc close ")
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Layout: categories(min) + price(2)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(inner);

    // ── Category checkboxes ──
    let items: Vec<ListItem> = app
        .catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let checked = app.session.query.categories.contains(category);
            let marker = if checked { "[x]" } else { "[ ]" };
            let style = if i == app.filter_cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else if checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {marker} {category}"),
                style,
            )))
        })
        .collect();

    let categories = List::new(items).block(
        Block::default()
            .borders(Borders::NONE)
            .title(" Categories ")
            .title_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(categories, chunks[0]);

    // ── Price range ──
    let price = &app.session.query.price;
    let price_line = match &app.price_entry {
        PriceEntry::Inactive => Line::from(vec![
            Span::styled(" Price: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("[{}, {}] SOL", price.min, price.max),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        PriceEntry::Min { buffer } => Line::from(vec![
            Span::styled(" Min price: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                buffer.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        PriceEntry::Max { buffer, min } => Line::from(vec![
            Span::styled(
                format!(" Min {min} · Max price: "),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                buffer.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    };
    let price_width = price_line.width() as u16;
    let price_block = Paragraph::new(price_line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(price_block, chunks[1]);

    // Cursor at the end of the buffer while entering a bound
    if app.price_entry != PriceEntry::Inactive {
        frame.set_cursor_position((chunks[1].x + price_width, chunks[1].y + 1));
    }
}
