use crate::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(app: &App, frame: &mut Frame) {
    let listing = match app.selected_listing() {
        Some(l) => l,
        None => return,
    };

    let area = super::centered_rect(70, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Listing Detail ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Layout: metadata(5) + description(min) + hints(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    // ── Metadata header ──
    let meta_lines = vec![
        Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled(
                &listing.title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("   #{}", listing.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::styled(" by ", Style::default().fg(Color::DarkGray)),
            Span::styled(&listing.artist, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled(" Price: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("◎ {:.2} SOL", listing.price),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("   "),
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&listing.category, Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![
            Span::styled(" Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&listing.image, Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(Paragraph::new(meta_lines), chunks[0]);

    // ── Description ──
    let description = Paragraph::new(listing.description.as_str())
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Description ")
                .title_bottom(
                    Line::from(format!(" scroll: {} ", app.detail_scroll))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(description, chunks[1]);

    // ── Hints ──
    let hints = Line::from(vec![
        Span::styled(
            " ↑↓",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Scroll  "),
        Span::styled(
            "b",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Buy  "),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Close"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[2]);
}
