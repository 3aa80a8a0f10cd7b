use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame) {
    let area = super::centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Global",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ?         ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("    q         ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit application"),
        ]),
        Line::from(vec![
            Span::styled("    Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Back / cancel / clear search"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Browse",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ←↑↓→ hjkl ", Style::default().fg(Color::Yellow)),
            Span::raw("Move around the grid"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Open listing detail"),
        ]),
        Line::from(vec![
            Span::styled("    /         ", Style::default().fg(Color::Yellow)),
            Span::raw("Search titles (type to filter)"),
        ]),
        Line::from(vec![
            Span::styled("    f         ", Style::default().fg(Color::Yellow)),
            Span::raw("Category and price filters"),
        ]),
        Line::from(vec![
            Span::styled("    s         ", Style::default().fg(Color::Yellow)),
            Span::raw("Sort order"),
        ]),
        Line::from(vec![
            Span::styled("    g/G       ", Style::default().fg(Color::Yellow)),
            Span::raw("Jump to first/last card"),
        ]),
        Line::from(vec![
            Span::styled("    PgUp/PgDn ", Style::default().fg(Color::Yellow)),
            Span::raw("Scroll by a screenful"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Filter Menu",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    Space     ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle highlighted category"),
        ]),
        Line::from(vec![
            Span::styled("    c         ", Style::default().fg(Color::Yellow)),
            Span::raw("Clear all category selections"),
        ]),
        Line::from(vec![
            Span::styled("    p         ", Style::default().fg(Color::Yellow)),
            Span::raw("Enter price range (min, then max)"),
        ]),
        Line::from(vec![
            Span::styled("    r         ", Style::default().fg(Color::Yellow)),
            Span::raw("Reset price range"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Detail",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ↑/↓       ", Style::default().fg(Color::Yellow)),
            Span::raw("Scroll description"),
        ]),
        Line::from(vec![
            Span::styled("    b         ", Style::default().fg(Color::Yellow)),
            Span::raw("Buy (unavailable in this build)"),
        ]),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(
                    Line::from(" Press any key to close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}
