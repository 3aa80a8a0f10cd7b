use crate::app::{App, CARD_HEIGHT, InputMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let header_text = format!(
        " Artverse   [{} of {} listings]",
        app.results.len(),
        app.catalog.len()
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let search_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let search_label = if app.input_mode == InputMode::Editing {
        " 🔍 Search titles (Enter to apply, Esc to cancel): "
    } else {
        " 🔍 Search titles (/): "
    };
    let search_text = format!("{}{}", search_label, app.session.query.search);
    let search_bar = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(" Search "),
    );
    frame.render_widget(search_bar, chunks[1]);

    // Set cursor position when editing
    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x
            + search_label.width() as u16
            + app.session.query.search.width() as u16;
        let cursor_y = chunks[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    // ── Card grid ──
    render_grid(app, frame, chunks[2]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ←↑↓→",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Navigate  "),
        Span::styled(
            "/",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Search  "),
        Span::styled(
            "f",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Filters  "),
        Span::styled(
            "s",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Sort  "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Detail  "),
        Span::styled(
            "?",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(
            "q",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

fn render_grid(app: &App, frame: &mut Frame, area: Rect) {
    if app.results.is_empty() {
        let empty = Paragraph::new("\n  No listings match the current filters.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let columns = app.grid_columns;
    let rows_visible = app.grid_rows_visible;

    let row_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); rows_visible])
        .split(area);

    for (row_slot, row_area) in row_chunks.iter().enumerate() {
        let row = app.scroll_row + row_slot;
        let col_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (col, col_area) in col_chunks.iter().enumerate() {
            let index = row * columns + col;
            let Some(&pos) = app.results.get(index) else {
                continue;
            };
            let listing = &app.catalog.listings()[pos];
            render_card(frame, *col_area, listing, index == app.grid_cursor);
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    listing: &crate::catalog::Listing,
    selected: bool,
) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let inner_width = (area.width as usize).saturating_sub(4);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", truncate_str(&listing.artist, inner_width)),
            Style::default().fg(Color::White),
        )),
        Line::from(vec![
            Span::styled(
                format!(" ◎ {:.2} SOL", listing.price),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            format!(" {}", truncate_str(&listing.category, inner_width)),
            Style::default().fg(Color::Magenta),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(
                " {} ",
                truncate_str(&listing.title, inner_width)
            )),
    );
    frame.render_widget(card, area);
}

/// Truncate a string to `max_width` display columns, adding "…" if
/// truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        result.push(c);
        used += w;
    }
    result.push('…');
    result
}
