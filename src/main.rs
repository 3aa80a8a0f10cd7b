mod app;
mod catalog;
mod query;
mod session;
mod ui;

use app::{App, InputMode, Menu, PriceEntry};
use catalog::Catalog;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use query::SortKey;
use std::path::PathBuf;

/// Terminal storefront for browsing a digital art catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to a JSON catalog file (defaults to the built-in collection)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Initial sort order: newest, cheapest, most-expensive
    #[arg(short, long, default_value = "newest")]
    sort: SortKey,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load before the terminal enters raw mode so errors reach stderr
    let catalog = match cli.catalog {
        Some(path) => match Catalog::load(&path) {
            Ok(catalog) => catalog,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Catalog::seed(),
    };

    let mut app = App::new(catalog, cli.sort);

    let mut terminal = ratatui::init();

    let size = terminal.size()?;
    app.update_grid_size(size.width, size.height);

    let result = run_app(&mut terminal, &mut app);

    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 250ms timeout
        if event::poll(std::time::Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    handle_key(app, key);
                }
                Event::Resize(width, height) => {
                    app.update_grid_size(width, height);
                }
                _ => {}
            }
        }
    }
}

/// Dispatch a key to the surface that currently owns input: help, then
/// price entry, then the open menu, then the detail overlay, then the
/// search bar, then the browse grid.
fn handle_key(app: &mut App, key: KeyEvent) {
    // If help is showing, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.price_entry != PriceEntry::Inactive {
        handle_price_entry_key(app, key);
        return;
    }

    match app.menu {
        Menu::Filter => return handle_filter_menu_key(app, key),
        Menu::Sort => return handle_sort_menu_key(app, key),
        Menu::None => {}
    }

    if app.session.selection.is_some() {
        handle_detail_key(app, key);
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    handle_browse_key(app, key);
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('f') => {
            app.open_filter_menu();
        }
        KeyCode::Char('s') => {
            app.open_sort_menu();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.grid_left();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.grid_right();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.grid_up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.grid_down();
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.grid_home();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.grid_end();
        }
        KeyCode::PageDown => {
            app.grid_page_down();
        }
        KeyCode::PageUp => {
            app.grid_page_up();
        }
        KeyCode::Enter => {
            app.open_detail();
        }
        KeyCode::Esc => {
            if !app.session.query.search.is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.search_backspace();
        }
        KeyCode::Char(c) => {
            app.search_input(c);
        }
        _ => {}
    }
}

fn handle_filter_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f') => {
            app.close_menu();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.filter_menu_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.filter_menu_prev();
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_category_under_cursor();
        }
        KeyCode::Char('c') => {
            app.clear_categories();
        }
        KeyCode::Char('p') => {
            app.begin_price_entry();
        }
        KeyCode::Char('r') => {
            app.reset_price_range();
        }
        _ => {}
    }
}

fn handle_price_entry_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            app.price_entry_enter();
        }
        KeyCode::Esc => {
            app.price_entry_cancel();
        }
        KeyCode::Backspace => {
            app.price_entry_backspace();
        }
        KeyCode::Char(c) => {
            app.price_entry_input(c);
        }
        _ => {}
    }
}

fn handle_sort_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('s') => {
            app.close_menu();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.sort_menu_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.sort_menu_prev();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.apply_sort_under_cursor();
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
            app.close_detail();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_down();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_up();
        }
        KeyCode::PageDown => {
            app.scroll_page_down();
        }
        KeyCode::PageUp => {
            app.scroll_page_up();
        }
        KeyCode::Char('b') => {
            // The buy affordance is a visible no-op: no wallet, no backend
            app.status_msg = "Purchase unavailable: wallet support is not part of this build"
                .to_string();
        }
        _ => {}
    }
}
