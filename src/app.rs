use crate::catalog::{Catalog, Listing};
use crate::query::{PriceRange, SortKey, evaluate_positions};
use crate::session::Session;

/// Input mode for the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which menu overlay is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    None,
    Filter,
    Sort,
}

/// Min-then-max price range entry inside the filter menu.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceEntry {
    Inactive,
    Min { buffer: String },
    Max { buffer: String, min: f64 },
}

/// Minimum card width; the grid fits as many columns as the terminal
/// allows.
pub const CARD_WIDTH: u16 = 28;
pub const CARD_HEIGHT: u16 = 5;
/// Rows above and below the grid: header(3) + search(3) + status(1).
pub const GRID_OVERHEAD: u16 = 7;

/// Main application state.
pub struct App {
    pub catalog: Catalog,
    pub session: Session,
    pub should_quit: bool,
    pub show_help: bool,

    /// Ordered positions into the catalog, recomputed from scratch on
    /// every query change.
    pub results: Vec<usize>,

    // Grid presentation state
    pub grid_cursor: usize,
    pub grid_columns: usize,
    pub grid_rows_visible: usize,
    pub scroll_row: usize,

    pub input_mode: InputMode,
    pub menu: Menu,
    pub filter_cursor: usize,
    pub sort_cursor: usize,
    pub price_entry: PriceEntry,

    pub detail_scroll: u16,

    pub status_msg: String,
}

impl App {
    pub fn new(catalog: Catalog, sort: SortKey) -> Self {
        let mut app = Self {
            catalog,
            session: Session::new(sort),
            should_quit: false,
            show_help: false,

            results: Vec::new(),

            grid_cursor: 0,
            grid_columns: 3, // updated on first render/resize
            grid_rows_visible: 4,
            scroll_row: 0,

            input_mode: InputMode::Normal,
            menu: Menu::None,
            filter_cursor: 0,
            sort_cursor: 0,
            price_entry: PriceEntry::Inactive,

            detail_scroll: 0,

            status_msg: String::new(),
        };
        app.refresh();
        app
    }

    /// Recompute the result view from the current query, then clamp the
    /// cursor back into range.
    pub fn refresh(&mut self) {
        self.results = evaluate_positions(self.catalog.listings(), &self.session.query);
        if self.results.is_empty() {
            self.grid_cursor = 0;
            self.scroll_row = 0;
        } else if self.grid_cursor >= self.results.len() {
            self.grid_cursor = self.results.len() - 1;
        }
        self.scroll_into_view();
        self.status_msg = format!("{} of {} listings", self.results.len(), self.catalog.len());
    }

    /// Update grid geometry from the terminal size.
    pub fn update_grid_size(&mut self, width: u16, height: u16) {
        self.grid_columns = ((width / CARD_WIDTH) as usize).max(1);
        self.grid_rows_visible =
            ((height.saturating_sub(GRID_OVERHEAD) / CARD_HEIGHT) as usize).max(1);
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        let row = self.grid_cursor / self.grid_columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.grid_rows_visible {
            self.scroll_row = row + 1 - self.grid_rows_visible;
        }
        // keep the window anchored when the result set shrinks
        let total_rows = self.results.len().div_ceil(self.grid_columns);
        let max_scroll = total_rows.saturating_sub(self.grid_rows_visible);
        if self.scroll_row > max_scroll {
            self.scroll_row = max_scroll;
        }
    }

    pub fn grid_left(&mut self) {
        self.grid_cursor = self.grid_cursor.saturating_sub(1);
        self.scroll_into_view();
    }

    pub fn grid_right(&mut self) {
        if self.grid_cursor + 1 < self.results.len() {
            self.grid_cursor += 1;
            self.scroll_into_view();
        }
    }

    pub fn grid_up(&mut self) {
        if self.grid_cursor >= self.grid_columns {
            self.grid_cursor -= self.grid_columns;
            self.scroll_into_view();
        }
    }

    pub fn grid_down(&mut self) {
        if self.grid_cursor + self.grid_columns < self.results.len() {
            self.grid_cursor += self.grid_columns;
            self.scroll_into_view();
        }
    }

    pub fn grid_home(&mut self) {
        self.grid_cursor = 0;
        self.scroll_into_view();
    }

    pub fn grid_end(&mut self) {
        self.grid_cursor = self.results.len().saturating_sub(1);
        self.scroll_into_view();
    }

    pub fn grid_page_down(&mut self) {
        let step = self.grid_rows_visible * self.grid_columns;
        self.grid_cursor = (self.grid_cursor + step).min(self.results.len().saturating_sub(1));
        self.scroll_into_view();
    }

    pub fn grid_page_up(&mut self) {
        let step = self.grid_rows_visible * self.grid_columns;
        self.grid_cursor = self.grid_cursor.saturating_sub(step);
        self.scroll_into_view();
    }

    /// The listing under the grid cursor.
    pub fn listing_under_cursor(&self) -> Option<&Listing> {
        self.results
            .get(self.grid_cursor)
            .map(|&pos| &self.catalog.listings()[pos])
    }

    /// The listing shown in the detail overlay.
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.session.selection.and_then(|id| self.catalog.get(id))
    }

    /// Open the detail overlay for the listing under the cursor.
    pub fn open_detail(&mut self) {
        if let Some(listing) = self.listing_under_cursor() {
            let id = listing.id;
            self.session.select(id);
            self.detail_scroll = 0;
        }
    }

    pub fn close_detail(&mut self) {
        self.session.clear_selection();
        self.detail_scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn scroll_page_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(10);
    }

    pub fn scroll_page_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(10);
    }

    // ── Filter menu ──

    pub fn open_filter_menu(&mut self) {
        self.menu = Menu::Filter;
        self.filter_cursor = 0;
    }

    pub fn filter_menu_next(&mut self) {
        if self.filter_cursor + 1 < self.catalog.categories().len() {
            self.filter_cursor += 1;
        }
    }

    pub fn filter_menu_prev(&mut self) {
        self.filter_cursor = self.filter_cursor.saturating_sub(1);
    }

    pub fn toggle_category_under_cursor(&mut self) {
        if let Some(category) = self.catalog.categories().get(self.filter_cursor) {
            let category = category.clone();
            self.session.toggle_category(&category);
            self.refresh();
        }
    }

    pub fn clear_categories(&mut self) {
        self.session.clear_categories();
        self.refresh();
    }

    pub fn reset_price_range(&mut self) {
        self.session.reset_price_range();
        self.refresh();
        self.status_msg = "Price range reset".to_string();
    }

    // ── Price entry ──

    pub fn begin_price_entry(&mut self) {
        self.price_entry = PriceEntry::Min {
            buffer: String::new(),
        };
    }

    pub fn price_entry_input(&mut self, c: char) {
        match &mut self.price_entry {
            PriceEntry::Min { buffer } | PriceEntry::Max { buffer, .. } => buffer.push(c),
            PriceEntry::Inactive => {}
        }
    }

    pub fn price_entry_backspace(&mut self) {
        match &mut self.price_entry {
            PriceEntry::Min { buffer } | PriceEntry::Max { buffer, .. } => {
                buffer.pop();
            }
            PriceEntry::Inactive => {}
        }
    }

    /// Advance min → max, then commit the range to the query. An empty
    /// or non-numeric buffer keeps that bound's current value.
    pub fn price_entry_enter(&mut self) {
        match std::mem::replace(&mut self.price_entry, PriceEntry::Inactive) {
            PriceEntry::Inactive => {}
            PriceEntry::Min { buffer } => {
                let min = buffer.parse::<f64>().unwrap_or(self.session.query.price.min);
                self.price_entry = PriceEntry::Max {
                    buffer: String::new(),
                    min,
                };
            }
            PriceEntry::Max { buffer, min } => {
                let max = buffer.parse::<f64>().unwrap_or(self.session.query.price.max);
                self.session.set_price_range(PriceRange::new(min, max));
                self.refresh();
                self.status_msg = format!("Price range [{min}, {max}]");
            }
        }
    }

    /// Abandon price entry without touching the query.
    pub fn price_entry_cancel(&mut self) {
        self.price_entry = PriceEntry::Inactive;
    }

    // ── Sort menu ──

    pub fn open_sort_menu(&mut self) {
        self.menu = Menu::Sort;
        self.sort_cursor = SortKey::ALL
            .iter()
            .position(|&k| k == self.session.query.sort)
            .unwrap_or(0);
    }

    pub fn sort_menu_next(&mut self) {
        if self.sort_cursor + 1 < SortKey::ALL.len() {
            self.sort_cursor += 1;
        }
    }

    pub fn sort_menu_prev(&mut self) {
        self.sort_cursor = self.sort_cursor.saturating_sub(1);
    }

    pub fn apply_sort_under_cursor(&mut self) {
        let key = SortKey::ALL[self.sort_cursor];
        self.session.set_sort(key);
        self.menu = Menu::None;
        self.refresh();
        self.status_msg = format!("Sorted by {}", key.label().to_lowercase());
    }

    pub fn close_menu(&mut self) {
        self.menu = Menu::None;
        self.price_entry = PriceEntry::Inactive;
    }

    // ── Search ──

    pub fn search_input(&mut self, c: char) {
        self.session.push_search_char(c);
        self.refresh();
    }

    pub fn search_backspace(&mut self) {
        self.session.pop_search_char();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.session.clear_search();
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new(Catalog::seed(), SortKey::Newest);
        app.update_grid_size(90, 27); // 3 columns, 4 visible rows
        app
    }

    #[test]
    fn test_grid_geometry_from_terminal_size() {
        let mut app = app();
        assert_eq!(app.grid_columns, 3);
        assert_eq!(app.grid_rows_visible, 4);

        app.update_grid_size(40, 12);
        assert_eq!(app.grid_columns, 1);
        assert_eq!(app.grid_rows_visible, 1);

        // never degenerates to zero
        app.update_grid_size(10, 5);
        assert_eq!(app.grid_columns, 1);
        assert_eq!(app.grid_rows_visible, 1);
    }

    #[test]
    fn test_initial_results_follow_initial_sort() {
        let app = app();
        let ids: Vec<u64> = app
            .results
            .iter()
            .map(|&pos| app.catalog.listings()[pos].id)
            .collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_cursor_clamps_when_the_query_narrows() {
        let mut app = app();
        app.grid_end();
        assert_eq!(app.grid_cursor, 5);

        // "kiss" matches a single listing
        for c in "kiss".chars() {
            app.search_input(c);
        }
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.grid_cursor, 0);
        assert_eq!(app.listing_under_cursor().unwrap().title, "The Kiss");
    }

    #[test]
    fn test_cursor_resets_on_empty_result() {
        let mut app = app();
        app.grid_end();
        for c in "zzz".chars() {
            app.search_input(c);
        }
        assert!(app.results.is_empty());
        assert_eq!(app.grid_cursor, 0);
        assert!(app.listing_under_cursor().is_none());
    }

    #[test]
    fn test_grid_navigation_stays_in_range() {
        let mut app = app();
        app.update_grid_size(60, 27); // 2 columns

        app.grid_left();
        assert_eq!(app.grid_cursor, 0);
        app.grid_up();
        assert_eq!(app.grid_cursor, 0);

        app.grid_right();
        app.grid_down();
        assert_eq!(app.grid_cursor, 3);
        app.grid_down();
        assert_eq!(app.grid_cursor, 5);
        app.grid_down();
        assert_eq!(app.grid_cursor, 5);
        app.grid_right();
        assert_eq!(app.grid_cursor, 5);

        app.grid_home();
        assert_eq!(app.grid_cursor, 0);
    }

    #[test]
    fn test_scroll_keeps_cursor_row_visible() {
        let mut app = app();
        app.update_grid_size(CARD_WIDTH, GRID_OVERHEAD + 2 * CARD_HEIGHT); // 1 column, 2 rows
        assert_eq!(app.scroll_row, 0);

        app.grid_end();
        // cursor on row 5 of 6, window shows rows 4..6
        assert_eq!(app.scroll_row, 4);

        app.grid_home();
        assert_eq!(app.scroll_row, 0);
    }

    #[test]
    fn test_open_detail_selects_the_cursor_listing() {
        let mut app = app();
        app.grid_right();
        app.open_detail();
        assert_eq!(app.selected_listing().unwrap().id, 5);

        app.close_detail();
        assert!(app.session.selection.is_none());
    }

    #[test]
    fn test_toggle_category_under_cursor_refreshes_results() {
        let mut app = app();
        app.open_filter_menu();
        // categories are in first-appearance order; row 3 is Surrealism
        app.filter_menu_next();
        app.filter_menu_prev();
        for _ in 0..3 {
            app.filter_menu_next();
        }
        app.toggle_category_under_cursor();
        assert_eq!(app.results.len(), 1);
        assert_eq!(
            app.listing_under_cursor().unwrap().title,
            "The Persistence of Memory"
        );

        app.toggle_category_under_cursor();
        assert_eq!(app.results.len(), 6);
    }

    #[test]
    fn test_price_entry_commits_min_then_max() {
        let mut app = app();
        app.begin_price_entry();
        for c in "0.5".chars() {
            app.price_entry_input(c);
        }
        app.price_entry_enter();
        for c in "0.8".chars() {
            app.price_entry_input(c);
        }
        app.price_entry_enter();

        assert_eq!(app.price_entry, PriceEntry::Inactive);
        assert_eq!(app.session.query.price, PriceRange::new(0.5, 0.8));
        assert_eq!(app.results.len(), 4);
    }

    #[test]
    fn test_price_entry_empty_buffer_keeps_current_bounds() {
        let mut app = app();
        app.session.set_price_range(PriceRange::new(0.1, 0.9));
        app.begin_price_entry();
        app.price_entry_enter();
        app.price_entry_enter();
        assert_eq!(app.session.query.price, PriceRange::new(0.1, 0.9));
    }

    #[test]
    fn test_price_entry_non_numeric_keeps_current_bounds() {
        let mut app = app();
        app.begin_price_entry();
        for c in "abc".chars() {
            app.price_entry_input(c);
        }
        app.price_entry_enter();
        app.price_entry_enter();
        assert_eq!(app.session.query.price, PriceRange::default());
    }

    #[test]
    fn test_price_entry_cancel_leaves_the_query_untouched() {
        let mut app = app();
        let query = app.session.query.clone();
        app.begin_price_entry();
        for c in "12".chars() {
            app.price_entry_input(c);
        }
        app.price_entry_cancel();
        assert_eq!(app.price_entry, PriceEntry::Inactive);
        assert_eq!(app.session.query, query);
    }

    #[test]
    fn test_sort_menu_opens_on_the_active_key() {
        let mut app = app();
        app.open_sort_menu();
        assert_eq!(app.sort_cursor, 0); // Newest is first in ALL

        app.sort_menu_next();
        app.apply_sort_under_cursor();
        assert_eq!(app.session.query.sort, SortKey::Cheapest);
        assert_eq!(app.menu, Menu::None);
        let prices: Vec<f64> = app
            .results
            .iter()
            .map(|&pos| app.catalog.listings()[pos].price)
            .collect();
        assert_eq!(prices, vec![0.4, 0.5, 0.6, 0.75, 0.8, 0.9]);
    }

    #[test]
    fn test_clear_search_restores_the_full_view() {
        let mut app = app();
        for c in "venus".chars() {
            app.search_input(c);
        }
        assert_eq!(app.results.len(), 1);
        app.clear_search();
        assert_eq!(app.results.len(), 6);
    }
}
