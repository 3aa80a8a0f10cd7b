use crate::catalog::ListingId;
use crate::query::{PriceRange, Query, SortKey};

/// The interactive session's explicit state: the query in effect and the
/// listing shown in the detail overlay, if any.
///
/// Every user action maps to exactly one transition method here; each is
/// a deterministic function of current state and input with no I/O.
/// Query and selection are independent, mutating one never touches the
/// other.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub query: Query,
    pub selection: Option<ListingId>,
}

impl Session {
    /// Fresh session: empty search, no category restriction, default
    /// price range, sorted by the given key.
    pub fn new(sort: SortKey) -> Self {
        Self {
            query: Query {
                sort,
                ..Query::default()
            },
            selection: None,
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.query.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.query.search.clear();
    }

    /// Insert the category into the filter set, or remove it if already
    /// present.
    pub fn toggle_category(&mut self, name: &str) {
        if !self.query.categories.remove(name) {
            self.query.categories.insert(name.to_string());
        }
    }

    pub fn clear_categories(&mut self) {
        self.query.categories.clear();
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.query.price = range;
    }

    pub fn reset_price_range(&mut self) {
        self.query.price = PriceRange::default();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.query.sort = sort;
    }

    pub fn select(&mut self, id: ListingId) {
        self.selection = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}
