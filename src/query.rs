use crate::catalog::Listing;
use std::collections::HashSet;
use std::str::FromStr;

/// Inclusive price bounds. `min > max` is allowed and simply matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1000.0,
        }
    }
}

/// Ordering applied to the filtered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// No reordering, filtered listings stay in catalog order.
    #[default]
    CatalogOrder,
    /// Descending by id.
    Newest,
    /// Ascending by price.
    Cheapest,
    /// Descending by price.
    MostExpensive,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        Self::Newest,
        Self::Cheapest,
        Self::MostExpensive,
        Self::CatalogOrder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::CatalogOrder => "Catalog order",
            Self::Newest => "Newest",
            Self::Cheapest => "Price: low to high",
            Self::MostExpensive => "Price: high to low",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Lenient parse: unrecognized spellings mean "no reordering".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "newest" => Self::Newest,
            "cheapest" => Self::Cheapest,
            "most-expensive" => Self::MostExpensive,
            _ => Self::CatalogOrder,
        })
    }
}

/// The combined search/filter/sort criteria currently in effect.
///
/// Rebuilt by the session on every user interaction and handed to
/// [`evaluate`] whole; the engine never sees partial updates.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Case-insensitive substring match against the listing title.
    /// Empty means no restriction.
    pub search: String,
    /// Exact category names to keep. Empty means no restriction,
    /// not "match nothing".
    pub categories: HashSet<String>,
    pub price: PriceRange,
    pub sort: SortKey,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            search: String::new(),
            categories: HashSet::new(),
            price: PriceRange::default(),
            sort: SortKey::default(),
        }
    }
}

/// Apply `query` to `catalog`, returning the ordered positions of the
/// matching listings.
///
/// Two phases: filter (all predicates must hold), then a stable sort by
/// the query's sort key. Total over its inputs; degenerate queries
/// (inverted price range, search matching nothing, empty catalog) yield
/// an empty result rather than an error.
pub fn evaluate_positions(catalog: &[Listing], query: &Query) -> Vec<usize> {
    let needle = query.search.to_lowercase();

    let mut positions: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, listing)| {
            (needle.is_empty() || listing.title.to_lowercase().contains(&needle))
                && (query.categories.is_empty() || query.categories.contains(&listing.category))
                && query.price.contains(listing.price)
        })
        .map(|(pos, _)| pos)
        .collect();

    // sort_by is stable, price ties keep their filter-phase order
    match query.sort {
        SortKey::CatalogOrder => {}
        SortKey::Newest => positions.sort_by(|&a, &b| catalog[b].id.cmp(&catalog[a].id)),
        SortKey::Cheapest => {
            positions.sort_by(|&a, &b| catalog[a].price.total_cmp(&catalog[b].price))
        }
        SortKey::MostExpensive => {
            positions.sort_by(|&a, &b| catalog[b].price.total_cmp(&catalog[a].price))
        }
    }

    positions
}

/// Apply `query` to `catalog`, returning references to the matching
/// listings in result order. Same view as [`evaluate_positions`], in the
/// form callers outside the TUI want.
pub fn evaluate<'a>(catalog: &'a [Listing], query: &Query) -> Vec<&'a Listing> {
    evaluate_positions(catalog, query)
        .into_iter()
        .map(|pos| &catalog[pos])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use proptest::prelude::*;

    fn titles(results: &[&Listing]) -> Vec<String> {
        results.iter().map(|l| l.title.clone()).collect()
    }

    #[test]
    fn test_default_query_returns_whole_catalog_in_order() {
        let catalog = Catalog::seed();
        let results = evaluate(catalog.listings(), &Query::default());
        assert_eq!(results.len(), catalog.len());
        let ids: Vec<u64> = results.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_newest_sorts_descending_by_id() {
        let catalog = Catalog::seed();
        let query = Query {
            sort: SortKey::Newest,
            ..Query::default()
        };
        let ids: Vec<u64> = evaluate(catalog.listings(), &query)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring_on_title() {
        let catalog = Catalog::seed();
        let query = Query {
            search: "the".to_string(),
            ..Query::default()
        };
        let results = evaluate(catalog.listings(), &query);
        assert_eq!(
            titles(&results),
            vec!["The Scream", "The Kiss", "The Persistence of Memory", "The Birth of Venus"]
        );
    }

    #[test]
    fn test_category_filter_keeps_exact_matches_in_catalog_order() {
        let catalog = Catalog::seed();
        let query = Query {
            categories: ["Surrealism".to_string(), "Renaissance".to_string()]
                .into_iter()
                .collect(),
            ..Query::default()
        };
        let results = evaluate(catalog.listings(), &query);
        assert_eq!(
            titles(&results),
            vec!["The Persistence of Memory", "The Birth of Venus"]
        );
    }

    #[test]
    fn test_empty_category_set_means_no_restriction() {
        let catalog = Catalog::seed();
        let query = Query {
            categories: HashSet::new(),
            ..Query::default()
        };
        assert_eq!(evaluate(catalog.listings(), &query).len(), 6);
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let catalog = Catalog::seed();
        let query = Query {
            price: PriceRange::new(0.6, 0.6),
            ..Query::default()
        };
        let results = evaluate(catalog.listings(), &query);
        assert_eq!(titles(&results), vec!["The Kiss"]);
    }

    #[test]
    fn test_inverted_price_range_yields_empty_result() {
        let catalog = Catalog::seed();
        let query = Query {
            price: PriceRange::new(1.0, 0.0),
            ..Query::default()
        };
        assert!(evaluate(catalog.listings(), &query).is_empty());
    }

    #[test]
    fn test_composed_query_cheapest_over_full_range() {
        let catalog = Catalog::seed();
        let query = Query {
            price: PriceRange::new(0.0, 1.0),
            sort: SortKey::Cheapest,
            ..Query::default()
        };
        let prices: Vec<f64> = evaluate(catalog.listings(), &query)
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(prices, vec![0.4, 0.5, 0.6, 0.75, 0.8, 0.9]);
    }

    #[test]
    fn test_most_expensive_sorts_descending_by_price() {
        let catalog = Catalog::seed();
        let query = Query {
            sort: SortKey::MostExpensive,
            ..Query::default()
        };
        let prices: Vec<f64> = evaluate(catalog.listings(), &query)
            .iter()
            .map(|l| l.price)
            .collect();
        assert_eq!(prices, vec![0.9, 0.8, 0.75, 0.6, 0.5, 0.4]);
    }

    #[test]
    fn test_price_ties_keep_catalog_order() {
        let mut listings = Catalog::seed().listings().to_vec();
        for listing in &mut listings {
            listing.price = 0.5;
        }
        let query = Query {
            sort: SortKey::Cheapest,
            ..Query::default()
        };
        let ids: Vec<u64> = evaluate(&listings, &query).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let query = Query {
            sort: SortKey::MostExpensive,
            ..Query::default()
        };
        let ids: Vec<u64> = evaluate(&listings, &query).iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        assert!(evaluate(&[], &Query::default()).is_empty());
    }

    #[test]
    fn test_repeated_calls_agree() {
        let catalog = Catalog::seed();
        let query = Query {
            search: "the".to_string(),
            sort: SortKey::Cheapest,
            ..Query::default()
        };
        assert_eq!(
            evaluate_positions(catalog.listings(), &query),
            evaluate_positions(catalog.listings(), &query)
        );
    }

    #[test]
    fn test_sort_key_parses_leniently() {
        assert_eq!("newest".parse::<SortKey>().unwrap(), SortKey::Newest);
        assert_eq!("cheapest".parse::<SortKey>().unwrap(), SortKey::Cheapest);
        assert_eq!(
            "most-expensive".parse::<SortKey>().unwrap(),
            SortKey::MostExpensive
        );
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::CatalogOrder);
        assert_eq!("popular".parse::<SortKey>().unwrap(), SortKey::CatalogOrder);
    }

    const TITLES: [&str; 5] = [
        "Starry Night",
        "The Scream",
        "Water Lilies",
        "The Kiss",
        "Composition VIII",
    ];
    const CATEGORIES: [&str; 3] = ["Impressionism", "Expressionism", "Abstract"];
    // few distinct prices so ties actually occur
    const PRICES: [f64; 3] = [0.25, 0.5, 0.75];

    fn arb_catalog() -> impl Strategy<Value = Vec<Listing>> {
        prop::collection::vec((0usize..5, 0usize..3, 0usize..3), 0..12).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (t, c, p))| Listing {
                    id: i as u64 + 1,
                    title: TITLES[t].to_string(),
                    artist: "Anon".to_string(),
                    price: PRICES[p],
                    category: CATEGORIES[c].to_string(),
                    description: String::new(),
                    image: String::new(),
                })
                .collect()
        })
    }

    fn arb_query() -> impl Strategy<Value = Query> {
        (
            prop::sample::select(vec!["", "the", "night", "zzz"]),
            prop::collection::hash_set(prop::sample::select(CATEGORIES.to_vec()), 0..3),
            (0.0f64..1.0, 0.0f64..1.0),
            prop::sample::select(SortKey::ALL.to_vec()),
        )
            .prop_map(|(search, categories, (min, max), sort)| Query {
                search: search.to_string(),
                categories: categories.into_iter().map(|c| c.to_string()).collect(),
                price: PriceRange::new(min, max),
                sort,
            })
    }

    fn matches(listing: &Listing, query: &Query) -> bool {
        let needle = query.search.to_lowercase();
        (needle.is_empty() || listing.title.to_lowercase().contains(&needle))
            && (query.categories.is_empty() || query.categories.contains(&listing.category))
            && query.price.contains(listing.price)
    }

    proptest! {
        #[test]
        fn prop_output_is_the_qualifying_subset(catalog in arb_catalog(), query in arb_query()) {
            let positions = evaluate_positions(&catalog, &query);

            // soundness: every retained listing satisfies every predicate
            for &pos in &positions {
                prop_assert!(matches(&catalog[pos], &query));
            }

            // completeness: positions are a permutation of the qualifying set
            let mut sorted = positions.clone();
            sorted.sort_unstable();
            let expected: Vec<usize> = (0..catalog.len())
                .filter(|&pos| matches(&catalog[pos], &query))
                .collect();
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn prop_result_is_ordered_by_sort_key(catalog in arb_catalog(), query in arb_query()) {
            let positions = evaluate_positions(&catalog, &query);
            for pair in positions.windows(2) {
                let (a, b) = (&catalog[pair[0]], &catalog[pair[1]]);
                match query.sort {
                    SortKey::CatalogOrder => prop_assert!(pair[0] < pair[1]),
                    SortKey::Newest => prop_assert!(a.id > b.id),
                    SortKey::Cheapest => prop_assert!(a.price <= b.price),
                    SortKey::MostExpensive => prop_assert!(a.price >= b.price),
                }
            }
        }

        #[test]
        fn prop_equal_sort_keys_preserve_catalog_order(catalog in arb_catalog(), query in arb_query()) {
            let positions = evaluate_positions(&catalog, &query);
            for pair in positions.windows(2) {
                let tied = match query.sort {
                    SortKey::Newest => catalog[pair[0]].id == catalog[pair[1]].id,
                    SortKey::Cheapest | SortKey::MostExpensive => {
                        catalog[pair[0]].price == catalog[pair[1]].price
                    }
                    SortKey::CatalogOrder => true,
                };
                if tied {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }

        #[test]
        fn prop_evaluate_agrees_with_positions(catalog in arb_catalog(), query in arb_query()) {
            let refs = evaluate(&catalog, &query);
            let positions = evaluate_positions(&catalog, &query);
            prop_assert_eq!(refs.len(), positions.len());
            for (listing, &pos) in refs.iter().zip(&positions) {
                prop_assert!(std::ptr::eq(*listing, &catalog[pos]));
            }
        }

        #[test]
        fn prop_evaluate_is_idempotent(catalog in arb_catalog(), query in arb_query()) {
            prop_assert_eq!(
                evaluate_positions(&catalog, &query),
                evaluate_positions(&catalog, &query)
            );
        }
    }
}
