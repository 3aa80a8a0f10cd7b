use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Identifier of a listing. Higher ids are more recent.
pub type ListingId = u64;

/// One catalog entry: a purchasable digital art item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub title: String,
    pub artist: String,
    pub price: f64,
    pub category: String,
    /// Free text shown in the detail overlay.
    #[serde(default)]
    pub description: String,
    /// Opaque reference to a visual asset; shown verbatim, never processed.
    #[serde(default)]
    pub image: String,
}

/// Error raised while loading or validating a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate listing id {0}")]
    DuplicateId(ListingId),

    #[error("listing {0} has a negative price")]
    NegativePrice(ListingId),
}

/// The full, immutable set of listings available to query.
///
/// Fixed for the process lifetime: nothing mutates the listing sequence
/// after construction, queries only ever read it.
#[derive(Debug)]
pub struct Catalog {
    listings: Vec<Listing>,
    categories: Vec<String>,
}

impl Catalog {
    /// Build a catalog from a listing sequence.
    ///
    /// Rejects duplicate ids and negative prices; everything downstream
    /// (ordering tie-breaks, price bounds) leans on these two invariants.
    pub fn new(listings: Vec<Listing>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for listing in &listings {
            if !seen.insert(listing.id) {
                return Err(CatalogError::DuplicateId(listing.id));
            }
            if listing.price < 0.0 {
                return Err(CatalogError::NegativePrice(listing.id));
            }
        }
        let categories = distinct_categories(&listings);
        Ok(Catalog {
            listings,
            categories,
        })
    }

    /// Load a catalog from a JSON file holding an array of listing objects.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let listings: Vec<Listing> = serde_json::from_str(&raw)?;
        Self::new(listings)
    }

    /// The built-in collection shown when no catalog file is given.
    pub fn seed() -> Self {
        let listings = vec![
            Listing {
                id: 1,
                title: "Starry Night".to_string(),
                artist: "Vincent van Gogh".to_string(),
                price: 0.5,
                category: "Impressionism".to_string(),
                description: "A classic painting depicting the night sky over a small town, \
                              with a swirling, expressive style."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
            Listing {
                id: 2,
                title: "The Scream".to_string(),
                artist: "Edvard Munch".to_string(),
                price: 0.75,
                category: "Expressionism".to_string(),
                description: "A haunting and iconic work, capturing a figure in a state of \
                              anguish against a swirling, colorful background."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
            Listing {
                id: 3,
                title: "The Kiss".to_string(),
                artist: "Gustav Klimt".to_string(),
                price: 0.6,
                category: "Art Nouveau".to_string(),
                description: "A stunning, gold-leafed painting depicting two lovers in an \
                              embrace, surrounded by intricate patterns and designs."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
            Listing {
                id: 4,
                title: "The Persistence of Memory".to_string(),
                artist: "Salvador Dal\u{ed}".to_string(),
                price: 0.8,
                category: "Surrealism".to_string(),
                description: "A surreal and dreamlike painting, featuring melting clocks and \
                              a desolate landscape, exploring the nature of time and \
                              perception."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
            Listing {
                id: 5,
                title: "American Gothic".to_string(),
                artist: "Grant Wood".to_string(),
                price: 0.4,
                category: "Regionalism".to_string(),
                description: "An iconic painting depicting a stern-faced farmer and his wife \
                              standing in front of a white wooden house, capturing the \
                              essence of rural American life."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
            Listing {
                id: 6,
                title: "The Birth of Venus".to_string(),
                artist: "Sandro Botticelli".to_string(),
                price: 0.9,
                category: "Renaissance".to_string(),
                description: "A beautiful and mythological painting, showing the goddess \
                              Venus emerging from the sea on a giant scallop shell, \
                              surrounded by other figures and symbols."
                    .to_string(),
                image: "/placeholder.svg".to_string(),
            },
        ];
        let categories = distinct_categories(&listings);
        // Seed data is known-good, no validation pass needed
        Catalog {
            listings,
            categories,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Distinct listing categories in first-appearance order. Drives the
    /// filter menu rows.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Look up a listing by id.
    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }
}

fn distinct_categories(listings: &[Listing]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for listing in listings {
        if !categories.iter().any(|c| c == &listing.category) {
            categories.push(listing.category.clone());
        }
    }
    categories
}
