//! # Catalog Module
//!
//! Predicate-based filtering and comparator-based sorting over the static
//! book catalog. All predicates compose with logical AND; an empty result
//! is valid and renders as an empty state.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Book, BookFormat};

// =============================================================================
// Filtering
// =============================================================================

/// A composable set of catalog predicates. Every populated predicate must
/// pass for a book to be included.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BookFilter {
    /// Category must equal this value; `None` means "all categories".
    pub category: Option<String>,

    /// Case-insensitive substring matched against title, author, genre,
    /// or any tag. Empty bypasses the predicate.
    pub query: String,

    /// Inclusive lower price bound; `None` is unbounded.
    pub price_min: Option<Money>,

    /// Inclusive upper price bound; `None` is unbounded.
    pub price_max: Option<Money>,

    /// Genre membership; empty bypasses the predicate.
    pub genres: Vec<String>,

    /// Format membership; empty bypasses the predicate.
    pub formats: Vec<BookFormat>,
}

impl BookFilter {
    /// Checks whether a book passes every populated predicate.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(category) = &self.category {
            if &book.category != category {
                return false;
            }
        }

        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let hit = book.title.to_lowercase().contains(&query)
                || book.author.to_lowercase().contains(&query)
                || book.genre.to_lowercase().contains(&query)
                || book.tags.iter().any(|t| t.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if let Some(min) = self.price_min {
            if book.price() < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if book.price() > max {
                return false;
            }
        }

        if !self.genres.is_empty() && !self.genres.contains(&book.genre) {
            return false;
        }

        if !self.formats.is_empty() && !self.formats.contains(&book.format) {
            return false;
        }

        true
    }
}

/// Filters the catalog, preserving catalog order.
pub fn filter_books(books: &[Book], filter: &BookFilter) -> Vec<Book> {
    books
        .iter()
        .filter(|b| filter.matches(b))
        .cloned()
        .collect()
}

// =============================================================================
// Sorting
// =============================================================================

/// Catalog sort keys. `Featured` leaves catalog order unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortKey {
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Reviews,
    Newest,
    TitleAz,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Featured
    }
}

/// Sorts books in place. All sorts are stable, so ties keep catalog order.
pub fn sort_books(books: &mut [Book], key: SortKey) {
    match key {
        SortKey::Featured => {}
        SortKey::PriceLow => books.sort_by_key(|b| b.price_cents),
        SortKey::PriceHigh => books.sort_by_key(|b| std::cmp::Reverse(b.price_cents)),
        SortKey::Rating => books.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Reviews => books.sort_by_key(|b| std::cmp::Reverse(b.reviews)),
        SortKey::Newest => books.sort_by_key(|b| std::cmp::Reverse(b.published_year)),
        SortKey::TitleAz => books.sort_by(|a, b| a.title.cmp(&b.title)),
    }
}

/// Convenience: filter then sort in one call, the way the grid view
/// recomputes its listing on every render.
pub fn browse(books: &[Book], filter: &BookFilter, key: SortKey) -> Vec<Book> {
    let mut result = filter_books(books, filter);
    sort_books(&mut result, key);
    result
}

// =============================================================================
// Unit Tests
// =============================================================================
