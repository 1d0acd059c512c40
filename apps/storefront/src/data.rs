//! Sample catalog data for the driver flow.
//!
//! The catalog is static reference data: loaded once, never mutated. A real
//! deployment would ship a larger feed; these titles are enough to exercise
//! every filter, sort, and pricing path.

use bookhaven_core::types::{Book, BookFormat};

#[allow(clippy::too_many_arguments)]
fn book(
    id: u32,
    title: &str,
    author: &str,
    price_cents: i64,
    original_price_cents: Option<i64>,
    category: &str,
    genre: &str,
    rating: f64,
    reviews: u32,
    published_year: i32,
    format: BookFormat,
    stock_count: u32,
    tags: &[&str],
) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        price_cents,
        original_price_cents,
        category: category.to_string(),
        genre: genre.to_string(),
        rating,
        reviews,
        published_year,
        format,
        in_stock: stock_count > 0,
        stock_count,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The built-in demo catalog.
pub fn sample_catalog() -> Vec<Book> {
    vec![
        book(
            1,
            "The Midnight Bindery",
            "Clara Voss",
            1899,
            Some(2499),
            "fiction",
            "Literary Fiction",
            4.7,
            1843,
            2023,
            BookFormat::Paperback,
            24,
            &["bookshop", "mystery", "bestseller"],
        ),
        book(
            2,
            "Salt and Ember",
            "Jonah Reyes",
            1599,
            None,
            "fiction",
            "Historical Fiction",
            4.4,
            962,
            2021,
            BookFormat::Paperback,
            11,
            &["war", "family saga"],
        ),
        book(
            3,
            "A Field Guide to Falling Stars",
            "Mira Okafor",
            2199,
            None,
            "fiction",
            "Science Fiction",
            4.8,
            2751,
            2024,
            BookFormat::Hardcover,
            7,
            &["space", "first contact", "bestseller"],
        ),
        book(
            4,
            "The Sourdough Ledger",
            "Tom Brandt",
            2799,
            Some(3299),
            "cooking",
            "Baking",
            4.6,
            534,
            2022,
            BookFormat::Hardcover,
            15,
            &["bread", "kitchen"],
        ),
        book(
            5,
            "Quiet Rivers",
            "Anne Calloway",
            1299,
            None,
            "fiction",
            "Romance",
            3.9,
            418,
            2019,
            BookFormat::Paperback,
            31,
            &["small town", "second chances"],
        ),
        book(
            6,
            "Borrowed Time: A Memoir",
            "David Lin",
            2399,
            None,
            "non-fiction",
            "Memoir",
            4.5,
            1207,
            2023,
            BookFormat::Audiobook,
            9,
            &["grief", "hope"],
        ),
        book(
            7,
            "The Cartographer's Daughter",
            "Elif Demir",
            999,
            Some(1499),
            "fiction",
            "Adventure",
            4.2,
            689,
            2020,
            BookFormat::EBook,
            42,
            &["maps", "voyage", "sale"],
        ),
        book(
            8,
            "Thinking in Systems of Ink",
            "Priya Nair",
            3199,
            None,
            "non-fiction",
            "Essays",
            4.1,
            275,
            2024,
            BookFormat::Hardcover,
            5,
            &["craft", "writing"],
        ),
    ]
}
