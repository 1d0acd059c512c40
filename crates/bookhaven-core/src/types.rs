//! # Domain Types
//!
//! Core domain types used throughout the BookHaven storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │    CartItem     │   │  WishlistItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  book_id        │   │  book (snapshot)│       │
//! │  │  title/author   │   │  selected_format│   │  added_at       │       │
//! │  │  price_cents    │   │  unit_price     │   │                 │       │
//! │  │  rating, tags   │   │  quantity       │   │  keyed by id    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   BookFormat    │   │ ShippingMethod  │   │  PaymentMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Hardcover      │   │  Standard       │   │  Card           │       │
//! │  │  Paperback      │   │  Express        │   │  Paypal         │       │
//! │  │  EBook          │   │  Overnight      │   │  ApplePay       │       │
//! │  │  Audiobook      │   │  Pickup         │   │  GooglePay      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart and wishlist entries freeze the book data they were created from.
//! The catalog is immutable at runtime, but frozen snapshots also keep the
//! persisted collections self-contained across catalog revisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Book Format
// =============================================================================

/// The physical (or digital) format a book is offered in.
///
/// Serialized with the storefront's display labels so persisted carts and
/// generated TypeScript bindings match what the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BookFormat {
    Hardcover,
    Paperback,
    #[serde(rename = "E-Book")]
    EBook,
    Audiobook,
}

impl BookFormat {
    /// All formats, in the order the detail view offers them.
    pub const ALL: [BookFormat; 4] = [
        BookFormat::Paperback,
        BookFormat::Hardcover,
        BookFormat::EBook,
        BookFormat::Audiobook,
    ];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            BookFormat::Hardcover => "Hardcover",
            BookFormat::Paperback => "Paperback",
            BookFormat::EBook => "E-Book",
            BookFormat::Audiobook => "Audiobook",
        }
    }
}

impl fmt::Display for BookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
///
/// Immutable reference data: the catalog is loaded once and never mutated at
/// runtime. Every other component reads books and snapshots what it needs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Book {
    /// Unique numeric identifier.
    pub id: u32,

    /// Display title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Current price in cents for the listed format.
    pub price_cents: i64,

    /// Pre-sale price in cents, if the book is discounted (for display).
    pub original_price_cents: Option<i64>,

    /// Single category tag ("fiction", "non-fiction", ...).
    pub category: String,

    /// Free-text genre classification ("Literary Fiction", "Memoir", ...).
    pub genre: String,

    /// Average rating, 0.0 - 5.0.
    pub rating: f64,

    /// Number of reviews behind the rating.
    pub reviews: u32,

    /// Year of publication (drives the "newest" sort).
    pub published_year: i32,

    /// The format the catalog lists this book in.
    pub format: BookFormat,

    /// Whether the book can currently be purchased.
    pub in_stock: bool,

    /// Units on hand.
    pub stock_count: u32,

    /// Search tags matched by the free-text query.
    pub tags: Vec<String>,
}

impl Book {
    /// Returns the listed price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the pre-sale price, if any.
    #[inline]
    pub fn original_price(&self) -> Option<Money> {
        self.original_price_cents.map(Money::from_cents)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the shopping cart.
///
/// ## Identity
/// A line item is keyed by `(book_id, selected_format)` - the same book in
/// two formats is two distinct line items.
///
/// ## Price Freezing
/// `unit_price_cents` is captured when the item is added, *after* the
/// format adjustment. If the catalog price changes later, the cart keeps
/// the price the shopper saw.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartItem {
    /// Book ID (catalog key).
    pub book_id: u32,

    /// Title at time of adding (frozen).
    pub title: String,

    /// Author at time of adding (frozen).
    pub author: String,

    /// Format-adjusted price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// The format this line item was added in.
    pub selected_format: BookFormat,

    /// Quantity in cart. Always >= 1; a decrement to 0 removes the item.
    pub quantity: i64,

    /// When this item was added to cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a new line item from a book, a chosen format, and the
    /// format-adjusted unit price.
    pub fn new(book: &Book, format: BookFormat, unit_price: Money) -> Self {
        CartItem {
            book_id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            unit_price_cents: unit_price.cents(),
            selected_format: format,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// The frozen unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price() * self.quantity
    }

    /// Checks whether this line item matches a `(book id, format)` key.
    #[inline]
    pub fn matches(&self, book_id: u32, format: BookFormat) -> bool {
        self.book_id == book_id && self.selected_format == format
    }
}

// =============================================================================
// Wishlist Item
// =============================================================================

/// A wishlist entry: a full book snapshot keyed by book id only.
///
/// Format-agnostic - wishing for a book in any format is the same wish.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistItem {
    /// Snapshot of the book when it was wished for.
    pub book: Book,

    /// When the entry was created.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Creates a wishlist entry from a catalog book.
    pub fn new(book: &Book) -> Self {
        WishlistItem {
            book: book.clone(),
            added_at: Utc::now(),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// The logged-in shopper. At most one instance (single-user client).
///
/// Fabricated locally on login - there is no real authentication.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub name: String,
    pub email: String,
    pub is_logged_in: bool,
    /// Year the account "joined" (stamped at login).
    pub join_date: String,
    pub orders_count: u32,
}

// =============================================================================
// Shipping Method
// =============================================================================

/// How the order ships. Fee rules live in [`crate::pricing::PricingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ShippingMethod {
    /// 5-7 business days; free at the subtotal threshold.
    Standard,
    /// 2-3 business days, flat fee.
    Express,
    /// Next business day, flat fee.
    Overnight,
    /// Store pickup, always free.
    Pickup,
}

impl ShippingMethod {
    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard Shipping",
            ShippingMethod::Express => "Express Shipping",
            ShippingMethod::Overnight => "Overnight Shipping",
            ShippingMethod::Pickup => "Store Pickup",
        }
    }

    /// Days until estimated delivery (0 = same-day pickup).
    pub const fn delivery_days(&self) -> u32 {
        match self {
            ShippingMethod::Standard => 7,
            ShippingMethod::Express => 3,
            ShippingMethod::Overnight => 1,
            ShippingMethod::Pickup => 0,
        }
    }
}

impl Default for ShippingMethod {
    fn default() -> Self {
        ShippingMethod::Standard
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the order is paid. Only `Card` carries a form that needs validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    Card,
    Paypal,
    ApplePay,
    GooglePay,
}

impl PaymentMethod {
    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::ApplePay => "Apple Pay",
            PaymentMethod::GooglePay => "Google Pay",
        }
    }

    /// Whether forward transition from the payment step requires a valid
    /// card form. Wallet methods bypass card validation entirely.
    pub const fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Card
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_book() -> Book {
        Book {
            id: 7,
            title: "The Paper Sea".to_string(),
            author: "M. Aldous".to_string(),
            price_cents: 1499,
            original_price_cents: Some(1999),
            category: "fiction".to_string(),
            genre: "Literary Fiction".to_string(),
            rating: 4.4,
            reviews: 812,
            published_year: 2021,
            format: BookFormat::Paperback,
            in_stock: true,
            stock_count: 12,
            tags: vec!["sea".to_string(), "voyage".to_string()],
        }
    }

    #[test]
    fn test_line_total() {
        let book = test_book();
        let mut item = CartItem::new(&book, BookFormat::Paperback, book.price());
        item.quantity = 3;
        assert_eq!(item.line_total().cents(), 4497);
    }

    #[test]
    fn test_cart_item_identity() {
        let book = test_book();
        let item = CartItem::new(&book, BookFormat::EBook, Money::from_cents(999));
        assert!(item.matches(7, BookFormat::EBook));
        assert!(!item.matches(7, BookFormat::Paperback));
        assert!(!item.matches(8, BookFormat::EBook));
    }

    #[test]
    fn test_format_serde_labels() {
        let json = serde_json::to_string(&BookFormat::EBook).unwrap();
        assert_eq!(json, "\"E-Book\"");
        let back: BookFormat = serde_json::from_str("\"Audiobook\"").unwrap();
        assert_eq!(back, BookFormat::Audiobook);
    }

    #[test]
    fn test_payment_method_card_gate() {
        assert!(PaymentMethod::Card.requires_card());
        assert!(!PaymentMethod::Paypal.requires_card());
        assert!(!PaymentMethod::ApplePay.requires_card());
        assert!(!PaymentMethod::GooglePay.requires_card());
    }

    #[test]
    fn test_delivery_days() {
        assert_eq!(ShippingMethod::Overnight.delivery_days(), 1);
        assert_eq!(ShippingMethod::Express.delivery_days(), 3);
        assert_eq!(ShippingMethod::Standard.delivery_days(), 7);
        assert_eq!(ShippingMethod::Pickup.delivery_days(), 0);
    }
}
