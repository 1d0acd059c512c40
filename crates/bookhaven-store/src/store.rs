//! # The Store
//!
//! The single process-wide storefront state: cart line items, wishlist
//! entries, and the logged-in user. Constructed once at process entry with
//! an explicit [`StorageBackend`] and passed down to every consumer - there
//! is no global/ambient accessor.
//!
//! ## Persistence Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Persistence                                    │
//! │                                                                         │
//! │  Mutation                 Key            Behavior                       │
//! │  ────────────────────     ──────────     ───────────────────────────    │
//! │  cart operations      ──► bh_cart        collection rewritten as JSON   │
//! │  wishlist operations  ──► bh_wishlist    collection rewritten as JSON   │
//! │  login                ──► bh_user        user written as JSON           │
//! │  logout               ──► bh_user        entry removed                  │
//! │                                                                         │
//! │  On open: each key rehydrates independently. Missing or corrupt        │
//! │  entries fall back SILENTLY to the empty default (logged at warn,      │
//! │  never surfaced to the caller).                                        │
//! │                                                                         │
//! │  On write failure: logged at warn. The in-memory mutation has already  │
//! │  happened, so operation contracts ("always succeeds") still hold.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Values
//! `cart_total()` and `cart_count()` are recomputed from the line items on
//! every call. No caching, so they can never drift from the cart.

use chrono::{Datelike, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use bookhaven_core::money::Money;
use bookhaven_core::pricing;
use bookhaven_core::types::{Book, BookFormat, CartItem, User, WishlistItem};

use crate::storage::StorageBackend;

// =============================================================================
// Storage Keys
// =============================================================================
// One independent entry per collection, so a corrupt key only loses that
// collection.

const CART_KEY: &str = "bh_cart";
const WISHLIST_KEY: &str = "bh_wishlist";
const USER_KEY: &str = "bh_user";

// =============================================================================
// Store
// =============================================================================

/// The storefront state and its persistence.
///
/// ## Invariants
/// - Line items are unique by `(book id, selected format)`; adding the same
///   pair again increments quantity
/// - Quantities are always >= 1 (an update to <= 0 removes the line item)
/// - The wishlist holds no duplicate book ids
#[derive(Debug)]
pub struct Store<S: StorageBackend> {
    storage: S,
    cart: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    user: Option<User>,
}

impl<S: StorageBackend> Store<S> {
    /// Opens the store, rehydrating each collection from its storage key.
    ///
    /// A missing or corrupt entry falls back to the empty default for that
    /// key only - one bad entry never poisons the others.
    pub fn open(storage: S) -> Self {
        let cart: Vec<CartItem> = load_or_default(&storage, CART_KEY);
        let wishlist: Vec<WishlistItem> = load_or_default(&storage, WISHLIST_KEY);
        let user: Option<User> = load_or_default(&storage, USER_KEY);

        debug!(
            cart_items = cart.len(),
            wishlist_items = wishlist.len(),
            logged_in = user.is_some(),
            "Store opened"
        );

        Store {
            storage,
            cart,
            wishlist,
            user,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The cart line items, in insertion order.
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// The wishlist entries, in insertion order.
    pub fn wishlist(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Sum of line totals over the cart. Recomputed on every call.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over the cart. Recomputed on every call.
    pub fn cart_count(&self) -> i64 {
        self.cart.iter().map(|i| i.quantity).sum()
    }

    /// Checks whether a book id is on the wishlist.
    pub fn is_in_wishlist(&self, book_id: u32) -> bool {
        self.wishlist.iter().any(|w| w.book.id == book_id)
    }

    // -------------------------------------------------------------------------
    // Cart mutations
    // -------------------------------------------------------------------------

    /// Adds a book to the cart in the chosen format. Always succeeds.
    ///
    /// If a line item with the same `(book id, format)` already exists its
    /// quantity goes up by 1; otherwise a new line item is appended with
    /// quantity 1 and the format-adjusted price frozen in.
    pub fn add_to_cart(&mut self, book: &Book, format: BookFormat) {
        if let Some(item) = self.cart.iter_mut().find(|i| i.matches(book.id, format)) {
            item.quantity += 1;
            debug!(book_id = book.id, %format, quantity = item.quantity, "Incremented cart line");
        } else {
            let unit_price = pricing::price_for_format(book.price(), format);
            self.cart.push(CartItem::new(book, format, unit_price));
            debug!(book_id = book.id, %format, "Added cart line");
        }
        self.persist_cart();
    }

    /// Removes the matching line item; a no-op if it isn't present.
    pub fn remove_from_cart(&mut self, book_id: u32, format: BookFormat) {
        self.cart.retain(|i| !i.matches(book_id, format));
        debug!(book_id, %format, "Removed cart line");
        self.persist_cart();
    }

    /// Sets a line item's quantity exactly. A quantity of zero or less
    /// removes the line item instead.
    pub fn update_quantity(&mut self, book_id: u32, format: BookFormat, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(book_id, format);
            return;
        }
        if let Some(item) = self.cart.iter_mut().find(|i| i.matches(book_id, format)) {
            item.quantity = quantity;
            debug!(book_id, %format, quantity, "Updated cart quantity");
        }
        self.persist_cart();
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cleared cart");
        self.persist_cart();
    }

    // -------------------------------------------------------------------------
    // Wishlist mutations
    // -------------------------------------------------------------------------

    /// Adds a book to the wishlist. Idempotent: adding a book id that is
    /// already wished for leaves the wishlist unchanged.
    pub fn add_to_wishlist(&mut self, book: &Book) {
        if self.is_in_wishlist(book.id) {
            return;
        }
        self.wishlist.push(WishlistItem::new(book));
        debug!(book_id = book.id, "Added wishlist entry");
        self.persist_wishlist();
    }

    /// Removes a book id from the wishlist; a no-op if absent.
    pub fn remove_from_wishlist(&mut self, book_id: u32) {
        self.wishlist.retain(|w| w.book.id != book_id);
        debug!(book_id, "Removed wishlist entry");
        self.persist_wishlist();
    }

    // -------------------------------------------------------------------------
    // User mutations
    // -------------------------------------------------------------------------

    /// Logs in, replacing any current user with a locally fabricated
    /// record - there is no credential verification (this is a mock).
    ///
    /// A blank name falls back to the local part of the email address.
    pub fn login(&mut self, name: &str, email: &str) {
        let name = name.trim();
        let resolved = if name.is_empty() {
            email.split('@').next().unwrap_or_default()
        } else {
            name
        };

        self.user = Some(User {
            name: resolved.to_string(),
            email: email.to_string(),
            is_logged_in: true,
            join_date: Utc::now().year().to_string(),
            orders_count: 0,
        });
        debug!(email, "User logged in");
        self.persist_user();
    }

    /// Logs out, clearing the user and its storage entry.
    pub fn logout(&mut self) {
        self.user = None;
        debug!("User logged out");
        self.persist_user();
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    fn persist_cart(&mut self) {
        persist(&mut self.storage, CART_KEY, &self.cart);
    }

    fn persist_wishlist(&mut self) {
        persist(&mut self.storage, WISHLIST_KEY, &self.wishlist);
    }

    fn persist_user(&mut self) {
        // The user key mirrors login state: present while logged in,
        // removed on logout.
        match &self.user {
            Some(user) => persist(&mut self.storage, USER_KEY, user),
            None => {
                if let Err(err) = self.storage.remove(USER_KEY) {
                    warn!(key = USER_KEY, %err, "Failed to remove storage entry");
                }
            }
        }
    }
}

// =============================================================================
// Persistence Helpers
// =============================================================================

/// Rehydrates one key, substituting the default on any failure.
///
/// Missing entries are the normal first-run case (debug); unreadable or
/// corrupt entries are abnormal but recovered the same way (warn).
fn load_or_default<S: StorageBackend, T: DeserializeOwned + Default>(storage: &S, key: &str) -> T {
    match storage.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, %err, "Corrupt storage entry, falling back to default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, %err, "Unreadable storage entry, falling back to default");
            T::default()
        }
    }
}

/// Serializes and writes one key. Failures are logged, never propagated:
/// the in-memory mutation has already succeeded.
fn persist<S: StorageBackend, T: Serialize>(storage: &mut S, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(key, %err, "Failed to serialize collection");
            return;
        }
    };
    if let Err(err) = storage.save(key, &raw) {
        warn!(key, %err, "Failed to persist collection");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use uuid::Uuid;

    fn test_book(id: u32, price_cents: i64) -> Book {
        Book {
            id,
            title: format!("Book {id}"),
            author: format!("Author {id}"),
            price_cents,
            original_price_cents: None,
            category: "fiction".to_string(),
            genre: "Literary Fiction".to_string(),
            rating: 4.2,
            reviews: 120,
            published_year: 2022,
            format: BookFormat::Paperback,
            in_stock: true,
            stock_count: 9,
            tags: vec!["test".to_string()],
        }
    }

    fn empty_store() -> Store<MemoryStorage> {
        Store::open(MemoryStorage::new())
    }

    #[test]
    fn test_add_to_cart_merges_on_id_and_format() {
        let mut store = empty_store();
        let book = test_book(1, 999);

        store.add_to_cart(&book, BookFormat::Paperback);
        store.add_to_cart(&book, BookFormat::Paperback);

        // One line item with quantity 2, not two line items.
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].quantity, 2);
        assert_eq!(store.cart_count(), 2);
        assert_eq!(store.cart_total().cents(), 1998);
    }

    #[test]
    fn test_same_book_two_formats_is_two_line_items() {
        let mut store = empty_store();
        let book = test_book(1, 2000);

        store.add_to_cart(&book, BookFormat::Paperback);
        store.add_to_cart(&book, BookFormat::Hardcover);

        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.cart_count(), 2);
        // Hardcover is frozen at the +$8.00 adjusted price.
        assert_eq!(store.cart_total().cents(), 2000 + 2800);
    }

    #[test]
    fn test_format_adjusted_price_is_frozen() {
        let mut store = empty_store();
        let book = test_book(1, 2000);

        store.add_to_cart(&book, BookFormat::EBook);
        assert_eq!(store.cart()[0].unit_price_cents, 1500);
    }

    #[test]
    fn test_derived_values_recompute() {
        let mut store = empty_store();
        store.add_to_cart(&test_book(1, 1000), BookFormat::Paperback);
        store.add_to_cart(&test_book(2, 250), BookFormat::Paperback);
        store.update_quantity(2, BookFormat::Paperback, 4);

        assert_eq!(store.cart_count(), 5);
        assert_eq!(store.cart_total().cents(), 1000 + 4 * 250);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let mut store = empty_store();
        store.add_to_cart(&test_book(1, 1000), BookFormat::Paperback);
        store.add_to_cart(&test_book(2, 500), BookFormat::Paperback);

        store.update_quantity(1, BookFormat::Paperback, 0);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].book_id, 2);
    }

    #[test]
    fn test_update_quantity_negative_removes_line() {
        let mut store = empty_store();
        store.add_to_cart(&test_book(1, 1000), BookFormat::Paperback);
        store.update_quantity(1, BookFormat::Paperback, -3);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_leaves_other_lines_alone() {
        let mut store = empty_store();
        store.add_to_cart(&test_book(1, 1000), BookFormat::Paperback);
        store.add_to_cart(&test_book(2, 500), BookFormat::Paperback);

        store.update_quantity(1, BookFormat::Paperback, 7);

        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.cart()[0].quantity, 7);
        assert_eq!(store.cart()[1].quantity, 1);
    }

    #[test]
    fn test_remove_from_cart_is_keyed_by_format() {
        let mut store = empty_store();
        let book = test_book(1, 1000);
        store.add_to_cart(&book, BookFormat::Paperback);
        store.add_to_cart(&book, BookFormat::Audiobook);

        store.remove_from_cart(1, BookFormat::Paperback);

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.cart()[0].selected_format, BookFormat::Audiobook);

        // Removing something absent is a no-op.
        store.remove_from_cart(1, BookFormat::Paperback);
        assert_eq!(store.cart().len(), 1);
    }

    #[test]
    fn test_clear_cart() {
        let mut store = empty_store();
        store.add_to_cart(&test_book(1, 1000), BookFormat::Paperback);
        store.clear_cart();
        assert!(store.cart().is_empty());
        assert_eq!(store.cart_count(), 0);
        assert_eq!(store.cart_total().cents(), 0);
    }

    #[test]
    fn test_wishlist_add_is_idempotent() {
        let mut store = empty_store();
        let book = test_book(5, 1500);

        store.add_to_wishlist(&book);
        store.add_to_wishlist(&book);

        assert_eq!(store.wishlist().len(), 1);
        assert!(store.is_in_wishlist(5));
    }

    #[test]
    fn test_wishlist_remove() {
        let mut store = empty_store();
        store.add_to_wishlist(&test_book(5, 1500));
        store.remove_from_wishlist(5);
        assert!(!store.is_in_wishlist(5));
        assert!(store.wishlist().is_empty());

        store.remove_from_wishlist(5);
        assert!(store.wishlist().is_empty());
    }

    #[test]
    fn test_login_and_logout() {
        let mut store = empty_store();
        store.login("Hak Hai", "hai123@email.com");

        let user = store.user().unwrap();
        assert_eq!(user.name, "Hak Hai");
        assert!(user.is_logged_in);
        assert_eq!(user.orders_count, 0);

        store.logout();
        assert!(store.user().is_none());
    }

    #[test]
    fn test_login_blank_name_falls_back_to_email_local_part() {
        let mut store = empty_store();
        store.login("  ", "reader@books.example");
        assert_eq!(store.user().unwrap().name, "reader");
    }

    #[test]
    fn test_corrupt_entries_rehydrate_as_defaults() {
        let mut storage = MemoryStorage::new();
        storage.seed(CART_KEY, "{not valid json");
        storage.seed(WISHLIST_KEY, "42");
        storage.seed(USER_KEY, "[]");

        let store = Store::open(storage);
        assert!(store.cart().is_empty());
        assert!(store.wishlist().is_empty());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_one_corrupt_key_does_not_poison_others() {
        let mut seeded = MemoryStorage::new();
        {
            let mut store = Store::open(seeded.clone());
            store.add_to_cart(&test_book(1, 999), BookFormat::Paperback);
            seeded = store.storage;
        }
        seeded.seed(WISHLIST_KEY, "oops");

        let store = Store::open(seeded);
        assert_eq!(store.cart().len(), 1);
        assert!(store.wishlist().is_empty());
    }

    #[test]
    fn test_file_roundtrip_preserves_cart_exactly() {
        let dir = std::env::temp_dir().join(format!("bh-store-{}", Uuid::new_v4()));

        {
            let storage = FileStorage::new(&dir).unwrap();
            let mut store = Store::open(storage);
            store.add_to_cart(&test_book(1, 1299), BookFormat::Paperback);
            store.add_to_cart(&test_book(1, 1299), BookFormat::Paperback);
            store.add_to_cart(&test_book(2, 2000), BookFormat::Hardcover);
            store.add_to_wishlist(&test_book(3, 899));
            store.login("Reader", "reader@books.example");
        }

        let reopened = Store::open(FileStorage::new(&dir).unwrap());

        assert_eq!(reopened.cart().len(), 2);
        assert_eq!(reopened.cart()[0].book_id, 1);
        assert_eq!(reopened.cart()[0].selected_format, BookFormat::Paperback);
        assert_eq!(reopened.cart()[0].quantity, 2);
        assert_eq!(reopened.cart()[0].unit_price_cents, 1299);
        assert_eq!(reopened.cart()[1].book_id, 2);
        assert_eq!(reopened.cart()[1].selected_format, BookFormat::Hardcover);
        assert_eq!(reopened.cart()[1].unit_price_cents, 2800);
        assert_eq!(reopened.cart_count(), 3);

        assert!(reopened.is_in_wishlist(3));
        assert_eq!(reopened.user().unwrap().name, "Reader");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_logout_removes_user_entry() {
        let dir = std::env::temp_dir().join(format!("bh-user-{}", Uuid::new_v4()));

        {
            let storage = FileStorage::new(&dir).unwrap();
            let mut store = Store::open(storage);
            store.login("Reader", "reader@books.example");
            assert!(dir.join("bh_user.json").exists());
            store.logout();
        }

        assert!(!dir.join("bh_user.json").exists());
        let reopened = Store::open(FileStorage::new(&dir).unwrap());
        assert!(reopened.user().is_none());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
