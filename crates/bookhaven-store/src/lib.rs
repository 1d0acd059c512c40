//! # bookhaven-store: Store State and Local Persistence
//!
//! This crate holds the storefront's mutable state - cart line items,
//! wishlist entries, and the logged-in user - and persists each collection
//! to local key-value storage on every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     BookHaven Data Flow                                 │
//! │                                                                         │
//! │  Rendering layer action (add to cart, toggle wishlist, login)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 bookhaven-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐        ┌─────────────────────────────┐     │   │
//! │  │   │     Store     │        │       StorageBackend        │     │   │
//! │  │   │  (store.rs)   │──────► │       (storage.rs)          │     │   │
//! │  │   │               │        │                             │     │   │
//! │  │   │ cart          │        │  FileStorage   <key>.json   │     │   │
//! │  │   │ wishlist      │        │  MemoryStorage (tests)      │     │   │
//! │  │   │ user          │        │                             │     │   │
//! │  │   └───────────────┘        └─────────────────────────────┘     │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Keyed JSON entries: bh_cart / bh_wishlist / bh_user                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - The `StorageBackend` trait and its file/memory backends
//! - [`store`] - The `Store` with its mutation operations and derived values
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use bookhaven_store::{MemoryStorage, Store};
//!
//! let store = Store::open(MemoryStorage::new());
//! assert_eq!(store.cart_count(), 0);
//! assert!(store.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::StoreError;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use store::Store;
