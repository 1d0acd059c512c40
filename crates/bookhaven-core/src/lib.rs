//! # bookhaven-core: Pure Business Logic for the BookHaven Storefront
//!
//! This crate is the **heart** of BookHaven. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       BookHaven Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Rendering Layer (out of scope)                 │   │
//! │  │    Browse UI ──► Cart UI ──► Checkout UI ──► Confirmation      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ bookhaven-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │ catalog │ │ pricing │ │ checkout │ │ money  │ │   │
//! │  │   │  Book   │ │ filter  │ │ totals  │ │  steps   │ │ Money  │ │   │
//! │  │   │ CartItem│ │  sort   │ │ promo   │ │  forms   │ │  Rate  │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO TIMERS • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              bookhaven-store (state + persistence)              │   │
//! │  │        cart / wishlist / user, keyed local JSON entries         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, CartItem, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Predicate filtering and comparator sorting over books
//! - [`pricing`] - The order pricing pipeline and its configuration
//! - [`checkout`] - The checkout step state machine
//! - [`validation`] - Address and card form validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Persistence, timers, and network access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: Usage errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bookhaven_core::money::{Money, Rate};
//!
//! // Create money from cents (never from floats!)
//! let subtotal = Money::from_cents(2000); // $20.00
//!
//! // Apply the 8% storefront tax rate
//! let tax = subtotal.apply_rate(Rate::from_bps(800));
//! assert_eq!(tax.cents(), 160);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bookhaven_core::Money` instead of
// `use bookhaven_core::money::Money`

pub use checkout::{CheckoutSession, CheckoutStep, PaymentOutcome};
pub use error::CheckoutError;
pub use money::{Money, Rate};
pub use pricing::{OrderTotals, PricingConfig};
pub use types::*;
