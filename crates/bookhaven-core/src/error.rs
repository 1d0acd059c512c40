//! # Error Types
//!
//! Domain-specific error types for bookhaven-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form validation failures  → FieldErrors maps (validation module)      │
//! │                              recoverable, field-scoped, inline          │
//! │                                                                         │
//! │  Promo code mismatches     → inline message on the promo state,        │
//! │                              never an Err                               │
//! │                                                                         │
//! │  Usage errors (this file)  → CheckoutError: calling an operation       │
//! │                              from the wrong state; propagated with `?`  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (current step, etc.)
//! 3. Errors are enum variants, never String
//! 4. Recoverable form errors never surface as Err - they populate the
//!    session's error maps and block forward transitions only

use thiserror::Error;

use crate::checkout::CheckoutStep;

// =============================================================================
// Checkout Error
// =============================================================================

/// Usage errors on the checkout state machine.
///
/// These represent operations invoked from the wrong state - programming
/// errors in the driving layer, not shopper mistakes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Order placement attempted outside the review step.
    #[error("order can only be placed from the review step (currently at {current})")]
    NotAtReview { current: CheckoutStep },

    /// Order placement attempted while a settlement is already in flight.
    #[error("an order is already being processed")]
    AlreadyProcessing,

    /// Settlement completion reported with no settlement in flight.
    #[error("no settlement in progress")]
    NotProcessing,
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
