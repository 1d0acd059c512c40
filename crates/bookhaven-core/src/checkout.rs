//! # Checkout State Machine
//!
//! A linear sequence of checkout steps with per-step validation gating
//! forward transitions and free backward navigation.
//!
//! ## Step Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Step Transitions                            │
//! │                                                                         │
//! │            advance()   advance()   advance()   advance()                │
//! │  ┌──────┐   ────►  ┌─────────┐ ────► ┌──────────┐ ────► ┌─────────┐    │
//! │  │ cart │          │ address │       │ shipping │       │ payment │    │
//! │  └──────┘   ◄────  └─────────┘ ◄──── └──────────┘ ◄──── └────┬────┘    │
//! │            retreat()   │ gated:      retreat()    gated: │   │         │
//! │                        │ address validation   card validation │        │
//! │                        │                                      ▼        │
//! │              jump_to() from review "Edit" links         ┌────────┐     │
//! │              ◄──────────────────────────────────────────│ review │     │
//! │                                                         └───┬────┘     │
//! │                                       place_order() +       │          │
//! │                                       complete_order()      ▼          │
//! │                                                    ┌──────────────┐    │
//! │                                                    │ confirmation │    │
//! │                                                    │  (terminal)  │    │
//! │                                                    └──────────────┘    │
//! │                                                                         │
//! │  • advance() from review is a no-op: confirmation is reachable ONLY    │
//! │    via explicit order placement                                        │
//! │  • jump_to(confirmation) is refused for the same reason                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settlement is Two-Phase
//! `place_order()` raises the `processing` flag; the *caller* owns the
//! simulated settlement delay (a cancellable timer tied to its own scope)
//! and reports back with `complete_order(outcome)`. Dropping the caller's
//! timer cancels the whole settlement - no stale mutation can fire after
//! the session is gone. On approval the caller clears the store cart.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Rate;
use crate::pricing::{self, CheckoutSelections, OrderTotals, PricingConfig};
use crate::types::{CartItem, PaymentMethod, ShippingMethod};
use crate::validation::{self, FieldErrors};

// =============================================================================
// Checkout Step
// =============================================================================

/// The six checkout steps, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CheckoutStep {
    Cart,
    Address,
    Shipping,
    Payment,
    Review,
    Confirmation,
}

impl CheckoutStep {
    /// The full step sequence, in flow order.
    pub const SEQUENCE: [CheckoutStep; 6] = [
        CheckoutStep::Cart,
        CheckoutStep::Address,
        CheckoutStep::Shipping,
        CheckoutStep::Payment,
        CheckoutStep::Review,
        CheckoutStep::Confirmation,
    ];

    /// Progress-bar label.
    pub const fn label(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "Cart",
            CheckoutStep::Address => "Address",
            CheckoutStep::Shipping => "Shipping",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Review => "Review",
            CheckoutStep::Confirmation => "Confirm",
        }
    }

    fn index(&self) -> usize {
        match self {
            CheckoutStep::Cart => 0,
            CheckoutStep::Address => 1,
            CheckoutStep::Shipping => 2,
            CheckoutStep::Payment => 3,
            CheckoutStep::Review => 4,
            CheckoutStep::Confirmation => 5,
        }
    }

    /// The next step in sequence, if any.
    pub fn next(&self) -> Option<CheckoutStep> {
        Self::SEQUENCE.get(self.index() + 1).copied()
    }

    /// The previous step in sequence, if any.
    pub fn prev(&self) -> Option<CheckoutStep> {
        self.index().checked_sub(1).map(|i| Self::SEQUENCE[i])
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::Address => "address",
            CheckoutStep::Shipping => "shipping",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Review => "review",
            CheckoutStep::Confirmation => "confirmation",
        };
        f.write_str(id)
    }
}

// =============================================================================
// Form State
// =============================================================================

/// Home/work toggle on the address form. Cosmetic, never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AddressType {
    Home,
    Work,
}

/// The shipping address form, bound field-by-field by the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AddressForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub line1: String,
    /// Apartment, suite, etc. Optional, never validated.
    pub line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub address_type: AddressType,
    pub save_address: bool,
}

impl Default for AddressForm {
    fn default() -> Self {
        AddressForm {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            line1: String::new(),
            line2: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: "United States".to_string(),
            address_type: AddressType::Home,
            save_address: true,
        }
    }
}

/// The card form. Only validated when the card payment method is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CardForm {
    /// As typed, including display formatting ("4242 4242 ...").
    pub number: String,
    /// Cardholder name.
    pub name: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

// =============================================================================
// Promo State
// =============================================================================

/// A successfully applied promo code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedPromo {
    /// Canonical code from the table ("READER20").
    pub code: String,
    pub rate: Rate,
}

/// Promo input/apply/remove cycle, independent per surface (the checkout
/// promo box and the cart-panel promo box each own one of these).
#[derive(Debug, Clone, Default)]
pub struct PromoState {
    /// The code as currently typed.
    pub input: String,
    applied: Option<AppliedPromo>,
    error: Option<String>,
}

impl PromoState {
    /// The currently applied promo, if any.
    pub fn applied(&self) -> Option<&AppliedPromo> {
        self.applied.as_ref()
    }

    /// The inline error from the last failed apply, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The effective discount rate: the applied promo's rate, or zero.
    pub fn rate(&self) -> Rate {
        self.applied.as_ref().map(|p| p.rate).unwrap_or_default()
    }

    /// Applies the typed code against the config's table.
    ///
    /// A valid code replaces any previous application; an invalid code sets
    /// the inline error and leaves a previously applied promo untouched.
    pub fn apply(&mut self, config: &PricingConfig) {
        match config.lookup_promo(&self.input) {
            Some((code, rate)) => {
                self.applied = Some(AppliedPromo {
                    code: code.to_string(),
                    rate,
                });
                self.error = None;
            }
            None => {
                self.error =
                    Some("Invalid code. Try: BOOKWORM15, READER20, SAVE10".to_string());
            }
        }
    }

    /// Clears the whole input/apply/error cycle.
    pub fn remove(&mut self) {
        self.input.clear();
        self.applied = None;
        self.error = None;
    }
}

// =============================================================================
// Settlement Outcome
// =============================================================================

/// The result the settlement reports back through `complete_order`.
///
/// The simulated gateway always approves; the decline branch exists so a
/// real gateway can be swapped in without changing the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved,
    Declined { reason: String },
}

// =============================================================================
// Checkout Session
// =============================================================================

/// Order-number prefix; the suffix is 8 random base-36 uppercase characters.
const ORDER_NUMBER_PREFIX: &str = "BH-";

/// Ephemeral state for one checkout flow instance.
///
/// Created when the checkout UI mounts, discarded when it closes. On a
/// successful order the caller clears the store cart; the session keeps the
/// order number for the confirmation screen.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    config: PricingConfig,
    step: CheckoutStep,

    /// Address form + its last validation result.
    pub address: AddressForm,
    address_errors: FieldErrors,

    /// Selected shipping method.
    pub shipping: ShippingMethod,

    /// Selected payment method, card form + its last validation result.
    pub payment: PaymentMethod,
    pub card: CardForm,
    card_errors: FieldErrors,
    payment_error: Option<String>,

    /// Checkout promo box (independent from the cart panel's).
    pub promo: PromoState,

    /// Gift wrap selection.
    pub gift_wrap: bool,
    pub gift_note: String,

    order_number: String,
    processing: bool,
    order_done: bool,
}

impl CheckoutSession {
    /// Creates a session at the `cart` step with a freshly stamped order
    /// number that stays stable across the whole flow.
    pub fn new(config: PricingConfig) -> Self {
        CheckoutSession {
            config,
            step: CheckoutStep::Cart,
            address: AddressForm::default(),
            address_errors: FieldErrors::new(),
            shipping: ShippingMethod::default(),
            payment: PaymentMethod::default(),
            card: CardForm::default(),
            card_errors: FieldErrors::new(),
            payment_error: None,
            promo: PromoState::default(),
            gift_wrap: false,
            gift_note: String::new(),
            order_number: generate_order_number(),
            processing: false,
            order_done: false,
        }
    }

    /// The active step.
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    /// The engine configuration this session prices against.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Field errors from the last address validation.
    pub fn address_errors(&self) -> &FieldErrors {
        &self.address_errors
    }

    /// Field errors from the last card validation.
    pub fn card_errors(&self) -> &FieldErrors {
        &self.card_errors
    }

    /// Inline payment error from a declined settlement, if any.
    pub fn payment_error(&self) -> Option<&str> {
        self.payment_error.as_deref()
    }

    /// The order identifier, stable for the lifetime of the session.
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Whether a settlement is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Whether the order has been placed.
    pub fn order_done(&self) -> bool {
        self.order_done
    }

    /// The checkout modal may close unless a settlement is in flight.
    pub fn can_close(&self) -> bool {
        !self.processing
    }

    // -------------------------------------------------------------------------
    // Step transitions
    // -------------------------------------------------------------------------

    /// Moves to the next step unless the active step's validator fails.
    ///
    /// Returns `true` if the step changed. On a validation failure the step
    /// stays put and every failing field is reported in the matching error
    /// map. `advance()` from `review` is a no-op: confirmation is reachable
    /// only through explicit order placement.
    pub fn advance(&mut self) -> bool {
        match self.step {
            CheckoutStep::Address => {
                self.address_errors = validation::validate_address(&self.address);
                if !self.address_errors.is_empty() {
                    return false;
                }
            }
            CheckoutStep::Payment => {
                if self.payment.requires_card() {
                    self.card_errors = validation::validate_card(&self.card);
                    if !self.card_errors.is_empty() {
                        return false;
                    }
                } else {
                    self.card_errors.clear();
                }
            }
            CheckoutStep::Review | CheckoutStep::Confirmation => return false,
            CheckoutStep::Cart | CheckoutStep::Shipping => {}
        }

        match self.step.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Moves to the previous step. No validation on the way back; a no-op
    /// at `cart` (already the first navigable step) and after the order is
    /// placed.
    pub fn retreat(&mut self) {
        if self.order_done {
            return;
        }
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    /// Jumps directly to a step, bypassing the linear order (the review
    /// step's "Edit" links). Unconditional, except that jumping into
    /// `confirmation` is refused to preserve the terminal-state invariant.
    ///
    /// Returns `true` if the jump happened.
    pub fn jump_to(&mut self, step: CheckoutStep) -> bool {
        if step == CheckoutStep::Confirmation {
            return false;
        }
        self.step = step;
        true
    }

    // -------------------------------------------------------------------------
    // Promo
    // -------------------------------------------------------------------------

    /// Applies the typed promo code against the canonical table.
    pub fn apply_promo(&mut self) {
        self.promo.apply(&self.config);
    }

    /// Clears the promo input/apply/error cycle.
    pub fn remove_promo(&mut self) {
        self.promo.remove();
    }

    // -------------------------------------------------------------------------
    // Pricing
    // -------------------------------------------------------------------------

    /// Runs the pricing pipeline for the current selections.
    ///
    /// Recomputed from the raw cart on every call - derived values are
    /// never cached, so the displayed totals cannot drift from the cart.
    pub fn totals(&self, cart: &[CartItem]) -> OrderTotals {
        pricing::quote(
            cart,
            &CheckoutSelections {
                shipping: self.shipping,
                promo_rate: self.promo.rate(),
                gift_wrap: self.gift_wrap,
            },
            &self.config,
        )
    }

    // -------------------------------------------------------------------------
    // Order placement
    // -------------------------------------------------------------------------

    /// Begins order placement. Only callable from `review`.
    ///
    /// Raises the `processing` flag; the caller runs the settlement (a
    /// simulated fixed delay it owns and may cancel by dropping) and then
    /// reports the outcome through [`CheckoutSession::complete_order`].
    pub fn place_order(&mut self) -> CheckoutResult<()> {
        if self.step != CheckoutStep::Review {
            return Err(CheckoutError::NotAtReview { current: self.step });
        }
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        self.processing = true;
        Ok(())
    }

    /// Completes a settlement started by [`CheckoutSession::place_order`].
    ///
    /// - `Approved`: marks the order done and enters `confirmation`. The
    ///   caller must then clear the store cart.
    /// - `Declined`: returns the flow to `payment` with an inline payment
    ///   error so the shopper can retry.
    pub fn complete_order(&mut self, outcome: PaymentOutcome) -> CheckoutResult<()> {
        if !self.processing {
            return Err(CheckoutError::NotProcessing);
        }
        self.processing = false;

        match outcome {
            PaymentOutcome::Approved => {
                self.order_done = true;
                self.payment_error = None;
                self.step = CheckoutStep::Confirmation;
            }
            PaymentOutcome::Declined { reason } => {
                self.payment_error = Some(reason);
                self.step = CheckoutStep::Payment;
            }
        }
        Ok(())
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        CheckoutSession::new(PricingConfig::default())
    }
}

// =============================================================================
// Order Number Generation
// =============================================================================

/// Generates an order identifier: `BH-` + 8 random base-36 uppercase
/// characters, drawn from UUID entropy. Stamped once at session creation.
fn generate_order_number() -> String {
    const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let mut entropy = Uuid::new_v4().as_u128();
    let mut out = String::with_capacity(ORDER_NUMBER_PREFIX.len() + 8);
    out.push_str(ORDER_NUMBER_PREFIX);
    for _ in 0..8 {
        out.push(ALPHABET[(entropy % 36) as usize] as char);
        entropy /= 36;
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
