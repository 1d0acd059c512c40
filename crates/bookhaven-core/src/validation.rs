//! # Validation Module
//!
//! Form validation for the checkout flow.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Contract                                │
//! │                                                                         │
//! │  advance() from `address` ──► validate_address() ──► FieldErrors        │
//! │  advance() from `payment` ──► validate_card()    ──► FieldErrors        │
//! │        (card method only)                                               │
//! │                                                                         │
//! │  • ALL failing fields are reported simultaneously (no short-circuit)    │
//! │    so the UI can highlight every invalid input at once                  │
//! │  • An empty map means the step may advance                              │
//! │  • Errors never block reading state, only forward transitions           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use crate::checkout::{AddressForm, CardForm};

/// Field-keyed inline error messages. Keys are the frontend field names
/// ("firstName", "zip", ...), values are the messages shown next to them.
pub type FieldErrors = BTreeMap<String, String>;

// =============================================================================
// Address Validation
// =============================================================================

/// Validates the shipping address form, reporting every failing field.
///
/// ## Rules
/// - Required non-empty (after trim): first name, last name, street line 1,
///   city, state, zip, phone
/// - Email must have a local part, an `@`, and a domain containing a dot
pub fn validate_address(form: &AddressForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let required = [
        ("firstName", form.first_name.as_str(), "Required"),
        ("lastName", form.last_name.as_str(), "Required"),
        ("phone", form.phone.as_str(), "Required"),
        ("line1", form.line1.as_str(), "Street address required"),
        ("city", form.city.as_str(), "Required"),
        ("state", form.state.as_str(), "Required"),
        ("zip", form.zip.as_str(), "Required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            errors.insert(field.to_string(), message.to_string());
        }
    }

    if !is_valid_email(form.email.trim()) {
        errors.insert("email".to_string(), "Valid email required".to_string());
    }

    errors
}

/// Checks the storefront's email shape: `local@domain.tld` with
/// whitespace-free, non-empty parts and a dotted domain.
pub fn is_valid_email(input: &str) -> bool {
    let mut parts = input.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.chars().any(char::is_whitespace) {
        return false;
    }

    match domain.split_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

// =============================================================================
// Card Validation
// =============================================================================

/// Validates the card form, reporting every failing field.
///
/// Only called when the card payment method is selected - wallet methods
/// (PayPal / Apple Pay / Google Pay) bypass card validation entirely.
///
/// ## Rules
/// - Card number: at least 16 digits after stripping formatting
/// - Cardholder name: non-empty
/// - Expiry: `MM/YY` (two digits, slash, two digits)
/// - CVV: at least 3 digits
pub fn validate_card(card: &CardForm) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if digit_count(&card.number) < 16 {
        errors.insert(
            "number".to_string(),
            "Valid 16-digit card required".to_string(),
        );
    }

    if card.name.trim().is_empty() {
        errors.insert("name".to_string(), "Name required".to_string());
    }

    if !is_valid_expiry(&card.expiry) {
        errors.insert("expiry".to_string(), "MM/YY format required".to_string());
    }

    if digit_count(&card.cvv) < 3 {
        errors.insert("cvv".to_string(), "CVV required".to_string());
    }

    errors
}

/// Counts ASCII digits, ignoring spaces and any other formatting.
fn digit_count(input: &str) -> usize {
    input.chars().filter(char::is_ascii_digit).count()
}

/// Checks the `MM/YY` expiry shape (two digits, slash, two digits).
fn is_valid_expiry(input: &str) -> bool {
    let b = input.as_bytes();
    b.len() == 5
        && b[0].is_ascii_digit()
        && b[1].is_ascii_digit()
        && b[2] == b'/'
        && b[3].is_ascii_digit()
        && b[4].is_ascii_digit()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::{AddressForm, CardForm};

    fn valid_address() -> AddressForm {
        AddressForm {
            first_name: "Hak".to_string(),
            last_name: "Hai".to_string(),
            email: "hai123@email.com".to_string(),
            phone: "+885 555 000-0000".to_string(),
            line1: "123 Reading Lane".to_string(),
            city: "New York".to_string(),
            state: "New York".to_string(),
            zip: "10001".to_string(),
            ..Default::default()
        }
    }

    fn valid_card() -> CardForm {
        CardForm {
            number: "4242 4242 4242 4242".to_string(),
            name: "Hak Hai".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn test_valid_address_has_no_errors() {
        assert!(validate_address(&valid_address()).is_empty());
    }

    #[test]
    fn test_all_failing_fields_reported_at_once() {
        let errors = validate_address(&AddressForm::default());
        for field in ["firstName", "lastName", "email", "phone", "line1", "city", "state", "zip"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_whitespace_only_fields_are_required() {
        let mut form = valid_address();
        form.zip = "   ".to_string();
        let errors = validate_address(&form);
        assert_eq!(errors.get("zip").map(String::as_str), Some("Required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@bco"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b@c.co"));
    }

    #[test]
    fn test_valid_card_has_no_errors() {
        assert!(validate_card(&valid_card()).is_empty());
    }

    #[test]
    fn test_card_number_needs_16_digits() {
        let mut card = valid_card();
        card.number = "4242 4242 4242".to_string();
        let errors = validate_card(&card);
        assert!(errors.contains_key("number"));
    }

    #[test]
    fn test_card_number_formatting_is_stripped() {
        let mut card = valid_card();
        card.number = "4242-4242-4242-4242".to_string();
        assert!(validate_card(&card).is_empty());
    }

    #[test]
    fn test_expiry_pattern() {
        assert!(is_valid_expiry("01/26"));
        assert!(!is_valid_expiry("1/26"));
        assert!(!is_valid_expiry("0126"));
        assert!(!is_valid_expiry("01-26"));
        assert!(!is_valid_expiry("01/2026"));
        assert!(!is_valid_expiry(""));
    }

    #[test]
    fn test_cvv_needs_three_digits() {
        let mut card = valid_card();
        card.cvv = "12".to_string();
        assert!(validate_card(&card).contains_key("cvv"));

        card.cvv = "1234".to_string();
        assert!(validate_card(&card).is_empty());
    }

    #[test]
    fn test_empty_card_reports_every_field() {
        let errors = validate_card(&CardForm::default());
        assert_eq!(errors.len(), 4);
    }
}
