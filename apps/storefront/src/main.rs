//! # BookHaven Storefront Driver
//!
//! A headless stand-in for the rendering layer: it drives every core
//! operation the way the UI would, end to end.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ──► tracing-subscriber, RUST_LOG override       │
//! │  2. Open the Store     ──► FileStorage under BOOKHAVEN_DATA_DIR        │
//! │                            (built ONCE here, passed down by reference) │
//! │  3. Browse the catalog ──► filter + sort                               │
//! │  4. Fill the cart      ──► add/merge/adjust, wishlist toggle           │
//! │  5. Log in             ──► simulated 1.5s delay                        │
//! │  6. Check out          ──► step machine, promo, gift wrap              │
//! │  7. Place the order    ──► simulated 2.5s settlement, cart cleared     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both simulated delays are plain awaited sleeps owned by this function:
//! dropping the future cancels them, so nothing can mutate state after the
//! flow is gone.

mod data;

use std::time::Duration;

use anyhow::{ensure, Context, Result};
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookhaven_core::catalog::{self, BookFilter, SortKey};
use bookhaven_core::checkout::{CheckoutSession, CheckoutStep, PaymentOutcome, PromoState};
use bookhaven_core::money::Money;
use bookhaven_core::pricing::{self, CheckoutSelections, PricingConfig};
use bookhaven_core::types::{BookFormat, ShippingMethod};
use bookhaven_store::{FileStorage, Store};

/// Simulated authentication delay (no real credential check happens).
const LOGIN_DELAY: Duration = Duration::from_millis(1500);

/// Simulated settlement delay (no real gateway call happens).
const SETTLEMENT_DELAY: Duration = Duration::from_millis(2500);

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("Starting BookHaven storefront driver");

    let data_dir =
        std::env::var("BOOKHAVEN_DATA_DIR").unwrap_or_else(|_| "bookhaven-data".to_string());
    let storage = FileStorage::new(&data_dir).context("opening local storage")?;
    let mut store = Store::open(storage);

    let books = data::sample_catalog();

    // --- Browse: fiction under $30, best-rated first -------------------------
    let filter = BookFilter {
        category: Some("fiction".to_string()),
        price_max: Some(Money::from_cents(3000)),
        ..Default::default()
    };
    let picks = catalog::browse(&books, &filter, SortKey::Rating);
    println!("Fiction under $30, best rated first:");
    for book in &picks {
        println!(
            "  {:<34} {:<16} {:>7}  ({:.1}★, {} reviews)",
            book.title,
            book.author,
            book.price().to_string(),
            book.rating,
            book.reviews
        );
    }

    // --- Cart ----------------------------------------------------------------
    let top = picks.first().context("catalog returned no fiction")?;
    let runner_up = picks.get(1).context("catalog returned one book")?;

    store.add_to_cart(top, BookFormat::Paperback);
    store.add_to_cart(top, BookFormat::Paperback); // same line item, quantity 2
    store.add_to_cart(runner_up, BookFormat::Hardcover); // +$8.00 format delta

    store.add_to_wishlist(runner_up);
    info!(
        count = store.cart_count(),
        total = %store.cart_total(),
        "Cart filled"
    );

    // --- Cart panel quote ----------------------------------------------------
    // The cart panel owns its own promo cycle, separate from the checkout
    // promo box, against the same code table.
    let config = PricingConfig::default();
    let mut panel_promo = PromoState::default();
    panel_promo.input = "bookworm15".to_string();
    panel_promo.apply(&config);

    let panel = pricing::quote(
        store.cart(),
        &CheckoutSelections {
            shipping: ShippingMethod::Standard,
            promo_rate: panel_promo.rate(),
            gift_wrap: false,
        },
        &config,
    );
    println!(
        "\nCart panel: subtotal {}, promo -{}, shipping {}, tax {}, total {}",
        panel.subtotal, panel.discount, panel.shipping, panel.tax, panel.total
    );
    if panel.subtotal < config.free_shipping_threshold {
        println!(
            "  Add {} for free shipping",
            config.free_shipping_threshold - panel.subtotal
        );
    }

    // --- Login (simulated) ---------------------------------------------------
    sleep(LOGIN_DELAY).await;
    store.login("", "reader@bookhaven.example"); // name falls back to "reader"
    info!(user = store.user().map(|u| u.name.as_str()).unwrap_or(""), "Logged in");

    // --- Checkout ------------------------------------------------------------
    let mut session = CheckoutSession::new(config);

    ensure!(session.advance(), "cart step should advance freely");

    session.address.first_name = "Avery".to_string();
    session.address.last_name = "Reed".to_string();
    session.address.email = "reader@bookhaven.example".to_string();
    session.address.phone = "+1 555 010 4477".to_string();
    session.address.line1 = "123 Reading Lane".to_string();
    session.address.city = "New York".to_string();
    session.address.state = "New York".to_string();
    session.address.zip = "10001".to_string();
    ensure!(
        session.advance(),
        "address validation failed: {:?}",
        session.address_errors()
    );

    session.shipping = ShippingMethod::Express;
    ensure!(session.advance(), "shipping step should advance freely");

    session.card.number = "4242 4242 4242 4242".to_string();
    session.card.name = "Avery Reed".to_string();
    session.card.expiry = "11/28".to_string();
    session.card.cvv = "123".to_string();
    ensure!(
        session.advance(),
        "card validation failed: {:?}",
        session.card_errors()
    );
    ensure!(session.step() == CheckoutStep::Review, "expected review step");

    session.promo.input = "reader20".to_string();
    session.apply_promo();
    session.gift_wrap = true;
    session.gift_note = "Happy reading!".to_string();

    let totals = session.totals(store.cart());
    println!("\nOrder summary ({} items):", store.cart_count());
    println!("  Subtotal   {:>8}", totals.subtotal.to_string());
    if let Some(promo) = session.promo.applied() {
        println!(
            "  Promo      {:>8}  ({}, -{:.0}%)",
            format!("-{}", totals.discount),
            promo.code,
            promo.rate.percentage()
        );
    }
    println!(
        "  Shipping   {:>8}  ({})",
        totals.shipping.to_string(),
        session.shipping.label()
    );
    println!("  Gift wrap  {:>8}", totals.gift_wrap.to_string());
    println!("  Tax (8%)   {:>8}", totals.tax.to_string());
    println!("  Total      {:>8}", totals.total.to_string());

    // --- Place the order -----------------------------------------------------
    session.place_order()?;
    info!("Processing payment");
    sleep(SETTLEMENT_DELAY).await;
    session.complete_order(PaymentOutcome::Approved)?;
    store.clear_cart();

    ensure!(session.order_done(), "order should be done after approval");
    println!(
        "\nOrder {} confirmed - arriving in {} business days. Thank you!",
        session.order_number(),
        session.shipping.delivery_days()
    );

    Ok(())
}

/// Installs the tracing subscriber. `RUST_LOG` overrides the default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bookhaven_store=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
