//! Integration tests for Frostline.
//!
//! The tests exercise the full storefront flow - browse, cart assembly,
//! checkout, history, re-order, recommendations - through the public facade,
//! with both the in-memory and the file-backed order stores. No network or
//! database is required.
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart assembly and the checkout lifecycle
//! - `recommendations` - "Frequently bought" ranking over order history
//! - `persistence` - File-backed history across sessions and failure paths

use std::path::PathBuf;

use rust_decimal::Decimal;

use frostline_core::{Price, ProductId};
use frostline_storefront::catalog::{Catalog, Product};

/// Initialize test logging once; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh scratch directory for file-backed stores.
#[must_use]
pub fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "frostline-it-{tag}-{}",
        uuid::Uuid::new_v4().simple()
    ))
}

/// Build a product fixture.
///
/// # Panics
///
/// Panics if `price_cents` is negative; fixtures use valid prices.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, name: &str, category: &str, price_cents: i64, splittable: bool) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        pack: "10 kg case".to_owned(),
        description: None,
        price: Price::new(Decimal::new(price_cents, 2)).unwrap(),
        splittable,
    }
}

/// The sample wholesale catalog used across the integration tests.
///
/// # Panics
///
/// Panics on duplicate ids; the fixture has none.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product("F1", "Chips 4x2.5kg", "Frozen", 1000, true),
        product("F2", "Garden Peas", "Frozen", 850, true),
        product("F3", "Sweetcorn", "Frozen", 725, false),
        product("V1", "Carrots", "Vegetables", 450, false),
        product("V2", "Onions", "Vegetables", 380, false),
        product("S1", "Mixed Leaf Salad", "Salads", 620, true),
        product("H1", "Basil", "Herbs", 290, false),
        product("X1", "Dragon Fruit", "Exotics", 1550, true),
    ])
    .unwrap()
}
