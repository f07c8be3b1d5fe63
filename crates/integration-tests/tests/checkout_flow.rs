//! End-to-end cart assembly and checkout lifecycle.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use frostline_core::{AccountId, Portion, ProductId};
use frostline_integration_tests::{init_tracing, sample_catalog};
use frostline_storefront::state::Storefront;

#[test]
fn test_browse_assemble_and_check_out() {
    init_tracing();
    let mut store = Storefront::in_memory(sample_catalog());
    store.sign_in(AccountId::new("finlay"));

    // browse: category chips and search box
    assert_eq!(store.catalog().by_category("Frozen").len(), 3);
    let hits = store.catalog().search("chips");
    assert_eq!(hits.len(), 1);
    let chips = hits[0].id.clone();

    // two half-case additions merge into one line of three
    store.add_to_cart(&chips, Portion::Half, 2).unwrap();
    store.add_to_cart(&chips, Portion::Half, 1).unwrap();
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.cart().lines()[0].quantity, 3);
    // 10.00 * 0.5 * 3 = 15.00
    assert_eq!(store.subtotal().amount(), Decimal::new(1500, 2));

    // a non-split product is forced to a full case
    let carrots = ProductId::new("V1");
    let key = store.add_to_cart(&carrots, Portion::Quarter, 2).unwrap();
    assert_eq!(key.portion(), Portion::Full);

    // 15.00 + 4.50 * 2 = 24.00
    assert_eq!(store.subtotal().amount(), Decimal::new(2400, 2));

    let expected_total = store.subtotal();
    let order = store.checkout().unwrap();

    assert!(store.cart().is_empty());
    assert_eq!(order.total(), expected_total);
    assert_eq!(order.lines().len(), 2);
    assert_eq!(store.history(), vec![order.clone()]);
    assert_eq!(order.reference().len(), 6);
}

#[test]
fn test_quantity_clamp_and_removal() {
    init_tracing();
    let mut store = Storefront::in_memory(sample_catalog());
    let peas = ProductId::new("F2");

    let key = store.add_to_cart(&peas, Portion::Full, 2).unwrap();
    assert_eq!(store.set_quantity(&key, -5).unwrap(), 1);
    assert_eq!(store.cart().len(), 1);

    store.remove_line(&key).unwrap();
    assert!(store.cart().is_empty());
}

#[test]
fn test_portion_change_merges_lines() {
    init_tracing();
    let mut store = Storefront::in_memory(sample_catalog());
    let chips = ProductId::new("F1");

    let full = store.add_to_cart(&chips, Portion::Full, 2).unwrap();
    store.add_to_cart(&chips, Portion::Half, 3).unwrap();
    assert_eq!(store.cart().len(), 2);

    let merged = store.change_portion(&full, Portion::Half).unwrap();
    assert_eq!(store.cart().len(), 1);
    let line = &store.cart().lines()[0];
    assert_eq!(line.key(), merged);
    assert_eq!(line.quantity, 5);
}

#[test]
fn test_reorder_is_idempotent_with_fresh_identity() {
    init_tracing();
    let mut store = Storefront::in_memory(sample_catalog());
    store.sign_in(AccountId::new("finlay"));

    store
        .add_to_cart(&ProductId::new("X1"), Portion::Quarter, 4)
        .unwrap();
    store
        .add_to_cart(&ProductId::new("H1"), Portion::Full, 1)
        .unwrap();
    let original = store.checkout().unwrap();

    // "re-order" the latest order and check out again
    let latest = store.latest().unwrap();
    store.load_order(&latest);
    let repeat = store.checkout().unwrap();

    assert_eq!(repeat.lines(), original.lines());
    assert_eq!(repeat.total(), original.total());
    assert_ne!(repeat.id(), original.id());
    assert!(repeat.created_at() >= original.created_at());
    assert_eq!(store.history().len(), 2);
}

#[test]
fn test_checkout_gates() {
    init_tracing();
    let mut store = Storefront::in_memory(sample_catalog());

    // empty cart, signed in
    store.sign_in(AccountId::new("finlay"));
    assert!(store.checkout().is_err());
    assert!(store.history().is_empty());

    // full cart, signed out
    store.sign_out();
    store
        .add_to_cart(&ProductId::new("F1"), Portion::Full, 1)
        .unwrap();
    assert!(store.checkout().is_err());
    assert_eq!(store.cart().len(), 1);
}
