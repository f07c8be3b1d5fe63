//! "Frequently bought" recommendations derived from order history.
//!
//! A pure, read-only derivation: tally cumulative purchased quantity per
//! product across the account's entire ledger, rank descending, and resolve
//! against the current catalog. Nothing is cached or persisted; call volume
//! is human-interactive, so recomputing per call is fine.

use std::collections::HashMap;

use frostline_core::ProductId;

use crate::catalog::{Catalog, Product};
use crate::orders::Order;

/// Default number of recommended products to surface.
pub const DEFAULT_LIMIT: usize = 6;

/// Rank the most frequently bought products across an order history.
///
/// Quantities accumulate per product over every line of every order. The
/// history iterates newest first and the sort is stable, so ties favor more
/// recently purchased products. Products no longer present in the catalog
/// are silently dropped, so the result may be shorter than `limit`.
#[must_use]
pub fn frequently_bought(history: &[Order], catalog: &Catalog, limit: usize) -> Vec<Product> {
    let mut counts: HashMap<&ProductId, u64> = HashMap::new();
    // first-encounter order, for the tie-break
    let mut ranked: Vec<&ProductId> = Vec::new();

    for order in history {
        for line in order.lines() {
            if !counts.contains_key(&line.product) {
                ranked.push(&line.product);
            }
            *counts.entry(&line.product).or_insert(0) += u64::from(line.quantity);
        }
    }

    ranked.sort_by_key(|id| std::cmp::Reverse(counts.get(id).copied().unwrap_or(0)));
    ranked
        .into_iter()
        .take(limit)
        .filter_map(|id| catalog.get(id).cloned())
        .collect()
}
