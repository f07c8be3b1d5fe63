//! The per-account order ledger.
//!
//! Checkout freezes the working cart into an immutable [`Order`] and
//! prepends it to the account's persisted history. The history never
//! shrinks; there is no delete or edit operation. Re-ordering loads an
//! order's snapshot back into the cart without touching the ledger.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, OrderStore, PersistenceError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use frostline_core::{AccountId, OrderId, Price};

use crate::cart::{Cart, CartLine};

/// Errors that can occur during checkout.
///
/// On any failure the ledger and the working cart are left unchanged.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The working cart has no lines.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// No account is signed in.
    #[error("checkout requires a signed-in account")]
    NoActiveAccount,

    /// The checkout write failed; the order is not committed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// An immutable snapshot of a checked-out cart.
///
/// Created only by [`OrderLedger::checkout`]; never mutated afterwards. The
/// line snapshots are deep copies, not shared with the live cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    lines: Vec<CartLine>,
    total: Price,
}

impl Order {
    /// The unique order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// When the order was placed.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The frozen line snapshots, in cart order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The order total: the cart subtotal at the moment of checkout.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Six-character display reference, e.g. for "Order placed • #A1B2C3".
    #[must_use]
    pub fn reference(&self) -> String {
        self.id.short_ref()
    }

    /// Reconstruct this order's lines and install them as the working cart,
    /// replacing whatever was there.
    ///
    /// This is how "re-order" and "modify" operate; the ledger itself is not
    /// touched.
    pub fn load_into_cart(&self, cart: &mut Cart) {
        cart.replace_lines(self.lines.clone());
    }
}

/// Append-only, per-account order history over an injected [`OrderStore`].
#[derive(Debug)]
pub struct OrderLedger<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderLedger<S> {
    /// Create a ledger over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Freeze the working cart into a new [`Order`] for the given account.
    ///
    /// On success the order is prepended to the account's history, the save
    /// is persisted, the cart is cleared, and the order is returned. A
    /// failed save propagates and the cart is left intact: the order is not
    /// committed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines,
    /// [`CheckoutError::NoActiveAccount`] if `account` is `None`, and
    /// [`CheckoutError::Persistence`] if the history write fails.
    #[instrument(skip(self, cart))]
    pub fn checkout(
        &self,
        account: Option<&AccountId>,
        cart: &mut Cart,
    ) -> Result<Order, CheckoutError> {
        let account = account.ok_or(CheckoutError::NoActiveAccount)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order = Order {
            id: OrderId::generate(),
            created_at: Utc::now(),
            lines: cart.lines().to_vec(),
            total: cart.subtotal(),
        };

        let mut history = self.load_or_empty(account);
        history.insert(0, order.clone());
        self.store.save(account, &history)?;

        cart.clear();
        tracing::info!(
            order = %order.id(),
            reference = %order.reference(),
            total = %order.total(),
            "order placed"
        );
        Ok(order)
    }

    /// The account's full order history, newest first.
    ///
    /// An account that has never checked out has an empty history. A load
    /// failure also degrades to an empty history: losing history display is
    /// preferable to blocking the session.
    #[must_use]
    pub fn history(&self, account: &AccountId) -> Vec<Order> {
        self.load_or_empty(account)
    }

    /// The account's most recent order, if any.
    #[must_use]
    pub fn latest(&self, account: &AccountId) -> Option<Order> {
        self.history(account).into_iter().next()
    }

    fn load_or_empty(&self, account: &AccountId) -> Vec<Order> {
        match self.store.load(account) {
            Ok(orders) => orders,
            Err(e) => {
                tracing::warn!(account = %account, "failed to load order history: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    use frostline_core::{Portion, ProductId};

    use crate::catalog::Product;

    fn product(id: &str, price_cents: i64, splittable: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: "Frozen".to_owned(),
            pack: "10 kg case".to_owned(),
            description: None,
            price: Price::new(Decimal::new(price_cents, 2)).unwrap(),
            splittable,
        }
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_line(&product("F1", 1000, true), Portion::Half, 2)
            .unwrap();
        cart.add_line(&product("F2", 450, false), Portion::Full, 1)
            .unwrap();
        cart
    }

    #[test]
    fn test_checkout_freezes_cart_into_order() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");
        let mut cart = filled_cart();
        let expected_total = cart.subtotal();

        let order = ledger.checkout(Some(&account), &mut cart).unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.total(), expected_total);
        assert_eq!(order.lines().len(), 2);
        assert_eq!(ledger.history(&account), vec![order]);
    }

    #[test]
    fn test_checkout_empty_cart_fails_without_mutation() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");
        let mut cart = Cart::new();

        assert!(matches!(
            ledger.checkout(Some(&account), &mut cart),
            Err(CheckoutError::EmptyCart)
        ));
        assert!(ledger.history(&account).is_empty());
    }

    #[test]
    fn test_checkout_without_account_fails() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let mut cart = filled_cart();

        assert!(matches!(
            ledger.checkout(None, &mut cart),
            Err(CheckoutError::NoActiveAccount)
        ));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_failed_save_leaves_cart_intact() {
        let store = MemoryStore::new();
        store.set_fail_saves(true);
        let ledger = OrderLedger::new(store);
        let account = AccountId::new("alice");
        let mut cart = filled_cart();

        assert!(matches!(
            ledger.checkout(Some(&account), &mut cart),
            Err(CheckoutError::Persistence(_))
        ));
        assert_eq!(cart.len(), 2);
        assert!(ledger.history(&account).is_empty());
    }

    #[test]
    fn test_history_newest_first() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");

        let mut cart = filled_cart();
        let first = ledger.checkout(Some(&account), &mut cart).unwrap();
        cart.add_line(&product("F3", 600, true), Portion::Full, 1)
            .unwrap();
        let second = ledger.checkout(Some(&account), &mut cart).unwrap();

        let history = ledger.history(&account);
        assert_eq!(history, vec![second.clone(), first]);
        assert_eq!(ledger.latest(&account), Some(second));
    }

    #[test]
    fn test_history_is_scoped_per_account() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let alice = AccountId::new("alice");
        let bob = AccountId::new("bob");

        let mut cart = filled_cart();
        ledger.checkout(Some(&alice), &mut cart).unwrap();

        assert_eq!(ledger.history(&alice).len(), 1);
        assert!(ledger.history(&bob).is_empty());
        assert!(ledger.latest(&bob).is_none());
    }

    #[test]
    fn test_load_into_cart_replaces_working_cart() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");
        let mut cart = filled_cart();
        let order = ledger.checkout(Some(&account), &mut cart).unwrap();

        cart.add_line(&product("F9", 999, true), Portion::Full, 4)
            .unwrap();
        order.load_into_cart(&mut cart);

        assert_eq!(cart.lines(), order.lines());
        assert_eq!(cart.subtotal(), order.total());
        // the ledger itself is untouched
        assert_eq!(ledger.history(&account).len(), 1);
    }

    #[test]
    fn test_reorder_produces_equal_lines_with_fresh_identity() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");
        let mut cart = filled_cart();
        let original = ledger.checkout(Some(&account), &mut cart).unwrap();

        original.load_into_cart(&mut cart);
        let repeat = ledger.checkout(Some(&account), &mut cart).unwrap();

        assert_eq!(repeat.lines(), original.lines());
        assert_eq!(repeat.total(), original.total());
        assert_ne!(repeat.id(), original.id());
    }

    #[test]
    fn test_order_serde_roundtrip() {
        let ledger = OrderLedger::new(MemoryStore::new());
        let account = AccountId::new("alice");
        let mut cart = filled_cart();
        let order = ledger.checkout(Some(&account), &mut cart).unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
