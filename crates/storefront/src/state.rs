//! The storefront facade: catalog, cart, ledger, and session in one place.
//!
//! A UI layer drives one [`Storefront`] per browsing context. The facade
//! wires the session's account into the ledger and resolves product ids
//! against the catalog, so callers work in terms of ids and line keys.

use frostline_core::{AccountId, Portion, Price, ProductId};

use crate::cart::{Cart, CartLine, LineKey};
use crate::catalog::{Catalog, Product};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::orders::{JsonFileStore, MemoryStore, Order, OrderLedger, OrderStore};
use crate::recommend;
use crate::session::Session;

/// One browsing context's storefront: catalog, working cart, order ledger,
/// and session.
#[derive(Debug)]
pub struct Storefront<S: OrderStore> {
    catalog: Catalog,
    cart: Cart,
    ledger: OrderLedger<S>,
    session: Session,
    recommendation_limit: usize,
}

impl Storefront<MemoryStore> {
    /// A storefront over an in-memory order store. History lives only for
    /// the lifetime of this value; useful for tests and demos.
    #[must_use]
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::new(catalog, MemoryStore::new())
    }
}

impl Storefront<JsonFileStore> {
    /// A storefront with file-backed order history, per configuration.
    #[must_use]
    pub fn from_config(config: &StoreConfig, catalog: Catalog) -> Self {
        Self::new(catalog, JsonFileStore::new(config.data_dir.clone()))
            .with_recommendation_limit(config.recommendation_limit)
    }
}

impl<S: OrderStore> Storefront<S> {
    /// Create a storefront over the given catalog and order store.
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            ledger: OrderLedger::new(store),
            session: Session::new(),
            recommendation_limit: recommend::DEFAULT_LIMIT,
        }
    }

    /// Override how many recommended products to surface.
    #[must_use]
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The working cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Install an externally authenticated account.
    pub fn sign_in(&mut self, account: AccountId) {
        self.session.sign_in(account);
    }

    /// Clear the active account. The working cart is kept; it belongs to the
    /// browsing context, not the account.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add a product to the cart by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownProduct`] if the id is not in the
    /// catalog, or a wrapped [`crate::cart::CartError`] from the cart
    /// engine.
    pub fn add_to_cart(
        &mut self,
        product: &ProductId,
        portion: Portion,
        quantity: u32,
    ) -> Result<LineKey, StoreError> {
        let product = self
            .catalog
            .get(product)
            .ok_or_else(|| StoreError::UnknownProduct(product.clone()))?;
        Ok(self.cart.add_line(product, portion, quantity)?)
    }

    /// Adjust a cart line's quantity by `delta`, clamping at 1.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`crate::cart::CartError::LineNotFound`] if no line
    /// matches.
    pub fn set_quantity(&mut self, key: &LineKey, delta: i32) -> Result<u32, StoreError> {
        Ok(self.cart.set_quantity(key, delta)?)
    }

    /// Change a cart line's portion, merging with an existing line if the
    /// new key collides.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`crate::cart::CartError::LineNotFound`] if no line
    /// matches.
    pub fn change_portion(&mut self, key: &LineKey, portion: Portion) -> Result<LineKey, StoreError> {
        Ok(self.cart.change_portion(key, portion)?)
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`crate::cart::CartError::LineNotFound`] if no line
    /// matches.
    pub fn remove_line(&mut self, key: &LineKey) -> Result<CartLine, StoreError> {
        Ok(self.cart.remove_line(key)?)
    }

    /// The cart subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.cart.subtotal()
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Check out the working cart for the signed-in account.
    ///
    /// # Errors
    ///
    /// Returns a wrapped [`crate::orders::CheckoutError`]: `NoActiveAccount`
    /// when signed out, `EmptyCart` for an empty cart, or `Persistence` if
    /// the history write fails (in which case the cart is left intact).
    pub fn checkout(&mut self) -> Result<Order, StoreError> {
        Ok(self.ledger.checkout(self.session.account(), &mut self.cart)?)
    }

    /// The signed-in account's order history, newest first. Empty when
    /// signed out.
    #[must_use]
    pub fn history(&self) -> Vec<Order> {
        self.session
            .account()
            .map(|account| self.ledger.history(account))
            .unwrap_or_default()
    }

    /// The signed-in account's most recent order, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Order> {
        self.session
            .account()
            .and_then(|account| self.ledger.latest(account))
    }

    /// Load an order's snapshot into the working cart, replacing its
    /// contents ("re-order" / "modify").
    pub fn load_order(&mut self, order: &Order) {
        order.load_into_cart(&mut self.cart);
    }

    /// The signed-in account's "frequently bought" products. Empty when
    /// signed out.
    #[must_use]
    pub fn frequently_bought(&self) -> Vec<Product> {
        self.session.account().map_or_else(Vec::new, |account| {
            let history = self.ledger.history(account);
            recommend::frequently_bought(&history, &self.catalog, self.recommendation_limit)
        })
    }
}
