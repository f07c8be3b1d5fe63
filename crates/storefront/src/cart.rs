//! The cart engine: mergeable, priced lines for the current session.
//!
//! A cart line is identified by its (product, portion) pair. Adding the same
//! product in the same portion merges into the existing line; a different
//! portion is a distinct line. Each line captures the product's price at
//! add-time so later portion changes recompute against the original price
//! without re-reading the catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use frostline_core::{Portion, Price, ProductId};

use crate::catalog::Product;

/// Errors that can occur during cart operations.
///
/// Every failure leaves the cart unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity is zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// No line in the cart matches the given key.
    #[error("no cart line for {0}")]
    LineNotFound(LineKey),
}

/// The identity of a cart line: a (product, portion) pair.
///
/// Two additions with the same key merge into one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    product: ProductId,
    portion: Portion,
}

impl LineKey {
    /// Create a line key.
    #[must_use]
    pub const fn new(product: ProductId, portion: Portion) -> Self {
        Self { product, portion }
    }

    /// The product half of the key.
    #[must_use]
    pub const fn product(&self) -> &ProductId {
        &self.product
    }

    /// The portion half of the key.
    #[must_use]
    pub const fn portion(&self) -> Portion {
        self.portion
    }
}

impl core::fmt::Display for LineKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.product, self.portion)
    }
}

/// A purchasable entry in the working cart.
///
/// The name and pack descriptor are captured alongside the price so order
/// snapshots stay renderable even if the catalog changes underneath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product this line references.
    pub product: ProductId,
    /// Display name captured at add-time.
    pub name: String,
    /// Pack descriptor captured at add-time.
    pub pack: String,
    /// The chosen portion.
    pub portion: Portion,
    /// Units of the chosen portion. Never below 1.
    pub quantity: u32,
    /// The product's full-case price at add-time.
    pub base_price: Price,
}

impl CartLine {
    fn from_product(product: &Product, portion: Portion, quantity: u32) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            pack: product.pack.clone(),
            portion,
            quantity,
            base_price: product.price,
        }
    }

    /// This line's identity key.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.clone(), self.portion)
    }

    /// Line total: `base_price × portion factor × quantity`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.base_price * self.portion.factor() * self.quantity
    }
}

/// The working cart for the current session.
///
/// Invariant: no two lines share a [`LineKey`].
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product to the cart.
    ///
    /// Products that are not split-eligible are forced to [`Portion::Full`]
    /// regardless of the requested portion. If a line with the resulting key
    /// already exists its quantity is incremented; otherwise a new line is
    /// appended with the product's current price captured as `base_price`.
    ///
    /// Returns the effective line key (which may differ from the requested
    /// portion when forcing applies).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is zero.
    pub fn add_line(
        &mut self,
        product: &Product,
        portion: Portion,
        quantity: u32,
    ) -> Result<LineKey, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let portion = if product.splittable {
            portion
        } else {
            Portion::Full
        };
        let key = LineKey::new(product.id.clone(), portion);
        if let Some(line) = self.line_mut(&key) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(key);
        }
        self.lines
            .push(CartLine::from_product(product, portion, quantity));
        Ok(key)
    }

    /// Adjust a line's quantity by `delta`, clamping at 1.
    ///
    /// Clamping never removes the line; removal is [`Cart::remove_line`].
    /// Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line matches `key`.
    pub fn set_quantity(&mut self, key: &LineKey, delta: i32) -> Result<u32, CartError> {
        let line = self
            .line_mut(key)
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        let proposed = i64::from(line.quantity) + i64::from(delta);
        line.quantity = u32::try_from(proposed.max(1)).unwrap_or(u32::MAX);
        Ok(line.quantity)
    }

    /// Change a line's portion.
    ///
    /// If another line already owns the new (product, portion) key the two
    /// merge: quantities are summed into the surviving line and the changed
    /// line is removed. This is the only operation that reduces the line
    /// count without an explicit remove. The captured `base_price` is never
    /// altered; only the multiplier applied at total-computation time
    /// changes.
    ///
    /// Returns the new line key.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line matches `key`.
    pub fn change_portion(&mut self, key: &LineKey, portion: Portion) -> Result<LineKey, CartError> {
        let idx = self
            .position(key)
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        let new_key = LineKey::new(key.product().clone(), portion);
        if new_key == *key {
            return Ok(new_key);
        }
        let moved = self.lines.remove(idx);
        match self.position(&new_key) {
            Some(target) => {
                if let Some(existing) = self.lines.get_mut(target) {
                    existing.quantity = existing.quantity.saturating_add(moved.quantity);
                }
            }
            None => {
                let mut line = moved;
                line.portion = portion;
                self.lines.insert(idx, line);
            }
        }
        Ok(new_key)
    }

    /// Remove a line unconditionally, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if no line matches `key`.
    pub fn remove_line(&mut self, key: &LineKey) -> Result<CartLine, CartError> {
        let idx = self
            .position(key)
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        Ok(self.lines.remove(idx))
    }

    /// The cart subtotal: sum of all line totals, recomputed on demand.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLine::total).sum()
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// All lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Replace the working cart with the given lines.
    pub(crate) fn replace_lines(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.lines
            .iter()
            .position(|l| l.product == *key.product() && l.portion == key.portion())
    }

    fn line_mut(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product == *key.product() && l.portion == key.portion())
    }
}
