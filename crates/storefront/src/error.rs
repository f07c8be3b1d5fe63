//! Unified error type for the storefront facade.
//!
//! The individual engine modules define their own error enums; this type
//! wraps them for callers that drive the whole storefront through
//! [`crate::state::Storefront`].

use thiserror::Error;

use frostline_core::ProductId;

use crate::cart::CartError;
use crate::orders::CheckoutError;

/// Facade-level error for storefront operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested product is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// A cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}
