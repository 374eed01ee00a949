//! Cart state container.
//!
//! # Architecture
//!
//! One [`CartStore`] owns the in-memory cart and mirrors it into the
//! persistent slot after every successful mutation. All mutations run under
//! a single-writer lock held across the stock lookup, so overlapping
//! operations cannot both read the same pre-commit state and lose an update.
//!
//! Collaborators (storage, catalog, notifier) are injected at construction;
//! there is no ambient/global cart.

mod line;
mod store;

pub use line::{CartLine, CartSnapshot};
pub use store::CartStore;

use thiserror::Error;

use shoebox_core::ProductId;

use crate::catalog::CatalogError;
use crate::db::StorageError;

/// Errors from cart operations.
///
/// `OutOfStock`, `NotInCart`, and `InvalidAmount` are business rejections:
/// the cart is unchanged and the shopper has been notified, but nothing is
/// broken. The remaining variants are faults in a collaborator; the cart is
/// also left unchanged for those.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity exceeds the reported stock.
    #[error("requested quantity for product {0} is out of stock")]
    OutOfStock(ProductId),

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Quantities below one are not representable as a cart line.
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidAmount(i64),

    /// Catalog/stock lookup failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Persisting the cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Whether this is a handled business rejection rather than a fault.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::OutOfStock(_) | Self::NotInCart(_) | Self::InvalidAmount(_)
        )
    }
}
