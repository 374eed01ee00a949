//! The cart state container.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{instrument, warn};

use shoebox_core::ProductId;

use crate::catalog::Catalog;
use crate::db::{KvStore, StorageError};
use crate::notify::Notifier;

use super::{CartError, CartLine, CartSnapshot};

/// Notices shown to the shopper on rejections and faults.
mod notices {
    pub const OUT_OF_STOCK: &str = "Requested quantity is out of stock";
    pub const NOT_IN_CART: &str = "Product is not in the cart";
    pub const INVALID_AMOUNT: &str = "Quantity must be at least 1";
    pub const ADD_FAILED: &str = "Failed to add product to the cart";
    pub const REMOVE_FAILED: &str = "Failed to remove product from the cart";
    pub const UPDATE_FAILED: &str = "Failed to update product quantity";
}

/// The shopper's cart.
///
/// Cheaply cloneable; clones share the same state. Construct one with
/// [`CartStore::load`] and hand it to consumers explicitly.
///
/// Every mutation is a read-modify-write-persist transaction under a single
/// lock, so callers never observe a partial commit and two overlapping
/// operations cannot both read the same pre-commit quantity.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    /// Single-writer lock, held across the stock lookup.
    lines: Mutex<Vec<CartLine>>,
    storage: Arc<dyn KvStore>,
    catalog: Arc<dyn Catalog>,
    storage_key: String,
    notices: Notifier,
}

impl CartStore {
    /// Load the cart from the persistent slot.
    ///
    /// An absent slot yields an empty cart. A blob that does not parse as a
    /// cart also yields an empty cart; the anomaly is logged and the slot is
    /// overwritten by the next successful mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    pub async fn load(
        storage: Arc<dyn KvStore>,
        catalog: Arc<dyn Catalog>,
        storage_key: impl Into<String>,
        notices: Notifier,
    ) -> Result<Self, CartError> {
        let storage_key = storage_key.into();

        let lines = match storage.get(&storage_key).await? {
            Some(blob) => match serde_json::from_str::<Vec<CartLine>>(&blob) {
                Ok(lines) => lines,
                Err(e) => {
                    warn!(error = %e, key = %storage_key, "Discarding unparseable cart blob");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                lines: Mutex::new(lines),
                storage,
                catalog,
                storage_key,
                notices,
            }),
        })
    }

    /// Current cart contents.
    pub async fn snapshot(&self) -> CartSnapshot {
        let lines = self.inner.lines.lock().await;
        CartSnapshot::from_lines(lines.clone())
    }

    /// Total selected quantity across all lines.
    pub async fn total_items(&self) -> u32 {
        let lines = self.inner.lines.lock().await;
        lines.iter().map(|line| line.amount).sum()
    }

    /// Add one unit of `id` to the cart.
    ///
    /// Repeated adds increment the existing line instead of appending a
    /// duplicate. The increment is refused when it would exceed the stock
    /// reported for the product right now.
    ///
    /// # Errors
    ///
    /// Returns `OutOfStock` when the ceiling would be exceeded, or a fault
    /// when a collaborator fails. The cart is unchanged either way.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn add_product(&self, id: ProductId) -> Result<CartSnapshot, CartError> {
        let mut lines = self.inner.lines.lock().await;

        match self.next_with_added(&lines, id).await {
            Ok(next) => match self.commit(&mut lines, next).await {
                Ok(snapshot) => Ok(snapshot),
                Err(e) => Err(self.fault(e, notices::ADD_FAILED)),
            },
            Err(e @ CartError::OutOfStock(_)) => {
                self.inner.notices.error(notices::OUT_OF_STOCK);
                Err(e)
            }
            Err(e) => Err(self.fault(e, notices::ADD_FAILED)),
        }
    }

    /// Remove the line for `id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns `NotInCart` when no such line exists, or a fault when the
    /// commit fails. The cart is unchanged either way.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn remove_product(&self, id: ProductId) -> Result<CartSnapshot, CartError> {
        let mut lines = self.inner.lines.lock().await;

        if !lines.iter().any(|line| line.id == id) {
            self.inner.notices.error(notices::NOT_IN_CART);
            return Err(CartError::NotInCart(id));
        }

        let next: Vec<CartLine> = lines.iter().filter(|line| line.id != id).cloned().collect();
        match self.commit(&mut lines, next).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => Err(self.fault(e, notices::REMOVE_FAILED)),
        }
    }

    /// Set the quantity for `id` to exactly `amount`.
    ///
    /// Zero and negative quantities are rejected; removal is a separate
    /// operation. The new quantity must not exceed the stock reported for
    /// the product right now.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount`, `OutOfStock`, or `NotInCart` on rejection,
    /// or a fault when a collaborator fails. The cart is unchanged either way.
    #[instrument(skip(self), fields(product_id = %id, amount))]
    pub async fn update_product_amount(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<CartSnapshot, CartError> {
        if amount <= 0 {
            self.inner.notices.error(notices::INVALID_AMOUNT);
            return Err(CartError::InvalidAmount(amount));
        }

        let mut lines = self.inner.lines.lock().await;

        let stock = match self.inner.catalog.stock(id).await {
            Ok(stock) => stock,
            Err(e) => return Err(self.fault(e.into(), notices::UPDATE_FAILED)),
        };
        if amount > i64::from(stock.amount) {
            self.inner.notices.error(notices::OUT_OF_STOCK);
            return Err(CartError::OutOfStock(id));
        }

        if !lines.iter().any(|line| line.id == id) {
            self.inner.notices.error(notices::NOT_IN_CART);
            return Err(CartError::NotInCart(id));
        }

        // The ceiling check above bounds `amount` by a u32
        let amount = u32::try_from(amount).map_err(|_| CartError::InvalidAmount(amount))?;

        let mut next = lines.clone();
        for line in &mut next {
            if line.id == id {
                line.amount = amount;
            }
        }
        match self.commit(&mut lines, next).await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => Err(self.fault(e, notices::UPDATE_FAILED)),
        }
    }

    /// Compute the sequence with one more unit of `id`.
    ///
    /// Works on a copy; the committed state is never mutated in place.
    async fn next_with_added(
        &self,
        lines: &[CartLine],
        id: ProductId,
    ) -> Result<Vec<CartLine>, CartError> {
        let stock = self.inner.catalog.stock(id).await?;

        let current = lines
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.amount);
        let desired = current + 1;
        if desired > stock.amount {
            return Err(CartError::OutOfStock(id));
        }

        let mut next = lines.to_vec();
        if let Some(line) = next.iter_mut().find(|line| line.id == id) {
            line.amount = desired;
        } else {
            let product = self.inner.catalog.product(id).await?;
            next.push(CartLine {
                id: product.id,
                title: product.title,
                price: product.price,
                image: product.image,
                amount: 1,
            });
        }
        Ok(next)
    }

    /// Persist `next` and swap it into memory.
    ///
    /// The slot is written before the in-memory swap, so a storage fault
    /// leaves both memory and the slot at the previous committed state.
    async fn commit(
        &self,
        lines: &mut Vec<CartLine>,
        next: Vec<CartLine>,
    ) -> Result<CartSnapshot, CartError> {
        let blob = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.inner.storage.put(&self.inner.storage_key, &blob).await?;

        let snapshot = CartSnapshot::from_lines(next.clone());
        *lines = next;
        Ok(snapshot)
    }

    /// Record a fault: log it, notify the shopper, hand the error back.
    fn fault(&self, error: CartError, notice: &str) -> CartError {
        tracing::error!(error = %error, "Cart operation failed");
        self.inner.notices.error(notice);
        error
    }
}
