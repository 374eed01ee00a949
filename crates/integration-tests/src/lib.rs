//! Integration tests for Shoebox.
//!
//! These tests exercise the cart store end-to-end against in-process
//! collaborators: a scripted catalog and the in-memory storage backend.
//! No network and no database are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoebox-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Operation semantics (add, remove, update)
//! - `persistence` - Slot round-trips and load behavior
//! - `concurrency` - Overlapping operations on one store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, broadcast};

use shoebox_cart::cart::CartStore;
use shoebox_cart::catalog::{Catalog, CatalogError, CatalogProduct, StockLevel};
use shoebox_cart::db::MemoryKvStore;
use shoebox_cart::notify::{Notice, Notifier};
use shoebox_core::{Price, ProductId};

/// Slot key used by every test cart.
pub const STORAGE_KEY: &str = "shoebox:cart";

/// Scripted catalog for tests.
///
/// Serves products and stock from in-memory tables. `set_down(true)` makes
/// every lookup fail the way an unreachable service would.
#[derive(Default)]
pub struct StubCatalog {
    products: HashMap<ProductId, CatalogProduct>,
    stock: Mutex<HashMap<ProductId, u32>>,
    down: AtomicBool,
}

impl StubCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product (price in cents) with its available stock.
    #[must_use]
    pub fn with_product(mut self, id: i32, title: &str, price_cents: i64, stock: u32) -> Self {
        let id = ProductId::new(id);
        self.products.insert(
            id,
            CatalogProduct {
                id,
                title: title.to_string(),
                price: Price::new(Decimal::new(price_cents, 2)),
                image: format!("https://cdn.shoebox.test/{id}.jpg"),
            },
        );
        self.stock.get_mut().insert(id, stock);
        self
    }

    /// Adjust the reported stock for a product.
    pub async fn set_stock(&self, id: i32, amount: u32) {
        self.stock.lock().await.insert(ProductId::new(id), amount);
    }

    /// Take the catalog offline; every lookup fails until turned back on.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check_up(&self) -> Result<(), CatalogError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CatalogError::UnexpectedStatus {
                status: 503,
                body: "catalog offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for StubCatalog {
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError> {
        self.check_up()?;
        self.products
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("products/{id}")))
    }

    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError> {
        self.check_up()?;
        self.stock
            .lock()
            .await
            .get(&id)
            .copied()
            .map(|amount| StockLevel { id, amount })
            .ok_or_else(|| CatalogError::NotFound(format!("stock/{id}")))
    }
}

/// Everything a cart test needs: the store plus handles to its collaborators.
pub struct TestCart {
    pub store: CartStore,
    pub storage: MemoryKvStore,
    pub catalog: Arc<StubCatalog>,
    pub notices: broadcast::Receiver<Notice>,
}

/// Build a cart store over fresh in-memory storage and the given catalog.
///
/// # Panics
///
/// Panics if the store cannot be loaded, which the in-memory backend never
/// causes.
pub async fn cart_with(catalog: StubCatalog) -> TestCart {
    cart_over(MemoryKvStore::new(), Arc::new(catalog)).await
}

/// Build a cart store over existing storage, e.g. to test reloads.
///
/// # Panics
///
/// Panics if the store cannot be loaded, which the in-memory backend never
/// causes.
pub async fn cart_over(storage: MemoryKvStore, catalog: Arc<StubCatalog>) -> TestCart {
    let notifier = Notifier::default();
    let notices = notifier.subscribe();

    let store = CartStore::load(
        Arc::new(storage.clone()),
        catalog.clone(),
        STORAGE_KEY,
        notifier,
    )
    .await
    .expect("in-memory load cannot fail");

    TestCart {
        store,
        storage,
        catalog,
        notices,
    }
}
