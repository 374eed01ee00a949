//! Cart operation semantics: add, remove, and absolute quantity updates.

#![allow(clippy::unwrap_used)]

use shoebox_cart::cart::CartError;
use shoebox_core::ProductId;

use shoebox_integration_tests::{StubCatalog, cart_with};

fn catalog_with_runner(stock: u32) -> StubCatalog {
    StubCatalog::new().with_product(1, "Trail Runner", 17_990, stock)
}

#[tokio::test]
async fn add_to_empty_cart_inserts_line_with_amount_one() {
    // Empty cart, stock 5: the first add creates the line
    let cart = cart_with(catalog_with_runner(5)).await;

    let snapshot = cart.store.add_product(ProductId::new(1)).await.unwrap();

    assert_eq!(snapshot.items.len(), 1);
    let line = snapshot.items.first().unwrap();
    assert_eq!(line.id, ProductId::new(1));
    assert_eq!(line.amount, 1);
    assert_eq!(line.title, "Trail Runner");
    assert_eq!(line.price.display(), "$179.90");
}

#[tokio::test]
async fn add_at_stock_ceiling_is_rejected() {
    // Cart already holds all 5 units; the sixth add must not mutate
    let mut cart = cart_with(catalog_with_runner(5)).await;
    for _ in 0..5 {
        cart.store.add_product(ProductId::new(1)).await.unwrap();
    }
    while cart.notices.try_recv().is_ok() {}

    let err = cart.store.add_product(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CartError::OutOfStock(_)));
    let snapshot = cart.store.snapshot().await;
    assert_eq!(snapshot.items.first().unwrap().amount, 5);
    assert_eq!(
        cart.notices.try_recv().unwrap().message,
        "Requested quantity is out of stock"
    );
}

#[tokio::test]
async fn repeated_adds_increment_a_single_line() {
    let cart = cart_with(catalog_with_runner(10)).await;

    for _ in 0..3 {
        cart.store.add_product(ProductId::new(1)).await.unwrap();
    }

    let snapshot = cart.store.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items.first().unwrap().amount, 3);
    assert_eq!(snapshot.total_items, 3);
}

#[tokio::test]
async fn remove_drops_the_line() {
    let cart = cart_with(catalog_with_runner(5)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();

    let snapshot = cart.store.remove_product(ProductId::new(1)).await.unwrap();

    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_items, 0);
}

#[tokio::test]
async fn remove_unknown_product_leaves_cart_unchanged() {
    let mut cart = cart_with(catalog_with_runner(5)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    while cart.notices.try_recv().is_ok() {}

    let err = cart
        .store
        .remove_product(ProductId::new(999))
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::NotInCart(id) if id == ProductId::new(999)));
    assert_eq!(cart.store.snapshot().await.items.len(), 1);
    assert_eq!(
        cart.notices.try_recv().unwrap().message,
        "Product is not in the cart"
    );
}

#[tokio::test]
async fn update_within_stock_sets_exact_amount() {
    // Cart has amount 2, stock 10: setting 7 is an absolute set, not relative
    let cart = cart_with(catalog_with_runner(10)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();

    let snapshot = cart
        .store
        .update_product_amount(ProductId::new(1), 7)
        .await
        .unwrap();

    assert_eq!(snapshot.items.first().unwrap().amount, 7);
}

#[tokio::test]
async fn update_beyond_stock_is_rejected() {
    let mut cart = cart_with(catalog_with_runner(5)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    while cart.notices.try_recv().is_ok() {}

    let err = cart
        .store
        .update_product_amount(ProductId::new(1), 9)
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::OutOfStock(_)));
    assert_eq!(cart.store.snapshot().await.items.first().unwrap().amount, 2);
    assert_eq!(
        cart.notices.try_recv().unwrap().message,
        "Requested quantity is out of stock"
    );
}

#[tokio::test]
async fn update_of_missing_product_is_rejected() {
    let cart = cart_with(catalog_with_runner(5)).await;

    let err = cart
        .store
        .update_product_amount(ProductId::new(1), 2)
        .await
        .unwrap_err();

    assert!(matches!(err, CartError::NotInCart(_)));
    assert!(cart.store.snapshot().await.items.is_empty());
}

#[tokio::test]
async fn update_to_zero_or_negative_is_rejected_without_stock_lookup() {
    let cart = cart_with(catalog_with_runner(5)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();

    // Offline catalog proves the validation happens before the lookup
    cart.catalog.set_down(true);

    let err = cart
        .store
        .update_product_amount(ProductId::new(1), 0)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::InvalidAmount(0)));

    let err = cart
        .store
        .update_product_amount(ProductId::new(1), -2)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::InvalidAmount(-2)));

    assert_eq!(cart.store.snapshot().await.items.first().unwrap().amount, 1);
}

#[tokio::test]
async fn catalog_outage_leaves_cart_unchanged() {
    let mut cart = cart_with(catalog_with_runner(5)).await;
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    while cart.notices.try_recv().is_ok() {}

    cart.catalog.set_down(true);
    let err = cart.store.add_product(ProductId::new(1)).await.unwrap_err();

    assert!(matches!(err, CartError::Catalog(_)));
    assert!(!err.is_rejection());
    assert_eq!(cart.store.snapshot().await.items.first().unwrap().amount, 1);
    assert_eq!(
        cart.notices.try_recv().unwrap().message,
        "Failed to add product to the cart"
    );
}

#[tokio::test]
async fn add_of_unknown_product_leaves_cart_unchanged() {
    let cart = cart_with(catalog_with_runner(5)).await;

    let err = cart.store.add_product(ProductId::new(42)).await.unwrap_err();

    assert!(matches!(err, CartError::Catalog(_)));
    assert!(cart.store.snapshot().await.items.is_empty());
}

#[tokio::test]
async fn stock_ceiling_holds_across_add_sequences() {
    // However many adds come in, the line never exceeds the observed stock
    let cart = cart_with(catalog_with_runner(3)).await;

    for _ in 0..10 {
        let _ = cart.store.add_product(ProductId::new(1)).await;
    }

    assert_eq!(cart.store.snapshot().await.items.first().unwrap().amount, 3);
}

#[tokio::test]
async fn ids_stay_unique_across_mixed_operations() {
    let catalog = StubCatalog::new()
        .with_product(1, "Trail Runner", 17_990, 5)
        .with_product(2, "Court Classic", 9_990, 5);
    let cart = cart_with(catalog).await;

    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store.add_product(ProductId::new(2)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store
        .update_product_amount(ProductId::new(2), 3)
        .await
        .unwrap();

    let snapshot = cart.store.snapshot().await;
    let mut ids: Vec<i32> = snapshot.items.iter().map(|l| l.id.as_i32()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), snapshot.items.len());
    // Insertion order is preserved
    assert_eq!(snapshot.items.first().unwrap().id, ProductId::new(1));
}

#[tokio::test]
async fn subtotal_reflects_line_totals() {
    let catalog = StubCatalog::new()
        .with_product(1, "Trail Runner", 10_000, 5)
        .with_product(2, "Court Classic", 5_50, 5);
    let cart = cart_with(catalog).await;

    cart.store.add_product(ProductId::new(1)).await.unwrap();
    cart.store.add_product(ProductId::new(1)).await.unwrap();
    let snapshot = cart.store.add_product(ProductId::new(2)).await.unwrap();

    assert_eq!(snapshot.total_items, 3);
    assert_eq!(snapshot.subtotal, "$205.50");
}
