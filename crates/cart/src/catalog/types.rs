//! Domain types for the catalog/stock service.
//!
//! These types mirror the catalog's JSON payloads and double as the
//! descriptive half of a cart line-item.

use serde::{Deserialize, Serialize};

use shoebox_core::{Price, ProductId};

/// Descriptive product data as served by `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Catalog-wide product id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// Available quantity as served by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// Product id the quantity refers to.
    pub id: ProductId,
    /// Remotely reported available quantity.
    pub amount: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_product_deserializes_numeric_price() {
        let json = r#"{"id": 1, "title": "Trail Runner", "price": 179.9, "image": "https://cdn.shoebox.test/1.jpg"}"#;
        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Trail Runner");
        assert_eq!(product.price.display(), "$179.90");
    }

    #[test]
    fn test_stock_level_deserializes() {
        let json = r#"{"id": 1, "amount": 5}"#;
        let stock: StockLevel = serde_json::from_str(json).unwrap();
        assert_eq!(stock.amount, 5);
    }
}
