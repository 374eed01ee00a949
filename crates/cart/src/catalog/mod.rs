//! Catalog/stock service client.
//!
//! # Architecture
//!
//! - REST JSON endpoints, `reqwest` for HTTP
//! - The catalog service is the source of truth for product data and stock
//! - In-memory caching via `moka` for product descriptions; stock reads are
//!   never cached because they gate cart mutations
//!
//! # Endpoints
//!
//! - `GET /products/{id}` - descriptive product data
//! - `GET /stock/{id}` - currently available quantity

mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{CatalogProduct, StockLevel};

use async_trait::async_trait;
use thiserror::Error;

use shoebox_core::ProductId;

/// Errors that can occur when querying the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the catalog service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Catalog service answered with an unexpected status.
    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Truncated response body for diagnostics.
        body: String,
    },
}

/// Read-only lookups against the catalog/stock service.
///
/// The cart store takes this as an injected collaborator so tests can script
/// catalog behavior without a network.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch the descriptive data for a product.
    async fn product(&self, id: ProductId) -> Result<CatalogProduct, CatalogError>;

    /// Fetch the currently available quantity for a product.
    async fn stock(&self, id: ProductId) -> Result<StockLevel, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("products/123".to_string());
        assert_eq!(err.to_string(), "Not found: products/123");
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CatalogError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_unexpected_status_error() {
        let err = CatalogError::UnexpectedStatus {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 503: maintenance");
    }
}
