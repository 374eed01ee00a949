//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures faults to Sentry before
//! responding to the client. Business rejections from the cart are expected
//! traffic and map to non-5xx statuses. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;

/// Application-level error type for the cart service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed or was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a fault rather than a handled rejection.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        match self {
            Self::Cart(err) => !err.is_rejection(),
            Self::BadRequest(_) => false,
            Self::Internal(_) => true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture faults to Sentry; rejections are expected traffic
        if self.is_fault() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Cart(err) => match err {
                CartError::OutOfStock(_) => StatusCode::CONFLICT,
                CartError::NotInCart(_) | CartError::Catalog(CatalogError::NotFound(_)) => {
                    StatusCode::NOT_FOUND
                }
                CartError::InvalidAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CartError::Catalog(_) => StatusCode::BAD_GATEWAY,
                CartError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Cart(err) => match err {
                CartError::Catalog(CatalogError::NotFound(_)) => "Product not found".to_string(),
                CartError::Catalog(_) => "External service error".to_string(),
                CartError::Storage(_) => "Internal server error".to_string(),
                _ => err.to_string(),
            },
            Self::BadRequest(_) => self.to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use shoebox_core::ProductId;

    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            get_status(AppError::Cart(CartError::OutOfStock(ProductId::new(1)))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::NotInCart(ProductId::new(1)))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Cart(CartError::InvalidAmount(0))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_fault_status_codes() {
        let outage = CartError::Catalog(CatalogError::UnexpectedStatus {
            status: 503,
            body: "maintenance".to_string(),
        });
        assert_eq!(get_status(AppError::Cart(outage)), StatusCode::BAD_GATEWAY);

        let missing = CartError::Catalog(CatalogError::NotFound("products/1".to_string()));
        assert_eq!(get_status(AppError::Cart(missing)), StatusCode::NOT_FOUND);

        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_fault_classification() {
        assert!(!AppError::Cart(CartError::OutOfStock(ProductId::new(1))).is_fault());
        assert!(!AppError::BadRequest("nope".to_string()).is_fault());
        assert!(AppError::Internal("boom".to_string()).is_fault());

        let outage = CartError::Catalog(CatalogError::UnexpectedStatus {
            status: 500,
            body: String::new(),
        });
        assert!(AppError::Cart(outage).is_fault());
    }
}
