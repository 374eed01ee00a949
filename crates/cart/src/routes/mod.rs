//! HTTP route handlers for the cart service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health            - Liveness check
//! GET    /health/ready      - Readiness check (pings storage)
//!
//! # Cart
//! GET    /cart              - Current cart snapshot
//! POST   /cart/items        - Add one unit of a product
//! PUT    /cart/items/{id}   - Set the quantity of a line
//! DELETE /cart/items/{id}   - Remove a line
//! GET    /cart/count        - Total selected quantity
//! ```

pub mod cart;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{id}", put(cart::update).delete(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the cart service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/cart", cart_routes())
}
