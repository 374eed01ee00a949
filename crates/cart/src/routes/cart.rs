//! Cart route handlers.
//!
//! The cart API is JSON-in/JSON-out. Business rejections (out of stock,
//! unknown line) surface as non-5xx statuses with the shopper-facing message
//! in the body; faults surface as 5xx after Sentry capture.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shoebox_core::ProductId;

use crate::cart::CartSnapshot;
use crate::error::Result;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i32,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub amount: i64,
}

/// Cart count response body.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Current cart snapshot.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartSnapshot> {
    Json(state.cart().snapshot().await)
}

/// Add one unit of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartSnapshot>> {
    let snapshot = state
        .cart()
        .add_product(ProductId::new(body.product_id))
        .await?;
    Ok(Json(snapshot))
}

/// Set the quantity of a cart line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateItemRequest>,
) -> Result<Json<CartSnapshot>> {
    let snapshot = state
        .cart()
        .update_product_amount(ProductId::new(id), body.amount)
        .await?;
    Ok(Json(snapshot))
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CartSnapshot>> {
    let snapshot = state.cart().remove_product(ProductId::new(id)).await?;
    Ok(Json(snapshot))
}

/// Total selected quantity across all lines.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    Json(CartCount {
        count: state.cart().total_items().await,
    })
}
