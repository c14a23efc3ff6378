//! Cart API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CartLine, DEFAULT_SIZE};
use crate::AppState;

/// Cart contents with totals, as rendered by the cart page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub count: u64,
    pub total_items: usize,
    pub total_price: f64,
}

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Request body for changing a line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
}

/// Query for removing cart lines. Without a size every variant of the product goes.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartQuery {
    #[serde(default)]
    pub size: Option<String>,
}

async fn summary(state: &AppState) -> CartSummary {
    CartSummary {
        items: state.cart.with_full_details(&state.catalog).await,
        count: state.cart.count().await,
        total_items: state.cart.total_items().await,
        total_price: state.cart.total_price().await,
    }
}

/// GET /api/cart - Cart lines joined with the catalog.
pub async fn get_cart(State(state): State<AppState>) -> ApiResult<CartSummary> {
    success(summary(&state).await)
}

/// POST /api/cart - Add a catalog product to the cart.
pub async fn add_to_cart(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> ApiResult<CartSummary> {
    let product = state
        .catalog
        .find_product_by_id(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", request.product_id)))?;

    let size = request.size.as_deref().unwrap_or(DEFAULT_SIZE);
    state
        .cart
        .add(product, size, request.quantity.unwrap_or(1))
        .await?;

    success(summary(&state).await)
}

/// PUT /api/cart/:product_id - Change the quantity of one line.
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateCartRequest>,
) -> ApiResult<CartSummary> {
    let size = request.size.as_deref().unwrap_or(DEFAULT_SIZE);
    state
        .cart
        .update_quantity(&product_id, size, request.quantity)
        .await?;

    success(summary(&state).await)
}

/// DELETE /api/cart/:product_id - Remove one line, or every size when no size is given.
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(query): Query<RemoveFromCartQuery>,
) -> ApiResult<CartSummary> {
    match query.size.as_deref() {
        Some(size) => state.cart.remove(&product_id, size).await?,
        None => state.cart.remove_product(&product_id).await?,
    };

    success(summary(&state).await)
}

/// DELETE /api/cart - Empty the cart.
pub async fn clear_cart(State(state): State<AppState>) -> ApiResult<CartSummary> {
    state.cart.clear().await?;
    success(summary(&state).await)
}
