//! Wishlist API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::WishlistLine;
use crate::AppState;

/// Request body for adding a product to the wishlist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistMembership {
    pub in_wishlist: bool,
}

/// GET /api/wishlist - Wishlist entries joined with the catalog.
pub async fn get_wishlist(State(state): State<AppState>) -> ApiResult<Vec<WishlistLine>> {
    success(state.wishlist.with_full_details(&state.catalog).await)
}

/// POST /api/wishlist - Add a catalog product; adding twice is a no-op.
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Json(request): Json<AddToWishlistRequest>,
) -> ApiResult<Vec<WishlistLine>> {
    let product = state
        .catalog
        .find_product_by_id(&request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", request.product_id)))?;

    state.wishlist.add(product).await?;
    success(state.wishlist.with_full_details(&state.catalog).await)
}

/// GET /api/wishlist/:product_id - Whether the product is on the wishlist.
pub async fn wishlist_contains(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<WishlistMembership> {
    success(WishlistMembership {
        in_wishlist: state.wishlist.contains(&product_id).await,
    })
}

/// DELETE /api/wishlist/:product_id - Remove a product.
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> ApiResult<Vec<WishlistLine>> {
    state.wishlist.remove(&product_id).await?;
    success(state.wishlist.with_full_details(&state.catalog).await)
}

/// DELETE /api/wishlist - Empty the wishlist.
pub async fn clear_wishlist(State(state): State<AppState>) -> ApiResult<Vec<WishlistLine>> {
    state.wishlist.clear().await?;
    success(Vec::new())
}
