//! Catalog API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::models::{Catalog, Category, Product};
use crate::AppState;

/// GET /api/products - The full catalog.
pub async fn list_products(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.catalog.catalog().clone())
}

/// GET /api/products/:category - One category with its products.
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Category>, AppError> {
    state
        .catalog
        .category(&category_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Category {} not found", category_id)))
}

/// GET /api/product/:id - A single product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog
        .find_product_by_id(&product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
