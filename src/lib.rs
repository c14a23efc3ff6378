//! Storefront state
//!
//! Cart, wishlist, account and catalog state for the cosplay storefront, persisted to a
//! local key-value store and served over a small JSON API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use catalog::CatalogIndex;
use config::Config;
use services::{CartService, UserAccountStore, WishlistService};
use storage::LocalStorage;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogIndex>,
    pub cart: CartService,
    pub wishlist: WishlistService,
    pub accounts: Arc<Mutex<UserAccountStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state for one storage profile, loading the account store up front.
    pub async fn new(storage: LocalStorage, catalog: CatalogIndex, config: Config) -> Self {
        let accounts = UserAccountStore::load(storage.clone()).await;

        Self {
            catalog: Arc::new(catalog),
            cart: CartService::new(storage.clone()),
            wishlist: WishlistService::new(storage),
            accounts: Arc::new(Mutex::new(accounts)),
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalog
        .route("/products", get(api::list_products))
        .route("/products/{category}", get(api::get_category))
        .route("/product/{id}", get(api::get_product))
        // Cart
        .route(
            "/cart",
            get(api::get_cart)
                .post(api::add_to_cart)
                .delete(api::clear_cart),
        )
        .route(
            "/cart/{product_id}",
            put(api::update_cart_item).delete(api::remove_from_cart),
        )
        // Wishlist
        .route(
            "/wishlist",
            get(api::get_wishlist)
                .post(api::add_to_wishlist)
                .delete(api::clear_wishlist),
        )
        .route(
            "/wishlist/{product_id}",
            get(api::wishlist_contains).delete(api::remove_from_wishlist),
        )
        // Account
        .route("/account", get(api::current_account))
        .route("/account/signup", post(api::signup))
        .route("/account/login", post(api::login))
        .route("/account/logout", post(api::logout))
        .route("/account/{id}", put(api::update_profile))
        .route("/account/{id}/orders", post(api::add_order));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
