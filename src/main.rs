//! Storefront state service
//!
//! Serves the product catalog and one local profile's cart, wishlist and accounts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront_state::catalog::CatalogIndex;
use storefront_state::config::Config;
use storefront_state::storage::{self, LocalStorage};
use storefront_state::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting storefront state service");
    tracing::info!("Storage path: {:?}", config.db_path);
    tracing::info!("Catalog path: {:?}", config.catalog_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize local storage
    let pool = storage::init_storage(&config.db_path).await?;
    let local_storage = LocalStorage::new(pool);

    // Load the catalog once; it is served unchanged for the life of the process
    let catalog = CatalogIndex::from_json_file(&config.catalog_path)?;
    tracing::info!(
        "Catalog loaded with {} categories and {} products",
        catalog.categories().len(),
        catalog.product_count()
    );

    let bind_addr = config.bind_addr;
    let state = AppState::new(local_storage, catalog, config).await;
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
