//! HTTP client for the product catalog endpoint.
//!
//! One round trip per call, no retry or timeout. Network and decode failures are logged
//! and turned into empty results; nothing is propagated to the caller.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::CatalogIndex;
use crate::models::{Catalog, Category, Product};

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `base_url` joined with `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Option<Url> {
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!("Invalid catalog base URL {}: {}", self.base_url, e);
                return None;
            }
        };
        {
            let Ok(mut path) = url.path_segments_mut() else {
                tracing::error!("Catalog base URL {} cannot carry a path", self.base_url);
                return None;
            };
            path.pop_if_empty().extend(segments);
        }
        Some(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, reqwest::Error> {
        self.http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }

    /// GET /api/products - the whole catalog, empty on failure.
    pub async fn fetch_catalog(&self) -> Catalog {
        let Some(url) = self.endpoint(&["api", "products"]) else {
            return Catalog::default();
        };
        match self.get_json::<Catalog>(url).await {
            Ok(catalog) => catalog.normalized(),
            Err(e) => {
                tracing::error!("Error fetching products: {}", e);
                Catalog::default()
            }
        }
    }

    /// Fetch the catalog and build an index over it.
    pub async fn fetch_index(&self) -> CatalogIndex {
        CatalogIndex::new(self.fetch_catalog().await)
    }

    /// Every product, flattened across categories.
    pub async fn fetch_all_products(&self) -> Vec<Product> {
        self.fetch_catalog()
            .await
            .categories
            .into_iter()
            .flat_map(|c| c.products)
            .collect()
    }

    /// GET /api/products/{category} - products of one category, empty if unknown.
    pub async fn fetch_products_by_category(&self, category_id: &str) -> Vec<Product> {
        let Some(url) = self.endpoint(&["api", "products", category_id]) else {
            return Vec::new();
        };
        match self.get_json::<Category>(url).await {
            Ok(category) => category
                .products
                .into_iter()
                .map(|mut p| {
                    p.normalize_image();
                    p
                })
                .collect(),
            Err(e) => {
                tracing::error!("Error fetching products by category {}: {}", category_id, e);
                Vec::new()
            }
        }
    }

    /// A single product looked up in the fetched catalog.
    pub async fn fetch_product(&self, product_id: &str) -> Option<Product> {
        self.fetch_index()
            .await
            .find_product_by_id(product_id)
            .cloned()
    }

    pub async fn fetch_categories(&self) -> Vec<Category> {
        self.fetch_catalog().await.categories
    }

    pub async fn fetch_featured_products(&self) -> Vec<Product> {
        self.fetch_all_products()
            .await
            .into_iter()
            .filter(|p| p.featured)
            .collect()
    }
}
