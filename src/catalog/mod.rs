//! Read-only lookups over the product catalog.
//!
//! The catalog is loaded once (from a file on the server, or fetched by the client) and
//! never mutated afterwards.

mod client;

pub use client::*;

use std::path::Path;

use crate::errors::AppError;
use crate::models::{Catalog, Category, Product};

/// Name reported for a category id that is not in the catalog.
pub const UNKNOWN_CATEGORY: &str = "Unknown Category";

/// In-memory index over a catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    catalog: Catalog,
}

impl CatalogIndex {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: catalog.normalized(),
        }
    }

    /// Load the catalog document served at `/api/products`.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Internal(format!(
                "Failed to read catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog: Catalog = serde_json::from_str(&raw)?;
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn categories(&self) -> &[Category] {
        &self.catalog.categories
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.catalog.categories.iter().find(|c| c.id == category_id)
    }

    /// All products in catalog order.
    pub fn all_products(&self) -> impl Iterator<Item = &Product> {
        self.catalog.categories.iter().flat_map(|c| c.products.iter())
    }

    /// First product with the given id across all categories.
    pub fn find_product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.all_products().find(|p| p.id == product_id)
    }

    /// Products of one category, empty if the category does not exist.
    pub fn find_products_by_category(&self, category_id: &str) -> &[Product] {
        self.category(category_id)
            .map(|c| c.products.as_slice())
            .unwrap_or(&[])
    }

    pub fn find_featured(&self) -> Vec<&Product> {
        self.all_products().filter(|p| p.featured).collect()
    }

    pub fn category_name(&self, category_id: &str) -> &str {
        self.category(category_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_CATEGORY)
    }

    pub fn product_count(&self) -> usize {
        self.all_products().count()
    }
}
