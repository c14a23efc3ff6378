//! Wishlist persisted in local storage, keyed by product id.

use crate::catalog::CatalogIndex;
use crate::errors::AppError;
use crate::models::{Product, WishlistItem, WishlistLine};
use crate::storage::{keys, LocalStorage, PersistedCollection};

#[derive(Clone)]
pub struct WishlistService {
    items: PersistedCollection<WishlistItem>,
}

impl WishlistService {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            items: PersistedCollection::new(storage, keys::WISHLIST),
        }
    }

    pub async fn items(&self) -> Vec<WishlistItem> {
        self.items.read().await
    }

    /// Add `product` unless it is already on the wishlist.
    pub async fn add(&self, product: &Product) -> Result<Vec<WishlistItem>, AppError> {
        let mut wishlist = self.items.read().await;
        if wishlist.iter().any(|item| item.product_id == product.id) {
            return Ok(wishlist);
        }

        wishlist.push(WishlistItem::from_product(product));
        self.items.write(&wishlist).await?;
        Ok(wishlist)
    }

    pub async fn remove(&self, product_id: &str) -> Result<Vec<WishlistItem>, AppError> {
        let mut wishlist = self.items.read().await;
        wishlist.retain(|item| item.product_id != product_id);
        self.items.write(&wishlist).await?;
        Ok(wishlist)
    }

    pub async fn contains(&self, product_id: &str) -> bool {
        self.items
            .read()
            .await
            .iter()
            .any(|item| item.product_id == product_id)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.items.clear().await
    }

    /// Stored entries joined with the current catalog.
    pub async fn with_full_details(&self, catalog: &CatalogIndex) -> Vec<WishlistLine> {
        self.items
            .read()
            .await
            .into_iter()
            .map(|item| {
                let product = catalog.find_product_by_id(&item.product_id);
                WishlistLine::new(item, product)
            })
            .collect()
    }
}
