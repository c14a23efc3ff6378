//! Shopping cart persisted in local storage.
//!
//! Lines are keyed by `(product id, size)`. Quantity updates and single-line removal
//! act on exactly one size variant; `remove_product` drops every variant.

use crate::catalog::CatalogIndex;
use crate::errors::AppError;
use crate::models::{CartItem, CartLine, Product};
use crate::storage::{keys, LocalStorage, PersistedCollection};

#[derive(Clone)]
pub struct CartService {
    items: PersistedCollection<CartItem>,
}

impl CartService {
    pub fn new(storage: LocalStorage) -> Self {
        Self {
            items: PersistedCollection::new(storage, keys::CART),
        }
    }

    /// The stored lines.
    pub async fn items(&self) -> Vec<CartItem> {
        self.items.read().await
    }

    /// Add `quantity` of `product` in `size`, merging into an existing line.
    pub async fn add(
        &self,
        product: &Product,
        size: &str,
        quantity: u32,
    ) -> Result<Vec<CartItem>, AppError> {
        if quantity == 0 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut cart = self.items.read().await;
        match cart.iter_mut().find(|item| item.matches(&product.id, size)) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(quantity).ok_or_else(|| {
                    AppError::Validation("Quantity exceeds the maximum for one line".to_string())
                })?;
            }
            None => cart.push(CartItem::from_product(product, size, quantity)),
        }

        self.items.write(&cart).await?;
        tracing::debug!("Added {} x {} ({}) to cart", quantity, product.id, size);
        Ok(cart)
    }

    /// Set the quantity of one line.
    pub async fn update_quantity(
        &self,
        product_id: &str,
        size: &str,
        quantity: u32,
    ) -> Result<Vec<CartItem>, AppError> {
        if quantity == 0 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut cart = self.items.read().await;
        let line = cart
            .iter_mut()
            .find(|item| item.matches(product_id, size))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Cart item {} ({}) not found",
                    product_id, size
                ))
            })?;
        line.quantity = quantity;

        self.items.write(&cart).await?;
        Ok(cart)
    }

    /// Remove one line. Removing a line that is not there leaves the cart unchanged.
    pub async fn remove(&self, product_id: &str, size: &str) -> Result<Vec<CartItem>, AppError> {
        let mut cart = self.items.read().await;
        cart.retain(|item| !item.matches(product_id, size));
        self.items.write(&cart).await?;
        Ok(cart)
    }

    /// Remove every size variant of a product.
    pub async fn remove_product(&self, product_id: &str) -> Result<Vec<CartItem>, AppError> {
        let mut cart = self.items.read().await;
        cart.retain(|item| item.product_id != product_id);
        self.items.write(&cart).await?;
        Ok(cart)
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        self.items.clear().await
    }

    /// Sum of quantities.
    pub async fn count(&self) -> u64 {
        self.items
            .read()
            .await
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Number of distinct lines.
    pub async fn total_items(&self) -> usize {
        self.items.read().await.len()
    }

    /// Sum of price x quantity using the prices captured when lines were added.
    pub async fn total_price(&self) -> f64 {
        self.items.read().await.iter().map(CartItem::line_total).sum()
    }

    /// Stored lines joined with the current catalog.
    pub async fn with_full_details(&self, catalog: &CatalogIndex) -> Vec<CartLine> {
        self.items
            .read()
            .await
            .into_iter()
            .map(|item| {
                let product = catalog.find_product_by_id(&item.product_id);
                CartLine::new(item, product)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{sample_catalog, sample_index};
    use crate::models::DEFAULT_SIZE;
    use crate::storage::test_support::temp_storage;

    fn product(index: &CatalogIndex, id: &str) -> Product {
        index.find_product_by_id(id).unwrap().clone()
    }

    #[tokio::test]
    async fn test_add_merges_same_product_and_size() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();
        let cloak = product(&index, "p1");

        cart.add(&cloak, "L", 2).await.unwrap();
        let items = cart.add(&cloak, "L", 3).await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
        assert_eq!(cart.items().await, items);
    }

    #[tokio::test]
    async fn test_add_keeps_sizes_separate() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();
        let cloak = product(&index, "p1");

        cart.add(&cloak, "S", 1).await.unwrap();
        let items = cart.add(&cloak, DEFAULT_SIZE, 1).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(cart.count().await, 2);
        assert_eq!(cart.total_items().await, 2);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_rejected() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        let result = cart.add(&product(&index, "p1"), "M", 0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(cart.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove_empties_cart() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p3"), "M", 4).await.unwrap();
        cart.remove("p3", "M").await.unwrap();

        assert_eq!(cart.count().await, 0);
        assert!(cart.items().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_and_remove_are_scoped_to_size() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();
        let cloak = product(&index, "p1");

        cart.add(&cloak, "S", 1).await.unwrap();
        cart.add(&cloak, "L", 1).await.unwrap();

        let items = cart.update_quantity("p1", "L", 4).await.unwrap();
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[1].quantity, 4);

        let items = cart.remove("p1", "S").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].size, "L");
    }

    #[tokio::test]
    async fn test_remove_product_drops_all_sizes() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();
        let cloak = product(&index, "p1");

        cart.add(&cloak, "S", 1).await.unwrap();
        cart.add(&cloak, "L", 1).await.unwrap();
        cart.add(&product(&index, "p3"), "M", 1).await.unwrap();

        let items = cart.remove_product("p1").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "p3");
    }

    #[tokio::test]
    async fn test_update_missing_line_is_not_found() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);

        let result = cart.update_quantity("p1", "M", 2).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        let index = sample_index();
        cart.add(&product(&index, "p1"), "M", 1).await.unwrap();
        let result = cart.update_quantity("p1", "M", 0).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_rejects_quantity_overflow() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();
        let cloak = product(&index, "p1");

        cart.add(&cloak, "M", u32::MAX).await.unwrap();
        let result = cart.add(&cloak, "M", 2).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        let items = cart.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, u32::MAX);
    }

    #[tokio::test]
    async fn test_count_does_not_overflow_across_lines() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p1"), "M", u32::MAX).await.unwrap();
        cart.add(&product(&index, "p3"), "M", 2).await.unwrap();

        assert_eq!(cart.count().await, u64::from(u32::MAX) + 2);
    }

    #[tokio::test]
    async fn test_reads_stored_lines_with_integer_ids() {
        let (storage, _dir) = temp_storage().await;
        storage
            .set_item(
                keys::CART,
                r#"[{"id":7,"name":"Katana","price":899,"size":"M","quantity":1}]"#,
            )
            .await
            .unwrap();
        let cart = CartService::new(storage);

        let items = cart.items().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "7");
        assert_eq!(cart.count().await, 1);

        let items = cart.update_quantity("7", "M", 3).await.unwrap();
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_clear() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p1"), "M", 1).await.unwrap();
        cart.clear().await.unwrap();

        assert!(cart.items().await.is_empty());
        assert_eq!(cart.total_price().await, 0.0);
    }

    #[tokio::test]
    async fn test_scenario_totals_follow_quantity_updates() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        let items = cart.add(&product(&index, "p1"), "L", 2).await.unwrap();
        assert_eq!(items[0].product_id, "p1");
        assert_eq!(items[0].size, "L");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, 1200.0);
        assert_eq!(cart.total_price().await, 2400.0);

        let items = cart.update_quantity("p1", "L", 5).await.unwrap();
        assert_eq!(items[0].quantity, 5);
        assert_eq!(cart.total_price().await, 6000.0);
    }

    #[tokio::test]
    async fn test_total_uses_price_captured_at_add() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p1"), "M", 2).await.unwrap();

        let mut repriced = sample_catalog();
        repriced.categories[0].products[0].price = 99.0;
        let repriced = CatalogIndex::new(repriced);

        assert_eq!(cart.total_price().await, 2400.0);
        let lines = cart.with_full_details(&repriced).await;
        assert_eq!(lines[0].item.price, 1200.0);
    }

    #[tokio::test]
    async fn test_full_details_join_catalog() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p1"), "M", 1).await.unwrap();
        let lines = cart.with_full_details(&index).await;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].description.as_deref(), Some("Hooded cloak"));
        assert_eq!(lines[0].rating, Some(4.5));
        assert_eq!(lines[0].featured, Some(true));
    }

    #[tokio::test]
    async fn test_full_details_pass_through_removed_product() {
        let (storage, _dir) = temp_storage().await;
        let cart = CartService::new(storage);
        let index = sample_index();

        cart.add(&product(&index, "p2"), "M", 1).await.unwrap();
        let stored = cart.items().await;

        let lines = cart.with_full_details(&CatalogIndex::default()).await;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].item, stored[0]);
        assert!(lines[0].description.is_none());
        assert!(lines[0].sizes.is_none());
    }
}
