//! Cart and wishlist line items.
//!
//! The stored records keep only what is needed to render a line and price the cart.
//! Display details are joined from the catalog at read time and never persisted.

use serde::{Deserialize, Serialize};

use super::product::deserialize_id;
use super::Product;

/// Size used when the caller does not pick one.
pub const DEFAULT_SIZE: &str = "M";

/// A cart line as persisted in local storage.
///
/// `(product_id, size)` is unique within a cart. `price` is captured when the line is
/// created so the cart total does not follow later catalog price changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "id", deserialize_with = "deserialize_id")]
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_size")]
    pub size: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
}

fn default_size() -> String {
    DEFAULT_SIZE.to_string()
}

impl CartItem {
    pub fn from_product(product: &Product, size: &str, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.display_image().map(str::to_string),
            size: size.to_string(),
            quantity,
            category: product.category.clone(),
            in_stock: product.in_stock,
        }
    }

    pub fn matches(&self, product_id: &str, size: &str) -> bool {
        self.product_id == product_id && self.size == size
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A cart line joined with the current catalog entry.
///
/// When the product is no longer in the catalog, the detail fields are absent and the
/// stored line passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl CartLine {
    pub fn new(mut item: CartItem, product: Option<&Product>) -> Self {
        let Some(product) = product else {
            return Self {
                item,
                description: None,
                rating: None,
                reviews: None,
                badge: None,
                sizes: None,
                featured: None,
            };
        };

        item.in_stock = product.in_stock;
        if item.image.is_none() {
            item.image = product.display_image().map(str::to_string);
        }

        Self {
            item,
            description: product.description.clone(),
            rating: Some(product.rating),
            reviews: Some(product.reviews),
            badge: product.badge.clone(),
            sizes: Some(product.sizes.clone()),
            featured: Some(product.featured),
        }
    }
}

/// A wishlist entry as persisted in local storage. `product_id` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    #[serde(alias = "id", deserialize_with = "deserialize_id")]
    pub product_id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl WishlistItem {
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.display_image().map(str::to_string),
            category: product.category.clone(),
            rating: product.rating,
            badge: product.badge.clone(),
        }
    }
}

/// A wishlist entry joined with the current catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistLine {
    #[serde(flatten)]
    pub item: WishlistItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl WishlistLine {
    pub fn new(mut item: WishlistItem, product: Option<&Product>) -> Self {
        let Some(product) = product else {
            return Self {
                item,
                description: None,
                reviews: None,
                sizes: None,
                in_stock: None,
                featured: None,
            };
        };

        if item.image.is_none() {
            item.image = product.display_image().map(str::to_string);
        }

        Self {
            item,
            description: product.description.clone(),
            reviews: Some(product.reviews),
            sizes: Some(product.sizes.clone()),
            in_stock: Some(product.in_stock),
            featured: Some(product.featured),
        }
    }
}
