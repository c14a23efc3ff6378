//! Product catalog models matching the `/api/products` document.

use serde::{Deserialize, Deserializer, Serialize};

/// Root of the catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// A named group of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A product as served by the catalog. Read-only on the client side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Older catalog files carry `imageUrl` instead of `image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// The image to display, preferring `image` over the legacy `imageUrl`.
    pub fn display_image(&self) -> Option<&str> {
        self.image.as_deref().or(self.image_url.as_deref())
    }

    /// Fold `imageUrl` into `image`.
    pub fn normalize_image(&mut self) {
        if self.image.is_none() {
            self.image = self.image_url.take();
        }
    }
}

impl Catalog {
    /// Normalize image fields on every product.
    pub fn normalized(mut self) -> Self {
        for category in &mut self.categories {
            for product in &mut category.products {
                product.normalize_image();
            }
        }
        self
    }
}

fn default_in_stock() -> bool {
    true
}

/// Product ids are opaque strings, but some catalog files use bare integers.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_product_gets_defaults() {
        let product: Product =
            serde_json::from_value(json!({"id": "p1", "name": "Cloak", "price": 1200})).unwrap();

        assert_eq!(product.id, "p1");
        assert_eq!(product.price, 1200.0);
        assert!(product.in_stock);
        assert!(!product.featured);
        assert!(product.sizes.is_empty());
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_integer_id_and_image_url_alias() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "Katana",
            "price": 899.5,
            "imageUrl": "/img/katana.png",
            "inStock": false
        }))
        .unwrap();

        assert_eq!(product.id, "7");
        assert_eq!(product.display_image(), Some("/img/katana.png"));
        assert!(!product.in_stock);
    }

    #[test]
    fn test_normalized_catalog_prefers_image() {
        let catalog: Catalog = serde_json::from_value(json!({
            "categories": [{
                "id": "props",
                "name": "Props",
                "products": [
                    {"id": "a", "name": "A", "price": 1, "image": "/a.png", "imageUrl": "/old-a.png"},
                    {"id": "b", "name": "B", "price": 2, "imageUrl": "/b.png"}
                ]
            }]
        }))
        .unwrap();

        let catalog = catalog.normalized();
        let products = &catalog.categories[0].products;
        assert_eq!(products[0].image.as_deref(), Some("/a.png"));
        assert_eq!(products[1].image.as_deref(), Some("/b.png"));
        assert_eq!(products[1].image_url, None);
    }

    #[test]
    fn test_catalog_without_categories_is_empty() {
        let catalog: Catalog = serde_json::from_value(json!({})).unwrap();
        assert!(catalog.categories.is_empty());
    }
}
