//! Product domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A menu item offered by the restaurant
///
/// `available` is the stock counter: units not yet committed to any cart.
/// It is the only field cart operations write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "super::wire::deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub available: i64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal, available: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            available,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.available > 0
    }
}

/// Body of `PATCH /products/:id` when only stock changes
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AvailabilityPatch {
    pub available: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_json_server_product() {
        let json = r#"{
            "id": 3,
            "name": "Bacon Burger",
            "description": "Double bacon",
            "price": 32.9,
            "image": "/img/bacon.png",
            "category": "burgers",
            "available": 4
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "3");
        assert_eq!(product.price, Decimal::new(329, 1));
        assert_eq!(product.available, 4);
        assert!(product.is_in_stock());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let product = Product::new("1", "X-Salada", Decimal::new(2590, 2), 0);
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], serde_json::json!(25.9));
        assert!(!product.is_in_stock());
    }
}
