//! Cart domain model and derived aggregates

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// One line of the cart, keyed by the product id it mirrors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(deserialize_with = "super::wire::deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product into a new cart line
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity,
        }
    }

    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Body of `PATCH /cart/:id`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuantityPatch {
    pub quantity: u32,
}

/// Aggregates computed from the cart lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    /// Σ price × quantity, rounded to cents
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Σ quantity
    pub total_items: u64,
    /// Number of distinct lines
    pub items_count: usize,
}

impl CartSummary {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total = items
            .iter()
            .map(CartItem::line_total)
            .sum::<Decimal>()
            .round_dp(2);
        let total_items = items.iter().map(|i| u64::from(i.quantity)).sum();
        let items_count = items.len();

        Self {
            items,
            total,
            total_items,
            items_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }
}
