//! Order domain model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CartItem, PaymentMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

/// Everything the client supplies when placing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub items: Vec<CartItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::wire::deserialize_optional_id"
    )]
    pub user_id: Option<String>,
}

/// A placed order; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(deserialize_with = "super::wire::deserialize_id")]
    pub id: String,
    #[serde(flatten)]
    pub data: OrderData,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Stamp order data with an `ORDER-<millis>` id and creation time
    pub fn place(data: OrderData, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("ORDER-{}", now.timestamp_millis()),
            data,
            created_at: now,
        }
    }

    pub fn item_count(&self) -> u64 {
        self.data.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_place_order_id_and_shape() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let data = OrderData {
            items: vec![CartItem {
                id: "1".into(),
                name: "X-Burger".into(),
                price: Decimal::new(2590, 2),
                image: String::new(),
                quantity: 2,
            }],
            total: Decimal::new(5180, 2),
            payment_method: PaymentMethod::Pix,
            status: OrderStatus::Completed,
            user_id: Some("1".into()),
        };
        let order = Order::place(data, now);
        assert_eq!(order.id, "ORDER-1700000000123");
        assert_eq!(order.item_count(), 2);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["paymentMethod"], "pix");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["userId"], "1");
        assert!(json.get("createdAt").is_some());

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
