//! Order service - placed orders

use std::sync::Arc;

use chrono::Utc;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{Order, OrderData};
use crate::ports::Store;

pub struct OrderService {
    store: Arc<dyn Store>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<ApiResponse<Vec<Order>>> {
        self.store.list_orders()
    }

    /// Orders placed by one user, newest first
    pub fn list_for_user(&self, user_id: &str) -> Result<ApiResponse<Vec<Order>>> {
        let response = self.store.list_orders()?;
        Ok(response.map(|orders| {
            let mut mine: Vec<Order> = orders
                .into_iter()
                .filter(|o| o.data.user_id.as_deref() == Some(user_id))
                .collect();
            mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            mine
        }))
    }

    pub fn get(&self, id: &str) -> Result<ApiResponse<Order>> {
        self.store.get_order(id)
    }

    /// Stamp id and creation time and persist
    pub fn create(&self, data: OrderData) -> Result<ApiResponse<Order>> {
        if data.items.is_empty() {
            return Err(Error::validation("Order has no items"));
        }
        let order = Order::place(data, Utc::now());
        self.store.create_order(&order)
    }
}
