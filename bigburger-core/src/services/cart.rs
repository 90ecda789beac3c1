//! Cart service - cart mutations coupled to product stock
//!
//! Every mutation is a short sequence of independent store calls. The cart
//! write always happens before the stock write and nothing is rolled back
//! if a later call fails: the next read from the store is the source of
//! truth. Two clients mutating the same product race, last write wins.

use std::sync::Arc;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{CartItem, CartSummary};
use crate::ports::Store;

pub struct CartService {
    store: Arc<dyn Store>,
}

impl CartService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Current cart lines with their aggregates
    pub fn summary(&self) -> Result<CartSummary> {
        let items = self.store.list_cart()?.data;
        Ok(CartSummary::from_items(items))
    }

    /// Put one unit of a product in the cart and take it out of stock
    ///
    /// Fails with `OutOfStock` before any write when the product has no
    /// units left.
    pub fn add_to_cart(&self, product_id: &str) -> Result<ApiResponse<CartItem>> {
        let product = self.store.get_product(product_id)?.data;
        if product.available <= 0 {
            return Err(Error::OutOfStock(product.name));
        }

        let cart = self.store.list_cart()?.data;
        let line = match cart.iter().find(|item| item.id == product.id) {
            Some(existing) => {
                self.store
                    .update_cart_quantity(&existing.id, existing.quantity + 1)?
                    .data
            }
            None => {
                self.store
                    .add_cart_item(&CartItem::from_product(&product, 1))?
                    .data
            }
        };

        self.store
            .update_product_availability(&product.id, product.available - 1)?;

        Ok(ApiResponse::ok(line, format!("{} added to cart!", product.name)))
    }

    /// Set a line's quantity, moving the difference in or out of stock
    ///
    /// A quantity of zero deletes the line and does not return its units to
    /// stock. Fails with `InsufficientStock` before any write when the
    /// increase exceeds what is available.
    pub fn update_quantity(&self, id: &str, quantity: u32) -> Result<ApiResponse<Option<CartItem>>> {
        if quantity == 0 {
            self.store.remove_cart_item(id)?;
            return Ok(ApiResponse::ok(None, "Item removed from cart"));
        }

        let current = self.find_line(id)?;
        let product = self.store.get_product(id)?.data;
        let stock_difference = i64::from(quantity) - i64::from(current.quantity);

        if product.available - stock_difference < 0 {
            return Err(Error::InsufficientStock(format!(
                "{}: requested {}, only {} more available",
                product.name, quantity, product.available
            )));
        }

        let line = self.store.update_cart_quantity(id, quantity)?.data;
        self.store
            .update_product_availability(id, product.available - stock_difference)?;

        Ok(ApiResponse::ok(Some(line), "Cart updated"))
    }

    /// Delete a line, optionally giving its units back to stock first
    pub fn remove(&self, id: &str, return_stock: bool) -> Result<ApiResponse<()>> {
        if return_stock {
            let line = self.find_line(id)?;
            let product = self.store.get_product(id)?.data;
            self.store
                .update_product_availability(id, product.available + i64::from(line.quantity))?;
        }
        self.store.remove_cart_item(id)?;
        Ok(ApiResponse::ok((), "Item removed from cart"))
    }

    /// Remove every line; stops at the first failure
    pub fn clear(&self, return_stock: bool) -> Result<ApiResponse<usize>> {
        let items = self.store.list_cart()?.data;
        for item in &items {
            self.remove(&item.id, return_stock)?;
        }
        Ok(ApiResponse::ok(items.len(), "Cart cleared"))
    }

    fn find_line(&self, id: &str) -> Result<CartItem> {
        self.store
            .list_cart()?
            .data
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| Error::not_found(format!("Cart item {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{Collections, MemoryStore};
    use crate::domain::Product;
    use rust_decimal::Decimal;

    fn setup(available: i64) -> (Arc<MemoryStore>, CartService) {
        let store = Arc::new(MemoryStore::with_collections(Collections {
            products: vec![Product::new("a", "X-Burger", Decimal::new(2590, 2), available)],
            ..Default::default()
        }));
        let service = CartService::new(store.clone());
        (store, service)
    }

    fn stock(store: &MemoryStore) -> i64 {
        store.snapshot().products[0].available
    }

    #[test]
    fn test_add_creates_then_increments() {
        let (store, cart) = setup(5);
        cart.add_to_cart("a").unwrap();
        let line = cart.add_to_cart("a").unwrap().data;
        assert_eq!(line.quantity, 2);
        assert_eq!(store.snapshot().cart.len(), 1);
        assert_eq!(stock(&store), 3);
    }

    #[test]
    fn test_add_out_of_stock_writes_nothing() {
        let (store, cart) = setup(0);
        let before = store.snapshot();
        assert!(matches!(cart.add_to_cart("a"), Err(Error::OutOfStock(_))));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_unknown_product() {
        let (_, cart) = setup(1);
        assert!(matches!(cart.add_to_cart("zzz"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_update_to_zero_keeps_stock() {
        let (store, cart) = setup(5);
        cart.add_to_cart("a").unwrap();
        cart.add_to_cart("a").unwrap();
        let response = cart.update_quantity("a", 0).unwrap();
        assert!(response.data.is_none());
        assert!(store.snapshot().cart.is_empty());
        assert_eq!(stock(&store), 3);
    }

    #[test]
    fn test_update_decrease_returns_stock() {
        let (store, cart) = setup(5);
        cart.add_to_cart("a").unwrap();
        cart.update_quantity("a", 4).unwrap();
        assert_eq!(stock(&store), 1);
        cart.update_quantity("a", 2).unwrap();
        assert_eq!(stock(&store), 3);
    }

    #[test]
    fn test_update_missing_line() {
        let (_, cart) = setup(5);
        assert!(matches!(cart.update_quantity("a", 2), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_remove_without_return() {
        let (store, cart) = setup(5);
        cart.add_to_cart("a").unwrap();
        cart.remove("a", false).unwrap();
        assert!(store.snapshot().cart.is_empty());
        assert_eq!(stock(&store), 4);
    }

    #[test]
    fn test_clear_returns_everything() {
        let (store, cart) = setup(5);
        cart.add_to_cart("a").unwrap();
        cart.add_to_cart("a").unwrap();
        let cleared = cart.clear(true).unwrap();
        assert_eq!(cleared.data, 1);
        assert!(cart.summary().unwrap().is_empty());
        assert_eq!(stock(&store), 5);
    }
}
