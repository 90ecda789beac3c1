//! In-process store backends
//!
//! [`Collections`] is the shape of a json-server `db.json` file and carries
//! the per-collection operations. Any type that can lend out a
//! `Collections` for reading and writing implements [`CollectionAccess`]
//! and with it the [`Store`] port.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{CartItem, Contact, Order, Product, UserRecord};
use crate::ports::Store;

/// All five collections, as stored in `db.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

/// Next numeric id for a collection, json-server style
fn next_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let mut count = 0u64;
    let mut max = 0u64;
    for id in ids {
        count += 1;
        if let Ok(n) = id.parse::<u64>() {
            max = max.max(n);
        }
    }
    (max.max(count) + 1).to_string()
}

fn duplicate_id(collection: &str, id: &str) -> Error {
    Error::server(format!("Insert failed, duplicate id {} in {}", id, collection))
}

impl Collections {
    // === Products ===

    pub fn products(&self, category: Option<&str>) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| category.map_or(true, |c| p.category == c))
            .cloned()
            .collect()
    }

    pub fn product(&self, id: &str) -> Result<Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Product {}", id)))
    }

    pub fn insert_product(&mut self, product: &Product) -> Result<Product> {
        let mut product = product.clone();
        if product.id.is_empty() {
            product.id = next_id(self.products.iter().map(|p| p.id.as_str()));
        } else if self.products.iter().any(|p| p.id == product.id) {
            return Err(duplicate_id("products", &product.id));
        }
        self.products.push(product.clone());
        Ok(product)
    }

    pub fn set_availability(&mut self, id: &str, available: i64) -> Result<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(format!("Product {}", id)))?;
        product.available = available;
        Ok(product.clone())
    }

    // === Cart ===

    pub fn insert_cart_item(&mut self, item: &CartItem) -> Result<CartItem> {
        if self.cart.iter().any(|i| i.id == item.id) {
            return Err(duplicate_id("cart", &item.id));
        }
        self.cart.push(item.clone());
        Ok(item.clone())
    }

    pub fn set_cart_quantity(&mut self, id: &str, quantity: u32) -> Result<CartItem> {
        let item = self
            .cart
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| Error::not_found(format!("Cart item {}", id)))?;
        item.quantity = quantity;
        Ok(item.clone())
    }

    pub fn delete_cart_item(&mut self, id: &str) -> Result<()> {
        let before = self.cart.len();
        self.cart.retain(|i| i.id != id);
        if self.cart.len() == before {
            return Err(Error::not_found(format!("Cart item {}", id)));
        }
        Ok(())
    }

    // === Orders ===

    pub fn order(&self, id: &str) -> Result<Order> {
        self.orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("Order {}", id)))
    }

    pub fn insert_order(&mut self, order: &Order) -> Result<Order> {
        if self.orders.iter().any(|o| o.id == order.id) {
            return Err(duplicate_id("orders", &order.id));
        }
        self.orders.push(order.clone());
        Ok(order.clone())
    }

    // === Contacts ===

    pub fn insert_contact(&mut self, contact: &Contact) -> Result<Contact> {
        let mut contact = contact.clone();
        if contact.id.is_empty() {
            contact.id = next_id(self.contacts.iter().map(|c| c.id.as_str()));
        } else if self.contacts.iter().any(|c| c.id == contact.id) {
            return Err(duplicate_id("contacts", &contact.id));
        }
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    // === Users ===

    pub fn insert_user(&mut self, user: &UserRecord) -> Result<UserRecord> {
        let mut user = user.clone();
        if user.user.id.is_empty() {
            user.user.id = next_id(self.users.iter().map(|u| u.user.id.as_str()));
        } else if self.users.iter().any(|u| u.user.id == user.user.id) {
            return Err(duplicate_id("users", &user.user.id));
        }
        self.users.push(user.clone());
        Ok(user)
    }
}

/// Scoped access to a [`Collections`] value
///
/// `read` and `write` each cover exactly one store call, so a multi-step
/// cart sequence is still several independent operations.
pub trait CollectionAccess: Send + Sync {
    fn backend_name(&self) -> &str;

    fn read<R>(&self, f: impl FnOnce(&Collections) -> Result<R>) -> Result<R>;

    fn write<R>(&self, f: impl FnOnce(&mut Collections) -> Result<R>) -> Result<R>;
}

impl<T: CollectionAccess> Store for T {
    fn name(&self) -> &str {
        self.backend_name()
    }

    fn list_products(&self, category: Option<&str>) -> Result<ApiResponse<Vec<Product>>> {
        let products = self.read(|c| Ok(c.products(category)))?;
        Ok(ApiResponse::ok(products, "Products loaded"))
    }

    fn get_product(&self, id: &str) -> Result<ApiResponse<Product>> {
        let product = self.read(|c| c.product(id))?;
        Ok(ApiResponse::ok(product, "Product loaded"))
    }

    fn create_product(&self, product: &Product) -> Result<ApiResponse<Product>> {
        let product = self.write(|c| c.insert_product(product))?;
        Ok(ApiResponse::created(product, "Product created"))
    }

    fn update_product_availability(&self, id: &str, available: i64) -> Result<ApiResponse<Product>> {
        let product = self.write(|c| c.set_availability(id, available))?;
        Ok(ApiResponse::ok(product, "Product updated"))
    }

    fn list_cart(&self) -> Result<ApiResponse<Vec<CartItem>>> {
        let items = self.read(|c| Ok(c.cart.clone()))?;
        Ok(ApiResponse::ok(items, "Cart loaded"))
    }

    fn add_cart_item(&self, item: &CartItem) -> Result<ApiResponse<CartItem>> {
        let item = self.write(|c| c.insert_cart_item(item))?;
        Ok(ApiResponse::created(item, "Item added to cart"))
    }

    fn update_cart_quantity(&self, id: &str, quantity: u32) -> Result<ApiResponse<CartItem>> {
        let item = self.write(|c| c.set_cart_quantity(id, quantity))?;
        Ok(ApiResponse::ok(item, "Cart updated"))
    }

    fn remove_cart_item(&self, id: &str) -> Result<ApiResponse<()>> {
        self.write(|c| c.delete_cart_item(id))?;
        Ok(ApiResponse::ok((), "Item removed from cart"))
    }

    fn list_orders(&self) -> Result<ApiResponse<Vec<Order>>> {
        let orders = self.read(|c| Ok(c.orders.clone()))?;
        Ok(ApiResponse::ok(orders, "Orders loaded"))
    }

    fn get_order(&self, id: &str) -> Result<ApiResponse<Order>> {
        let order = self.read(|c| c.order(id))?;
        Ok(ApiResponse::ok(order, "Order loaded"))
    }

    fn create_order(&self, order: &Order) -> Result<ApiResponse<Order>> {
        let order = self.write(|c| c.insert_order(order))?;
        Ok(ApiResponse::created(order, "Order created"))
    }

    fn list_contacts(&self) -> Result<ApiResponse<Vec<Contact>>> {
        let contacts = self.read(|c| Ok(c.contacts.clone()))?;
        Ok(ApiResponse::ok(contacts, "Contacts loaded"))
    }

    fn create_contact(&self, contact: &Contact) -> Result<ApiResponse<Contact>> {
        let contact = self.write(|c| c.insert_contact(contact))?;
        Ok(ApiResponse::created(contact, "Contact created"))
    }

    fn list_users(&self) -> Result<ApiResponse<Vec<UserRecord>>> {
        let users = self.read(|c| Ok(c.users.clone()))?;
        Ok(ApiResponse::ok(users, "Users loaded"))
    }

    fn create_user(&self, user: &UserRecord) -> Result<ApiResponse<UserRecord>> {
        let user = self.write(|c| c.insert_user(user))?;
        Ok(ApiResponse::created(user, "User created"))
    }
}

/// Store held entirely in memory; used by tests and the `memory` backend
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(collections: Collections) -> Self {
        Self {
            collections: Mutex::new(collections),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> Collections {
        self.collections
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl CollectionAccess for MemoryStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    fn read<R>(&self, f: impl FnOnce(&Collections) -> Result<R>) -> Result<R> {
        let guard = self
            .collections
            .lock()
            .map_err(|_| Error::server("memory store lock poisoned"))?;
        f(&guard)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Collections) -> Result<R>) -> Result<R> {
        let mut guard = self
            .collections
            .lock()
            .map_err(|_| Error::server("memory store lock poisoned"))?;
        f(&mut guard)
    }
}
