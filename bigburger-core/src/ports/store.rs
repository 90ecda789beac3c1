//! Store port - the JSON-server style REST resource store
//!
//! One method per resource call. Implementations map transport and status
//! failures onto [`crate::domain::result::Error`]; callers never see raw
//! responses.

use crate::domain::result::{ApiResponse, Result};
use crate::domain::{CartItem, Contact, Order, Product, UserRecord};

/// Remote store abstraction
///
/// There are no transactions and no concurrency control: each call is an
/// independent request and the last write wins.
pub trait Store: Send + Sync {
    /// Backend name (e.g., "http", "local", "memory")
    fn name(&self) -> &str;

    // === Products ===

    /// `GET /products`, optionally `?category=`
    fn list_products(&self, category: Option<&str>) -> Result<ApiResponse<Vec<Product>>>;

    /// `GET /products/:id`
    fn get_product(&self, id: &str) -> Result<ApiResponse<Product>>;

    /// `POST /products`
    fn create_product(&self, product: &Product) -> Result<ApiResponse<Product>>;

    /// `PATCH /products/:id` with `{available}`
    fn update_product_availability(&self, id: &str, available: i64) -> Result<ApiResponse<Product>>;

    // === Cart ===

    /// `GET /cart`
    fn list_cart(&self) -> Result<ApiResponse<Vec<CartItem>>>;

    /// `POST /cart`
    fn add_cart_item(&self, item: &CartItem) -> Result<ApiResponse<CartItem>>;

    /// `PATCH /cart/:id` with `{quantity}`
    fn update_cart_quantity(&self, id: &str, quantity: u32) -> Result<ApiResponse<CartItem>>;

    /// `DELETE /cart/:id`
    fn remove_cart_item(&self, id: &str) -> Result<ApiResponse<()>>;

    // === Orders ===

    /// `GET /orders`
    fn list_orders(&self) -> Result<ApiResponse<Vec<Order>>>;

    /// `GET /orders/:id`
    fn get_order(&self, id: &str) -> Result<ApiResponse<Order>>;

    /// `POST /orders`
    fn create_order(&self, order: &Order) -> Result<ApiResponse<Order>>;

    // === Contacts ===

    /// `GET /contacts`
    fn list_contacts(&self) -> Result<ApiResponse<Vec<Contact>>>;

    /// `POST /contacts`
    fn create_contact(&self, contact: &Contact) -> Result<ApiResponse<Contact>>;

    // === Users ===

    /// `GET /users`
    fn list_users(&self) -> Result<ApiResponse<Vec<UserRecord>>>;

    /// `POST /users`
    fn create_user(&self, user: &UserRecord) -> Result<ApiResponse<UserRecord>>;
}
