//! JSON-server HTTP client
//!
//! Implements the [`Store`] port against a json-server style REST API
//! (`/products`, `/cart`, `/orders`, `/contacts`, `/users`). Blocking
//! reqwest calls, one request per store operation.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::{AvailabilityPatch, CartItem, Contact, Order, Product, QuantityPatch, UserRecord};
use crate::ports::Store;

/// Default json-server address
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "BIGBURGER_API_URL";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Get the base URL, checking the environment variable first
pub fn get_base_url() -> String {
    std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[derive(Debug)]
pub struct HttpStore {
    client: Client,
    base: Url,
    base_url: String,
    timeout_secs: u64,
}

impl HttpStore {
    /// Client for `BIGBURGER_API_URL` or the default local json-server
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(&get_base_url(), DEFAULT_TIMEOUT_SECS)
    }

    pub fn new_with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::Config("API base URL cannot be empty".to_string()));
        }
        let base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!("Invalid API base URL '{}'", base_url)));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            base_url: base_url.to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL with each segment appended and percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("Invalid API base URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Accept", "application/json")
    }

    fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().map_err(|e| self.map_request_error(e))?;
        self.check_response_status(response)
    }

    fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder)?;
        let body = response
            .text()
            .map_err(|e| self.map_request_error(e))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.fetch(self.request(Method::GET, url))
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, collection: &str, body: &B) -> Result<T> {
        let url = self.endpoint(&[collection])?;
        self.fetch(self.request(Method::POST, url).json(body))
    }

    fn patch<B: Serialize, T: DeserializeOwned>(&self, segments: &[&str], body: &B) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.fetch(self.request(Method::PATCH, url).json(body))
    }

    fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.endpoint(segments)?;
        self.send(self.request(Method::DELETE, url))?;
        Ok(())
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::Http(format!(
                "Connection timed out after {} seconds",
                self.timeout_secs
            ))
        } else if error.is_connect() {
            Error::Http(format!("Unable to connect to the API at {}", self.base_url))
        } else {
            Error::Http(format!("Request failed: {}", error))
        }
    }

    /// Turn non-success statuses into typed errors
    fn check_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().unwrap_or_default();
        let detail = if body.trim().is_empty() || body.trim() == "{}" {
            url
        } else {
            format!("{} ({})", url, body.trim())
        };

        match status.as_u16() {
            404 => Err(Error::NotFound(detail)),
            409 => Err(Error::Conflict(detail)),
            401 | 403 => Err(Error::Unauthorized(detail)),
            400 => Err(Error::Validation(detail)),
            code => Err(Error::Server {
                status: code,
                message: detail,
            }),
        }
    }
}

impl Store for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    fn list_products(&self, category: Option<&str>) -> Result<ApiResponse<Vec<Product>>> {
        let mut url = self.endpoint(&["products"])?;
        if let Some(c) = category {
            url.query_pairs_mut().append_pair("category", c);
        }
        let products = self.fetch(self.request(Method::GET, url))?;
        Ok(ApiResponse::ok(products, "Products loaded"))
    }

    fn get_product(&self, id: &str) -> Result<ApiResponse<Product>> {
        let product = self.get(&["products", id])?;
        Ok(ApiResponse::ok(product, "Product loaded"))
    }

    fn create_product(&self, product: &Product) -> Result<ApiResponse<Product>> {
        let created = self.post("products", product)?;
        Ok(ApiResponse::created(created, "Product created"))
    }

    fn update_product_availability(&self, id: &str, available: i64) -> Result<ApiResponse<Product>> {
        let product = self.patch(&["products", id], &AvailabilityPatch { available })?;
        Ok(ApiResponse::ok(product, "Product updated"))
    }

    fn list_cart(&self) -> Result<ApiResponse<Vec<CartItem>>> {
        Ok(ApiResponse::ok(self.get(&["cart"])?, "Cart loaded"))
    }

    fn add_cart_item(&self, item: &CartItem) -> Result<ApiResponse<CartItem>> {
        let created = self.post("cart", item)?;
        Ok(ApiResponse::created(created, "Item added to cart"))
    }

    fn update_cart_quantity(&self, id: &str, quantity: u32) -> Result<ApiResponse<CartItem>> {
        let item = self.patch(&["cart", id], &QuantityPatch { quantity })?;
        Ok(ApiResponse::ok(item, "Cart updated"))
    }

    fn remove_cart_item(&self, id: &str) -> Result<ApiResponse<()>> {
        self.delete(&["cart", id])?;
        Ok(ApiResponse::ok((), "Item removed from cart"))
    }

    fn list_orders(&self) -> Result<ApiResponse<Vec<Order>>> {
        Ok(ApiResponse::ok(self.get(&["orders"])?, "Orders loaded"))
    }

    fn get_order(&self, id: &str) -> Result<ApiResponse<Order>> {
        let order = self.get(&["orders", id])?;
        Ok(ApiResponse::ok(order, "Order loaded"))
    }

    fn create_order(&self, order: &Order) -> Result<ApiResponse<Order>> {
        let created = self.post("orders", order)?;
        Ok(ApiResponse::created(created, "Order created"))
    }

    fn list_contacts(&self) -> Result<ApiResponse<Vec<Contact>>> {
        Ok(ApiResponse::ok(self.get(&["contacts"])?, "Contacts loaded"))
    }

    fn create_contact(&self, contact: &Contact) -> Result<ApiResponse<Contact>> {
        let created = self.post("contacts", contact)?;
        Ok(ApiResponse::created(created, "Contact created"))
    }

    fn list_users(&self) -> Result<ApiResponse<Vec<UserRecord>>> {
        Ok(ApiResponse::ok(self.get(&["users"])?, "Users loaded"))
    }

    fn create_user(&self, user: &UserRecord) -> Result<ApiResponse<UserRecord>> {
        let created = self.post("users", user)?;
        Ok(ApiResponse::created(created, "User created"))
    }
}
