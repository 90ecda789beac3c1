//! Mock JSON-server for testing
//!
//! Serves the five storefront collections over HTTP from an in-memory
//! [`Collections`] value, answering the same routes and status codes as
//! json-server:
//! - `GET/POST /products`, `GET/PATCH /products/:id`
//! - `GET/POST /cart`, `PATCH/DELETE /cart/:id`
//! - `GET/POST /orders`, `GET /orders/:id`
//! - `GET/POST /contacts`, `GET/POST /users`
//!
//! Individual routes can be made to fail so tests can observe partial
//! reconciliation failures.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::Value as JsonValue;

use super::memory::Collections;
use crate::domain::result::{Error, Result};
use crate::domain::{CartItem, Contact, Order, Product, UserRecord};

/// A route that answers with an error status instead of being served
#[derive(Debug, Clone)]
pub struct FailRoute {
    pub method: String,
    /// Matched as a prefix of the request path
    pub path_prefix: String,
    pub status: u16,
}

impl FailRoute {
    pub fn new(method: &str, path_prefix: &str, status: u16) -> Self {
        Self {
            method: method.to_string(),
            path_prefix: path_prefix.to_string(),
            status,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    pub fail_routes: Vec<FailRoute>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

struct Shared {
    db: Mutex<Collections>,
    requests: Mutex<Vec<String>>,
    config: Mutex<MockConfig>,
}

/// Mock JSON-server for testing
pub struct MockJsonServer {
    port: u16,
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockJsonServer {
    /// Start a new mock server on a random available port
    pub fn start(db: Collections, config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let shared = Arc::new(Shared {
            db: Mutex::new(db),
            requests: Mutex::new(Vec::new()),
            config: Mutex::new(config),
        });
        let shared_clone = shared.clone();

        // Set listener to non-blocking for graceful shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let shared = shared_clone.clone();
                        thread::spawn(move || handle_connection(stream, &shared));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            shared,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Copy of the server-side database
    pub fn snapshot(&self) -> Collections {
        self.shared.db.lock().unwrap().clone()
    }

    /// `"METHOD /path"` for every request served so far
    pub fn requests(&self) -> Vec<String> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// Requests other than GET
    pub fn writes(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| !r.starts_with("GET "))
            .collect()
    }

    pub fn fail(&self, route: FailRoute) {
        self.shared.config.lock().unwrap().fail_routes.push(route);
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockJsonServer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Request {
    method: String,
    path: String,
    query: Option<String>,
    body: Vec<u8>,
}

fn read_request(stream: &mut TcpStream) -> Option<Request> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < header_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let first_line = head.lines().next().unwrap_or("");
    let mut parts = first_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?;
    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q.to_string())),
        None => (target.to_string(), None),
    };
    let end = (header_end + content_length).min(data.len());

    Some(Request {
        method,
        path,
        query,
        body: data[header_end..end].to_vec(),
    })
}

fn handle_connection(mut stream: TcpStream, shared: &Shared) {
    let _ = stream.set_nonblocking(false);
    let Some(request) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };

    shared
        .requests
        .lock()
        .unwrap()
        .push(format!("{} {}", request.method, request.path));

    let config = shared.config.lock().unwrap().clone();
    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(route) = config
        .fail_routes
        .iter()
        .find(|r| r.method == request.method && request.path.starts_with(&r.path_prefix))
    {
        send_response(&mut stream, route.status, r#"{"error": "Injected failure"}"#);
        return;
    }

    let result = {
        let mut db = shared.db.lock().unwrap();
        route(&mut db, &request)
    };

    match result {
        Ok((status, body)) => send_response(&mut stream, status, &body.to_string()),
        Err(Error::NotFound(_)) => send_response(&mut stream, 404, "{}"),
        Err(e) => {
            let body = serde_json::json!({ "error": e.to_string() });
            send_response(&mut stream, e.status(), &body.to_string());
        }
    }
}

fn json<T: serde::Serialize>(status: u16, value: &T) -> Result<(u16, JsonValue)> {
    Ok((status, serde_json::to_value(value)?))
}

fn body<T: serde::de::DeserializeOwned>(request: &Request) -> Result<T> {
    serde_json::from_slice(&request.body).map_err(|e| Error::validation(e.to_string()))
}

fn field<T: serde::de::DeserializeOwned>(request: &Request, name: &str) -> Result<T> {
    let value: JsonValue = body(request)?;
    let field = value
        .get(name)
        .cloned()
        .ok_or_else(|| Error::validation(format!("missing field {}", name)))?;
    serde_json::from_value(field).map_err(|e| Error::validation(e.to_string()))
}

fn category_filter(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == "category")
        .map(|(_, v)| v.replace('+', " "))
}

fn route(db: &mut Collections, request: &Request) -> Result<(u16, JsonValue)> {
    let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();

    match (request.method.as_str(), segments.as_slice()) {
        ("GET", ["products"]) => {
            let category = category_filter(request.query.as_deref());
            json(200, &db.products(category.as_deref()))
        }
        ("GET", ["products", id]) => json(200, &db.product(id)?),
        ("POST", ["products"]) => json(201, &db.insert_product(&body::<Product>(request)?)?),
        ("PATCH", ["products", id]) => {
            let available: i64 = field(request, "available")?;
            json(200, &db.set_availability(id, available)?)
        }

        ("GET", ["cart"]) => json(200, &db.cart),
        ("POST", ["cart"]) => json(201, &db.insert_cart_item(&body::<CartItem>(request)?)?),
        ("PATCH", ["cart", id]) => {
            let quantity: u32 = field(request, "quantity")?;
            json(200, &db.set_cart_quantity(id, quantity)?)
        }
        ("DELETE", ["cart", id]) => {
            db.delete_cart_item(id)?;
            Ok((200, serde_json::json!({})))
        }

        ("GET", ["orders"]) => json(200, &db.orders),
        ("GET", ["orders", id]) => json(200, &db.order(id)?),
        ("POST", ["orders"]) => json(201, &db.insert_order(&body::<Order>(request)?)?),

        ("GET", ["contacts"]) => json(200, &db.contacts),
        ("POST", ["contacts"]) => json(201, &db.insert_contact(&body::<Contact>(request)?)?),

        ("GET", ["users"]) => json(200, &db.users),
        ("POST", ["users"]) => json(201, &db.insert_user(&body::<UserRecord>(request)?)?),

        _ => Err(Error::not_found(request.path.clone())),
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        409 => "Conflict",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::demo;
    use crate::adapters::http::HttpStore;
    use crate::domain::CartItem;
    use crate::ports::Store;
    use crate::services::CartService;
    use std::sync::Arc;

    fn start() -> (MockJsonServer, HttpStore) {
        let server = MockJsonServer::start(demo::seed_collections(), MockConfig::default()).unwrap();
        let store = HttpStore::new_with_base_url(&server.base_url(), 5).unwrap();
        (server, store)
    }

    #[test]
    fn test_products_roundtrip() {
        let (_server, store) = start();
        let products = store.list_products(None).unwrap();
        assert_eq!(products.status, 200);
        assert!(!products.data.is_empty());

        let burgers = store.list_products(Some("burgers")).unwrap().data;
        assert!(burgers.iter().all(|p| p.category == "burgers"));

        let first = &products.data[0];
        let fetched = store.get_product(&first.id).unwrap().data;
        assert_eq!(&fetched, first);
    }

    #[test]
    fn test_not_found_maps_to_error() {
        let (_server, store) = start();
        let err = store.get_product("does-not-exist").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(matches!(store.get_order("ORDER-0"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_cart_writes_reach_server() {
        let (server, store) = start();
        let product = store.list_products(None).unwrap().data.remove(0);
        store
            .add_cart_item(&CartItem::from_product(&product, 2))
            .unwrap();
        store.update_cart_quantity(&product.id, 4).unwrap();

        let db = server.snapshot();
        assert_eq!(db.cart.len(), 1);
        assert_eq!(db.cart[0].quantity, 4);

        store.remove_cart_item(&product.id).unwrap();
        assert!(server.snapshot().cart.is_empty());
    }

    #[test]
    fn test_injected_failure_status() {
        let (server, store) = start();
        server.fail(FailRoute::new("GET", "/orders", 503));
        let err = store.list_orders().unwrap_err();
        assert_eq!(err.status(), 503);
        assert!(matches!(err, Error::Server { status: 503, .. }));
    }

    #[test]
    fn test_failed_stock_patch_leaves_cart_and_stock_diverged() {
        let (server, store) = start();
        let product = store.list_products(None).unwrap().data.remove(0);
        let before = product.available;
        server.fail(FailRoute::new("PATCH", "/products/", 500));

        let cart = CartService::new(Arc::new(store));
        let err = cart.add_to_cart(&product.id).unwrap_err();
        assert_eq!(err.status(), 500);

        // The cart line was written, the stock decrement was not
        let db = server.snapshot();
        assert_eq!(db.cart.len(), 1);
        assert_eq!(db.cart[0].quantity, 1);
        assert_eq!(db.product(&product.id).unwrap().available, before);
    }

    #[test]
    fn test_out_of_stock_add_performs_no_writes() {
        let mut db = demo::seed_collections();
        db.products[0].available = 0;
        let id = db.products[0].id.clone();
        let server = MockJsonServer::start(db, MockConfig::default()).unwrap();
        let store = HttpStore::new_with_base_url(&server.base_url(), 5).unwrap();

        let cart = CartService::new(Arc::new(store));
        assert!(matches!(cart.add_to_cart(&id), Err(Error::OutOfStock(_))));
        assert!(server.writes().is_empty());
    }
}
