//! Big Burger Core - business logic for the Big Burger storefront
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Product, CartItem, Order, User, payment types)
//! - **ports**: Trait definitions for external dependencies (Store, SessionStore)
//! - **services**: Use cases (catalog, cart reconciliation, auth, checkout, ...)
//! - **adapters**: Concrete implementations (json-server HTTP, db.json, memory)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::demo;
use adapters::http::HttpStore;
use adapters::json_file::JsonFileStore;
use adapters::memory::MemoryStore;
use adapters::session::FileSessionStore;
use config::{Config, StoreBackend};
use ports::{SessionStore, Store};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{ApiError, ApiResponse, Error};
pub use domain::{CartItem, CartSummary, Order, PaymentMethod, PaymentStatus, Product, User};

/// Build the store selected by `config`
///
/// A `local` store that has no `db.json` yet is seeded with the demo menu.
pub fn open_store(config: &Config, data_dir: &Path) -> Result<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        StoreBackend::Http => Arc::new(
            HttpStore::new_with_base_url(&config.base_url, config.timeout_secs)
                .context("Failed to create HTTP store")?,
        ),
        StoreBackend::Local => {
            let store = JsonFileStore::in_dir(data_dir);
            if !store.exists() {
                store
                    .reset(&demo::seed_collections())
                    .context("Failed to seed local database")?;
            }
            Arc::new(store)
        }
        StoreBackend::Memory => Arc::new(MemoryStore::with_collections(demo::seed_collections())),
    };
    Ok(store)
}

/// Main context for storefront operations
///
/// Owns the configuration, the store and the session store and wires every
/// service to them. Nothing is global: two contexts over different data
/// directories are fully independent.
pub struct StorefrontContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: Arc<dyn Store>,
    pub session: Arc<dyn SessionStore>,
    pub product_service: ProductService,
    pub cart_service: CartService,
    pub order_service: OrderService,
    pub contact_service: ContactService,
    pub auth_service: AuthService,
    pub checkout_service: CheckoutService,
}

impl StorefrontContext {
    /// Load config from `data_dir` and open the configured store
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let store = open_store(&config, data_dir)?;
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::in_dir(data_dir));
        let simulator = PaymentSimulator::new(config.checkout_settings());
        Ok(Self::with_parts(config, data_dir, store, session, simulator))
    }

    /// Wire services over explicit collaborators
    pub fn with_parts(
        config: Config,
        data_dir: &Path,
        store: Arc<dyn Store>,
        session: Arc<dyn SessionStore>,
        simulator: PaymentSimulator,
    ) -> Self {
        let product_service = ProductService::new(Arc::clone(&store));
        let cart_service = CartService::new(Arc::clone(&store));
        let order_service = OrderService::new(Arc::clone(&store));
        let contact_service = ContactService::new(Arc::clone(&store));
        let auth_service = AuthService::new(Arc::clone(&store), Arc::clone(&session))
            .with_token_ttl(config.token_ttl());
        let checkout_service =
            CheckoutService::new(Arc::clone(&store), Arc::clone(&session), simulator);

        Self {
            config,
            data_dir: data_dir.to_path_buf(),
            store,
            session,
            product_service,
            cart_service,
            order_service,
            contact_service,
            auth_service,
            checkout_service,
        }
    }

    /// Backend name for logs and status output
    pub fn backend_name(&self) -> &str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_local_backend_seeds_db() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(config::SETTINGS_FILENAME),
            r#"{"store": {"backend": "local"}}"#,
        )
        .unwrap();

        let ctx = StorefrontContext::new(dir.path()).unwrap();
        assert_eq!(ctx.backend_name(), "local");
        assert!(dir.path().join(adapters::json_file::DB_FILENAME).exists());
        assert!(!ctx.product_service.list(None).unwrap().data.is_empty());
    }

    #[test]
    fn test_memory_backend() {
        let dir = tempdir().unwrap();
        let config = Config {
            backend: StoreBackend::Memory,
            ..Config::default()
        };
        let store = open_store(&config, dir.path()).unwrap();
        assert_eq!(store.name(), "memory");
        assert!(!dir.path().join(adapters::json_file::DB_FILENAME).exists());
    }

    #[test]
    fn test_huge_token_ttl_setting_still_opens() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(config::SETTINGS_FILENAME),
            r#"{"store": {"backend": "memory"}, "auth": {"tokenTtlHours": 9000000000000000}}"#,
        )
        .unwrap();

        let ctx = StorefrontContext::new(dir.path()).unwrap();
        assert_eq!(ctx.config.token_ttl_hours, config::MAX_TOKEN_TTL_HOURS);
        ctx.auth_service
            .login(demo::DEMO_EMAIL, demo::DEMO_PASSWORD)
            .unwrap();
        assert!(ctx.auth_service.require_user().is_ok());
    }
}
