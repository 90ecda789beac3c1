//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod session;
mod store;

pub use session::SessionStore;
pub use store::Store;
