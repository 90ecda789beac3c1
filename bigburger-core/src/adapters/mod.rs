//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON-server HTTP client for the Store port
//! - Local `db.json` file and in-memory collections for the Store port
//! - File and memory session stores for the SessionStore port
//! - Demo menu for seeding local databases

pub mod demo;
pub mod http;
pub mod json_file;
pub mod memory;
pub mod session;

#[cfg(test)]
pub mod json_server_mock;
