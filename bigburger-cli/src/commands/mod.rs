//! CLI command implementations

pub mod account;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod logs;
pub mod menu;
pub mod orders;
pub mod seed;

use std::path::PathBuf;

use anyhow::{Context, Result};
use bigburger_core::config::{Config, DATA_DIR_ENV};
use bigburger_core::services::{EntryPoint, LogEvent, LoggingService};
use bigburger_core::{Error, StorefrontContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Record how a command finished
pub fn log_outcome(logger: &Option<LoggingService>, command: &str, result: &Result<()>) {
    let event = match result {
        Ok(()) => LogEvent::new("command_executed").with_command(command),
        Err(e) => {
            let event = LogEvent::new("command_failed").with_command(command);
            match e.downcast_ref::<Error>() {
                Some(domain) => event.with_domain_error(domain),
                None => event.with_error(format!("{:#}", e)),
            }
        }
    };
    let event = match Config::load(&get_data_dir()) {
        Ok(config) => event.with_backend(config.backend.as_str()),
        Err(_) => event,
    };
    log_event(logger, event);
}

/// Data directory from `BIGBURGER_DIR`, else `~/.bigburger`
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bigburger")
}

/// Build the storefront context over the data directory
pub fn get_context() -> Result<StorefrontContext> {
    let data_dir = get_data_dir();

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    StorefrontContext::new(&data_dir).context("Failed to initialize storefront")
}
