//! Session store port - where the auth token is kept between runs

use crate::domain::result::Result;

/// Key/value slot for the session token
pub trait SessionStore: Send + Sync {
    fn load_token(&self) -> Result<Option<String>>;

    fn save_token(&self, token: &str) -> Result<()>;

    fn clear_token(&self) -> Result<()>;
}
