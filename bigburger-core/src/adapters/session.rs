//! Session store adapters
//!
//! `FileSessionStore` keeps a small JSON object in `<data dir>/session.json`,
//! keyed like browser local storage. `MemorySessionStore` is for tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::token::TOKEN_KEY;
use crate::ports::SessionStore;

pub const SESSION_FILENAME: &str = "session.json";

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILENAME))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load_token(&self) -> Result<Option<String>> {
        Ok(self.load()?.remove(TOKEN_KEY))
    }

    fn save_token(&self, token: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.save(&entries)
    }

    fn clear_token(&self) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_token(&self) -> Result<Option<String>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| Error::server("session lock poisoned"))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &str) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::server("session lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::server("session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_session_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = FileSessionStore::in_dir(dir.path());
        assert_eq!(store.load_token().unwrap(), None);

        store.save_token("abc").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("abc"));

        let raw = std::fs::read_to_string(dir.path().join(SESSION_FILENAME)).unwrap();
        assert!(raw.contains(TOKEN_KEY));

        store.clear_token().unwrap();
        assert_eq!(store.load_token().unwrap(), None);
    }

    #[test]
    fn test_other_keys_survive_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SESSION_FILENAME);
        std::fs::write(&path, r#"{"theme": "dark", "bigburger_auth_token": "t"}"#).unwrap();

        let store = FileSessionStore::new(&path);
        store.clear_token().unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("theme"));
        assert!(!raw.contains(TOKEN_KEY));
    }

    #[test]
    fn test_memory_session() {
        let store = MemorySessionStore::new();
        store.save_token("x").unwrap();
        assert_eq!(store.load_token().unwrap().as_deref(), Some("x"));
        store.clear_token().unwrap();
        assert!(store.load_token().unwrap().is_none());
    }
}
