//! Local `db.json` store
//!
//! Reads and writes a json-server database file directly, so the storefront
//! works without a running server. Every store call opens the file, takes a
//! lock (shared for reads, exclusive for writes), applies one collection
//! operation and releases the lock. Multi-step cart sequences are not
//! covered by a single lock.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::memory::{CollectionAccess, Collections};
use crate::domain::result::Result;

pub const DB_FILENAME: &str = "db.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/db.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DB_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replace the whole database (used by `seed`)
    pub fn reset(&self, collections: &Collections) -> Result<()> {
        self.write(|c| {
            *c = collections.clone();
            Ok(())
        })
    }

    fn open(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        Ok(file)
    }
}

fn load(file: &mut File) -> Result<Collections> {
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    if contents.trim().is_empty() {
        return Ok(Collections::default());
    }
    Ok(serde_json::from_str(&contents)?)
}

fn save(file: &mut File, collections: &Collections) -> Result<()> {
    let json = serde_json::to_string_pretty(collections)?;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

impl CollectionAccess for JsonFileStore {
    fn backend_name(&self) -> &str {
        "local"
    }

    fn read<R>(&self, f: impl FnOnce(&Collections) -> Result<R>) -> Result<R> {
        let mut file = self.open()?;
        file.lock_shared()?;
        let collections = load(&mut file);
        let _ = file.unlock();
        f(&collections?)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Collections) -> Result<R>) -> Result<R> {
        let mut file = self.open()?;
        file.lock_exclusive()?;
        let result = load(&mut file).and_then(|mut collections| {
            let value = f(&mut collections)?;
            save(&mut file, &collections)?;
            Ok(value)
        });
        let _ = file.unlock();
        result
    }
}
