//
//  topsort-sdk
//  identity/store.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Key/value stores with expiry for the opaque user id.
//!
//! A store behaves like a cookie jar: each record has a value, an expiry
//! and a path scope. Two implementations are provided:
//!
//! | Store | Persistence | Use Case |
//! |-------|-------------|----------|
//! | [`MemoryStore`] | Process lifetime | Tests, short-lived workers |
//! | [`FileStore`] | JSON file on disk | CLI, single-user tools |

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored identifier, shaped like a cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIdentifier {
    /// The identifier itself.
    pub value: String,
    /// When the record stops being valid.
    pub expires_at: DateTime<Utc>,
    /// Path scope of the record.
    pub path: String,
}

impl StoredIdentifier {
    /// Returns `true` if the record has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Storage for identifier records.
///
/// Implementations must be usable from several tasks at once. Reads and
/// writes are independent: a load followed by a save is not atomic.
pub trait IdentifierStore: Send + Sync {
    /// Reads a record by name, `None` if there is none.
    fn load(&self, name: &str) -> Result<Option<StoredIdentifier>>;

    /// Writes a record, replacing any existing one.
    fn save(&self, name: &str, record: StoredIdentifier) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, StoredIdentifier>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentifierStore for MemoryStore {
    fn load(&self, name: &str) -> Result<Option<StoredIdentifier>> {
        let records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("Identifier store lock poisoned"))?;
        Ok(records.get(name).cloned())
    }

    fn save(&self, name: &str, record: StoredIdentifier) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("Identifier store lock poisoned"))?;
        records.insert(name.to_string(), record);
        Ok(())
    }
}

/// File-backed store keeping all records in one JSON document.
///
/// The file is read on every load and rewritten on every save. Parent
/// directories are created as needed.
///
/// # Example
///
/// ```rust,no_run
/// use topsort::identity::{FileStore, StoredIdentifierProvider};
///
/// let store = FileStore::default_location()?;
/// let provider = StoredIdentifierProvider::new(store);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    /// Creates a store at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Creates a store at `<data dir>/identifiers.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        let dir = crate::config::Config::data_dir()?;
        Ok(Self::new(dir.join("identifiers.json")))
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, StoredIdentifier>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl IdentifierStore for FileStore {
    fn load(&self, name: &str) -> Result<Option<StoredIdentifier>> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| anyhow::anyhow!("Identifier store lock poisoned"))?;
        Ok(self.read_all()?.remove(name))
    }

    fn save(&self, name: &str, record: StoredIdentifier) -> Result<()> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| anyhow::anyhow!("Identifier store lock poisoned"))?;

        // An unreadable file is left alone rather than replaced
        let mut records = self
            .read_all()
            .with_context(|| format!("Could not read {}", self.path.display()))?;
        let now = Utc::now();
        records.retain(|_, r| !r.is_expired(now));
        records.insert(name.to_string(), record);

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
        Ok(())
    }
}
