//! Namespaced preference storage.
//!
//! `PreferenceStore` wraps a [`StorageBackend`] and prefixes every key with
//! the configured namespace (`<namespace>-<name>`). Reads fall back to the
//! caller's default and writes are best-effort: backend failures are logged
//! and swallowed, since a lost preference only affects cosmetics.

use crate::error::{CustomizerError, Result};
use crate::preferences::{Category, PreferenceSet, COLOR_PRIMARY_KEY, COLOR_SECONDARY_KEY};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable string key-value storage
pub trait StorageBackend {
    /// Returns the value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written or is full
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// In-memory storage, lost when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a single JSON5 object file
///
/// Every operation re-reads the file and every mutation rewrites it, so
/// concurrent writers resolve as last-write-wins. A missing file reads as
/// empty storage. Entries that are not strings belong to someone else: they
/// read as absent and are written back untouched. A file that does not parse
/// is discarded by the next mutation.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            quota_bytes: None,
        }
    }

    /// Limits the size of the persisted file
    #[must_use]
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CustomizerError::StorageUnavailable(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(contents).filter(|c| !c.trim().is_empty()))
    }

    fn parse(&self, contents: &str) -> Result<Map<String, Value>> {
        json5::from_str(contents).map_err(|e| {
            CustomizerError::StorageUnavailable(format!(
                "failed to parse {}: {e}",
                self.path.display()
            ))
        })
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        match self.read_contents()? {
            Some(contents) => self.parse(&contents),
            None => Ok(Map::new()),
        }
    }

    /// Entries to mutate, and whether an unparseable file was discarded
    fn read_for_update(&self) -> Result<(Map<String, Value>, bool)> {
        let Some(contents) = self.read_contents()? else {
            return Ok((Map::new(), false));
        };
        match self.parse(&contents) {
            Ok(items) => Ok((items, false)),
            Err(e) => {
                warn!("Discarding unreadable preference file: {e}");
                Ok((Map::new(), true))
            }
        }
    }

    fn write_all(&self, items: &Map<String, Value>) -> Result<()> {
        let serialized = json5::to_string(items).map_err(|e| {
            CustomizerError::StorageUnavailable(format!("failed to serialize preferences: {e}"))
        })?;

        if let Some(quota) = self.quota_bytes {
            if serialized.len() > quota {
                return Err(CustomizerError::StorageFull {
                    required: serialized.len(),
                    quota,
                });
            }
        }

        fs::write(&self.path, serialized).map_err(|e| {
            CustomizerError::StorageUnavailable(format!(
                "failed to write {}: {e}",
                self.path.display()
            ))
        })
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_all()?
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let (mut items, _) = self.read_for_update()?;
        items.insert(key.to_string(), Value::String(value.to_string()));
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let (mut items, discarded) = self.read_for_update()?;
        if items.remove(key).is_some() || discarded {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// Namespaced, fail-soft view over a storage backend
#[derive(Debug)]
pub struct PreferenceStore<B> {
    namespace: String,
    backend: B,
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn new(namespace: impl Into<String>, backend: B) -> Self {
        Self {
            namespace: namespace.into(),
            backend,
        }
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn key(&self, name: &str) -> String {
        format!("{}-{name}", self.namespace)
    }

    /// Stored value for `name`, or `default` when absent or unreadable
    pub fn get(&self, name: &str, default: &str) -> String {
        self.get_opt(name).unwrap_or_else(|| default.to_string())
    }

    /// Stored value for `name`, `None` when absent or unreadable
    pub fn get_opt(&self, name: &str) -> Option<String> {
        let key = self.key(name);
        match self.backend.get_item(&key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Reading preference {key} failed, using default: {e}");
                None
            }
        }
    }

    /// Writes `value` under `name`; failures are logged, not returned
    pub fn set(&mut self, name: &str, value: &str) {
        let key = self.key(name);
        match self.backend.set_item(&key, value) {
            Ok(()) => debug!("Stored preference {key}={value}"),
            Err(e) => warn!("Persisting preference {key} failed: {e}"),
        }
    }

    /// Erases every preference this store writes
    ///
    /// Only the known preference names are removed, so other applications and
    /// namespaces sharing a prefix with this one keep their keys.
    pub fn reset_all(&mut self) {
        let names = Category::ALL
            .into_iter()
            .map(Category::key)
            .chain([COLOR_PRIMARY_KEY, COLOR_SECONDARY_KEY]);

        for name in names {
            let key = self.key(name);
            if let Err(e) = self.backend.remove_item(&key) {
                warn!("Removing preference {key} failed: {e}");
            }
        }
        debug!("Cleared preferences in namespace {}", self.namespace);
    }

    /// Reads the whole preference set, defaults filling the gaps
    pub fn snapshot(&self) -> PreferenceSet {
        let value = |category: Category| self.get(category.key(), category.default_value());
        PreferenceSet {
            sidebar_option: value(Category::Sidebar),
            layout_option: value(Category::Layout),
            color_option: value(Category::Color),
            text_option: value(Category::TextSize),
            color_primary: self.get_opt(COLOR_PRIMARY_KEY),
            color_secondary: self.get_opt(COLOR_SECONDARY_KEY),
        }
    }
}
