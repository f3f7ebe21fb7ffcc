//! FileStore: preferences persisted to a single file
//!
//! Values live in memory and are written out as one encoded
//! `BTreeMap<String, Value>`:
//!
//! - **Reads and writes never touch the disk**: `KeyValueStore` methods
//!   stay infallible, I/O failures surface from [`FileStore::open`] and
//!   [`FileStore::flush`]
//! - **Atomic replace**: a flush writes a sibling temp file and renames it
//!   over the preferences file
//! - **Flush on drop**: a dirty store is flushed when dropped; a failure
//!   there can only be logged
//! - **Registered defaults are volatile**: they are never written to disk

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use prefstore_core::codec::{AnyCodec, StructuredCodec};
use prefstore_core::{KeyValueStore, StoreResult, SupportsDefaultValues, Value};

use crate::config::FileStoreConfig;
use crate::defaults::RegistrationDomain;

/// File-backed key-value store with a registration domain
pub struct FileStore {
    path: PathBuf,
    codec: AnyCodec,
    flush_on_write: bool,
    data: RwLock<BTreeMap<String, Value>>,
    defaults: RegistrationDomain,
    dirty: AtomicBool,
}

impl FileStore {
    /// Open the store described by `config`
    ///
    /// A missing file is an empty store; the file is created on first flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unknown, or the file exists but
    /// cannot be read or decoded.
    pub fn open(config: &FileStoreConfig) -> StoreResult<Self> {
        let codec = config.codec()?;
        let data = if config.path.exists() {
            let bytes = std::fs::read(&config.path)?;
            codec.decode::<BTreeMap<String, Value>>(&bytes)?
        } else {
            BTreeMap::new()
        };

        info!(
            path = %config.path.display(),
            format = codec.codec_id(),
            keys = data.len(),
            "Opened preferences file"
        );

        Ok(FileStore {
            path: config.path.clone(),
            codec,
            flush_on_write: config.flush_on_write,
            data: RwLock::new(data),
            defaults: RegistrationDomain::new(),
            dirty: AtomicBool::new(false),
        })
    }

    /// Open a JSON preferences file at `path`
    pub fn open_path(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open(&FileStoreConfig::new(path))
    }

    /// Preferences file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are writes not yet flushed
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Written keys in order; registered defaults are not included
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Write pending changes to disk
    ///
    /// No-op when nothing changed since the last flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be encoded or the file cannot be
    /// written. The store stays dirty so a later flush retries the write.
    pub fn flush(&self) -> StoreResult<()> {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        let result = self.write_file();
        if result.is_err() {
            self.dirty.store(true, Ordering::Release);
        }
        result
    }

    fn write_file(&self) -> StoreResult<()> {
        let bytes = {
            let data = self.data.read();
            self.codec.encode(&*data)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = temp_path(&self.path);
        std::fs::write(&tmp, &bytes)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Flushed preferences file");
        Ok(())
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
        if self.flush_on_write {
            if let Err(e) = self.flush() {
                warn!(path = %self.path.display(), error = %e, "Failed to flush preferences file");
            }
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.read().get(key) {
            return Some(value.clone());
        }
        self.defaults.get(key)
    }

    fn set(&self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.data.write().insert(key.to_string(), value);
                self.mark_dirty();
            }
            None => self.remove(key),
        }
    }

    fn remove(&self, key: &str) {
        let removed = self.data.write().remove(key).is_some();
        if removed {
            self.mark_dirty();
        }
    }

    fn default_registry(&self) -> Option<&dyn SupportsDefaultValues> {
        Some(self)
    }
}

impl SupportsDefaultValues for FileStore {
    fn register_default(&self, key: &str, value: Option<Value>) {
        self.defaults.register(key, value);
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            warn!(path = %self.path.display(), error = %e, "Failed to flush preferences file on drop");
        }
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("codec", &self.codec.codec_id())
            .field("flush_on_write", &self.flush_on_write)
            .field("keys", &self.data.read().len())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
