//! File store configuration via toml
//!
//! ```toml
//! path = "settings.prefs"
//! format = "json"
//! flush_on_write = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use prefstore_core::codec::{codec_for_id, AnyCodec};
use prefstore_core::{StoreError, StoreResult};

/// Conventional config file name
pub const CONFIG_FILE_NAME: &str = "prefstore.toml";

/// Configuration for a [`FileStore`](crate::FileStore)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileStoreConfig {
    /// Preferences file location
    pub path: PathBuf,
    /// On-disk format: `"json"` (default), `"msgpack"` or `"bincode"`
    #[serde(default = "default_format")]
    pub format: String,
    /// Flush after every write instead of on demand / on drop
    #[serde(default)]
    pub flush_on_write: bool,
}

fn default_format() -> String {
    "json".to_string()
}

impl FileStoreConfig {
    /// Config for `path` with the defaults
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStoreConfig {
            path: path.into(),
            format: default_format(),
            flush_on_write: false,
        }
    }

    /// Set the on-disk format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set flush-on-write
    pub fn with_flush_on_write(mut self, flush_on_write: bool) -> Self {
        self.flush_on_write = flush_on_write;
        self
    }

    /// Resolve the format into a codec
    ///
    /// # Errors
    ///
    /// Returns an error if the format is not a known codec id.
    pub fn codec(&self) -> StoreResult<AnyCodec> {
        codec_for_id(&self.format).map_err(|e| {
            StoreError::Config(format!("invalid format '{}': {}", self.format, e))
        })
    }

    /// Parse config from toml text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid toml or names an
    /// unknown format.
    pub fn from_toml_str(content: &str) -> StoreResult<Self> {
        let config: FileStoreConfig = toml::from_str(content)
            .map_err(|e| StoreError::Config(format!("failed to parse config: {}", e)))?;
        // Validate the format eagerly
        config.codec()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# prefstore file store configuration
#
# Location of the preferences file
path = "preferences.json"

# On-disk format: "json" (default), "msgpack" or "bincode"
format = "json"

# Write the file after every change (default: false).
# When false, call flush() or rely on the flush when the store is dropped.
flush_on_write = false
"#
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> StoreResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to toml and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> StoreResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StoreError::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
