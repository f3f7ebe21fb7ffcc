//! Storage backends for prefstore
//!
//! This crate implements the `KeyValueStore` boundary with:
//! - MemoryStore: `HashMap` + `RwLock`, optional default registration
//! - FileStore: single preferences file (JSON, MessagePack or bincode),
//!   atomic flush, volatile registration domain
//! - FileStoreConfig: toml configuration for FileStore

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod defaults;
pub mod file;
pub mod memory;

pub use config::{FileStoreConfig, CONFIG_FILE_NAME};
pub use defaults::RegistrationDomain;
pub use file::FileStore;
pub use memory::MemoryStore;
