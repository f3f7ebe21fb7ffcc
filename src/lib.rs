//! prefstore - typed, observable preferences over key-value stores
//!
//! A [`Storable<T>`] binds one key of a [`KeyValueStore`] to a Rust type.
//! Reads fall back to a default, writes convert through the type's
//! primitive form, and every mutation posts a will-change / did-change
//! pair through a [`NotificationCenter`].
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use prefstore::{MemoryStore, Storable};
//!
//! let store = Arc::new(MemoryStore::new());
//! let score = Storable::new("Score", 0i64, store.clone());
//!
//! score.on_did_change(|name| println!("{name} posted"));
//! score.set(42);
//! assert_eq!(score.get(), 42);
//! ```
//!
//! # Architecture
//!
//! - `prefstore-core`: `Value`, conversions and the store traits
//! - `prefstore-storage`: in-memory and file-backed stores
//! - `prefstore-binding`: the binding, notifications and did-change delivery

pub use prefstore_binding::{
    main_queue, BindingOptions, DidChangeDelivery, MainQueue, MainQueueRunner, NotificationCenter,
    NotificationName, Storable, SubscriptionId,
};
pub use prefstore_core::codec;
pub use prefstore_core::{
    storable_codable, storable_raw, Blob, CodecError, ConversionError, ConversionResult,
    ElementPrimitive, KeyValueStore, Primitive, RawRepresentable, StorableValue, StoreError,
    StoreResult, SupportsDefaultValues, Timestamp, UnorderedList, Value,
};
pub use prefstore_storage::{
    FileStore, FileStoreConfig, MemoryStore, RegistrationDomain, CONFIG_FILE_NAME,
};
