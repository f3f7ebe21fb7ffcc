//! MemoryStore: in-process key-value backend
//!
//! `HashMap<String, Value>` behind a `parking_lot::RwLock`. Nothing is
//! persisted. Default registration is opt-in so tests can exercise both
//! kinds of backend.

use std::collections::HashMap;

use parking_lot::RwLock;
use prefstore_core::{KeyValueStore, SupportsDefaultValues, Value};

use crate::defaults::RegistrationDomain;

/// In-memory key-value store
///
/// # Example
///
/// ```
/// use prefstore_core::{KeyValueStore, Value};
/// use prefstore_storage::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.set("Score", Some(Value::I64(42)));
/// assert_eq!(store.get("Score"), Some(Value::I64(42)));
///
/// store.set("Score", None);
/// assert!(!store.contains("Score"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
    defaults: Option<RegistrationDomain>,
}

impl MemoryStore {
    /// Create an empty store without default registration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that accepts registered defaults
    pub fn with_default_registration() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            defaults: Some(RegistrationDomain::new()),
        }
    }

    /// Written keys, sorted; registered defaults are not included
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of written keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether no key has been written
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Remove every written key
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.data.read().get(key) {
            return Some(value.clone());
        }
        self.defaults.as_ref().and_then(|d| d.get(key))
    }

    fn set(&self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.data.write().insert(key.to_string(), value);
            }
            None => self.remove(key),
        }
    }

    fn remove(&self, key: &str) {
        self.data.write().remove(key);
    }

    fn default_registry(&self) -> Option<&dyn SupportsDefaultValues> {
        self.defaults
            .as_ref()
            .map(|_| self as &dyn SupportsDefaultValues)
    }
}

impl SupportsDefaultValues for MemoryStore {
    fn register_default(&self, key: &str, value: Option<Value>) {
        if let Some(defaults) = &self.defaults {
            defaults.register(key, value);
        }
    }
}
