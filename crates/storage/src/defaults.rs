//! Registration domain for default values
//!
//! Backends that support default registration keep registered fallbacks
//! apart from written values: removing a key exposes the registered
//! default again, and the registration itself is never persisted.

use std::collections::HashMap;

use parking_lot::RwLock;
use prefstore_core::Value;

/// Registered fallbacks, consulted only when a key has no written value
#[derive(Debug, Default)]
pub struct RegistrationDomain {
    defaults: RwLock<HashMap<String, Value>>,
}

impl RegistrationDomain {
    /// Create an empty domain
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` as the fallback for `key`; `None` is ignored
    pub fn register(&self, key: &str, value: Option<Value>) {
        if let Some(value) = value {
            self.defaults.write().insert(key.to_string(), value);
        }
    }

    /// Registered fallback for `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.defaults.read().get(key).cloned()
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        self.defaults.read().len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.defaults.read().is_empty()
    }
}
