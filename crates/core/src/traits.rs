//! Key-value store abstraction
//!
//! The store boundary is untyped: keys are strings and values are the
//! closed [`Value`] union. All static type knowledge lives in
//! [`StorableValue`](crate::StorableValue), so adding a convertible type
//! never touches a store.

use crate::value::Value;

/// Key-value backend a binding reads and writes through
///
/// Thread safety: all methods must be safe to call concurrently from
/// multiple threads. No cross-key or read-modify-write atomicity is
/// required; concurrent writes to one key are last-write-wins.
///
/// Methods are infallible. Backends that persist asynchronously report
/// I/O failures from their own flush/open operations.
pub trait KeyValueStore: Send + Sync {
    /// Current value for `key`
    ///
    /// Returns `None` if the key is missing. A backend with a registration
    /// domain falls back to the registered default here.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write `value` under `key`
    ///
    /// `None` deletes the key; an absent value is never stored as a marker.
    fn set(&self, key: &str, value: Option<Value>);

    /// Delete `key`; a missing key is not an error
    fn remove(&self, key: &str);

    /// Check if a key currently resolves to a value
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Default-value registration, if the backend supports it
    fn default_registry(&self) -> Option<&dyn SupportsDefaultValues> {
        None
    }
}

/// Optional capability: pre-seed fallbacks for raw reads
pub trait SupportsDefaultValues: Send + Sync {
    /// Register the fallback returned by `get` while `key` is unset
    ///
    /// Registering `None` is a no-op.
    fn register_default(&self, key: &str, value: Option<Value>);
}
