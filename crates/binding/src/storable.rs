//! Storable: a typed, observable binding to one store key
//!
//! A binding owns a key, a default value, a shared store handle and a pair
//! of derived notification names. Reads never fail on absence or on a
//! type mismatch; both resolve to the default. Every mutation is bracketed
//! by exactly one will-change and one did-change signal.
//!
//! ```
//! use std::sync::Arc;
//! use prefstore_binding::Storable;
//! use prefstore_storage::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let score = Storable::new("Score", 0i64, store.clone());
//! assert_eq!(score.get(), 0);
//! score.set(42);
//! assert_eq!(score.get(), 42);
//! score.remove();
//! assert_eq!(score.get(), 0);
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use prefstore_core::{ConversionError, ConversionResult, KeyValueStore, Primitive, StorableValue, Value};

use crate::dispatch::DidChangeDelivery;
use crate::notification::{
    NotificationCenter, NotificationName, SubscriptionId, DID_CHANGE_SUFFIX, WILL_CHANGE_SUFFIX,
};

/// Optional binding settings
#[derive(Debug, Clone, Default)]
pub struct BindingOptions {
    notifications_prefix: String,
    center: Option<Arc<NotificationCenter>>,
    delivery: DidChangeDelivery,
}

impl BindingOptions {
    /// Empty prefix, a private center, immediate did-change
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to both notification names
    pub fn with_notifications_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.notifications_prefix = prefix.into();
        self
    }

    /// Post signals through a shared center
    pub fn with_notification_center(mut self, center: Arc<NotificationCenter>) -> Self {
        self.center = Some(center);
        self
    }

    /// Choose how did-change is posted
    pub fn with_did_change_delivery(mut self, delivery: DidChangeDelivery) -> Self {
        self.delivery = delivery;
        self
    }
}

/// Typed binding between a key in a [`KeyValueStore`] and a value of `T`
pub struct Storable<T: StorableValue> {
    key: String,
    default: T,
    store: Arc<dyn KeyValueStore>,
    center: Arc<NotificationCenter>,
    will_change: NotificationName,
    did_change: NotificationName,
    delivery: DidChangeDelivery,
}

impl<T: StorableValue + Clone> Storable<T> {
    /// Bind `key` in `store` with no notification prefix
    pub fn new(key: impl Into<String>, default: T, store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(key, default, store, BindingOptions::default())
    }

    /// Bind `key` in `store`
    ///
    /// If the store supports default registration, the default's primitive
    /// form is registered under `key`. An absent primitive form (a `None`
    /// default) registers nothing.
    ///
    /// # Panics
    ///
    /// Panics if the default cannot be converted to its primitive form.
    pub fn with_options(
        key: impl Into<String>,
        default: T,
        store: Arc<dyn KeyValueStore>,
        options: BindingOptions,
    ) -> Self {
        let key = key.into();
        let prefix = options.notifications_prefix;
        let will_change = NotificationName::for_key(&prefix, &key, WILL_CHANGE_SUFFIX);
        let did_change = NotificationName::for_key(&prefix, &key, DID_CHANGE_SUFFIX);

        if let Some(registry) = store.default_registry() {
            let stored = default
                .try_to_stored()
                .unwrap_or_else(|e| conversion_failed(&key, e));
            registry.register_default(&key, stored.into_value());
        }

        Storable {
            key,
            default,
            store,
            center: options.center.unwrap_or_default(),
            will_change,
            did_change,
            delivery: options.delivery,
        }
    }

    /// Current value, or the default when absent or mistyped
    ///
    /// # Panics
    ///
    /// Panics if the stored value cannot be decoded.
    pub fn get(&self) -> T {
        self.try_get()
            .unwrap_or_else(|e| conversion_failed(&self.key, e))
    }

    /// Current value, returning decode failures instead of aborting
    pub fn try_get(&self) -> ConversionResult<T> {
        match self.stored_value() {
            Some(stored) => T::try_from_stored(stored),
            None => Ok(self.default.clone()),
        }
    }

    /// Write `value`
    ///
    /// Will-change is posted before the conversion runs. Writing a value
    /// whose primitive form is absent removes the key.
    ///
    /// # Panics
    ///
    /// Panics if `value` cannot be encoded.
    pub fn set(&self, value: T) {
        self.center.post(&self.will_change);
        let stored = value
            .try_to_stored()
            .unwrap_or_else(|e| conversion_failed(&self.key, e));
        self.write(stored);
        self.post_did_change();
    }

    /// Write `value`, returning encode failures instead of aborting
    ///
    /// The conversion runs first, so on failure neither the store nor any
    /// observer is touched.
    pub fn try_set(&self, value: T) -> ConversionResult<()> {
        let stored = value.try_to_stored()?;
        self.center.post(&self.will_change);
        self.write(stored);
        self.post_did_change();
        Ok(())
    }

    /// Delete the key; subsequent reads yield a registered default or the
    /// binding default
    ///
    /// Did-change is always posted synchronously here.
    pub fn remove(&self) {
        self.center.post(&self.will_change);
        self.store.remove(&self.key);
        debug!(key = %self.key, "Removed stored value");
        self.center.post(&self.did_change);
    }

    /// Primitive form held by the store, ignoring the binding default
    ///
    /// Registered defaults count as held by the store. A value of the wrong
    /// shape reads as `None`.
    pub fn stored_value(&self) -> Option<T::Stored> {
        let raw = self.store.get(&self.key)?;
        let found = raw.type_name();
        let narrowed = T::Stored::from_value(raw);
        if narrowed.is_none() {
            debug!(key = %self.key, found, "Stored value has unexpected type, using default");
        }
        narrowed
    }

    /// Untyped value held by the store
    pub fn stored_raw(&self) -> Option<Value> {
        self.store.get(&self.key)
    }
}

impl<T: StorableValue> Storable<T> {
    /// Store key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value returned when the store holds nothing usable
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Name posted before each mutation
    pub fn will_change_notification(&self) -> &NotificationName {
        &self.will_change
    }

    /// Name posted after each mutation
    pub fn did_change_notification(&self) -> &NotificationName {
        &self.did_change
    }

    /// Center this binding posts through
    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.center
    }

    /// Subscribe to this binding's will-change signal
    pub fn on_will_change<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&NotificationName) + Send + Sync + 'static,
    {
        self.center.subscribe(&self.will_change, handler)
    }

    /// Subscribe to this binding's did-change signal
    pub fn on_did_change<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&NotificationName) + Send + Sync + 'static,
    {
        self.center.subscribe(&self.did_change, handler)
    }

    fn write(&self, stored: T::Stored) {
        match stored.into_value() {
            Some(value) => {
                debug!(key = %self.key, kind = value.type_name(), "Writing stored value");
                self.store.set(&self.key, Some(value));
            }
            None => {
                debug!(key = %self.key, "Absent value written, removing key");
                self.store.set(&self.key, None);
            }
        }
    }

    fn post_did_change(&self) {
        match &self.delivery {
            DidChangeDelivery::Immediate => {
                self.center.post(&self.did_change);
            }
            DidChangeDelivery::Queued(queue) => {
                let center = Arc::clone(&self.center);
                let name = self.did_change.clone();
                queue.enqueue(move || {
                    center.post(&name);
                });
            }
        }
    }
}

fn conversion_failed(key: &str, err: ConversionError) -> ! {
    panic!("storable value conversion failed for key '{}': {}", key, err)
}

impl<T: StorableValue + fmt::Debug> fmt::Debug for Storable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storable")
            .field("key", &self.key)
            .field("default", &self.default)
            .field("will_change", &self.will_change)
            .field("did_change", &self.did_change)
            .field("delivery", &self.delivery)
            .finish()
    }
}
