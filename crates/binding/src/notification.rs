//! Named change signals
//!
//! A [`NotificationCenter`] is an explicit, injectable registry of
//! observers keyed by [`NotificationName`]. There is no process-wide
//! instance: bindings that should share observers share an
//! `Arc<NotificationCenter>`.
//!
//! Signals carry no payload. An observer learns *that* a value changed and
//! re-reads the binding to learn *what* it changed to.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Suffix of the signal posted before a mutation
pub const WILL_CHANGE_SUFFIX: &str = "WillChange";

/// Suffix of the signal posted after a mutation
pub const DID_CHANGE_SUFFIX: &str = "DidChange";

/// Name observers subscribe to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationName(String);

impl NotificationName {
    /// Wrap an arbitrary name
    pub fn new(name: impl Into<String>) -> Self {
        NotificationName(name.into())
    }

    /// `prefix + capitalize_first(key) + suffix`
    ///
    /// ```
    /// use prefstore_binding::NotificationName;
    ///
    /// let name = NotificationName::for_key("app.", "score", "DidChange");
    /// assert_eq!(name.as_str(), "app.ScoreDidChange");
    /// ```
    pub fn for_key(prefix: &str, key: &str, suffix: &str) -> Self {
        NotificationName(format!("{}{}{}", prefix, capitalize_first(key), suffix))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationName {
    fn from(name: &str) -> Self {
        NotificationName::new(name)
    }
}

/// Titlecase the first character, leave the rest untouched
///
/// When uppercasing expands a character into several (`ß` to `SS`), only
/// the first stays uppercase, so `ßeta` becomes `Sseta`.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut out = String::with_capacity(s.len() + 2);
    out.extend(upper.next());
    out.extend(upper.flat_map(char::to_lowercase));
    out.extend(chars);
    out
}

/// Handle returned by [`NotificationCenter::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&NotificationName) + Send + Sync>;

/// Registry of observers keyed by notification name
#[derive(Default)]
pub struct NotificationCenter {
    observers: RwLock<HashMap<NotificationName, Vec<(SubscriptionId, Handler)>>>,
    next_id: AtomicU64,
}

impl NotificationCenter {
    /// Create a center with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` every time `name` is posted
    pub fn subscribe<F>(&self, name: &NotificationName, handler: F) -> SubscriptionId
    where
        F: Fn(&NotificationName) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.observers
            .write()
            .entry(name.clone())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Stop delivering to a subscription
    ///
    /// Returns `false` if the subscription was already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.write();
        let mut found = false;
        observers.retain(|_, handlers| {
            let before = handlers.len();
            handlers.retain(|(sid, _)| *sid != id);
            found |= handlers.len() != before;
            !handlers.is_empty()
        });
        found
    }

    /// Deliver `name` to its observers, in subscription order
    ///
    /// Handlers run on the calling thread after the registry lock is
    /// released, so a handler may subscribe, unsubscribe or post.
    /// Returns the number of handlers called.
    pub fn post(&self, name: &NotificationName) -> usize {
        let handlers: Vec<Handler> = match self.observers.read().get(name) {
            Some(handlers) => handlers.iter().map(|(_, h)| Arc::clone(h)).collect(),
            None => return 0,
        };
        for handler in &handlers {
            handler(name);
        }
        handlers.len()
    }

    /// Number of observers of `name`
    pub fn observer_count(&self, name: &NotificationName) -> usize {
        self.observers.read().get(name).map_or(0, Vec::len)
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let observers = self.observers.read();
        let mut names: Vec<&NotificationName> = observers.keys().collect();
        names.sort();
        f.debug_struct("NotificationCenter")
            .field("names", &names)
            .finish()
    }
}
