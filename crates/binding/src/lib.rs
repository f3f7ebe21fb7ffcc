//! Observable typed bindings for prefstore
//!
//! This crate ties a [`StorableValue`](prefstore_core::StorableValue) type
//! to one key of a [`KeyValueStore`](prefstore_core::KeyValueStore):
//! - Storable: typed read / write / remove with default fallback
//! - NotificationCenter: injectable will-change / did-change signals
//! - dispatch: immediate or main-queue did-change delivery

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod notification;
pub mod storable;

pub use dispatch::{main_queue, DidChangeDelivery, MainQueue, MainQueueRunner};
pub use notification::{
    capitalize_first, NotificationCenter, NotificationName, SubscriptionId, DID_CHANGE_SUFFIX,
    WILL_CHANGE_SUFFIX,
};
pub use storable::{BindingOptions, Storable};
