//! Core types and traits for prefstore
//!
//! This crate defines the value conversion and storage abstraction layer:
//! - Value: closed set of natively storable primitive shapes
//! - Timestamp: the date primitive
//! - Primitive: typed views of `Value` shapes
//! - StorableValue: per-type conversion to and from a primitive form
//! - codec: structured encode/decode for codec-backed values
//! - Traits: the key-value store boundary (KeyValueStore, SupportsDefaultValues)
//! - Error: conversion, codec and storage errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod primitive;
pub mod storable;
pub mod timestamp;
pub mod traits;
pub mod value;

pub use error::{CodecError, ConversionError, ConversionResult, StoreError, StoreResult};
pub use primitive::{ElementPrimitive, Primitive, UnorderedList};
pub use storable::{abort_conversion, RawRepresentable, StorableValue};
pub use timestamp::Timestamp;
pub use traits::{KeyValueStore, SupportsDefaultValues};
pub use value::{Blob, Value};
