//! Primitive value model
//!
//! This module defines:
//! - `Value`: the closed set of shapes a key-value store holds natively
//! - `Blob`: an owned byte sequence, the primitive form of raw data
//!
//! ## Type Rules
//!
//! - Scalars keep their width: `I32(1) != I64(1)`
//! - `Bytes` are not `String`
//! - Floats use IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - `Set` equality ignores element order, `Array` equality does not
//!
//! There is no null variant. Absence is expressed as `Option::None` at the
//! store boundary, so "never written" and "written as none" cannot be told
//! apart by a later reader.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::timestamp::Timestamp;

/// A natively storable primitive
///
/// Crossing the store boundary as a tagged union lets a backend route
/// dates and blobs without inspecting runtime types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 32-bit floating point (IEEE-754)
    F32(f32),
    /// 64-bit floating point (IEEE-754)
    F64(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Point in time
    Date(Timestamp),
    /// Ordered list of values
    Array(Vec<Value>),
    /// Unordered collection of values
    Set(Vec<Value>),
    /// Map with string keys
    Object(HashMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => same_elements(a, b),
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

/// Multiset comparison; values are not hashable so this is quadratic
fn same_elements(a: &[Value], b: &[Value]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used = vec![false; b.len()];
    a.iter().all(|x| {
        let hit = b
            .iter()
            .enumerate()
            .position(|(i, y)| !used[i] && x == y);
        match hit {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::I8(_) => "I8",
            Value::I16(_) => "I16",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::U8(_) => "U8",
            Value::U16(_) => "U16",
            Value::U32(_) => "U32",
            Value::U64(_) => "U64",
            Value::F32(_) => "F32",
            Value::F64(_) => "F64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::Array(_) => "Array",
            Value::Set(_) => "Set",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this is a collection (`Array`, `Set` or `Object`)
    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Set(_) | Value::Object(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the timestamp if this is a Date value
    pub fn as_date(&self) -> Option<Timestamp> {
        match self {
            Value::Date(t) => Some(*t),
            _ => None,
        }
    }

    /// Get the elements if this is an Array or Set value
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) | Value::Set(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &HashMap if this is an Object value
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for ergonomic construction
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::I32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::I64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<Timestamp> for Value {
    fn from(t: Timestamp) -> Self {
        Value::Date(t)
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Value::Bytes(b.0)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(o: HashMap<String, Value>) -> Self {
        Value::Object(o)
    }
}

/// Owned byte sequence stored as `Value::Bytes`
///
/// A distinct type rather than `Vec<u8>`, which already converts as an
/// ordered list of `u8`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blob(Vec<u8>);

impl Blob {
    /// Wrap raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Blob(bytes.into())
    }

    /// Borrow the bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Unwrap into the underlying vector
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the blob holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Blob(bytes.to_vec())
    }
}

impl From<Blob> for Vec<u8> {
    fn from(blob: Blob) -> Self {
        blob.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_is_part_of_identity() {
        assert_ne!(Value::I32(1), Value::I64(1));
        assert_ne!(Value::U8(1), Value::I8(1));
        assert_ne!(Value::F32(1.0), Value::F64(1.0));
    }

    #[test]
    fn test_bytes_not_equal_string() {
        let s = Value::String("hello".to_string());
        let b = Value::Bytes(b"hello".to_vec());
        assert_ne!(s, b);
    }

    #[test]
    fn test_nan_not_equal_nan() {
        assert_ne!(Value::F64(f64::NAN), Value::F64(f64::NAN));
        assert_ne!(Value::F32(f32::NAN), Value::F32(f32::NAN));
    }

    #[test]
    fn test_negative_zero_equals_zero() {
        assert_eq!(Value::F64(-0.0), Value::F64(0.0));
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a = Value::Set(vec![Value::from("a"), Value::from("b")]);
        let b = Value::Set(vec![Value::from("b"), Value::from("a")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_equality_counts_duplicates() {
        let a = Value::Set(vec![Value::from("a"), Value::from("a")]);
        let b = Value::Set(vec![Value::from("a"), Value::from("b")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_array_equality_respects_order() {
        let a = Value::Array(vec![Value::from("a"), Value::from("b")]);
        let b = Value::Array(vec![Value::from("b"), Value::from("a")]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_array_is_not_set() {
        let elems = vec![Value::I32(1)];
        assert_ne!(Value::Array(elems.clone()), Value::Set(elems));
    }

    #[test]
    fn test_object_equality_key_order_independent() {
        let mut m1 = HashMap::new();
        m1.insert("a".to_string(), Value::I64(1));
        m1.insert("b".to_string(), Value::I64(2));
        let mut m2 = HashMap::new();
        m2.insert("b".to_string(), Value::I64(2));
        m2.insert("a".to_string(), Value::I64(1));
        assert_eq!(Value::Object(m1), Value::Object(m2));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Bool(true).type_name(), "Bool");
        assert_eq!(Value::U16(1).type_name(), "U16");
        assert_eq!(Value::Date(Timestamp::EPOCH).type_name(), "Date");
        assert_eq!(Value::Set(vec![]).type_name(), "Set");
        assert_eq!(Value::Object(HashMap::new()).type_name(), "Object");
    }

    #[test]
    fn test_accessors_return_none_for_wrong_type() {
        let v = Value::I64(42);
        assert!(v.as_bool().is_none());
        assert!(v.as_str().is_none());
        assert!(v.as_bytes().is_none());
        assert!(v.as_date().is_none());
        assert!(v.as_elements().is_none());
        assert!(v.as_object().is_none());
        assert!(!v.is_collection());
    }

    #[test]
    fn test_as_elements_covers_array_and_set() {
        let a = Value::Array(vec![Value::Bool(true)]);
        let s = Value::Set(vec![Value::Bool(true)]);
        assert_eq!(a.as_elements().map(<[Value]>::len), Some(1));
        assert_eq!(s.as_elements().map(<[Value]>::len), Some(1));
        assert!(a.is_collection() && s.is_collection());
    }

    #[test]
    fn test_serde_keeps_variant_tags() {
        let values = vec![
            Value::U8(7),
            Value::I64(-7),
            Value::F32(1.5),
            Value::Bytes(vec![1, 2, 3]),
            Value::Date(Timestamp::from_micros(-5)),
            Value::Set(vec![Value::from("x")]),
        ];
        for value in values {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(value, back);
            assert_eq!(value.type_name(), back.type_name());
        }
    }

    #[test]
    fn test_blob_conversions() {
        let blob = Blob::new(vec![1u8, 2, 3]);
        assert_eq!(blob.len(), 3);
        assert!(!blob.is_empty());
        assert_eq!(blob.as_slice(), &[1, 2, 3]);
        assert_eq!(Value::from(blob.clone()), Value::Bytes(vec![1, 2, 3]));
        assert_eq!(Vec::<u8>::from(blob), vec![1, 2, 3]);
        assert!(Blob::default().is_empty());
    }
}
