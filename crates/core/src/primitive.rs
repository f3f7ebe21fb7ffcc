//! Typed views of the primitive value model
//!
//! A [`Primitive`] is a Rust type that maps one-to-one onto a [`Value`]
//! shape. It is the statically typed half of the store boundary: stores
//! deal in `Value`, conversions deal in `Primitive`s, and the two meet in
//! `into_value` / `from_value`.
//!
//! Narrowing is strict. A `Value::I64` never narrows to `i32`, and a
//! `Value::Array` never narrows to an [`UnorderedList`]. A mismatch is
//! reported as `None`, which readers treat exactly like a missing key.

use std::collections::HashMap;

use crate::timestamp::Timestamp;
use crate::value::{Blob, Value};

/// A type with a fixed primitive shape
pub trait Primitive: Sized {
    /// Widen into a store value; `None` means "absent"
    fn into_value(self) -> Option<Value>;

    /// Narrow a store value; `None` means the shape does not match
    fn from_value(value: Value) -> Option<Self>;
}

/// A primitive that is never absent
///
/// Only these can live inside an array, set or object, so a collection
/// keeps every element it was given. An optional element or a nested
/// optional has no primitive form:
///
/// ```compile_fail
/// use prefstore_core::StorableValue;
///
/// fn storable<T: StorableValue>() {}
/// storable::<Vec<Option<i32>>>();
/// ```
///
/// ```compile_fail
/// use prefstore_core::StorableValue;
///
/// fn storable<T: StorableValue>() {}
/// storable::<Option<Option<i32>>>();
/// ```
///
/// ```compile_fail
/// use std::collections::HashMap;
/// use prefstore_core::StorableValue;
///
/// fn storable<T: StorableValue>() {}
/// storable::<HashMap<String, Option<String>>>();
/// ```
///
/// ```
/// use std::collections::HashMap;
/// use prefstore_core::StorableValue;
///
/// fn storable<T: StorableValue>() {}
/// storable::<Option<Vec<i32>>>();
/// storable::<HashMap<String, Vec<String>>>();
/// ```
pub trait ElementPrimitive: Primitive {
    /// Widen into a store value
    fn into_element(self) -> Value;
}

macro_rules! scalar_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                fn into_value(self) -> Option<Value> {
                    Some(self.into_element())
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl ElementPrimitive for $ty {
                fn into_element(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

scalar_primitive! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Timestamp => Date,
}

impl Primitive for Blob {
    fn into_value(self) -> Option<Value> {
        Some(self.into_element())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bytes(b) => Some(Blob::from(b)),
            _ => None,
        }
    }
}

impl ElementPrimitive for Blob {
    fn into_element(self) -> Value {
        Value::Bytes(self.into_vec())
    }
}

impl Primitive for Value {
    fn into_value(self) -> Option<Value> {
        Some(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl ElementPrimitive for Value {
    fn into_element(self) -> Value {
        self
    }
}

/// `None` is the absent value; the inner shape must itself be present
impl<P: ElementPrimitive> Primitive for Option<P> {
    fn into_value(self) -> Option<Value> {
        self.map(P::into_element)
    }

    fn from_value(value: Value) -> Option<Self> {
        P::from_value(value).map(Some)
    }
}

fn widen_all<P: ElementPrimitive>(items: Vec<P>) -> Vec<Value> {
    items.into_iter().map(P::into_element).collect()
}

fn narrow_all<P: Primitive>(items: Vec<Value>) -> Option<Vec<P>> {
    items.into_iter().map(P::from_value).collect()
}

impl<P: ElementPrimitive> Primitive for Vec<P> {
    fn into_value(self) -> Option<Value> {
        Some(self.into_element())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => narrow_all(items),
            _ => None,
        }
    }
}

impl<P: ElementPrimitive> ElementPrimitive for Vec<P> {
    fn into_element(self) -> Value {
        Value::Array(widen_all(self))
    }
}

impl<P: ElementPrimitive> Primitive for HashMap<String, P> {
    fn into_value(self) -> Option<Value> {
        Some(self.into_element())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => map
                .into_iter()
                .map(|(k, v)| P::from_value(v).map(|v| (k, v)))
                .collect(),
            _ => None,
        }
    }
}

impl<P: ElementPrimitive> ElementPrimitive for HashMap<String, P> {
    fn into_element(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(k, v)| (k, v.into_element()))
                .collect(),
        )
    }
}

/// Elements of an unordered collection, stored as `Value::Set`
///
/// The primitive form of a set. Order carries no meaning and duplicates
/// are not expected.
#[derive(Debug, Clone, PartialEq)]
pub struct UnorderedList<P>(pub Vec<P>);

impl<P> UnorderedList<P> {
    /// Unwrap the elements
    pub fn into_inner(self) -> Vec<P> {
        self.0
    }
}

impl<P> FromIterator<P> for UnorderedList<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        UnorderedList(iter.into_iter().collect())
    }
}

impl<P: ElementPrimitive> Primitive for UnorderedList<P> {
    fn into_value(self) -> Option<Value> {
        Some(self.into_element())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Set(items) => narrow_all(items).map(UnorderedList),
            _ => None,
        }
    }
}

impl<P: ElementPrimitive> ElementPrimitive for UnorderedList<P> {
    fn into_element(self) -> Value {
        Value::Set(widen_all(self.0))
    }
}
