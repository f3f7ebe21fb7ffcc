//! Convertible values
//!
//! [`StorableValue`] describes how a Rust type is persisted: its primitive
//! form (`Stored`) and a pair of conversions. Every category of storable
//! type is a separate implementation selected by the static type:
//!
//! | Category | Primitive form |
//! |----------|----------------|
//! | `bool`, integers, floats, `String`, `Blob`, `Timestamp`, `Value` | itself |
//! | `Option<T>` | `Option<T::Stored>` (`None` is absent) |
//! | `Vec<T>` | `Vec<T::Stored>` |
//! | `HashSet<T>`, `BTreeSet<T>` | `UnorderedList<T::Stored>` |
//! | `HashMap<String, T>`, `BTreeMap<String, T>` | `HashMap<String, T::Stored>` |
//! | [`RawRepresentable`] enums, via [`storable_raw!`](crate::storable_raw) | the raw value's form |
//! | serde types, via [`storable_codable!`](crate::storable_codable) | `Blob` |
//! | `url::Url` | `String` |
//! | `chrono::DateTime<Utc>` | `Timestamp` (microseconds) |
//!
//! Containers hold only values that are never absent (see
//! [`ElementPrimitive`]): `Vec<Option<T>>`, maps of optionals and
//! `Option<Option<T>>` are not storable.
//!
//! ## Failure policy
//!
//! `to_stored` and `from_stored` are total for values produced under
//! correct usage. The three ways they can still fail (encode failure,
//! decode failure, unknown raw value) abort with a panic. Each has a
//! `try_*` twin that returns [`ConversionError`] instead.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::error::{ConversionError, ConversionResult};
use crate::primitive::{ElementPrimitive, Primitive, UnorderedList};
use crate::timestamp::Timestamp;
use crate::value::{Blob, Value};

/// A type that can be persisted in a key-value store
///
/// Round trip: `T::from_stored(x.to_stored()) == x` for every valid `x`.
pub trait StorableValue: Sized {
    /// Primitive form written to the store
    type Stored: Primitive;

    /// Convert into the primitive form
    fn to_stored(&self) -> Self::Stored;

    /// Rebuild from a primitive form produced by [`to_stored`](Self::to_stored)
    fn from_stored(stored: Self::Stored) -> Self;

    /// Fallible [`to_stored`](Self::to_stored)
    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        Ok(self.to_stored())
    }

    /// Fallible [`from_stored`](Self::from_stored)
    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        Ok(Self::from_stored(stored))
    }
}

/// Abort on a conversion failure
///
/// Conversion failures mean a programmer error or corrupted stored data;
/// there is no recovery path on the infallible API.
#[track_caller]
pub fn abort_conversion(err: ConversionError) -> ! {
    panic!("storable value conversion failed: {err}")
}

macro_rules! identity_storable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl StorableValue for $ty {
                type Stored = $ty;

                #[inline]
                fn to_stored(&self) -> $ty {
                    self.clone()
                }

                #[inline]
                fn from_stored(stored: $ty) -> Self {
                    stored
                }
            }
        )*
    };
}

identity_storable!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, String, Blob, Timestamp, Value,
);

// ============================================================================
// Containers
// ============================================================================

impl<T: StorableValue> StorableValue for Option<T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = Option<T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.as_ref().map(T::to_stored)
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored.map(T::from_stored)
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.as_ref().map(T::try_to_stored).transpose()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored.map(T::try_from_stored).transpose()
    }
}

impl<T: StorableValue> StorableValue for Vec<T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = Vec<T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.iter().map(T::to_stored).collect()
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored.into_iter().map(T::from_stored).collect()
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.iter().map(T::try_to_stored).collect()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored.into_iter().map(T::try_from_stored).collect()
    }
}

impl<T: StorableValue + Eq + Hash> StorableValue for HashSet<T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = UnorderedList<T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.iter().map(T::to_stored).collect()
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored.into_inner().into_iter().map(T::from_stored).collect()
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.iter().map(T::try_to_stored).collect()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored.into_inner().into_iter().map(T::try_from_stored).collect()
    }
}

impl<T: StorableValue + Ord> StorableValue for BTreeSet<T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = UnorderedList<T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.iter().map(T::to_stored).collect()
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored.into_inner().into_iter().map(T::from_stored).collect()
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.iter().map(T::try_to_stored).collect()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored.into_inner().into_iter().map(T::try_from_stored).collect()
    }
}

impl<T: StorableValue> StorableValue for HashMap<String, T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = HashMap<String, T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.iter().map(|(k, v)| (k.clone(), v.to_stored())).collect()
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored
            .into_iter()
            .map(|(k, v)| (k, T::from_stored(v)))
            .collect()
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.iter()
            .map(|(k, v)| Ok((k.clone(), v.try_to_stored()?)))
            .collect()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored
            .into_iter()
            .map(|(k, v)| Ok((k, T::try_from_stored(v)?)))
            .collect()
    }
}

impl<T: StorableValue> StorableValue for BTreeMap<String, T>
where
    T::Stored: ElementPrimitive,
{
    type Stored = HashMap<String, T::Stored>;

    fn to_stored(&self) -> Self::Stored {
        self.iter().map(|(k, v)| (k.clone(), v.to_stored())).collect()
    }

    fn from_stored(stored: Self::Stored) -> Self {
        stored
            .into_iter()
            .map(|(k, v)| (k, T::from_stored(v)))
            .collect()
    }

    fn try_to_stored(&self) -> ConversionResult<Self::Stored> {
        self.iter()
            .map(|(k, v)| Ok((k.clone(), v.try_to_stored()?)))
            .collect()
    }

    fn try_from_stored(stored: Self::Stored) -> ConversionResult<Self> {
        stored
            .into_iter()
            .map(|(k, v)| Ok((k, T::try_from_stored(v)?)))
            .collect()
    }
}

// ============================================================================
// Foreign types stored through a simpler primitive
// ============================================================================

impl StorableValue for url::Url {
    type Stored = String;

    fn to_stored(&self) -> String {
        self.as_str().to_string()
    }

    fn from_stored(stored: String) -> Self {
        Self::try_from_stored(stored).unwrap_or_else(|e| abort_conversion(e))
    }

    fn try_from_stored(stored: String) -> ConversionResult<Self> {
        url::Url::parse(&stored).map_err(|e| ConversionError::Invalid {
            type_name: "url::Url",
            message: e.to_string(),
        })
    }
}

/// Sub-microsecond precision is truncated.
impl StorableValue for DateTime<Utc> {
    type Stored = Timestamp;

    fn to_stored(&self) -> Timestamp {
        Timestamp::from_micros(self.timestamp_micros())
    }

    fn from_stored(stored: Timestamp) -> Self {
        Self::try_from_stored(stored).unwrap_or_else(|e| abort_conversion(e))
    }

    fn try_from_stored(stored: Timestamp) -> ConversionResult<Self> {
        DateTime::<Utc>::from_timestamp_micros(stored.as_micros()).ok_or_else(|| {
            ConversionError::Invalid {
                type_name: "chrono::DateTime<Utc>",
                message: format!("timestamp {stored} out of range"),
            }
        })
    }
}

// ============================================================================
// Enumerations over a raw value
// ============================================================================

/// An enumeration whose cases map to raw storable values
///
/// Opt into storage with [`storable_raw!`](crate::storable_raw):
///
/// ```
/// use prefstore_core::{storable_raw, RawRepresentable, StorableValue};
///
/// #[derive(Debug, PartialEq)]
/// enum Theme {
///     Light,
///     Dark,
/// }
///
/// impl RawRepresentable for Theme {
///     type Raw = String;
///
///     fn raw_value(&self) -> String {
///         match self {
///             Theme::Light => "light".into(),
///             Theme::Dark => "dark".into(),
///         }
///     }
///
///     fn from_raw(raw: &String) -> Option<Self> {
///         match raw.as_str() {
///             "light" => Some(Theme::Light),
///             "dark" => Some(Theme::Dark),
///             _ => None,
///         }
///     }
/// }
///
/// storable_raw!(Theme);
///
/// assert_eq!(Theme::Dark.to_stored(), "dark");
/// assert_eq!(Theme::from_stored("light".to_string()), Theme::Light);
/// ```
pub trait RawRepresentable: Sized {
    /// Raw value type
    type Raw: StorableValue + std::fmt::Debug;

    /// Raw value of this case
    fn raw_value(&self) -> Self::Raw;

    /// Case for a raw value, if any
    fn from_raw(raw: &Self::Raw) -> Option<Self>;
}

/// Conversions backing [`storable_raw!`](crate::storable_raw)
pub mod raw {
    use super::*;

    type StoredOf<E> = <<E as RawRepresentable>::Raw as StorableValue>::Stored;

    /// Primitive form of a case
    pub fn to_stored<E: RawRepresentable>(value: &E) -> StoredOf<E> {
        value.raw_value().to_stored()
    }

    /// Fallible primitive form of a case
    pub fn try_to_stored<E: RawRepresentable>(value: &E) -> ConversionResult<StoredOf<E>> {
        value.raw_value().try_to_stored()
    }

    /// Case for a primitive form; aborts when no case matches
    #[track_caller]
    pub fn from_stored<E: RawRepresentable>(stored: StoredOf<E>) -> E {
        try_from_stored(stored).unwrap_or_else(|e| abort_conversion(e))
    }

    /// Case for a primitive form
    pub fn try_from_stored<E: RawRepresentable>(stored: StoredOf<E>) -> ConversionResult<E> {
        let raw = E::Raw::try_from_stored(stored)?;
        E::from_raw(&raw).ok_or_else(|| ConversionError::UnknownRawValue {
            type_name: std::any::type_name::<E>(),
            raw: format!("{raw:?}"),
        })
    }
}

/// Implement [`StorableValue`] for [`RawRepresentable`] types
#[macro_export]
macro_rules! storable_raw {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::StorableValue for $ty {
                type Stored = <<$ty as $crate::RawRepresentable>::Raw as $crate::StorableValue>::Stored;

                fn to_stored(&self) -> Self::Stored {
                    $crate::storable::raw::to_stored(self)
                }

                fn from_stored(stored: Self::Stored) -> Self {
                    $crate::storable::raw::from_stored(stored)
                }

                fn try_to_stored(&self) -> $crate::ConversionResult<Self::Stored> {
                    $crate::storable::raw::try_to_stored(self)
                }

                fn try_from_stored(stored: Self::Stored) -> $crate::ConversionResult<Self> {
                    $crate::storable::raw::try_from_stored(stored)
                }
            }
        )+
    };
}

// ============================================================================
// Codec-backed structured values
// ============================================================================

/// Conversions backing [`storable_codable!`](crate::storable_codable)
pub mod codable {
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use super::abort_conversion;
    use crate::codec::StructuredCodec;
    use crate::error::{ConversionError, ConversionResult};
    use crate::value::Blob;

    /// Encode with codec `C`
    pub fn try_to_stored<C, T>(value: &T) -> ConversionResult<Blob>
    where
        C: StructuredCodec + Default,
        T: Serialize,
    {
        C::default()
            .encode(value)
            .map(Blob::from)
            .map_err(|source| ConversionError::Encode {
                type_name: std::any::type_name::<T>(),
                source,
            })
    }

    /// Decode with codec `C`
    pub fn try_from_stored<C, T>(stored: Blob) -> ConversionResult<T>
    where
        C: StructuredCodec + Default,
        T: DeserializeOwned,
    {
        C::default()
            .decode(stored.as_slice())
            .map_err(|source| ConversionError::Decode {
                type_name: std::any::type_name::<T>(),
                source,
            })
    }

    /// Encode with codec `C`; aborts on failure
    #[track_caller]
    pub fn to_stored<C, T>(value: &T) -> Blob
    where
        C: StructuredCodec + Default,
        T: Serialize,
    {
        try_to_stored::<C, T>(value).unwrap_or_else(|e| abort_conversion(e))
    }

    /// Decode with codec `C`; aborts on failure
    #[track_caller]
    pub fn from_stored<C, T>(stored: Blob) -> T
    where
        C: StructuredCodec + Default,
        T: DeserializeOwned,
    {
        try_from_stored::<C, T>(stored).unwrap_or_else(|e| abort_conversion(e))
    }
}

/// Implement [`StorableValue`] for a serde type, stored as an encoded blob
///
/// The codec defaults to [`JsonCodec`](crate::codec::JsonCodec):
///
/// ```
/// use prefstore_core::codec::MessagePackCodec;
/// use prefstore_core::{storable_codable, StorableValue};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Cursor(u64);
///
/// storable_codable!(Window);
/// storable_codable!(Cursor, MessagePackCodec);
///
/// let window = Window { width: 800, height: 600 };
/// assert_eq!(window.to_stored().as_slice(), br#"{"width":800,"height":600}"#);
/// assert_eq!(Window::from_stored(window.to_stored()), window);
/// ```
#[macro_export]
macro_rules! storable_codable {
    ($ty:ty) => {
        $crate::storable_codable!($ty, $crate::codec::JsonCodec);
    };
    ($ty:ty, $codec:ty) => {
        impl $crate::StorableValue for $ty {
            type Stored = $crate::Blob;

            fn to_stored(&self) -> $crate::Blob {
                $crate::storable::codable::to_stored::<$codec, Self>(self)
            }

            fn from_stored(stored: $crate::Blob) -> Self {
                $crate::storable::codable::from_stored::<$codec, Self>(stored)
            }

            fn try_to_stored(&self) -> $crate::ConversionResult<$crate::Blob> {
                $crate::storable::codable::try_to_stored::<$codec, Self>(self)
            }

            fn try_from_stored(stored: $crate::Blob) -> $crate::ConversionResult<Self> {
                $crate::storable::codable::try_from_stored::<$codec, Self>(stored)
            }
        }
    };
}
