//! Codec adapter for structured values.
//!
//! A structured value is stored as a byte blob produced by a
//! [`StructuredCodec`]. JSON is the default; MessagePack and bincode can be
//! substituted per type (see [`storable_codable!`](crate::storable_codable)).
//!
//! # Usage
//!
//! ```
//! use prefstore_core::codec::{codec_for_id, StructuredCodec};
//!
//! let codec = codec_for_id("msgpack").unwrap();
//! let bytes = codec.encode(&("hi", 3)).unwrap();
//! let back: (String, i32) = codec.decode(&bytes).unwrap();
//! assert_eq!(back, ("hi".to_string(), 3));
//! ```

mod binary;
mod json;
mod msgpack;
mod traits;

pub use binary::BincodeCodec;
pub use json::JsonCodec;
pub use msgpack::MessagePackCodec;
pub use traits::StructuredCodec;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// A codec chosen at runtime.
///
/// `StructuredCodec` has generic methods and so cannot be a trait object;
/// this enum is the closed alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnyCodec {
    /// `serde_json`
    #[default]
    Json,
    /// `rmp-serde`
    MessagePack,
    /// `bincode`
    Bincode,
}

impl StructuredCodec for AnyCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            AnyCodec::Json => JsonCodec.encode(value),
            AnyCodec::MessagePack => MessagePackCodec.encode(value),
            AnyCodec::Bincode => BincodeCodec.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        match self {
            AnyCodec::Json => JsonCodec.decode(bytes),
            AnyCodec::MessagePack => MessagePackCodec.decode(bytes),
            AnyCodec::Bincode => BincodeCodec.decode(bytes),
        }
    }

    fn codec_id(&self) -> &'static str {
        match self {
            AnyCodec::Json => JsonCodec.codec_id(),
            AnyCodec::MessagePack => MessagePackCodec.codec_id(),
            AnyCodec::Bincode => BincodeCodec.codec_id(),
        }
    }
}

/// Get a codec by its identifier.
///
/// # Known Codecs
///
/// - `"json"`
/// - `"msgpack"`
/// - `"bincode"`
pub fn codec_for_id(codec_id: &str) -> Result<AnyCodec, CodecError> {
    match codec_id {
        "json" => Ok(AnyCodec::Json),
        "msgpack" => Ok(AnyCodec::MessagePack),
        "bincode" => Ok(AnyCodec::Bincode),
        _ => Err(CodecError::UnknownCodec(codec_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Timestamp, Value};
    use std::collections::HashMap;

    fn sample() -> Value {
        let mut map = HashMap::new();
        map.insert("when".to_string(), Value::Date(Timestamp::from_micros(12)));
        map.insert("tags".to_string(), Value::Set(vec![Value::from("a")]));
        map.insert("raw".to_string(), Value::Bytes(vec![0, 255]));
        Value::Object(map)
    }

    #[test]
    fn test_codec_for_known_ids() {
        for id in ["json", "msgpack", "bincode"] {
            let codec = codec_for_id(id).unwrap();
            assert_eq!(codec.codec_id(), id);
        }
    }

    #[test]
    fn test_codec_for_unknown_id() {
        let result = codec_for_id("yaml");
        assert!(matches!(result, Err(CodecError::UnknownCodec(id)) if id == "yaml"));
    }

    #[test]
    fn test_every_codec_carries_values() {
        for codec in [AnyCodec::Json, AnyCodec::MessagePack, AnyCodec::Bincode] {
            let bytes = codec.encode(&sample()).unwrap();
            let back: Value = codec.decode(&bytes).unwrap();
            assert_eq!(back, sample(), "codec {}", codec.codec_id());
        }
    }

    #[test]
    fn test_default_codec_is_json() {
        assert_eq!(AnyCodec::default(), AnyCodec::Json);
    }

    #[test]
    fn test_codecs_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnyCodec>();
        assert_send_sync::<JsonCodec>();
        assert_send_sync::<MessagePackCodec>();
        assert_send_sync::<BincodeCodec>();
    }
}
