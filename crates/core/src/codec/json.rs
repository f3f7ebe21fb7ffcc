//! JSON codec, the default for codec-backed values.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::StructuredCodec;
use crate::error::CodecError;

/// JSON codec backed by `serde_json`.
///
/// # Example
///
/// ```
/// use prefstore_core::codec::{JsonCodec, StructuredCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&vec![1, 2, 3]).unwrap();
/// assert_eq!(bytes, b"[1,2,3]");
///
/// let back: Vec<i32> = codec.decode(&bytes).unwrap();
/// assert_eq!(back, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl StructuredCodec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn codec_id(&self) -> &'static str {
        "json"
    }
}
