//! Bincode codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::StructuredCodec;
use crate::error::CodecError;

/// Compact binary codec backed by `bincode`.
///
/// Not self-describing: a blob only decodes into the exact shape that
/// produced it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl StructuredCodec for BincodeCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Encode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn codec_id(&self) -> &'static str {
        "bincode"
    }
}
