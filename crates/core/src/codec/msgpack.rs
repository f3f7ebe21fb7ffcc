//! MessagePack codec.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::traits::StructuredCodec;
use crate::error::CodecError;

/// MessagePack codec backed by `rmp-serde`.
///
/// Structs are written as maps with field names, so adding an optional
/// field does not invalidate previously stored blobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec;

impl StructuredCodec for MessagePackCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(value).map_err(|e| CodecError::Encode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        rmp_serde::from_slice(bytes).map_err(|e| CodecError::Decode {
            codec: self.codec_id(),
            message: e.to_string(),
        })
    }

    fn codec_id(&self) -> &'static str {
        "msgpack"
    }
}
