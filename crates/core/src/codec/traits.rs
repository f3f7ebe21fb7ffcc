//! Structured codec trait definitions.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// Structured codec trait.
///
/// Turns any serde-serializable value into a byte blob and back. A
/// codec-backed storable value picks its codec statically; the file store
/// picks one at runtime through [`AnyCodec`](super::AnyCodec).
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync` so a shared store can encode from any
/// thread.
pub trait StructuredCodec: Send + Sync {
    /// Encode a value into bytes.
    ///
    /// Fails only for values the format cannot represent (e.g. maps with
    /// non-string keys in JSON).
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes produced by [`encode`](Self::encode).
    ///
    /// Returns an error if the bytes are corrupted or describe a different
    /// shape than `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;

    /// Unique codec identifier.
    fn codec_id(&self) -> &'static str;
}
