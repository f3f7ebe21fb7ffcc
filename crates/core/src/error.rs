//! Error types for prefstore
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Conversion failures are not part of normal control flow: the infallible
//! conversion API aborts on them, and the `try_*` API hands them back as
//! `ConversionError` for callers that prefer to recover.

use std::io;
use thiserror::Error;

/// Result type alias for conversions
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

/// Result type alias for storage backends
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Encoding a structured value failed
    #[error("Encode error ({codec}): {message}")]
    Encode {
        /// Codec identifier
        codec: &'static str,
        /// Underlying error message
        message: String,
    },

    /// Decoding bytes into a structured value failed
    #[error("Decode error ({codec}): {message}")]
    Decode {
        /// Codec identifier
        codec: &'static str,
        /// Underlying error message
        message: String,
    },

    /// Unknown codec identifier
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),
}

/// Failure converting between a typed value and its primitive form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A structured value could not be encoded
    #[error("Cannot encode {type_name}: {source}")]
    Encode {
        /// Rust type being encoded
        type_name: &'static str,
        /// Codec failure
        source: CodecError,
    },

    /// Stored bytes could not be decoded (corruption or schema mismatch)
    #[error("Cannot decode {type_name}: {source}")]
    Decode {
        /// Rust type being decoded
        type_name: &'static str,
        /// Codec failure
        source: CodecError,
    },

    /// A raw value matches no case of the target enumeration
    #[error("No case of {type_name} has raw value {raw}")]
    UnknownRawValue {
        /// Enumeration type
        type_name: &'static str,
        /// Debug rendering of the offending raw value
        raw: String,
    },

    /// A stored string is not a valid instance of the target type
    #[error("Invalid {type_name}: {message}")]
    Invalid {
        /// Target type
        type_name: &'static str,
        /// Parser message
        message: String,
    },
}

/// Storage backend errors
///
/// Only surfaced by backend-specific operations (open, flush, config);
/// the `KeyValueStore` methods themselves are infallible.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing the backing file
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The on-disk format could not be encoded or decoded
    #[error("Format error: {0}")]
    Format(#[from] CodecError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}
