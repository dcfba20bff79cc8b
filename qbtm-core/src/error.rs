//! Error types for the value model and store

use thiserror::Error;

/// Errors from encoding, decoding, and store operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Integer magnitude too large for the one-byte length prefix
    #[error("integer magnitude of {bytes} bytes exceeds the 255-byte encoding limit")]
    MagnitudeOverflow { bytes: usize },

    /// Unknown discriminator byte during decoding
    #[error("unknown discriminator byte 0x{byte:02X} at offset {offset}")]
    UnknownDiscriminator { byte: u8, offset: usize },

    /// Input ended before the value was complete
    #[error("truncated value: needed {needed} more bytes at offset {offset}")]
    TruncatedValue { offset: usize, needed: usize },

    /// Value nesting deeper than the decoder allows
    #[error("value nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    /// Text payload failed UTF-8 validation
    #[error("text payload at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Value bytes parsed but violate a structural rule
    #[error("malformed value: {reason}")]
    MalformedValue { reason: &'static str },

    /// Primitive ordinal outside the closed 0..=23 set
    #[error("unknown primitive ordinal {ordinal}")]
    UnknownPrimitive { ordinal: i64 },

    /// Block size outside 1..=u32::MAX
    #[error("invalid block size {size}: block sizes are positive 32-bit integers")]
    InvalidBlockSize { size: i64 },

    /// Digest bytes of the wrong length
    #[error("digest must be exactly 32 bytes, got {len}")]
    InvalidDigestLength { len: usize },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
