//! Error types for encoding, decoding and round-trip checks.

use thiserror::Error;

use crate::codec::Format;

/// Coarse classification of decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Invalid magic/version
    InvalidMagicOrVersion,
    /// E002: Malformed frame header, length or compression envelope
    MalformedFrame,
    /// E003: Payload rejected by the underlying codec or over the size limit
    PayloadRejected,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidMagicOrVersion => "E001",
            ErrorCode::MalformedFrame => "E002",
            ErrorCode::PayloadRejected => "E003",
        }
    }
}

/// Error during decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Invalid magic/version ===
    #[error("[E001] invalid magic bytes: expected SERT or SERTZ, found {found:?}")]
    InvalidMagic { found: [u8; 4] },

    #[error("[E001] unsupported frame version: {version}")]
    UnsupportedVersion { version: u8 },

    // === E002: Malformed frame ===
    #[error("[E002] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("[E002] varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("[E002] varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("[E002] reserved bits are non-zero in {context}: {bits:#04x}")]
    ReservedBitsSet { context: &'static str, bits: u8 },

    /// Bare `payload` and `json` limits classify as E003, frame limits as E002.
    #[error("[{}] {field} length {len} exceeds maximum {max}", limit_code(.field).code())]
    LengthExceedsLimit {
        field: &'static str,
        len: u64,
        max: u64,
    },

    #[error("[E002] zstd decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("[E002] decompressed size {actual} doesn't match declared {declared}")]
    UncompressedSizeMismatch { declared: usize, actual: usize },

    // === E003: Payload rejected ===
    #[error("[E003] binary payload rejected: {0}")]
    Binary(String),

    #[error("[E003] JSON payload rejected: {0}")]
    Json(String),
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidMagic { .. } | DecodeError::UnsupportedVersion { .. } => {
                ErrorCode::InvalidMagicOrVersion
            }
            DecodeError::Binary(_) | DecodeError::Json(_) => ErrorCode::PayloadRejected,
            DecodeError::LengthExceedsLimit { field, .. } => limit_code(field),
            _ => ErrorCode::MalformedFrame,
        }
    }
}

fn limit_code(field: &str) -> ErrorCode {
    match field {
        "payload" | "json" => ErrorCode::PayloadRejected,
        _ => ErrorCode::MalformedFrame,
    }
}

impl From<bincode::Error> for DecodeError {
    fn from(e: bincode::Error) -> Self {
        DecodeError::Binary(e.to_string())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

/// Error during encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("binary encoding failed: {0}")]
    Binary(String),

    #[error("JSON encoding failed: {0}")]
    Json(String),

    #[error("zstd compression failed: {0}")]
    CompressionFailed(String),

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: u64,
        max: u64,
    },
}

impl From<bincode::Error> for EncodeError {
    fn from(e: bincode::Error) -> Self {
        EncodeError::Binary(e.to_string())
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        EncodeError::Json(e.to_string())
    }
}

/// Error from a round-trip check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoundTripError {
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("{format} round-trip changed the value: expected {expected}, decoded {decoded}")]
    Mismatch {
        format: Format,
        expected: String,
        decoded: String,
    },
}

/// A format or sample name that isn't recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} {name:?} (expected one of: {expected})")]
pub struct UnknownName {
    pub what: &'static str,
    pub name: String,
    pub expected: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{CodecOptions, Format, decode};

    #[test]
    fn test_limit_codes() {
        let tight = CodecOptions::new().max_size(2);
        let big = vec![0u8; 16];

        let binary = crate::codec::encode_binary(&big, &CodecOptions::default()).unwrap();
        let err = decode::<Vec<u8>>(&binary, Format::Binary, &tight).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadRejected);
        assert!(err.to_string().starts_with("[E003] payload length"));

        let err = decode::<Vec<u8>>(b"[1,2,3]", Format::Json, &tight).unwrap_err();
        assert_eq!(err.code(), ErrorCode::PayloadRejected);
        assert!(err.to_string().starts_with("[E003] json length"));

        let framed = crate::codec::encode_framed(&big, &CodecOptions::default()).unwrap();
        let err = decode::<Vec<u8>>(&framed, Format::Framed, &tight).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedFrame);
        assert!(err.to_string().starts_with("[E002] frame length"));
    }
}
