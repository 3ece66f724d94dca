//! Encoding and decoding in binary and JSON form.
//!
//! Binary payloads come from bincode, text from serde_json. [`frame`] adds an
//! optional versioned header and zstd compression around a bincode payload.

pub mod binary;
pub mod frame;
pub mod json;
pub mod primitives;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{DecodeError, EncodeError, UnknownName};
use crate::limits::{
    DEFAULT_COMPRESSION_LEVEL, MAGIC_COMPRESSED, MAGIC_UNCOMPRESSED, MAX_PAYLOAD_SIZE,
};

pub use binary::{decode_binary, encode_binary};
pub use frame::{decode_framed, decompress, encode_framed, encode_framed_compressed};
pub use json::{decode_json, encode_json, encode_json_pretty, to_json_value};
pub use primitives::{Reader, Writer};

/// Wire representation to encode into or decode from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Bare bincode payload.
    Binary,
    /// Bincode payload behind a `SERT` header.
    Framed,
    /// zstd-compressed frame behind a `SERTZ` header.
    Compressed,
    /// Compact JSON text.
    Json,
    /// Indented JSON text.
    JsonPretty,
}

impl Format {
    /// All formats, binary first.
    pub const ALL: [Format; 5] = [
        Format::Binary,
        Format::Framed,
        Format::Compressed,
        Format::Json,
        Format::JsonPretty,
    ];

    /// Name used on the command line and in reports.
    pub fn name(self) -> &'static str {
        match self {
            Format::Binary => "binary",
            Format::Framed => "framed",
            Format::Compressed => "compressed",
            Format::Json => "json",
            Format::JsonPretty => "json-pretty",
        }
    }

    /// Returns true if the encoded form is UTF-8 text.
    pub fn is_text(self) -> bool {
        matches!(self, Format::Json | Format::JsonPretty)
    }

    /// Identifies a framed encoding by its magic bytes.
    ///
    /// Bare bincode and JSON carry no marker, so they are never detected.
    pub fn detect(bytes: &[u8]) -> Option<Format> {
        if bytes.starts_with(MAGIC_COMPRESSED) {
            Some(Format::Compressed)
        } else if bytes.starts_with(MAGIC_UNCOMPRESSED) {
            Some(Format::Framed)
        } else {
            None
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| UnknownName {
                what: "format",
                name: s.to_string(),
                expected: Format::ALL.map(Format::name).join(", "),
            })
    }
}

/// Integer layout inside bincode payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntEncoding {
    /// Fixed-width little-endian integers (`bincode::serialize` layout).
    #[default]
    Fixed,
    /// Variable-length integers.
    Varint,
}

/// Settings shared by every codec entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Integer layout for bare binary payloads, and for framed payloads on encode.
    pub int_encoding: IntEncoding,
    /// zstd level for [`Format::Compressed`].
    pub compression_level: i32,
    /// Largest encoding accepted in either direction: the bincode payload for
    /// [`Format::Binary`], the text for JSON, and the whole uncompressed frame
    /// for [`Format::Framed`] and [`Format::Compressed`].
    pub max_size: u64,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            int_encoding: IntEncoding::Fixed,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl CodecOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integer layout.
    pub fn int_encoding(mut self, int_encoding: IntEncoding) -> Self {
        self.int_encoding = int_encoding;
        self
    }

    /// Sets the zstd compression level.
    pub fn compression_level(mut self, level: i32) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets the payload size limit.
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Encodes a value in the given format.
pub fn encode<T: Serialize + ?Sized>(
    value: &T,
    format: Format,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = match format {
        Format::Binary => encode_binary(value, options)?,
        Format::Framed => encode_framed(value, options)?,
        Format::Compressed => encode_framed_compressed(value, options)?,
        Format::Json => encode_json(value, options)?,
        Format::JsonPretty => encode_json_pretty(value, options)?,
    };
    tracing::debug!(%format, len = bytes.len(), "encoded value");
    Ok(bytes)
}

/// Decodes a value from the given format.
pub fn decode<T: DeserializeOwned>(
    bytes: &[u8],
    format: Format,
    options: &CodecOptions,
) -> Result<T, DecodeError> {
    tracing::debug!(%format, len = bytes.len(), "decoding value");
    match format {
        Format::Binary => decode_binary(bytes, options),
        Format::Framed | Format::Compressed => decode_framed(bytes, options),
        Format::Json | Format::JsonPretty => decode_json(bytes, options),
    }
}
