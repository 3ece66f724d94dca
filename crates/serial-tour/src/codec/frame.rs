//! Framed bincode payloads with optional zstd compression.
//!
//! Wire layout:
//! - Uncompressed: `SERT` magic + version + flags + bincode payload
//! - Compressed: `SERTZ` magic + varint uncompressed size + zstd(uncompressed frame)
//!
//! The flags byte records the integer encoding of the payload, so a frame
//! decodes without the caller knowing which encoding produced it.

use std::io::Read;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::binary::{decode_with, encode_with};
use crate::codec::primitives::{Reader, Writer};
use crate::codec::{CodecOptions, IntEncoding};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    FLAG_VARINT, FLAGS_KNOWN, FORMAT_VERSION, MAGIC_COMPRESSED, MAGIC_UNCOMPRESSED,
    MAX_INITIAL_CAPACITY, MIN_FORMAT_VERSION,
};

const HEADER_LEN: usize = MAGIC_UNCOMPRESSED.len() + 2;

// =============================================================================
// DECODING
// =============================================================================

/// Decompresses a `SERTZ` frame, returning the uncompressed `SERT` frame.
pub fn decompress(input: &[u8], options: &CodecOptions) -> Result<Vec<u8>, DecodeError> {
    if input.len() < MAGIC_COMPRESSED.len() {
        return Err(DecodeError::UnexpectedEof { context: "magic" });
    }
    if &input[..MAGIC_COMPRESSED.len()] != MAGIC_COMPRESSED {
        return Err(invalid_magic(input));
    }
    decompress_zstd(&input[MAGIC_COMPRESSED.len()..], options.max_size)
}

/// Decodes a value from a compressed or uncompressed frame.
///
/// Compression is detected from the magic bytes. The integer encoding comes
/// from the frame flags; `options` only supplies the size limit, which bounds
/// the whole uncompressed frame.
pub fn decode_framed<T: DeserializeOwned>(
    input: &[u8],
    options: &CodecOptions,
) -> Result<T, DecodeError> {
    if input.len() < MAGIC_UNCOMPRESSED.len() {
        return Err(DecodeError::UnexpectedEof { context: "magic" });
    }

    if input.starts_with(MAGIC_COMPRESSED) {
        let frame = decompress(input, options)?;
        tracing::trace!(compressed = input.len(), uncompressed = frame.len(), "decompressed frame");
        decode_uncompressed(&frame, options)
    } else if input.starts_with(MAGIC_UNCOMPRESSED) {
        decode_uncompressed(input, options)
    } else {
        Err(invalid_magic(input))
    }
}

fn decode_uncompressed<T: DeserializeOwned>(
    input: &[u8],
    options: &CodecOptions,
) -> Result<T, DecodeError> {
    if input.len() as u64 > options.max_size {
        return Err(DecodeError::LengthExceedsLimit {
            field: "frame",
            len: input.len() as u64,
            max: options.max_size,
        });
    }

    let mut reader = Reader::new(input);

    let magic = reader.read_bytes(MAGIC_UNCOMPRESSED.len(), "magic")?;
    if magic != MAGIC_UNCOMPRESSED {
        return Err(invalid_magic(input));
    }

    let version = reader.read_byte("version")?;
    if !(MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let flags = reader.read_byte("flags")?;
    if flags & !FLAGS_KNOWN != 0 {
        return Err(DecodeError::ReservedBitsSet {
            context: "frame flags",
            bits: flags & !FLAGS_KNOWN,
        });
    }
    let int_encoding = if flags & FLAG_VARINT != 0 {
        IntEncoding::Varint
    } else {
        IntEncoding::Fixed
    };

    decode_with(reader.remaining(), int_encoding, options.max_size)
}

fn decompress_zstd(compressed: &[u8], max_size: u64) -> Result<Vec<u8>, DecodeError> {
    let mut reader = Reader::new(compressed);
    let declared = reader.read_varint("uncompressed_size")?;

    if declared > max_size {
        return Err(DecodeError::LengthExceedsLimit {
            field: "uncompressed_size",
            len: declared,
            max: max_size,
        });
    }
    let declared_size = declared as usize;

    let decoder = zstd::Decoder::new(reader.remaining())
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    // Read one byte past the declared size so an oversized stream is caught
    // without inflating it completely.
    let mut decompressed = Vec::with_capacity(declared_size.min(MAX_INITIAL_CAPACITY));
    decoder
        .take(declared + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() != declared_size {
        return Err(DecodeError::UncompressedSizeMismatch {
            declared: declared_size,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}

fn invalid_magic(input: &[u8]) -> DecodeError {
    let mut found = [0u8; 4];
    let n = input.len().min(4);
    found[..n].copy_from_slice(&input[..n]);
    DecodeError::InvalidMagic { found }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value as an uncompressed `SERT` frame.
///
/// The size limit applies to the whole frame, header included.
pub fn encode_framed<T: Serialize + ?Sized>(
    value: &T,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    let payload = encode_with(value, options.int_encoding, options.max_size)?;

    let flags = match options.int_encoding {
        IntEncoding::Fixed => 0,
        IntEncoding::Varint => FLAG_VARINT,
    };

    let mut writer = Writer::with_capacity(HEADER_LEN + payload.len());
    writer.write_bytes(MAGIC_UNCOMPRESSED);
    writer.write_byte(FORMAT_VERSION);
    writer.write_byte(flags);
    writer.write_bytes(&payload);
    let frame = writer.into_bytes();

    if frame.len() as u64 > options.max_size {
        return Err(EncodeError::LengthExceedsLimit {
            field: "frame",
            len: frame.len() as u64,
            max: options.max_size,
        });
    }
    Ok(frame)
}

/// Encodes a value as a zstd-compressed `SERTZ` frame.
///
/// The size limit applies to the uncompressed frame, as in [`encode_framed`].
pub fn encode_framed_compressed<T: Serialize + ?Sized>(
    value: &T,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    let uncompressed = encode_framed(value, options)?;

    let compressed = zstd::encode_all(uncompressed.as_slice(), options.compression_level)
        .map_err(|e| EncodeError::CompressionFailed(e.to_string()))?;

    let mut writer = Writer::with_capacity(MAGIC_COMPRESSED.len() + 10 + compressed.len());
    writer.write_bytes(MAGIC_COMPRESSED);
    writer.write_varint(uncompressed.len() as u64);
    writer.write_bytes(&compressed);
    Ok(writer.into_bytes())
}
