//! Bare bincode payloads.

use bincode::{DefaultOptions, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{CodecOptions, IntEncoding};
use crate::error::{DecodeError, EncodeError};

/// Encodes a value as a bincode payload.
///
/// With [`IntEncoding::Fixed`] the output matches `bincode::serialize`.
pub fn encode_binary<T: Serialize + ?Sized>(
    value: &T,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    encode_with(value, options.int_encoding, options.max_size)
}

/// Decodes a bincode payload. Trailing bytes are rejected.
pub fn decode_binary<T: DeserializeOwned>(
    bytes: &[u8],
    options: &CodecOptions,
) -> Result<T, DecodeError> {
    decode_with(bytes, options.int_encoding, options.max_size)
}

pub(crate) fn encode_with<T: Serialize + ?Sized>(
    value: &T,
    int_encoding: IntEncoding,
    max_size: u64,
) -> Result<Vec<u8>, EncodeError> {
    match int_encoding {
        IntEncoding::Fixed => {
            serialize_bounded(DefaultOptions::new().with_fixint_encoding(), value, max_size)
        }
        IntEncoding::Varint => {
            serialize_bounded(DefaultOptions::new().with_varint_encoding(), value, max_size)
        }
    }
}

fn serialize_bounded<O: Options + Copy, T: Serialize + ?Sized>(
    options: O,
    value: &T,
    max_size: u64,
) -> Result<Vec<u8>, EncodeError> {
    let len = options.serialized_size(value)?;
    if len > max_size {
        return Err(EncodeError::LengthExceedsLimit {
            field: "payload",
            len,
            max: max_size,
        });
    }
    Ok(options.serialize(value)?)
}

pub(crate) fn decode_with<T: DeserializeOwned>(
    bytes: &[u8],
    int_encoding: IntEncoding,
    max_size: u64,
) -> Result<T, DecodeError> {
    if bytes.len() as u64 > max_size {
        return Err(DecodeError::LengthExceedsLimit {
            field: "payload",
            len: bytes.len() as u64,
            max: max_size,
        });
    }
    let base = DefaultOptions::new().with_limit(max_size);
    let result = match int_encoding {
        IntEncoding::Fixed => base.with_fixint_encoding().deserialize(bytes),
        IntEncoding::Varint => base.with_varint_encoding().deserialize(bytes),
    };
    result.map_err(DecodeError::from)
}
