//! JSON text via serde_json.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::CodecOptions;
use crate::error::{DecodeError, EncodeError};

/// Encodes a value as compact JSON.
pub fn encode_json<T: Serialize + ?Sized>(
    value: &T,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    check_encoded_len(serde_json::to_vec(value)?, options)
}

/// Encodes a value as indented JSON.
pub fn encode_json_pretty<T: Serialize + ?Sized>(
    value: &T,
    options: &CodecOptions,
) -> Result<Vec<u8>, EncodeError> {
    check_encoded_len(serde_json::to_vec_pretty(value)?, options)
}

fn check_encoded_len(bytes: Vec<u8>, options: &CodecOptions) -> Result<Vec<u8>, EncodeError> {
    if bytes.len() as u64 > options.max_size {
        return Err(EncodeError::LengthExceedsLimit {
            field: "json",
            len: bytes.len() as u64,
            max: options.max_size,
        });
    }
    Ok(bytes)
}

/// Decodes JSON text. Compact and indented input are both accepted.
pub fn decode_json<T: DeserializeOwned>(
    bytes: &[u8],
    options: &CodecOptions,
) -> Result<T, DecodeError> {
    if bytes.len() as u64 > options.max_size {
        return Err(DecodeError::LengthExceedsLimit {
            field: "json",
            len: bytes.len() as u64,
            max: options.max_size,
        });
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Converts a value into an untyped JSON tree.
pub fn to_json_value<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, EncodeError> {
    Ok(serde_json::to_value(value)?)
}
