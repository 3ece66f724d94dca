//! Round-trip verification.
//!
//! A value passes when decoding its encoding yields an equal value. NaN
//! floats never pass, since they are not equal to themselves.

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::codec::{CodecOptions, Format, decode, encode};
use crate::error::RoundTripError;
use crate::samples::{SampleKind, catalog};

/// First 16 bytes of the SHA-256 of an encoding.
pub type Fingerprint = [u8; 16];

/// Outcome of a successful round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundTrip {
    pub format: Format,
    pub encoded_len: usize,
    pub fingerprint: Fingerprint,
}

/// One catalog sample's result.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub kind: SampleKind,
    pub result: Result<RoundTrip, RoundTripError>,
}

/// Encodes, decodes and compares a value.
pub fn verify_roundtrip<T>(
    value: &T,
    format: Format,
    options: &CodecOptions,
) -> Result<RoundTrip, RoundTripError>
where
    T: Serialize + DeserializeOwned + PartialEq + Debug,
{
    let bytes = encode(value, format, options)?;
    let decoded: T = decode(&bytes, format, options)?;

    if decoded != *value {
        tracing::warn!(%format, ?value, ?decoded, "round-trip mismatch");
        return Err(RoundTripError::Mismatch {
            format,
            expected: format!("{:?}", value),
            decoded: format!("{:?}", decoded),
        });
    }

    Ok(RoundTrip {
        format,
        encoded_len: bytes.len(),
        fingerprint: fingerprint(&bytes),
    })
}

/// Round-trips every catalog sample in one format.
pub fn verify_catalog(format: Format, options: &CodecOptions) -> Vec<CatalogEntry> {
    catalog()
        .iter()
        .map(|sample| CatalogEntry {
            kind: sample.kind(),
            result: sample.roundtrip(format, options),
        })
        .collect()
}

/// Hashes encoded bytes.
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    let hash = Sha256::digest(bytes);
    let mut out = [0u8; 16];
    out.copy_from_slice(&hash[..16]);
    out
}

/// Renders a fingerprint as lowercase hex.
pub fn format_fingerprint(fingerprint: &Fingerprint) -> String {
    fingerprint.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::IntEncoding;
    use crate::error::EncodeError;
    use crate::model::{Line, Point};
    use proptest::prelude::*;
    use serde::Deserialize;

    #[test]
    fn test_sample_primitives() {
        let options = CodecOptions::default();
        for format in Format::ALL {
            verify_roundtrip(&5i32, format, &options).unwrap();
            verify_roundtrip(&3.14f64, format, &options).unwrap();
            verify_roundtrip(&vec![1u8, 2, 3], format, &options).unwrap();
        }
    }

    #[test]
    fn test_report_fields() {
        let options = CodecOptions::default();
        let report = verify_roundtrip(&5i32, Format::Binary, &options).unwrap();
        assert_eq!(report.format, Format::Binary);
        assert_eq!(report.encoded_len, 4);
        assert_eq!(report.fingerprint, fingerprint(&[5, 0, 0, 0]));
    }

    #[test]
    fn test_nan_mismatch() {
        let options = CodecOptions::default();
        let result = verify_roundtrip(&Point::new(f64::NAN, 0.0), Format::Binary, &options);
        assert!(matches!(
            result,
            Err(RoundTripError::Mismatch { format: Format::Binary, .. })
        ));
    }

    #[test]
    fn test_nan_in_json_is_decode_error() {
        let options = CodecOptions::default();
        let result = verify_roundtrip(&f64::NAN, Format::Json, &options);
        assert!(matches!(result, Err(RoundTripError::Decode(_))));
    }

    #[test]
    fn test_size_limit_fails_every_format() {
        let options = CodecOptions::new().max_size(8);
        for format in Format::ALL {
            let result = verify_roundtrip(&vec![0u8; 16], format, &options);
            assert!(
                matches!(result, Err(RoundTripError::Encode(EncodeError::LengthExceedsLimit { .. }))),
                "{} got {:?}",
                format,
                result
            );
        }
    }

    /// Serializes its field but skips it on the way back in.
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Lossy {
        kept: u8,
        #[serde(skip_deserializing)]
        dropped: u8,
    }

    #[test]
    fn test_lossy_type_reports_both_values() {
        let options = CodecOptions::default();
        let value = Lossy { kept: 1, dropped: 2 };
        match verify_roundtrip(&value, Format::Json, &options) {
            Err(RoundTripError::Mismatch { expected, decoded, .. }) => {
                assert!(expected.contains("dropped: 2"));
                assert!(decoded.contains("dropped: 0"));
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_verify_catalog() {
        let options = CodecOptions::default();
        for format in Format::ALL {
            let entries = verify_catalog(format, &options);
            assert_eq!(entries.len(), SampleKind::ALL.len());
            for entry in entries {
                assert!(entry.result.is_ok(), "{} via {}", entry.kind, format);
            }
        }
    }

    #[test]
    fn test_fingerprint_hex() {
        let hex = format_fingerprint(&fingerprint(b""));
        // SHA-256 of the empty string starts with e3b0c442...
        assert_eq!(hex, "e3b0c44298fc1c149afbf4c8996fb924");
    }

    #[test]
    fn test_fingerprint_differs_per_format() {
        let options = CodecOptions::default();
        let binary = verify_roundtrip(&5i32, Format::Binary, &options).unwrap();
        let json = verify_roundtrip(&5i32, Format::Json, &options).unwrap();
        assert_ne!(binary.fingerprint, json.fingerprint);
    }

    fn finite() -> impl Strategy<Value = f64> {
        -1.0e12f64..1.0e12f64
    }

    fn point() -> impl Strategy<Value = Point> {
        (finite(), finite()).prop_map(|(x, y)| Point { x, y })
    }

    fn line() -> impl Strategy<Value = Line> {
        (
            prop::collection::vec(point(), 0..16),
            any::<bool>(),
            -1.0e6f32..1.0e6f32,
            ".{0,40}",
        )
            .prop_map(|(points, valid, length, desc)| Line {
                points,
                valid,
                length,
                desc,
            })
    }

    proptest! {
        #[test]
        fn prop_point_roundtrips(p in point()) {
            let options = CodecOptions::default();
            for format in Format::ALL {
                prop_assert!(verify_roundtrip(&p, format, &options).is_ok());
            }
        }

        #[test]
        fn prop_line_roundtrips(l in line(), varint in any::<bool>()) {
            let int_encoding = if varint { IntEncoding::Varint } else { IntEncoding::Fixed };
            let options = CodecOptions::new().int_encoding(int_encoding);
            for format in Format::ALL {
                prop_assert!(verify_roundtrip(&l, format, &options).is_ok());
            }
        }

        #[test]
        fn prop_mixed_tuple_roundtrips(
            t in (any::<u8>(), any::<i64>(), -1.0e6f32..1.0e6f32, any::<bool>(), ".{0,20}")
        ) {
            let options = CodecOptions::default();
            for format in [Format::Binary, Format::Framed, Format::Json] {
                prop_assert!(verify_roundtrip(&t, format, &options).is_ok());
            }
        }
    }
}
