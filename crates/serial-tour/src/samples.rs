//! The sample values walked through every format.
//!
//! Each sample keeps its concrete Rust type so that decoding is driven by
//! that type, the same way a caller would decode their own data.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{CodecOptions, Format, decode, encode};
use crate::error::{DecodeError, EncodeError, RoundTripError, UnknownName};
use crate::model::{Line, LineBuilder, Point};
use crate::roundtrip::{RoundTrip, verify_roundtrip};

/// A tuple of mixed primitive types.
pub type MixedTuple = (u8, i64, f32, bool, String);

/// One sample value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Sample {
    Integer(i32),
    Float(f64),
    Bytes(Vec<u8>),
    Pair((i32, f64)),
    Tuple(MixedTuple),
    Point(Point),
    Line(Line),
}

/// Names of the samples, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    Integer,
    Float,
    Bytes,
    Pair,
    Tuple,
    Point,
    Line,
}

impl SampleKind {
    /// All samples, in catalog order.
    pub const ALL: [SampleKind; 7] = [
        SampleKind::Integer,
        SampleKind::Float,
        SampleKind::Bytes,
        SampleKind::Pair,
        SampleKind::Tuple,
        SampleKind::Point,
        SampleKind::Line,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SampleKind::Integer => "integer",
            SampleKind::Float => "float",
            SampleKind::Bytes => "bytes",
            SampleKind::Pair => "pair",
            SampleKind::Tuple => "tuple",
            SampleKind::Point => "point",
            SampleKind::Line => "line",
        }
    }

    /// Builds the sample value of this kind.
    pub fn sample(self) -> Sample {
        match self {
            SampleKind::Integer => Sample::Integer(5),
            SampleKind::Float => Sample::Float(3.14),
            SampleKind::Bytes => Sample::Bytes(vec![1, 2, 3]),
            SampleKind::Pair => Sample::Pair((5, 3.14)),
            SampleKind::Tuple => Sample::Tuple((1, -7, 2.5, true, "hello".to_string())),
            SampleKind::Point => Sample::Point(Point::new(1.0, 2.0)),
            SampleKind::Line => Sample::Line(
                LineBuilder::new()
                    .point((1.0, 2.0))
                    .point((4.0, 6.0))
                    .desc("a thin line")
                    .build(),
            ),
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleKind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownName {
                what: "sample",
                name: s.to_string(),
                expected: SampleKind::ALL.map(SampleKind::name).join(", "),
            })
    }
}

impl Sample {
    pub fn kind(&self) -> SampleKind {
        match self {
            Sample::Integer(_) => SampleKind::Integer,
            Sample::Float(_) => SampleKind::Float,
            Sample::Bytes(_) => SampleKind::Bytes,
            Sample::Pair(_) => SampleKind::Pair,
            Sample::Tuple(_) => SampleKind::Tuple,
            Sample::Point(_) => SampleKind::Point,
            Sample::Line(_) => SampleKind::Line,
        }
    }

    /// Round-trips the inner value as its own type.
    pub fn roundtrip(
        &self,
        format: Format,
        options: &CodecOptions,
    ) -> Result<RoundTrip, RoundTripError> {
        match self {
            Sample::Integer(v) => verify_roundtrip(v, format, options),
            Sample::Float(v) => verify_roundtrip(v, format, options),
            Sample::Bytes(v) => verify_roundtrip(v, format, options),
            Sample::Pair(v) => verify_roundtrip(v, format, options),
            Sample::Tuple(v) => verify_roundtrip(v, format, options),
            Sample::Point(v) => verify_roundtrip(v, format, options),
            Sample::Line(v) => verify_roundtrip(v, format, options),
        }
    }

    /// Encodes the inner value (not the enum wrapper).
    pub fn encode(
        &self,
        format: Format,
        options: &CodecOptions,
    ) -> Result<Vec<u8>, EncodeError> {
        match self {
            Sample::Integer(v) => encode(v, format, options),
            Sample::Float(v) => encode(v, format, options),
            Sample::Bytes(v) => encode(v, format, options),
            Sample::Pair(v) => encode(v, format, options),
            Sample::Tuple(v) => encode(v, format, options),
            Sample::Point(v) => encode(v, format, options),
            Sample::Line(v) => encode(v, format, options),
        }
    }

    /// Decodes bytes as the inner type of `kind`.
    pub fn decode(
        kind: SampleKind,
        bytes: &[u8],
        format: Format,
        options: &CodecOptions,
    ) -> Result<Sample, DecodeError> {
        Ok(match kind {
            SampleKind::Integer => Sample::Integer(decode(bytes, format, options)?),
            SampleKind::Float => Sample::Float(decode(bytes, format, options)?),
            SampleKind::Bytes => Sample::Bytes(decode(bytes, format, options)?),
            SampleKind::Pair => Sample::Pair(decode(bytes, format, options)?),
            SampleKind::Tuple => Sample::Tuple(decode(bytes, format, options)?),
            SampleKind::Point => Sample::Point(decode(bytes, format, options)?),
            SampleKind::Line => Sample::Line(decode(bytes, format, options)?),
        })
    }
}

/// Every sample, in catalog order.
pub fn catalog() -> Vec<Sample> {
    SampleKind::ALL.into_iter().map(SampleKind::sample).collect()
}
