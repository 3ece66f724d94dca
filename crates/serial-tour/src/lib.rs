//! serial-tour: binary and JSON serialization round-trips.
//!
//! This crate carries a small set of sample values (an integer, a float, a
//! byte sequence, tuples, a point and a line) through bincode and serde_json
//! and checks that each one decodes back to an equal value.
//!
//! # Quick Start
//!
//! ```rust
//! use serial_tour::{CodecOptions, Format, Line, Point, decode, encode};
//! use serial_tour::model::LineBuilder;
//!
//! let line = LineBuilder::new()
//!     .point(Point::new(1.0, 2.0))
//!     .point(Point::new(4.0, 6.0))
//!     .desc("a thin line")
//!     .build();
//!
//! let options = CodecOptions::default();
//!
//! // Encode to binary
//! let bytes = encode(&line, Format::Binary, &options).unwrap();
//!
//! // Decode back
//! let decoded: Line = decode(&bytes, Format::Binary, &options).unwrap();
//! assert_eq!(line, decoded);
//!
//! // Same value as JSON text
//! let json = encode(&Point::new(1.0, 2.0), Format::Json, &options).unwrap();
//! assert_eq!(json, br#"{"x":1.0,"y":2.0}"#);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Record types (Point, Line) and the line builder
//! - [`codec`]: Binary, framed and JSON encoding/decoding
//! - [`samples`]: The sample catalog
//! - [`roundtrip`]: Round-trip verification
//! - [`error`]: Error types
//! - [`limits`]: Frame constants and decoding limits
//!
//! # Wire Format
//!
//! Binary payloads are plain bincode 1.x. The framed formats add a header:
//! - Uncompressed: `SERT` magic + version + flags + bincode payload
//! - Compressed: `SERTZ` magic + uncompressed size + zstd data
//!
//! The frame decoder detects both.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod roundtrip;
pub mod samples;

// Re-export commonly used types at crate root
pub use codec::{CodecOptions, Format, IntEncoding, decode, encode};
pub use error::{DecodeError, EncodeError, ErrorCode, RoundTripError, UnknownName};
pub use model::{Line, LineBuilder, Point};
pub use roundtrip::{
    CatalogEntry, Fingerprint, RoundTrip, format_fingerprint, verify_catalog, verify_roundtrip,
};
pub use samples::{MixedTuple, Sample, SampleKind, catalog};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
