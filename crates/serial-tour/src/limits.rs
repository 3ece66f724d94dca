//! Frame constants and decoding limits.

/// Magic bytes of an uncompressed frame.
pub const MAGIC_UNCOMPRESSED: &[u8; 4] = b"SERT";

/// Magic bytes of a zstd-compressed frame.
pub const MAGIC_COMPRESSED: &[u8; 5] = b"SERTZ";

/// Frame version written by this crate.
pub const FORMAT_VERSION: u8 = 1;

/// Oldest frame version this crate can read.
pub const MIN_FORMAT_VERSION: u8 = 1;

/// Frame flag: integers in the payload use varint encoding.
pub const FLAG_VARINT: u8 = 0x01;

/// Mask of all flag bits with an assigned meaning.
pub const FLAGS_KNOWN: u8 = FLAG_VARINT;

/// Upper bound on any encoded payload or decompressed frame (64 MiB).
pub const MAX_PAYLOAD_SIZE: u64 = 64 * 1024 * 1024;

/// Most bytes reserved up front for a decompressed frame; the buffer grows
/// past this only as the zstd stream actually produces data.
pub const MAX_INITIAL_CAPACITY: usize = 1024 * 1024;

/// Maximum bytes in a LEB128 varint (enough for a u64).
pub const MAX_VARINT_BYTES: usize = 10;

/// zstd level used when none is configured.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;
