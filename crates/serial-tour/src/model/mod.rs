//! Record types carried through the codecs.
//!
//! - Points (two floating-point coordinates)
//! - Lines (points plus a validity flag, a length and a description)
//! - Builders (ergonomic construction)

pub mod builder;
pub mod line;
pub mod point;

pub use builder::LineBuilder;
pub use line::Line;
pub use point::Point;
