//! Builder API for ergonomic Line construction.
//!
//! # Example
//!
//! ```rust
//! use serial_tour::model::{LineBuilder, Point};
//!
//! let line = LineBuilder::new()
//!     .point(Point::new(1.0, 2.0))
//!     .point((4.0, 6.0))
//!     .desc("a thin line")
//!     .build();
//!
//! assert_eq!(line.length, 5.0);
//! assert!(line.valid);
//! ```

use crate::model::line::polyline_length;
use crate::model::{Line, Point};

/// Builder for constructing a [`Line`].
#[derive(Debug, Clone)]
pub struct LineBuilder {
    points: Vec<Point>,
    valid: bool,
    length: Option<f32>,
    desc: String,
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuilder {
    /// Creates an empty builder. Lines are valid unless marked otherwise.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            valid: true,
            length: None,
            desc: String::new(),
        }
    }

    /// Appends a point.
    pub fn point(mut self, point: impl Into<Point>) -> Self {
        self.points.push(point.into());
        self
    }

    /// Appends several points.
    pub fn points<I, P>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        self.points.extend(points.into_iter().map(Into::into));
        self
    }

    /// Sets the validity flag.
    pub fn valid(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// Overrides the computed length.
    pub fn length(mut self, length: f32) -> Self {
        self.length = Some(length);
        self
    }

    /// Sets the description.
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Builds the line, computing the length from the points if not set.
    pub fn build(self) -> Line {
        let length = self
            .length
            .unwrap_or_else(|| polyline_length(&self.points) as f32);
        Line {
            points: self.points,
            valid: self.valid,
            length,
            desc: self.desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computed_length() {
        let line = LineBuilder::new()
            .points([(0.0, 0.0), (3.0, 4.0), (6.0, 8.0)])
            .build();
        assert_eq!(line.length, 10.0);
        assert_eq!(line.points.len(), 3);
        assert!(line.valid);
        assert!(line.desc.is_empty());
    }

    #[test]
    fn test_explicit_length_wins() {
        let line = LineBuilder::new()
            .point((0.0, 0.0))
            .point((3.0, 4.0))
            .length(2.0)
            .valid(false)
            .desc("drawn by hand")
            .build();
        assert_eq!(line.length, 2.0);
        assert!(!line.valid);
        assert_eq!(line.desc, "drawn by hand");
    }

    #[test]
    fn test_empty() {
        assert_eq!(LineBuilder::default().build(), Line { valid: true, ..Line::default() });
    }
}
