use serde::{Deserialize, Serialize};

use crate::model::Point;

/// A line through a sequence of points.
///
/// `length` and `valid` are stored as given; nothing ties them to `points`
/// after construction. Use [`LineBuilder`](crate::model::LineBuilder) to
/// derive the length from the points.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    pub points: Vec<Point>,
    pub valid: bool,
    pub length: f32,
    pub desc: String,
}

impl Line {
    /// Sum of the segment lengths between consecutive points.
    pub fn polyline_length(&self) -> f64 {
        polyline_length(&self.points)
    }
}

pub(crate) fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}
