//! 2D geometry primitives for landmark tracking.

use serde::{Deserialize, Serialize};

/// A 2D point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Linear interpolation between two points.
    pub fn lerp(a: &Point2D, b: &Point2D, t: f64) -> Point2D {
        let t = t.clamp(0.0, 1.0);
        Point2D {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
        }
    }
}

/// A single timestamped observation of the tracked point.
///
/// Immutable once recorded; the classifier replaces its stored
/// observation wholesale rather than merging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedPoint {
    /// Observed position in pixel space.
    pub point: Point2D,

    /// Monotonic timestamp in milliseconds since session start.
    pub timestamp_ms: f64,
}

impl TimedPoint {
    pub fn new(point: Point2D, timestamp_ms: f64) -> Self {
        Self {
            point,
            timestamp_ms,
        }
    }
}
