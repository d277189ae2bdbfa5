//! Hand landmark detection events.
//!
//! Detection itself happens outside this workspace; a detector hands the
//! pipeline one `LandmarkFrame` per inference result. Frames can be
//! recorded to and replayed from append-only JSONL, one frame per line,
//! with `#`-prefixed header lines ignored.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::FrameError;

/// MediaPipe hand-landmark indices that span the palm.
///
/// Their mean is the "palm center" primary point when a full 21-landmark
/// hand is available.
pub const PALM_LANDMARK_INDICES: [usize; 5] = [0, 5, 9, 13, 17];

/// One hand detection event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Monotonic milliseconds since session start.
    #[serde(rename = "t")]
    pub timestamp_ms: f64,

    /// The primary tracked point driving the effect (palm center).
    pub primary: Point2D,

    /// Full landmark set, if the detector provides one. Pixel space.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmarks: Vec<Point2D>,

    /// Detector confidence in [0.0, 1.0], if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl LandmarkFrame {
    /// Create a frame from a bare primary point.
    pub fn new(timestamp_ms: f64, primary: Point2D) -> Self {
        Self {
            timestamp_ms,
            primary,
            landmarks: Vec::new(),
            confidence: None,
        }
    }

    /// Create a frame from a full landmark set, deriving the primary
    /// point as the palm center.
    ///
    /// With 21 or more landmarks the palm center is the mean of the five
    /// palm landmarks; with fewer, the first landmark (the wrist) stands
    /// in.
    pub fn from_landmarks(
        timestamp_ms: f64,
        landmarks: Vec<Point2D>,
        confidence: Option<f64>,
    ) -> Result<Self, FrameError> {
        if landmarks.is_empty() {
            return Err(FrameError::EmptyLandmarks);
        }

        let primary = if landmarks.len() >= 21 {
            let n = PALM_LANDMARK_INDICES.len() as f64;
            let x = PALM_LANDMARK_INDICES
                .iter()
                .map(|&i| landmarks[i].x)
                .sum::<f64>()
                / n;
            let y = PALM_LANDMARK_INDICES
                .iter()
                .map(|&i| landmarks[i].y)
                .sum::<f64>()
                / n;
            Point2D::new(x, y)
        } else {
            landmarks[0]
        };

        Ok(Self {
            timestamp_ms,
            primary,
            landmarks,
            confidence,
        })
    }
}

/// Parse landmark frames from JSONL content.
///
/// Skips empty lines and `#` header lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<LandmarkFrame>, FrameError> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| serde_json::from_str(line).map_err(FrameError::from))
        .collect()
}

/// Serialize landmark frames to JSONL format.
pub fn serialize_frames(frames: &[LandmarkFrame]) -> Result<String, FrameError> {
    let mut output = String::new();
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_hand(cx: f64, cy: f64) -> Vec<Point2D> {
        // 21 landmarks on a small ring around (cx, cy)
        (0..21)
            .map(|i| {
                let angle = i as f64 / 21.0 * std::f64::consts::TAU;
                Point2D::new(cx + angle.cos() * 4.0, cy + angle.sin() * 4.0)
            })
            .collect()
    }

    #[test]
    fn test_palm_center_stays_near_hand_center() {
        let frame = LandmarkFrame::from_landmarks(0.0, synthetic_hand(120.0, 80.0), None).unwrap();
        assert!((frame.primary.x - 120.0).abs() < 5.0);
        assert!((frame.primary.y - 80.0).abs() < 5.0);
    }

    #[test]
    fn test_short_landmark_set_uses_wrist() {
        let frame =
            LandmarkFrame::from_landmarks(0.0, vec![Point2D::new(3.0, 7.0)], Some(0.9)).unwrap();
        assert_eq!(frame.primary, Point2D::new(3.0, 7.0));
    }

    #[test]
    fn test_empty_landmarks_rejected() {
        assert!(LandmarkFrame::from_landmarks(0.0, vec![], None).is_err());
    }

    #[test]
    fn test_jsonl_round_trip() {
        let frames = vec![
            LandmarkFrame::new(0.0, Point2D::new(10.0, 20.0)),
            LandmarkFrame::new(16.7, Point2D::new(12.5, 21.0)),
        ];
        let jsonl = serialize_frames(&frames).unwrap();
        let parsed = parse_frames(&jsonl).unwrap();
        assert_eq!(frames, parsed);
    }

    #[test]
    fn test_parse_skips_header_comment() {
        let jsonl = "# {\"schema_version\":\"1.0\"}\n{\"t\":5.0,\"primary\":{\"x\":1.0,\"y\":2.0}}\n";
        let parsed = parse_frames(jsonl).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].timestamp_ms, 5.0);
    }
}
