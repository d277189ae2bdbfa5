//! PalmWarp Frame Model
//!
//! Defines the core data contracts for the PalmWarp pipeline:
//! - **Geometry:** 2D points and timestamped observations
//! - **Landmarks:** hand detection events with a primary tracked point
//! - **Buffers:** dense RGBA8 pixel rasters
//!
//! All coordinates are in pixel space relative to the captured frame.
//! Out-of-bounds positions are tolerated throughout; the detectors that
//! produce them run outside this workspace and occasionally report points
//! beyond the frame edge.

pub mod buffer;
pub mod geometry;
pub mod landmark;

pub use buffer::*;
pub use geometry::*;
pub use landmark::*;

/// Errors raised by frame-model constructors and parsers.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Invalid buffer dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Buffer data length {actual} does not match {width}x{height} RGBA ({expected})")]
    DataLengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Landmark frame has no landmarks")]
    EmptyLandmarks,

    #[error("Failed to parse landmark stream: {0}")]
    Parse(#[from] serde_json::Error),
}
