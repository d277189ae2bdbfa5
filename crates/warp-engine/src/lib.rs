//! PalmWarp Warp Engine
//!
//! Produces a new pixel buffer in which pixels near a focal point are
//! displaced along a radial field, while pixels far from the focal
//! point are copied unchanged. The warp is an *inverse* warp: each
//! destination pixel samples its color from a source coordinate pushed
//! outward from the center, which is what produces the bulge/ripple
//! look.
//!
//! This crate is pure computation — no I/O, no platform dependencies.

pub mod distort;

pub use distort::{DistortionCompositor, DistortionConfig, DistortionParams};
