//! PalmWarp Gesture Core
//!
//! Turns a stream of timestamped landmark observations into a binary
//! "sudden motion" (slap) signal. Only the two most recent observations
//! matter — there is no history, smoothing, or filtering.
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod classifier;

pub use classifier::{GestureSignal, MotionClassifier, MotionConfig};
