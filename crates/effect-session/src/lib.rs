//! PalmWarp Effect Session
//!
//! Glues the motion classifier and distortion compositor into the
//! per-detection cadence and owns the session state machine.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                EffectSession                    │
//! │   ┌────────────┐  ┌────────────┐  ┌──────────┐ │
//! │   │ Landmark   │  │ Motion     │  │Distortion│ │
//! │   │ Detector   │─▶│ Classifier │─▶│Compositor│ │
//! │   └────────────┘  └────────────┘  └────┬─────┘ │
//! │         ▲                              │        │
//! │   detection events              distorted frame │
//! │                                        ▼        │
//! │                              ┌───────────────┐  │
//! │                              │FramePublisher │  │
//! │                              └───────────────┘  │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! The loop is single-threaded cooperative: one detection is awaited,
//! then the classifier update and the full-buffer distortion pass run
//! synchronously before the next detection is requested. No two passes
//! ever overlap, so the captured source needs no locking.

pub mod session;

pub use session::*;
