//! Effect session management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use palmwarp_common::error::{PalmwarpError, PalmwarpResult};
use palmwarp_frame_model::{LandmarkFrame, PixelBuffer};
use palmwarp_gesture_core::{GestureSignal, MotionClassifier, MotionConfig};
use palmwarp_warp_engine::{DistortionCompositor, DistortionConfig};

/// Source of landmark detection events.
///
/// Implemented by the embedding application over its hand detector.
/// `next_frame` may suspend while inference runs; returning `Ok(None)`
/// ends the stream.
#[async_trait::async_trait]
pub trait LandmarkDetector: Send {
    /// Await the next detection event.
    async fn next_frame(&mut self) -> PalmwarpResult<Option<LandmarkFrame>>;

    /// Detector name for logging.
    fn name(&self) -> &str;
}

/// Sink for distorted output frames.
///
/// Each published buffer is owned by the publisher from that point on;
/// the session never reads it back.
pub trait FramePublisher: Send {
    /// Hand off one distorted frame for display.
    fn publish(&mut self, frame: PixelBuffer) -> PalmwarpResult<()>;
}

/// Configuration for an effect session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Classifier tuning.
    pub motion: MotionConfig,

    /// Compositor tuning.
    pub distortion: DistortionConfig,

    /// Fixed jitter seed for reproducible runs; `None` seeds from the OS.
    pub jitter_seed: Option<u64>,
}

/// State of an effect session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Showing the live camera feed; nothing captured yet.
    Live,
    /// A still frame is captured; the distorted-preview loop is active.
    Captured,
}

/// The effect session: owns the captured source frame, the classifier,
/// and the compositor, and drives them once per detection event.
///
/// There is no transition back from `Captured` to `Live` within one
/// session; a new session is a new `EffectSession`.
pub struct EffectSession {
    state: SessionState,
    classifier: MotionClassifier,
    compositor: DistortionCompositor,
    source: Option<PixelBuffer>,
    stop_flag: Arc<AtomicBool>,
    frames_published: u64,
}

impl EffectSession {
    /// Create a new session in the `Live` state.
    pub fn new(config: SessionConfig) -> Self {
        let compositor = match config.jitter_seed {
            Some(seed) => DistortionCompositor::seeded(config.distortion, seed),
            None => DistortionCompositor::new(config.distortion),
        };
        Self {
            state: SessionState::Live,
            classifier: MotionClassifier::new(config.motion),
            compositor,
            source: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            frames_published: 0,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Snapshot the current live frame as the immutable session source.
    ///
    /// Transitions `Live -> Captured` exactly once and clears any stale
    /// classifier memory so velocity never leaks across captures.
    pub fn capture(&mut self, frame: PixelBuffer) -> PalmwarpResult<()> {
        if self.state != SessionState::Live {
            return Err(PalmwarpError::session("Session already holds a capture"));
        }

        tracing::info!(
            width = frame.width(),
            height = frame.height(),
            "Captured source frame"
        );

        self.classifier.reset();
        self.source = Some(frame);
        self.state = SessionState::Captured;
        Ok(())
    }

    /// Process one detection event: classify the motion, distort the
    /// captured source at the primary landmark, and return the fresh
    /// output buffer.
    pub fn process_frame(&mut self, frame: &LandmarkFrame) -> PalmwarpResult<PixelBuffer> {
        self.process_frame_detailed(frame).map(|(_, buffer)| buffer)
    }

    /// Like [`process_frame`], but also returns the gesture signal that
    /// drove the pass (for diagnostics and tooling).
    ///
    /// [`process_frame`]: EffectSession::process_frame
    pub fn process_frame_detailed(
        &mut self,
        frame: &LandmarkFrame,
    ) -> PalmwarpResult<(GestureSignal, PixelBuffer)> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| PalmwarpError::session("No captured frame to distort"))?;

        let signal = self.classifier.observe(frame.primary, frame.timestamp_ms);
        if signal.is_slap {
            tracing::debug!(velocity = signal.velocity, "Slap detected");
        }

        let output = self.compositor.distort(source, frame.primary, &signal)?;
        Ok((signal, output))
    }

    /// Classify a detection without producing a frame (diagnostics).
    pub fn classify(&mut self, frame: &LandmarkFrame) -> GestureSignal {
        self.classifier.observe(frame.primary, frame.timestamp_ms)
    }

    /// Run the detection loop until the detector's stream ends or the
    /// stop flag is set.
    ///
    /// One iteration: await a detection, then run the classifier update
    /// and a full-buffer distortion pass synchronously, then publish.
    /// The next detection is only requested after the pass completes,
    /// so passes never overlap and observations are processed strictly
    /// in arrival order. A detection that resolves after [`stop`] is
    /// discarded rather than acted upon.
    ///
    /// [`stop`]: EffectSession::stop
    pub async fn run(
        &mut self,
        detector: &mut dyn LandmarkDetector,
        publisher: &mut dyn FramePublisher,
    ) -> PalmwarpResult<u64> {
        if self.state != SessionState::Captured {
            return Err(PalmwarpError::session(
                "Cannot run the distortion loop before a capture",
            ));
        }

        tracing::info!(detector = %detector.name(), "Effect loop started");

        loop {
            if self.stop_flag.load(Ordering::Relaxed) {
                break;
            }

            let frame = match detector.next_frame().await? {
                Some(frame) => frame,
                None => break,
            };

            // The detection may have been in flight when stop() was
            // called; discard it instead of acting after teardown.
            if self.stop_flag.load(Ordering::Relaxed) {
                tracing::debug!("Discarding detection resolved after stop");
                break;
            }

            let output = self.process_frame(&frame)?;
            publisher.publish(output)?;
            self.frames_published += 1;
        }

        tracing::info!(frames = self.frames_published, "Effect loop stopped");
        Ok(self.frames_published)
    }

    /// Request loop termination.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Get the stop flag for external coordination.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop_flag.clone()
    }

    /// Frames published so far.
    pub fn frames_published(&self) -> u64 {
        self.frames_published
    }

    /// The captured source frame, if any.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.source.as_ref()
    }
}
