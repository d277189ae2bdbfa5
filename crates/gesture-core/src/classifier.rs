//! Velocity-based slap classification.
//!
//! # Algorithm
//!
//! 1. Keep exactly one slot: the last observation (point + timestamp).
//! 2. On each new observation, velocity = Euclidean displacement divided
//!    by elapsed milliseconds.
//! 3. Slap when velocity exceeds the configured threshold.
//! 4. Replace the slot with the new observation.
//!
//! The first observation of a session always reports zero velocity:
//! there is nothing to compare against.

use palmwarp_frame_model::{Point2D, TimedPoint};

/// Configuration for the motion classifier.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Velocity above which a motion is classified as a slap, in pixels
    /// per millisecond.
    pub slap_velocity_threshold: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            slap_velocity_threshold: 50.0,
        }
    }
}

impl From<&palmwarp_common::EffectDefaults> for MotionConfig {
    fn from(defaults: &palmwarp_common::EffectDefaults) -> Self {
        Self {
            slap_velocity_threshold: defaults.slap_velocity_threshold,
        }
    }
}

/// The gesture signal derived from one observation.
///
/// Recomputed fresh on every call; never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSignal {
    /// Speed of the tracked point in pixels per millisecond. Never
    /// negative.
    pub velocity: f64,

    /// Whether the motion qualifies as a slap.
    pub is_slap: bool,
}

impl GestureSignal {
    /// The signal reported when no velocity can be derived.
    pub const STILL: GestureSignal = GestureSignal {
        velocity: 0.0,
        is_slap: false,
    };
}

/// The motion classifier.
///
/// The single-slot memory is an owned field, so independent instances
/// (one per tracked hand, say) never interfere, and a session boundary
/// is a plain [`MotionClassifier::reset`].
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    config: MotionConfig,
    last: Option<TimedPoint>,
}

impl MotionClassifier {
    /// Create a classifier with the given configuration.
    pub fn new(config: MotionConfig) -> Self {
        Self { config, last: None }
    }

    /// Create a classifier with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MotionConfig::default())
    }

    /// Ingest one observation and derive the gesture signal.
    ///
    /// Timestamps are expected to increase strictly. A non-increasing
    /// timestamp yields a zero-velocity signal instead of an error — a
    /// single bad timestamp must not abort the pipeline — and the slot
    /// is still replaced so the stream stays current.
    pub fn observe(&mut self, point: Point2D, timestamp_ms: f64) -> GestureSignal {
        let observation = TimedPoint::new(point, timestamp_ms);

        let signal = match self.last {
            None => GestureSignal::STILL,
            Some(last) => {
                let elapsed_ms = timestamp_ms - last.timestamp_ms;
                if elapsed_ms <= 0.0 {
                    tracing::debug!(
                        timestamp_ms,
                        last_timestamp_ms = last.timestamp_ms,
                        "Non-increasing observation timestamp; reporting zero velocity"
                    );
                    GestureSignal::STILL
                } else {
                    let velocity = point.distance_to(&last.point) / elapsed_ms;
                    GestureSignal {
                        velocity,
                        is_slap: velocity > self.config.slap_velocity_threshold,
                    }
                }
            }
        };

        self.last = Some(observation);
        signal
    }

    /// Clear the stored observation so stale velocity is not carried
    /// across unrelated sessions.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// The most recent observation, if any.
    pub fn last_observation(&self) -> Option<TimedPoint> {
        self.last
    }

    /// The configured slap threshold.
    pub fn slap_velocity_threshold(&self) -> f64 {
        self.config.slap_velocity_threshold
    }
}
