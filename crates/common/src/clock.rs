//! Session clock for observation timestamps.
//!
//! The classifier contract works in monotonic milliseconds since the
//! session started (the web-era `performance.now()` convention). This
//! module anchors that epoch and converts elapsed time for the rest of
//! the pipeline.

use std::time::Instant;

/// A monotonic clock anchored to the moment the effect session started.
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since the session started.
    pub fn elapsed_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    /// Seconds elapsed since the session started.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at session start (RFC 3339).
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed_is_monotonic() {
        let clock = SessionClock::start();
        let a = clock.elapsed_ms();
        let b = clock.elapsed_ms();
        assert!(a >= 0.0);
        assert!(b >= a);
        assert!(b < 1000.0); // well under a second
    }

    #[test]
    fn test_epoch_wall_is_rfc3339() {
        let clock = SessionClock::start();
        assert!(chrono::DateTime::parse_from_rfc3339(clock.epoch_wall()).is_ok());
    }
}
