//! Error types shared across PalmWarp crates.

/// Top-level error type for PalmWarp operations.
#[derive(Debug, thiserror::Error)]
pub enum PalmwarpError {
    #[error("Compositor error: {message}")]
    Compositor { message: String },

    #[error("Session error: {message}")]
    Session { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PalmwarpError.
pub type PalmwarpResult<T> = Result<T, PalmwarpError>;

impl PalmwarpError {
    pub fn compositor(msg: impl Into<String>) -> Self {
        Self::Compositor {
            message: msg.into(),
        }
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_name_the_subsystem() {
        let e = PalmwarpError::compositor("source too small");
        assert_eq!(e.to_string(), "Compositor error: source too small");

        let e = PalmwarpError::session("no capture");
        assert_eq!(e.to_string(), "Session error: no capture");
    }

    #[test]
    fn test_io_errors_convert_transparently() {
        fn read_missing() -> PalmwarpResult<String> {
            Ok(std::fs::read_to_string("/nonexistent/palmwarp-test-path")?)
        }
        assert!(matches!(read_missing(), Err(PalmwarpError::Io(_))));
    }
}
