//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Effect tuning defaults.
    pub effect: EffectDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default effect tuning parameters.
///
/// These are the tunables the distortion pipeline exposes; the algorithm
/// crates carry their own config structs built from these values so they
/// stay free of file I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectDefaults {
    /// Velocity above which a motion counts as a slap (pixels/ms).
    pub slap_velocity_threshold: f64,

    /// Base distortion strength as a fraction of min(width, height).
    pub base_strength_fraction: f64,

    /// Base distortion radius as a fraction of min(width, height).
    pub base_radius_fraction: f64,

    /// Strength multiplier applied while slapping.
    pub slap_strength_multiplier: f64,

    /// Radius multiplier applied while slapping.
    pub slap_radius_multiplier: f64,

    /// Amplitude of the per-pixel jitter added while slapping.
    pub jitter_amplitude: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "palmwarp=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            effect: EffectDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EffectDefaults {
    fn default() -> Self {
        Self {
            slap_velocity_threshold: 50.0,
            base_strength_fraction: 0.1,
            base_radius_fraction: 0.2,
            slap_strength_multiplier: 3.0,
            slap_radius_multiplier: 2.0,
            jitter_amplitude: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("palmwarp").join("config.json")
}
