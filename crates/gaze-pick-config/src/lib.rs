//! Configuration for the gaze-pick interaction engine
//!
//! Every value has a default, so an empty (or missing) config file yields a
//! working setup. Files are TOML:
//!
//! ```toml
//! [cursor]
//! sensitivity = 1000.0
//! smoothing = 0.7
//! size = 40.0
//!
//! [blink]
//! threshold = 0.6
//! cooldown_secs = 0.5
//! stabilization_secs = 0.3
//!
//! [dwell]
//! duration_secs = 1.5
//! max_gap_secs = 0.3
//! clear_on_confirm = true
//! hit_padding = 20.0
//!
//! [feedback]
//! pulse_secs = 0.3
//!
//! [session]
//! tick_ms = 100
//! frame_queue = 64
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Upper bound accepted for every `*_secs` setting
pub const MAX_DURATION_SECS: f64 = 3600.0;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Cursor smoothing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Viewport units per unit of raw gaze
    pub sensitivity: f32,
    /// Weight of the new target in the exponential blend (0 < α ≤ 1)
    pub smoothing: f32,
    /// Side length of the square cursor; any overlap with a row hits it
    pub size: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1000.0,
            smoothing: 0.7,
            size: 40.0,
        }
    }
}

/// Blink detection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Per-eye closure strength both eyes must exceed
    pub threshold: f32,
    /// Minimum spacing between confirmed blinks
    pub cooldown_secs: f64,
    /// Cursor freeze after a confirmed blink
    pub stabilization_secs: f64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            cooldown_secs: 0.5,
            stabilization_secs: 0.3,
        }
    }
}

/// Dwell arming settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    /// Continuous gaze needed to arm an item
    pub duration_secs: f64,
    /// Longest pause between gaze samples before the dwell starts over
    pub max_gap_secs: f64,
    /// Restart the dwell on the selected item once a selection fires
    pub clear_on_confirm: bool,
    /// Extra hit area around every row, in viewport units
    pub hit_padding: f32,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.5,
            max_gap_secs: 0.3,
            clear_on_confirm: true,
            hit_padding: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Length of the visual/haptic pulse after a selection
    pub pulse_secs: f64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self { pulse_secs: 0.3 }
    }
}

/// Frame ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Interval between idle re-evaluations of the dwell timer
    pub tick_ms: u64,
    /// Capacity of the sensor frame channel
    pub frame_queue: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            frame_queue: 64,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazeConfig {
    pub cursor: CursorConfig,
    pub blink: BlinkConfig,
    pub dwell: DwellConfig,
    pub feedback: FeedbackConfig,
    pub session: SessionConfig,
}

impl GazeConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GazeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded gaze config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, else the platform config file, else defaults.
    ///
    /// An explicit path must exist; the platform file is optional.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Platform config location, e.g. `~/.config/gaze-pick/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gaze-pick").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<()> {
        let c = &self.cursor;
        if !c.sensitivity.is_finite() || c.sensitivity <= 0.0 {
            return Err(invalid("cursor.sensitivity", "must be a positive number"));
        }
        if !(c.smoothing > 0.0 && c.smoothing <= 1.0) {
            return Err(invalid("cursor.smoothing", "must be in (0, 1]"));
        }
        if !c.size.is_finite() || c.size < 0.0 {
            return Err(invalid("cursor.size", "must be zero or positive"));
        }

        if !(0.0..=1.0).contains(&self.blink.threshold) {
            return Err(invalid("blink.threshold", "must be in [0, 1]"));
        }
        check_secs("blink.cooldown_secs", self.blink.cooldown_secs)?;
        check_secs("blink.stabilization_secs", self.blink.stabilization_secs)?;
        check_secs("dwell.duration_secs", self.dwell.duration_secs)?;
        check_secs("dwell.max_gap_secs", self.dwell.max_gap_secs)?;
        check_secs("feedback.pulse_secs", self.feedback.pulse_secs)?;

        if !self.dwell.hit_padding.is_finite() || self.dwell.hit_padding < 0.0 {
            return Err(invalid("dwell.hit_padding", "must be zero or positive"));
        }
        if self.session.tick_ms == 0 {
            return Err(invalid("session.tick_ms", "must be at least 1"));
        }
        if self.session.frame_queue == 0 {
            return Err(invalid("session.frame_queue", "must be at least 1"));
        }

        Ok(())
    }
}

fn check_secs(field: &'static str, secs: f64) -> Result<()> {
    if (0.0..=MAX_DURATION_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(invalid(field, "must be between 0 and 3600 seconds"))
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_values() {
        let config = GazeConfig::default();
        assert_eq!(config.cursor.sensitivity, 1000.0);
        assert_eq!(config.cursor.smoothing, 0.7);
        assert_eq!(config.blink.threshold, 0.6);
        assert_eq!(config.blink.cooldown_secs, 0.5);
        assert_eq!(config.blink.stabilization_secs, 0.3);
        assert_eq!(config.dwell.duration_secs, 1.5);
        assert_eq!(config.dwell.max_gap_secs, 0.3);
        assert_eq!(config.cursor.size, 40.0);
        assert!(config.dwell.clear_on_confirm);
        assert_eq!(config.feedback.pulse_secs, 0.3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = GazeConfig::from_toml_str(
            r#"
            [dwell]
            duration_secs = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.dwell.duration_secs, 2.0);
        assert!(config.dwell.clear_on_confirm);
        assert_eq!(config.blink, BlinkConfig::default());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = GazeConfig::from_toml_str("").unwrap();
        assert_eq!(config, GazeConfig::default());
    }

    #[test]
    fn test_rejects_out_of_range_smoothing() {
        let err = GazeConfig::from_toml_str("[cursor]\nsmoothing = 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "cursor.smoothing",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_duration() {
        let err = GazeConfig::from_toml_str("[blink]\ncooldown_secs = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "blink.cooldown_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_durations_too_long_to_represent() {
        for (doc, field) in [
            ("[dwell]\nduration_secs = 1e30\n", "dwell.duration_secs"),
            ("[blink]\nstabilization_secs = 1e19\n", "blink.stabilization_secs"),
            ("[feedback]\npulse_secs = 3600.5\n", "feedback.pulse_secs"),
        ] {
            let err = GazeConfig::from_toml_str(doc).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: f, .. } if f == field),
                "{doc} gave {err:?}"
            );
        }
        assert!(GazeConfig::from_toml_str("[dwell]\nmax_gap_secs = 3600.0\n").is_ok());
    }

    #[test]
    fn test_rejects_negative_cursor_size() {
        let err = GazeConfig::from_toml_str("[cursor]\nsize = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "cursor.size",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = GazeConfig::from_toml_str("[cursor\nsmoothing = 0.5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[blink]\nthreshold = 0.8").unwrap();

        let config = GazeConfig::load(file.path()).unwrap();
        assert_eq!(config.blink.threshold, 0.8);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = GazeConfig::load_or_default(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = GazeConfig::default();
        config.dwell.clear_on_confirm = false;

        let text = toml::to_string(&config).unwrap();
        assert_eq!(GazeConfig::from_toml_str(&text).unwrap(), config);
    }
}
