//! Application and calibration configuration.
//!
//! Every threshold and unit multiplier used by the swing analysis lives
//! here so it can be overridden from a config file or the command line.
//! The defaults are the empirical values the analysis was tuned with.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SwingError, SwingResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "SWINGSCOPE_CONFIG";

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Swing analysis settings.
    pub analysis: AnalysisConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Everything the swing analyzer needs, grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Which labels to pull out of an annotation result.
    pub filter: AnnotationFilterConfig,

    /// Swing window boundaries.
    pub window: WindowConfig,

    /// Unit calibration for the kinematic metrics.
    pub kinematics: KinematicsConfig,
}

/// Label selection applied to a raw annotation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationFilterConfig {
    /// Segment labels containing this keyword (case-insensitive) bound the analysis.
    pub segment_keyword: String,

    /// Object class whose frames are tracked (case-insensitive exact match).
    pub object_label: String,
}

/// What the leading trim does when no frame passes the onset threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnsetMiss {
    /// Every frame precedes the swing; the window is empty.
    #[default]
    DropAll,
    /// Keep the sequence untrimmed (start index 0). This matches the legacy
    /// pipeline, which started at the first frame when none passed the onset.
    KeepAll,
}

/// Thresholds used by the window selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Frames at or before this offset (seconds since video start) are pre-swing noise.
    pub onset_threshold_secs: f64,

    /// Largest gap between adjacent frames (seconds) before the track counts as lost.
    pub continuity_gap_secs: f64,

    /// Leading-trim behavior when no frame is past the onset.
    pub onset_miss: OnsetMiss,
}

/// Reference-frame choice and unit calibration for the kinematic calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicsConfig {
    /// Upper bound on the reference index (`min(len - 2, lookahead)`).
    pub reference_lookahead: usize,

    /// Scale applied to normalized center displacement.
    pub normalization_factor: f64,

    /// Multiplier turning scaled distance per second into mph.
    pub speed_multiplier: f64,

    /// Multiplier turning scaled distance into feet.
    pub distance_multiplier: f64,

    /// Multiplier turning video seconds into real seconds.
    pub duration_multiplier: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "swingscope=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AnnotationFilterConfig {
    fn default() -> Self {
        Self {
            segment_keyword: "pitch".to_string(),
            object_label: "baseball bat".to_string(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            onset_threshold_secs: 7.8,
            continuity_gap_secs: 0.3,
            onset_miss: OnsetMiss::DropAll,
        }
    }
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self {
            reference_lookahead: 3,
            normalization_factor: 10.0,
            speed_multiplier: 41.33 * 5.5,
            distance_multiplier: 32.0,
            duration_multiplier: 0.4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AnalysisConfig {
    /// Reject values that would make the analysis meaningless.
    pub fn validate(&self) -> SwingResult<()> {
        if self.filter.object_label.trim().is_empty() {
            return Err(SwingError::config("object_label must not be empty"));
        }
        self.window.validate()?;
        self.kinematics.validate()
    }
}

impl WindowConfig {
    pub fn validate(&self) -> SwingResult<()> {
        non_negative("onset_threshold_secs", self.onset_threshold_secs)?;
        non_negative("continuity_gap_secs", self.continuity_gap_secs)
    }
}

impl KinematicsConfig {
    /// The normalization factor must be positive; a zero or negative scale
    /// flips or erases every displacement. Multipliers may be zero.
    pub fn validate(&self) -> SwingResult<()> {
        if !(self.normalization_factor.is_finite() && self.normalization_factor > 0.0) {
            return Err(SwingError::config(format!(
                "normalization_factor must be a positive number, got {}",
                self.normalization_factor
            )));
        }
        non_negative("speed_multiplier", self.speed_multiplier)?;
        non_negative("distance_multiplier", self.distance_multiplier)?;
        non_negative("duration_multiplier", self.duration_multiplier)
    }
}

fn non_negative(name: &str, value: f64) -> SwingResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SwingError::config(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A path named by `$SWINGSCOPE_CONFIG` must exist and be valid. The XDG
    /// file is optional, but an invalid one is still an error rather than a
    /// silent fallback to defaults.
    pub fn load() -> SwingResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(explicit) => Self::load_from(PathBuf::from(explicit)),
            None => Self::load_or_default(default_config_path()),
        }
    }

    /// Load config from `path` if the file exists, otherwise use defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> SwingResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: impl AsRef<Path>) -> SwingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SwingError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| SwingError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> SwingResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> SwingResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SwingError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| SwingError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Standard config file location: `$SWINGSCOPE_CONFIG` when set, else the
/// XDG location.
pub fn config_file_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// XDG config file location, ignoring `$SWINGSCOPE_CONFIG`.
pub fn default_config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("swingscope").join("config.json")
}
