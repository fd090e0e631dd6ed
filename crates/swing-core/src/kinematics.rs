//! Swing kinematics from a selected window of detection frames.
//!
//! Motion is measured on bounding-box centers between the first frame and
//! a reference frame a few detections in, rather than the last frame,
//! because trailing detections are the noisiest.

use serde::{Deserialize, Serialize};
use swingscope_annotation_model::DetectionFrame;
use swingscope_common::config::KinematicsConfig;

/// Calibrated swing measurements.
///
/// Every field is exactly zero when the window holds fewer than two frames.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SwingMetrics {
    /// Bat speed (mph).
    pub swing_speed: f64,
    /// Angle of travel above horizontal (degrees).
    pub swing_angle: f64,
    /// Straight-line center displacement (feet).
    pub total_distance: f64,
    /// Time between the first and reference frames (seconds).
    pub swing_duration: f64,
    /// Horizontal center displacement (feet).
    pub horizontal_distance: f64,
    /// Vertical center displacement (feet).
    pub vertical_distance: f64,
}

impl SwingMetrics {
    /// The "no measurable swing" record.
    pub const ZERO: SwingMetrics = SwingMetrics {
        swing_speed: 0.0,
        swing_angle: 0.0,
        total_distance: 0.0,
        swing_duration: 0.0,
        horizontal_distance: 0.0,
        vertical_distance: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Computes [`SwingMetrics`] from a frame window.
#[derive(Debug, Clone, Default)]
pub struct KinematicCalculator {
    config: KinematicsConfig,
}

impl KinematicCalculator {
    /// Create a calculator with the given calibration.
    pub fn new(config: KinematicsConfig) -> Self {
        Self { config }
    }

    /// Create a calculator with default calibration.
    pub fn with_defaults() -> Self {
        Self::new(KinematicsConfig::default())
    }

    pub fn config(&self) -> &KinematicsConfig {
        &self.config
    }

    /// Frame that anchors the measurement: `min(len - 2, lookahead)`.
    ///
    /// `None` when fewer than two frames are available.
    pub fn reference_index(&self, len: usize) -> Option<usize> {
        (len >= 2).then(|| (len - 2).min(self.config.reference_lookahead))
    }

    /// Measure the swing described by `frames`.
    pub fn compute(&self, frames: &[DetectionFrame]) -> SwingMetrics {
        let Some(reference) = self.reference_index(frames.len()) else {
            return SwingMetrics::ZERO;
        };

        let first = &frames[0];
        let anchor = &frames[reference];
        let (x0, y0) = first.normalized_box.center();
        let (x1, y1) = anchor.normalized_box.center();

        let scale = self.config.normalization_factor;
        let horizontal = (x1 - x0).abs() * scale;
        let vertical = (y1 - y0).abs() * scale;
        let total = (horizontal * horizontal + vertical * vertical).sqrt();
        let duration = anchor.time_offset.secs_since(first.time_offset);

        let speed = if duration > 0.0 { total / duration } else { 0.0 };
        let angle = if horizontal > 0.0 {
            (vertical / horizontal).atan().to_degrees()
        } else {
            0.0
        };

        tracing::debug!(
            frames = frames.len(),
            reference,
            horizontal,
            vertical,
            duration,
            "Measured swing"
        );

        SwingMetrics {
            swing_speed: speed * self.config.speed_multiplier,
            swing_angle: angle,
            total_distance: total * self.config.distance_multiplier,
            swing_duration: duration * self.config.duration_multiplier,
            horizontal_distance: horizontal * self.config.distance_multiplier,
            vertical_distance: vertical * self.config.distance_multiplier,
        }
    }
}
