//! End-to-end swing analysis.
//!
//! Validates the input, selects the swing window, and measures it.
//! Each call is independent; the analyzer holds only configuration.

use serde::Serialize;
use swingscope_annotation_model::{DetectionFrame, TimeSegment, VideoAnnotationResults};
use swingscope_common::config::{AnalysisConfig, AnnotationFilterConfig};
use swingscope_common::error::SwingResult;

use crate::kinematics::{KinematicCalculator, SwingMetrics};
use crate::validate::{validate_frames, validate_segments};
use crate::window::{SwingWindow, WindowSelector};

/// Result of one analysis: the chosen window and its metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingAnalysis {
    pub window: SwingWindow,
    pub metrics: SwingMetrics,
}

impl SwingAnalysis {
    /// Whether the window held enough frames to measure a swing.
    pub fn is_measurable(&self) -> bool {
        self.window.is_measurable()
    }
}

/// Runs window selection and kinematics with one configuration.
#[derive(Debug, Clone, Default)]
pub struct SwingAnalyzer {
    filter: AnnotationFilterConfig,
    window: WindowSelector,
    kinematics: KinematicCalculator,
}

impl SwingAnalyzer {
    /// Create an analyzer with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            filter: config.filter,
            window: WindowSelector::new(config.window),
            kinematics: KinematicCalculator::new(config.kinematics),
        }
    }

    /// Create an analyzer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(AnalysisConfig::default())
    }

    pub fn window_selector(&self) -> &WindowSelector {
        &self.window
    }

    pub fn calculator(&self) -> &KinematicCalculator {
        &self.kinematics
    }

    /// Analyze one object's frames against the segments of interest.
    ///
    /// Fails only on malformed input; an empty or single-frame window
    /// yields the zero record.
    pub fn analyze(
        &self,
        frames: &[DetectionFrame],
        segments: &[TimeSegment],
    ) -> SwingResult<SwingAnalysis> {
        validate_segments(segments)?;
        validate_frames(frames)?;

        let window = self.window.select(frames, segments);
        if !window.is_measurable() {
            tracing::warn!(
                frames = window.frames.len(),
                in_segments = window.frames_in_segments,
                "Swing window too short to measure"
            );
        }

        let metrics = self.kinematics.compute(&window.frames);
        Ok(SwingAnalysis { window, metrics })
    }

    /// Pick the configured segment label and object class out of an
    /// annotation result, then analyze them.
    pub fn analyze_annotations(
        &self,
        results: &VideoAnnotationResults,
    ) -> SwingResult<SwingAnalysis> {
        let segments = results.segments_matching(&self.filter.segment_keyword);
        let frames = results.frames_for_object(&self.filter.object_label);

        tracing::debug!(
            keyword = %self.filter.segment_keyword,
            object = %self.filter.object_label,
            segments = segments.len(),
            frames = frames.len(),
            "Selected annotations"
        );

        self.analyze(&frames, &segments)
    }
}
