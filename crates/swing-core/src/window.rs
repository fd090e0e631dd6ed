//! Swing window selection.
//!
//! Narrows a tracked object's detection frames down to the run that
//! represents one continuous swing.
//!
//! # Algorithm
//!
//! 1. **Segment filter:** keep frames whose offset lies inside any labeled
//!    segment (inclusive bounds).
//! 2. **Leading trim:** start at the first frame past the onset threshold.
//! 3. **Trailing trim:** stop before the first frame that follows its
//!    predecessor by more than the continuity gap.
//!
//! Frames must already be in time order; see [`crate::validate`].

use std::ops::Range;

use serde::Serialize;
use swingscope_annotation_model::{DetectionFrame, TimeSegment};
use swingscope_common::config::{OnsetMiss, WindowConfig};

/// Frames chosen as the swing, plus how they were chosen.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SwingWindow {
    /// The selected frames, in time order. May be empty.
    pub frames: Vec<DetectionFrame>,

    /// Number of frames that fell inside a segment.
    pub frames_in_segments: usize,

    /// Position of the window within the segment-filtered frames.
    pub range: Range<usize>,

    /// Whether the window ended at a detection gap rather than the last frame.
    pub track_break: bool,
}

impl SwingWindow {
    /// Whether enough frames remain to measure motion.
    pub fn is_measurable(&self) -> bool {
        self.frames.len() >= 2
    }

    /// Offsets of the first and last selected frames.
    pub fn span_secs(&self) -> Option<(f64, f64)> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        Some((first.timestamp_secs(), last.timestamp_secs()))
    }
}

/// Picks the swing window out of a frame sequence.
#[derive(Debug, Clone, Default)]
pub struct WindowSelector {
    config: WindowConfig,
}

impl WindowSelector {
    /// Create a selector with the given thresholds.
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Create a selector with default thresholds.
    pub fn with_defaults() -> Self {
        Self::new(WindowConfig::default())
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Frames whose offset lies within any segment, in input order.
    pub fn frames_in_segments(
        frames: &[DetectionFrame],
        segments: &[TimeSegment],
    ) -> Vec<DetectionFrame> {
        frames
            .iter()
            .filter(|frame| segments.iter().any(|s| s.contains(frame.time_offset)))
            .copied()
            .collect()
    }

    /// Index of the first frame strictly past the onset threshold.
    pub fn onset_index(&self, frames: &[DetectionFrame]) -> Option<usize> {
        frames
            .iter()
            .position(|frame| frame.timestamp_secs() > self.config.onset_threshold_secs)
    }

    /// Where the leading trim starts, honoring [`OnsetMiss`].
    pub fn trim_start(&self, frames: &[DetectionFrame]) -> usize {
        match (self.onset_index(frames), self.config.onset_miss) {
            (Some(index), _) => index,
            (None, OnsetMiss::DropAll) => frames.len(),
            (None, OnsetMiss::KeepAll) => 0,
        }
    }

    /// Index of the first frame separated from its predecessor by more
    /// than the continuity gap.
    pub fn break_index(&self, frames: &[DetectionFrame]) -> Option<usize> {
        frames
            .windows(2)
            .position(|pair| {
                pair[1].time_offset.secs_since(pair[0].time_offset)
                    > self.config.continuity_gap_secs
            })
            .map(|i| i + 1)
    }

    /// Apply both trims, returning the window's range within `frames`.
    pub fn trim_range(&self, frames: &[DetectionFrame]) -> (Range<usize>, bool) {
        let start = self.trim_start(frames);
        match self.break_index(&frames[start..]) {
            Some(offset) => (start..start + offset, true),
            None => (start..frames.len(), false),
        }
    }

    /// Apply both trims, borrowing the surviving frames.
    pub fn trim<'a>(&self, frames: &'a [DetectionFrame]) -> &'a [DetectionFrame] {
        let (range, _) = self.trim_range(frames);
        &frames[range]
    }

    /// Run the full selection over a frame sequence and its segments.
    pub fn select(&self, frames: &[DetectionFrame], segments: &[TimeSegment]) -> SwingWindow {
        let in_segments = Self::frames_in_segments(frames, segments);
        let (range, track_break) = self.trim_range(&in_segments);

        tracing::debug!(
            total = frames.len(),
            in_segments = in_segments.len(),
            start = range.start,
            end = range.end,
            track_break,
            "Selected swing window"
        );

        SwingWindow {
            frames: in_segments[range.clone()].to_vec(),
            frames_in_segments: in_segments.len(),
            range,
            track_break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingscope_annotation_model::TimeOffset;

    fn frames_at(times: &[f64]) -> Vec<DetectionFrame> {
        times
            .iter()
            .map(|&t| DetectionFrame::centered_at(TimeOffset::from_secs_f64(t), 0.5, 0.5))
            .collect()
    }

    fn times(frames: &[DetectionFrame]) -> Vec<f64> {
        frames.iter().map(DetectionFrame::timestamp_secs).collect()
    }

    #[test]
    fn test_segment_filter_is_inclusive() {
        let frames = frames_at(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let segments = vec![TimeSegment::from_secs(2.0, 3.0), TimeSegment::from_secs(5.0, 6.0)];

        let kept = WindowSelector::frames_in_segments(&frames, &segments);
        assert_eq!(times(&kept), vec![2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_frame_in_overlapping_segments_is_kept_once() {
        let frames = frames_at(&[2.5]);
        let segments = vec![TimeSegment::from_secs(2.0, 3.0), TimeSegment::from_secs(2.4, 2.6)];
        assert_eq!(WindowSelector::frames_in_segments(&frames, &segments).len(), 1);
    }

    #[test]
    fn test_no_segments_keeps_nothing() {
        let frames = frames_at(&[8.0, 8.1]);
        let window = WindowSelector::with_defaults().select(&frames, &[]);
        assert!(window.frames.is_empty());
        assert_eq!(window.frames_in_segments, 0);
    }

    #[test]
    fn test_onset_is_strictly_after_threshold() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[7.7, 7.8, 7.9, 8.0]);
        assert_eq!(selector.onset_index(&frames), Some(2));
        assert_eq!(times(selector.trim(&frames)), vec![7.9, 8.0]);
    }

    #[test]
    fn test_all_frames_before_onset_are_dropped() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[1.0, 2.0, 7.8]);
        assert_eq!(selector.onset_index(&frames), None);
        assert!(selector.trim(&frames).is_empty());
    }

    #[test]
    fn test_keep_all_leaves_sequence_untrimmed_without_onset() {
        let selector = WindowSelector::new(WindowConfig {
            onset_miss: OnsetMiss::KeepAll,
            ..WindowConfig::default()
        });
        let frames = frames_at(&[1.0, 1.1, 1.2]);
        assert_eq!(selector.trim(&frames).len(), 3);
    }

    #[test]
    fn test_gap_truncates_exclusive() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[7.5, 7.9, 8.0, 8.1, 8.5, 8.6]);

        let (range, track_break) = selector.trim_range(&frames);
        assert_eq!(range, 1..4);
        assert!(track_break);
        assert_eq!(times(selector.trim(&frames)), vec![7.9, 8.0, 8.1]);
    }

    #[test]
    fn test_gap_equal_to_threshold_is_continuous() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[8.0, 8.3, 8.6]);
        assert_eq!(selector.break_index(&frames), None);
        assert_eq!(selector.trim(&frames).len(), 3);
    }

    #[test]
    fn test_gap_before_onset_is_ignored() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[5.0, 7.85, 7.9, 8.0]);
        assert_eq!(times(selector.trim(&frames)), vec![7.85, 7.9, 8.0]);
    }

    #[test]
    fn test_select_reports_window_metadata() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[7.0, 7.9, 8.0, 8.1, 9.0, 12.0]);
        let segments = vec![TimeSegment::from_secs(6.0, 10.0)];

        let window = selector.select(&frames, &segments);
        assert_eq!(window.frames_in_segments, 5);
        assert_eq!(window.range, 1..4);
        assert!(window.track_break);
        assert!(window.is_measurable());
        let (first, last) = window.span_secs().unwrap();
        assert!((first - 7.9).abs() < 1e-9);
        assert!((last - 8.1).abs() < 1e-9);
    }

    #[test]
    fn test_select_does_not_mutate_input() {
        let selector = WindowSelector::with_defaults();
        let frames = frames_at(&[7.0, 7.9, 8.0]);
        let before = frames.clone();
        let _ = selector.select(&frames, &[TimeSegment::from_secs(0.0, 10.0)]);
        assert_eq!(frames, before);
    }
}
