//! Entry checks for upstream annotation data.
//!
//! The window selector trusts frames to arrive in time order and boxes to
//! be well formed. These checks make that precondition explicit so
//! malformed input fails fast instead of producing a bogus swing.

use swingscope_annotation_model::{DetectionFrame, TimeSegment};
use swingscope_common::error::{SwingError, SwingResult};

/// Check that frames are time-ascending and every box is well formed.
///
/// Equal offsets are allowed; a frame earlier than its predecessor is not.
pub fn validate_frames(frames: &[DetectionFrame]) -> SwingResult<()> {
    for (index, frame) in frames.iter().enumerate() {
        if let Some(defect) = frame.normalized_box.defect() {
            return Err(SwingError::invalid_box(index, defect.describe()));
        }
    }

    if let Some(index) = frames
        .windows(2)
        .position(|pair| pair[1].time_offset < pair[0].time_offset)
    {
        return Err(SwingError::UnorderedFrames {
            index: index + 1,
            previous_secs: frames[index].timestamp_secs(),
            current_secs: frames[index + 1].timestamp_secs(),
        });
    }

    Ok(())
}

/// Check that no segment ends before it starts.
pub fn validate_segments(segments: &[TimeSegment]) -> SwingResult<()> {
    match segments.iter().position(|s| s.end < s.start) {
        Some(index) => Err(SwingError::InvalidSegment {
            index,
            start_secs: segments[index].start.as_secs_f64(),
            end_secs: segments[index].end.as_secs_f64(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingscope_annotation_model::{NormalizedBox, TimeOffset};

    fn frame(millis: u64) -> DetectionFrame {
        DetectionFrame::centered_at(TimeOffset::from_millis(millis), 0.5, 0.5)
    }

    #[test]
    fn test_ordered_frames_pass() {
        let frames = vec![frame(7_900), frame(7_900), frame(8_000)];
        assert!(validate_frames(&frames).is_ok());
        assert!(validate_frames(&[]).is_ok());
    }

    #[test]
    fn test_unordered_frames_report_position() {
        let frames = vec![frame(7_900), frame(8_100), frame(8_000)];
        match validate_frames(&frames) {
            Err(SwingError::UnorderedFrames {
                index,
                previous_secs,
                current_secs,
            }) => {
                assert_eq!(index, 2);
                assert!((previous_secs - 8.1).abs() < 1e-9);
                assert!((current_secs - 8.0).abs() < 1e-9);
            }
            other => panic!("expected UnorderedFrames, got {other:?}"),
        }
    }

    #[test]
    fn test_inverted_box_is_rejected() {
        let mut frames = vec![frame(7_900), frame(8_000)];
        frames[1].normalized_box = NormalizedBox::new(0.6, 0.2, 0.4, 0.3);

        let err = validate_frames(&frames).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, SwingError::InvalidBox { index: 1, .. }));
    }

    #[test]
    fn test_out_of_range_box_is_rejected() {
        let mut frames = vec![frame(7_900)];
        frames[0].normalized_box = NormalizedBox::new(0.2, 0.2, 1.4, 0.3);
        assert!(matches!(
            validate_frames(&frames),
            Err(SwingError::InvalidBox { index: 0, .. })
        ));
    }

    #[test]
    fn test_inverted_segment_is_rejected() {
        let segments = vec![
            TimeSegment::from_secs(1.0, 2.0),
            TimeSegment::from_secs(5.0, 4.0),
        ];
        assert!(matches!(
            validate_segments(&segments),
            Err(SwingError::InvalidSegment { index: 1, .. })
        ));
        assert!(validate_segments(&segments[..1]).is_ok());
    }
}
