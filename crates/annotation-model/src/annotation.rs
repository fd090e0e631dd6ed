//! Video annotation results.
//!
//! Mirrors the JSON export of a video annotation service: labeled time
//! segments (e.g. "pitch") and per-object tracks made of detection
//! frames. Field names follow the service's camelCase protobuf JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::NormalizedBox;
use crate::time::{ProtoInt64, TimeOffset};

/// One observation of a tracked object at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFrame {
    /// Offset from the start of the video.
    #[serde(default)]
    pub time_offset: TimeOffset,

    /// Object location in normalized frame coordinates.
    #[serde(rename = "normalizedBoundingBox", default)]
    pub normalized_box: NormalizedBox,
}

/// A labeled interval `[start, end]` within the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSegment {
    #[serde(rename = "startTimeOffset", default)]
    pub start: TimeOffset,

    #[serde(rename = "endTimeOffset", default)]
    pub end: TimeOffset,
}

/// Detected entity (label or object class).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entity {
    /// Human-readable label, e.g. "baseball bat".
    pub description: String,

    /// Knowledge-graph identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// A segment on which a label was detected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSegment {
    pub segment: TimeSegment,
    pub confidence: f64,
}

/// A label detected on one or more video segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelAnnotation {
    pub entity: Entity,
    pub segments: Vec<LabelSegment>,
}

/// A tracked object: one entity followed through a run of frames.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectAnnotation {
    pub entity: Entity,
    pub confidence: f64,

    /// Detections in the order the service emitted them.
    pub frames: Vec<DetectionFrame>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<ProtoInt64>,
}

/// Per-video failure reported by the annotation service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStatus {
    pub code: i32,
    pub message: String,
}

/// Annotation results for a single video.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoAnnotationResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_uri: Option<String>,

    pub segment_label_annotations: Vec<LabelAnnotation>,

    pub object_annotations: Vec<ObjectAnnotation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AnnotationStatus>,
}

/// Top-level annotation response (one entry per input video).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotateVideoResponse {
    pub annotation_results: Vec<VideoAnnotationResults>,
}

/// Labels and object tracks present in an annotation result.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnnotationSummary {
    pub labels: Vec<LabelSummary>,
    pub objects: Vec<ObjectSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSummary {
    pub description: String,
    pub segments: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSummary {
    pub description: String,
    pub frames: usize,
    pub first: Option<TimeOffset>,
    pub last: Option<TimeOffset>,
}

impl DetectionFrame {
    pub fn new(time_offset: TimeOffset, normalized_box: NormalizedBox) -> Self {
        Self {
            time_offset,
            normalized_box,
        }
    }

    /// Frame whose box is a small square centered at `(cx, cy)`.
    pub fn centered_at(time_offset: TimeOffset, cx: f64, cy: f64) -> Self {
        Self::new(time_offset, NormalizedBox::centered(cx, cy, 0.02, 0.02))
    }

    /// Offset as fractional seconds since video start.
    pub fn timestamp_secs(&self) -> f64 {
        self.time_offset.as_secs_f64()
    }
}

impl TimeSegment {
    pub fn new(start: TimeOffset, end: TimeOffset) -> Self {
        Self { start, end }
    }

    /// Segment between two fractional-second offsets.
    pub fn from_secs(start: f64, end: f64) -> Self {
        Self::new(TimeOffset::from_secs_f64(start), TimeOffset::from_secs_f64(end))
    }

    /// Whether `offset` lies within `[start, end]`.
    pub fn contains(&self, offset: TimeOffset) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn duration_secs(&self) -> f64 {
        self.end.secs_since(self.start)
    }
}

impl VideoAnnotationResults {
    /// All segments of every label whose description contains `keyword`,
    /// ignoring case.
    pub fn segments_matching(&self, keyword: &str) -> Vec<TimeSegment> {
        let keyword = keyword.to_lowercase();
        self.segment_label_annotations
            .iter()
            .filter(|label| label.entity.description.to_lowercase().contains(&keyword))
            .flat_map(|label| label.segments.iter().map(|s| s.segment))
            .collect()
    }

    /// Frames of every object track whose description equals `label`,
    /// ignoring case.
    ///
    /// A single matching track is returned as emitted. Several tracks of the
    /// same class are merged into one time-ordered sequence (stable, so
    /// frames sharing an offset keep their track order).
    pub fn frames_for_object(&self, label: &str) -> Vec<DetectionFrame> {
        let label = label.to_lowercase();
        let tracks: Vec<&ObjectAnnotation> = self
            .object_annotations
            .iter()
            .filter(|object| object.entity.description.to_lowercase() == label)
            .collect();

        let mut frames: Vec<DetectionFrame> = tracks
            .iter()
            .flat_map(|object| object.frames.iter().copied())
            .collect();

        if tracks.len() > 1 {
            frames.sort_by_key(|frame| frame.time_offset);
        }
        frames
    }

    /// Counts of labeled segments and tracked frames, grouped by description.
    pub fn summary(&self) -> AnnotationSummary {
        let mut summary = AnnotationSummary::default();

        for label in &self.segment_label_annotations {
            match summary
                .labels
                .iter_mut()
                .find(|l| l.description == label.entity.description)
            {
                Some(existing) => existing.segments += label.segments.len(),
                None => summary.labels.push(LabelSummary {
                    description: label.entity.description.clone(),
                    segments: label.segments.len(),
                }),
            }
        }

        for object in &self.object_annotations {
            let first = object.frames.iter().map(|f| f.time_offset).min();
            let last = object.frames.iter().map(|f| f.time_offset).max();
            match summary
                .objects
                .iter_mut()
                .find(|o| o.description == object.entity.description)
            {
                Some(existing) => {
                    existing.frames += object.frames.len();
                    existing.first = existing.first.into_iter().chain(first).min();
                    existing.last = existing.last.into_iter().chain(last).max();
                }
                None => summary.objects.push(ObjectSummary {
                    description: object.entity.description.clone(),
                    frames: object.frames.len(),
                    first,
                    last,
                }),
            }
        }

        summary
    }
}

impl AnnotateVideoResponse {
    /// Parse a response from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AnnotationError> {
        serde_json::from_str(json).map_err(|e| AnnotationError::ParseError {
            path: None,
            source: e,
        })
    }

    /// Load a response from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AnnotationError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AnnotationError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| AnnotationError::ParseError {
            path: Some(path.to_path_buf()),
            source: e,
        })
    }

    /// Results for the first (normally only) annotated video.
    pub fn primary(&self) -> Result<&VideoAnnotationResults, AnnotationError> {
        let result = self
            .annotation_results
            .first()
            .ok_or(AnnotationError::NoResults)?;
        if let Some(status) = &result.error {
            return Err(AnnotationError::ServiceError {
                code: status.code,
                message: status.message.clone(),
            });
        }
        Ok(result)
    }
}

/// Errors that can occur when loading annotation results.
#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {}: {source}", .path.as_ref().map_or_else(|| "annotation JSON".to_string(), |p| p.display().to_string()))]
    ParseError {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },

    #[error("Annotation response contains no results")]
    NoResults,

    #[error("Annotation service reported error {code}: {message}")]
    ServiceError { code: i32, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "annotationResults": [{
            "inputUri": "/videos/hr.mp4",
            "segmentLabelAnnotations": [
                {
                    "entity": { "description": "Pitch", "entityId": "/m/pitch" },
                    "segments": [
                        { "segment": { "startTimeOffset": "7.5s", "endTimeOffset": "9.0s" }, "confidence": 0.8 }
                    ]
                },
                {
                    "entity": { "description": "baseball pitcher" },
                    "segments": [
                        { "segment": { "endTimeOffset": "2s" }, "confidence": 0.4 }
                    ]
                },
                {
                    "entity": { "description": "stadium" },
                    "segments": [
                        { "segment": { "startTimeOffset": "0s", "endTimeOffset": "30s" } }
                    ]
                }
            ],
            "objectAnnotations": [
                {
                    "entity": { "description": "Baseball Bat" },
                    "confidence": 0.9,
                    "trackId": "4",
                    "frames": [
                        { "normalizedBoundingBox": { "left": 0.4, "top": 0.4, "right": 0.5, "bottom": 0.6 }, "timeOffset": "7.9s" },
                        { "normalizedBoundingBox": { "left": 0.45, "top": 0.4, "right": 0.55, "bottom": 0.6 }, "timeOffset": "8.0s" }
                    ]
                },
                {
                    "entity": { "description": "baseball bat" },
                    "frames": [
                        { "normalizedBoundingBox": { "left": 0.5, "top": 0.4, "right": 0.6, "bottom": 0.6 }, "timeOffset": "7.95s" }
                    ]
                },
                {
                    "entity": { "description": "baseball bat case" },
                    "frames": [
                        { "normalizedBoundingBox": { "right": 0.1, "bottom": 0.1 }, "timeOffset": "1s" }
                    ]
                }
            ]
        }]
    }"#;

    fn sample() -> VideoAnnotationResults {
        AnnotateVideoResponse::from_json(SAMPLE)
            .unwrap()
            .primary()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_segments_matching_is_case_insensitive_substring() {
        let result = sample();
        let segments = result.segments_matching("pitch");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], TimeSegment::from_secs(7.5, 9.0));
        assert_eq!(segments[1], TimeSegment::from_secs(0.0, 2.0));
    }

    #[test]
    fn test_frames_for_object_matches_exact_label_and_merges_tracks() {
        let result = sample();
        let frames = result.frames_for_object("baseball bat");
        let times: Vec<u64> = frames.iter().map(|f| f.time_offset.as_nanos()).collect();
        assert_eq!(times, vec![7_900_000_000, 7_950_000_000, 8_000_000_000]);
    }

    #[test]
    fn test_single_track_is_not_reordered() {
        let mut result = sample();
        result.object_annotations.truncate(1);
        result.object_annotations[0].frames.reverse();

        let frames = result.frames_for_object("BASEBALL BAT");
        assert_eq!(frames[0].time_offset, TimeOffset::from_millis(8_000));
        assert_eq!(frames[1].time_offset, TimeOffset::from_millis(7_900));
    }

    #[test]
    fn test_segment_contains_is_inclusive() {
        let segment = TimeSegment::from_secs(1.0, 2.0);
        assert!(segment.contains(TimeOffset::from_millis(1_000)));
        assert!(segment.contains(TimeOffset::from_millis(2_000)));
        assert!(!segment.contains(TimeOffset::from_millis(2_001)));
        assert!((segment.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_summary_groups_by_description() {
        let summary = sample().summary();
        assert_eq!(summary.labels.len(), 3);
        assert_eq!(summary.objects.len(), 3);

        let bat = summary
            .objects
            .iter()
            .find(|o| o.description == "Baseball Bat")
            .unwrap();
        assert_eq!(bat.frames, 2);
        assert_eq!(bat.first, Some(TimeOffset::from_millis(7_900)));
        assert_eq!(bat.last, Some(TimeOffset::from_millis(8_000)));
    }

    #[test]
    fn test_track_id_accepts_string_form() {
        let result = sample();
        assert_eq!(
            result.object_annotations[0]
                .track_id
                .as_ref()
                .and_then(ProtoInt64::as_i64),
            Some(4)
        );
    }

    #[test]
    fn test_primary_reports_service_error() {
        let json = r#"{"annotationResults":[{"error":{"code":3,"message":"bad video"}}]}"#;
        let response = AnnotateVideoResponse::from_json(json).unwrap();
        let err = response.primary().unwrap_err();
        assert!(matches!(err, AnnotationError::ServiceError { code: 3, .. }));
    }

    #[test]
    fn test_primary_requires_a_result() {
        let response = AnnotateVideoResponse::from_json("{}").unwrap();
        assert!(matches!(response.primary(), Err(AnnotationError::NoResults)));
    }

    #[test]
    fn test_from_json_file_reports_missing_path() {
        let err = AnnotateVideoResponse::from_json_file("/nonexistent/annotation.json").unwrap_err();
        assert!(matches!(err, AnnotationError::IoError { .. }));
        assert!(err.to_string().contains("/nonexistent/annotation.json"));
    }

    #[test]
    fn test_detection_frame_json_shape() {
        let frame = DetectionFrame::new(
            TimeOffset::from_millis(7_900),
            NormalizedBox::new(0.1, 0.2, 0.3, 0.4),
        );
        let json = serde_json::to_string(&frame).unwrap();
        assert!(json.contains("\"timeOffset\":\"7.900s\""));
        assert!(json.contains("\"normalizedBoundingBox\""));
    }
}
