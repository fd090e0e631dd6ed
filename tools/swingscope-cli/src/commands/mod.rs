pub mod analyze;
pub mod config;
pub mod info;
pub mod validate;

use std::path::Path;

use swingscope_annotation_model::{AnnotateVideoResponse, VideoAnnotationResults};

/// Load an annotation export and return its first video result.
pub fn load_annotations(path: &Path) -> anyhow::Result<VideoAnnotationResults> {
    let response = AnnotateVideoResponse::from_json_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load annotations: {e}"))?;
    let results = response
        .primary()
        .map_err(|e| anyhow::anyhow!("Unusable annotation response: {e}"))?;
    Ok(results.clone())
}
