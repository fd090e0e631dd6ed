//! Check the selected frames and segments of an annotation export.

use std::path::PathBuf;

use swingscope_common::config::AnalysisConfig;
use swingscope_swing_core::validate::{validate_frames, validate_segments};

pub fn run(path: PathBuf, config: AnalysisConfig) -> anyhow::Result<()> {
    println!("Validating annotation at: {}", path.display());

    let results = super::load_annotations(&path)?;
    let segments = results.segments_matching(&config.filter.segment_keyword);
    let frames = results.frames_for_object(&config.filter.object_label);

    println!(
        "  Segments matching \"{}\": {}",
        config.filter.segment_keyword,
        segments.len()
    );
    println!(
        "  Frames for \"{}\": {}",
        config.filter.object_label,
        frames.len()
    );

    let mut issues = Vec::new();
    if let Err(e) = validate_segments(&segments) {
        issues.push(e);
    }
    if let Err(e) = validate_frames(&frames) {
        issues.push(e);
    }

    if issues.is_empty() {
        if segments.is_empty() || frames.is_empty() {
            println!("\nAnnotation is well formed but has nothing to analyze.");
        } else {
            println!("\nAnnotation is valid.");
        }
        return Ok(());
    }

    println!("\nValidation issues:");
    for issue in &issues {
        println!("  - {issue}");
    }
    anyhow::bail!("{} issue(s) found", issues.len())
}
