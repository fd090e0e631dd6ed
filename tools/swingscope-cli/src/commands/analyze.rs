//! Measure the bat swing in an annotation export.

use std::path::PathBuf;

use serde::Serialize;
use swingscope_common::config::AnalysisConfig;
use swingscope_swing_core::{SwingAnalysis, SwingAnalyzer, SwingMetrics};

/// Machine-readable result of one `analyze` run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwingReport {
    source: PathBuf,
    analyzed_at: String,
    config: AnalysisConfig,
    window: WindowReport,
    metrics: SwingMetrics,
    measurable: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowReport {
    frames_in_segments: usize,
    frames: usize,
    start_secs: Option<f64>,
    end_secs: Option<f64>,
    track_break: bool,
}

impl WindowReport {
    fn from_analysis(analysis: &SwingAnalysis) -> Self {
        let span = analysis.window.span_secs();
        Self {
            frames_in_segments: analysis.window.frames_in_segments,
            frames: analysis.window.frames.len(),
            start_secs: span.map(|(start, _)| start),
            end_secs: span.map(|(_, end)| end),
            track_break: analysis.window.track_break,
        }
    }
}

pub fn run(path: PathBuf, json: bool, config: AnalysisConfig) -> anyhow::Result<()> {
    let results = super::load_annotations(&path)?;

    let analysis = SwingAnalyzer::new(config.clone())
        .analyze_annotations(&results)
        .map_err(|e| anyhow::anyhow!("Analysis failed: {e}"))?;

    tracing::info!(
        path = %path.display(),
        frames = analysis.window.frames.len(),
        speed = analysis.metrics.swing_speed,
        "Swing analyzed"
    );

    if json {
        let report = SwingReport {
            window: WindowReport::from_analysis(&analysis),
            source: path,
            analyzed_at: chrono::Utc::now().to_rfc3339(),
            config,
            metrics: analysis.metrics,
            measurable: analysis.is_measurable(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Analyzing: {}", path.display());
    println!(
        "  Frames: {} in segments, {} in swing window",
        analysis.window.frames_in_segments,
        analysis.window.frames.len()
    );
    if let Some((start, end)) = analysis.window.span_secs() {
        println!("  Window: {start:.3}s - {end:.3}s");
    }
    if analysis.window.track_break {
        println!("  Track lost after the window");
    }
    println!();

    if !analysis.is_measurable() {
        println!("Unable to track bat movement. Try a clip where the bat stays in frame.");
        return Ok(());
    }

    let m = &analysis.metrics;
    println!("Bat Swing Speed      {:.1} mph", m.swing_speed);
    println!("Swing Duration       {:.3} s", m.swing_duration);
    println!("Swing Angle          {:.1}°", m.swing_angle);
    println!("Total Distance       {:.1} ft", m.total_distance);
    println!("Vertical Distance    {:.1} ft", m.vertical_distance);
    println!("Horizontal Distance  {:.1} ft", m.horizontal_distance);
    println!();
    println!("Note: metrics are approximate and depend on camera angle and video quality.");

    Ok(())
}
