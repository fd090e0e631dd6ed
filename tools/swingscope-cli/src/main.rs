//! SwingScope CLI: command-line interface for bat swing analysis.
//!
//! Usage:
//!   swingscope analyze <ANNOTATION>    Measure the swing in an annotation export
//!   swingscope info <ANNOTATION>       Show labels and object tracks
//!   swingscope validate <ANNOTATION>   Check the selected frames and segments
//!   swingscope config                  Show or initialize configuration

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use swingscope_common::config::{
    config_file_path, AnalysisConfig, AppConfig, LoggingConfig, OnsetMiss,
};

mod commands;

#[derive(Parser)]
#[command(
    name = "swingscope",
    about = "Bat swing kinematics from video object-tracking annotations",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $SWINGSCOPE_CONFIG or the XDG config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure the bat swing in an annotation export
    Analyze {
        /// Path to the annotation JSON
        path: PathBuf,

        /// Print a JSON report instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: AnalysisOverrides,
    },

    /// Show labels and object tracks in an annotation export
    Info {
        /// Path to the annotation JSON
        path: PathBuf,
    },

    /// Check the selected frames and segments for malformed data
    Validate {
        /// Path to the annotation JSON
        path: PathBuf,

        #[command(flatten)]
        overrides: AnalysisOverrides,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

/// Command-line overrides for analysis settings.
#[derive(Args, Debug, Default)]
struct AnalysisOverrides {
    /// Segment label keyword bounding the analysis
    #[arg(long)]
    segment_keyword: Option<String>,

    /// Tracked object label
    #[arg(long)]
    object_label: Option<String>,

    /// Swing onset threshold (seconds since video start)
    #[arg(long)]
    onset: Option<f64>,

    /// Largest gap between frames before the track counts as lost (seconds)
    #[arg(long)]
    max_gap: Option<f64>,

    /// Keep every frame when none passes the onset threshold
    #[arg(long)]
    keep_all_before_onset: bool,

    /// Upper bound on the reference frame index
    #[arg(long)]
    lookahead: Option<usize>,

    /// Scale applied to normalized displacement
    #[arg(long)]
    normalization: Option<f64>,

    /// Speed calibration multiplier
    #[arg(long)]
    speed_multiplier: Option<f64>,

    /// Distance calibration multiplier
    #[arg(long)]
    distance_multiplier: Option<f64>,

    /// Duration calibration multiplier
    #[arg(long)]
    duration_multiplier: Option<f64>,
}

impl AnalysisOverrides {
    /// Layer the flags over a loaded configuration and re-validate it.
    fn apply(self, mut config: AnalysisConfig) -> anyhow::Result<AnalysisConfig> {
        if let Some(keyword) = self.segment_keyword {
            config.filter.segment_keyword = keyword;
        }
        if let Some(label) = self.object_label {
            config.filter.object_label = label;
        }
        if let Some(onset) = self.onset {
            config.window.onset_threshold_secs = onset;
        }
        if let Some(gap) = self.max_gap {
            config.window.continuity_gap_secs = gap;
        }
        if self.keep_all_before_onset {
            config.window.onset_miss = OnsetMiss::KeepAll;
        }
        if let Some(lookahead) = self.lookahead {
            config.kinematics.reference_lookahead = lookahead;
        }
        if let Some(factor) = self.normalization {
            config.kinematics.normalization_factor = factor;
        }
        if let Some(multiplier) = self.speed_multiplier {
            config.kinematics.speed_multiplier = multiplier;
        }
        if let Some(multiplier) = self.distance_multiplier {
            config.kinematics.distance_multiplier = multiplier;
        }
        if let Some(multiplier) = self.duration_multiplier {
            config.kinematics.duration_multiplier = multiplier;
        }

        config.validate().context("Invalid analysis settings")?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config --init` never reads the file it is about to write.
    let config = match (&cli.command, &cli.config) {
        (Commands::Config { init: true, .. }, _) => AppConfig::default(),
        (_, Some(path)) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        (_, None) => AppConfig::load().with_context(|| {
            format!("Failed to load config {}", config_file_path().display())
        })?,
    };

    // Initialize logging
    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    swingscope_common::logging::init_logging(&LoggingConfig {
        level,
        json: config.logging.json,
    });

    match cli.command {
        Commands::Analyze {
            path,
            json,
            overrides,
        } => commands::analyze::run(path, json, overrides.apply(config.analysis)?),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path, overrides } => {
            commands::validate::run(path, overrides.apply(config.analysis)?)
        }
        Commands::Config { init, force } => {
            commands::config::run(&config, cli.config.as_deref(), init, force)
        }
    }
}
