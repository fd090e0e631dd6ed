//! SwingScope Common Utilities
//!
//! Shared infrastructure for all SwingScope crates:
//! - Error types and result aliases
//! - Calibration and application configuration
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
