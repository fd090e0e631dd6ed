//! SwingScope Swing Core
//!
//! Turns a tracked object's detection frames into swing kinematics:
//! - **Window Selection:** Keep frames inside the pitch segments, drop
//!   pre-swing noise, and cut the track at the first detection gap
//! - **Kinematics:** Displacement, duration, speed, and angle of the box
//!   center, calibrated to real-world units
//! - **Validation:** Reject unordered frames and malformed boxes up front
//!
//! This crate is pure computation with no I/O and no shared state.
//! All inputs are data; all outputs are data.

pub mod analyzer;
pub mod kinematics;
pub mod validate;
pub mod window;

pub use analyzer::{SwingAnalysis, SwingAnalyzer};
pub use kinematics::{KinematicCalculator, SwingMetrics};
pub use window::{SwingWindow, WindowSelector};
