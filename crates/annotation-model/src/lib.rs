//! SwingScope Annotation Model
//!
//! Defines the data contracts consumed by the swing analysis:
//! - **Time:** Offsets since video start with protobuf-JSON duration encoding
//! - **Geometry:** Normalized bounding boxes and their centers
//! - **Annotations:** Labeled segments, object tracks, and detection frames
//!   as returned by a video annotation service
//!
//! All box coordinates are normalized to `[0.0, 1.0]` relative to the
//! video frame so they are independent of the source resolution.

pub mod annotation;
pub mod geometry;
pub mod time;

pub use annotation::*;
pub use geometry::*;
pub use time::*;
