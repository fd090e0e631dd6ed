//! Normalized bounding boxes.
//!
//! All coordinates are fractions of the video frame: `(0.0, 0.0)` is the
//! top-left corner and `(1.0, 1.0)` the bottom-right.

use serde::{Deserialize, Serialize};

/// A detection rectangle in normalized frame coordinates.
///
/// Protobuf JSON omits zero-valued fields, so each edge defaults to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizedBox {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

/// Ways a box can violate its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxDefect {
    NonFinite,
    OutOfRange,
    InvertedHorizontal,
    InvertedVertical,
}

impl BoxDefect {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::NonFinite => "coordinate is not a finite number",
            Self::OutOfRange => "coordinate outside [0, 1]",
            Self::InvertedHorizontal => "left edge is right of the right edge",
            Self::InvertedVertical => "top edge is below the bottom edge",
        }
    }
}

impl NormalizedBox {
    /// Create a box from its four edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a box of the given size centered at `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::new(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
    }

    /// The center point of this box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// First invariant this box breaks, if any.
    pub fn defect(&self) -> Option<BoxDefect> {
        let edges = [self.left, self.top, self.right, self.bottom];
        if edges.iter().any(|v| !v.is_finite()) {
            return Some(BoxDefect::NonFinite);
        }
        if edges.iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Some(BoxDefect::OutOfRange);
        }
        if self.left > self.right {
            return Some(BoxDefect::InvertedHorizontal);
        }
        if self.top > self.bottom {
            return Some(BoxDefect::InvertedVertical);
        }
        None
    }
}
