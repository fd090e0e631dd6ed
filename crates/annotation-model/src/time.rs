//! Time offsets within an annotated video.
//!
//! Offsets are stored as whole nanoseconds so gaps between frames compare
//! exactly against configured thresholds. On the wire they use the
//! protobuf JSON duration form (`"7.800s"`), but the structured
//! `{ "seconds": .., "nanos": .. }` form and bare float seconds are
//! accepted as well.

use std::fmt;

use serde::{Deserialize, Serialize};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Elapsed time from the start of the video.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "RawOffset", into = "String")]
pub struct TimeOffset {
    nanos: u64,
}

impl TimeOffset {
    /// The start of the video.
    pub const ZERO: TimeOffset = TimeOffset { nanos: 0 };

    /// Create an offset from whole nanoseconds.
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create an offset from whole milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            nanos: millis * 1_000_000,
        }
    }

    /// Create an offset from fractional seconds, rounded to the nearest
    /// nanosecond. Negative input saturates to zero.
    pub fn from_secs_f64(secs: f64) -> Self {
        let nanos = (secs * NANOS_PER_SEC as f64).round().max(0.0) as u64;
        Self { nanos }
    }

    /// Offset in nanoseconds.
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Offset as fractional seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.nanos as f64 / NANOS_PER_SEC as f64
    }

    /// Seconds elapsed since `earlier`; zero if `earlier` is later.
    pub fn secs_since(&self, earlier: TimeOffset) -> f64 {
        self.nanos.saturating_sub(earlier.nanos) as f64 / NANOS_PER_SEC as f64
    }

    /// Parse the protobuf JSON duration form, e.g. `"7.8s"` or `"12s"`.
    pub fn parse(text: &str) -> Result<Self, TimeOffsetError> {
        let trimmed = text.trim();
        let body = trimmed
            .strip_suffix('s')
            .ok_or_else(|| TimeOffsetError::new(text, "missing 's' suffix"))?;
        if body.starts_with('-') {
            return Err(TimeOffsetError::new(text, "negative offset"));
        }

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(TimeOffsetError::new(text, "no digits"));
        }
        if fraction.len() > 9 {
            return Err(TimeOffsetError::new(text, "more than nanosecond precision"));
        }

        let secs: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| TimeOffsetError::new(text, "invalid seconds"))?
        };
        let nanos: u64 = if fraction.is_empty() {
            0
        } else {
            if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(TimeOffsetError::new(text, "invalid fraction"));
            }
            let padded = format!("{fraction:0<9}");
            padded
                .parse()
                .map_err(|_| TimeOffsetError::new(text, "invalid fraction"))?
        };

        secs.checked_mul(NANOS_PER_SEC)
            .and_then(|n| n.checked_add(nanos))
            .map(Self::from_nanos)
            .ok_or_else(|| TimeOffsetError::new(text, "offset overflows"))
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.nanos / NANOS_PER_SEC;
        let sub = self.nanos % NANOS_PER_SEC;
        if sub == 0 {
            write!(f, "{secs}s")
        } else if sub % 1_000_000 == 0 {
            write!(f, "{secs}.{:03}s", sub / 1_000_000)
        } else if sub % 1_000 == 0 {
            write!(f, "{secs}.{:06}s", sub / 1_000)
        } else {
            write!(f, "{secs}.{sub:09}s")
        }
    }
}

impl From<TimeOffset> for String {
    fn from(offset: TimeOffset) -> Self {
        offset.to_string()
    }
}

/// A duration string or number that could not be read as a time offset.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid time offset {input:?}: {reason}")]
pub struct TimeOffsetError {
    input: String,
    reason: &'static str,
}

impl TimeOffsetError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Accepted wire encodings of a time offset.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Text(String),
    Seconds(f64),
    Parts {
        #[serde(default)]
        seconds: ProtoInt64,
        #[serde(default)]
        nanos: i64,
    },
}

/// Protobuf JSON writes 64-bit integers as strings; older exports use numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtoInt64 {
    Number(i64),
    Text(String),
}

impl Default for ProtoInt64 {
    fn default() -> Self {
        Self::Number(0)
    }
}

impl ProtoInt64 {
    /// Numeric value, if the text form holds a valid integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl TryFrom<RawOffset> for TimeOffset {
    type Error = TimeOffsetError;

    fn try_from(raw: RawOffset) -> Result<Self, Self::Error> {
        match raw {
            RawOffset::Text(text) => TimeOffset::parse(&text),
            RawOffset::Seconds(secs) => {
                if secs.is_finite() && secs >= 0.0 {
                    Ok(TimeOffset::from_secs_f64(secs))
                } else {
                    Err(TimeOffsetError::new(&secs.to_string(), "not a non-negative number"))
                }
            }
            RawOffset::Parts { seconds, nanos } => {
                let text = format!("{seconds:?}/{nanos}");
                let secs = seconds
                    .as_i64()
                    .ok_or_else(|| TimeOffsetError::new(&text, "invalid seconds"))?;
                if secs < 0 || !(0..NANOS_PER_SEC as i64).contains(&nanos) {
                    return Err(TimeOffsetError::new(&text, "out of range"));
                }
                (secs as u64)
                    .checked_mul(NANOS_PER_SEC)
                    .and_then(|n| n.checked_add(nanos as u64))
                    .map(TimeOffset::from_nanos)
                    .ok_or_else(|| TimeOffsetError::new(&text, "offset overflows"))
            }
        }
    }
}
