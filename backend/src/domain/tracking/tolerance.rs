//! Window within which two checkpoints count as the same event.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use super::TrackingValidationError;

/// Default duplicate window in milliseconds.
pub const DEFAULT_DUPLICATE_TOLERANCE_MS: u64 = 1_000;

/// Duplicate detection window.
///
/// Timestamps match when their absolute difference is strictly less than the
/// window; a difference equal to the window does not match.
///
/// # Examples
/// ```
/// use chrono::{TimeDelta, Utc};
/// use tracking::domain::DuplicateTolerance;
///
/// let tolerance = DuplicateTolerance::default();
/// let now = Utc::now();
/// assert!(tolerance.covers(now, now + TimeDelta::milliseconds(999)));
/// assert!(!tolerance.covers(now, now + TimeDelta::milliseconds(1_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateTolerance {
    window: TimeDelta,
}

impl DuplicateTolerance {
    /// Build a window of `millis` milliseconds. Zero is rejected because it
    /// would disable deduplication entirely.
    pub fn from_millis(millis: u64) -> Result<Self, TrackingValidationError> {
        i64::try_from(millis)
            .ok()
            .filter(|value| *value > 0)
            .and_then(TimeDelta::try_milliseconds)
            .map(|window| Self { window })
            .ok_or(TrackingValidationError::InvalidTolerance { millis })
    }

    /// Window length in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        u64::try_from(self.window.num_milliseconds()).unwrap_or_default()
    }

    /// Whether `a` and `b` fall within the window of each other.
    #[must_use]
    pub fn covers(self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        (a - b).abs() < self.window
    }
}

impl Default for DuplicateTolerance {
    fn default() -> Self {
        Self {
            window: TimeDelta::milliseconds(1_000),
        }
    }
}

impl fmt::Display for DuplicateTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}
