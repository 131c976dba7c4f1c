use chrono::{DateTime, Duration, Utc};

use super::TimeRangeError;

/// A time range with optional, inclusive bounds.
///
/// A missing bound leaves that side of the range open, so
/// [`TimeRange::all`] matches every timestamp. The bounds are only set
/// through the constructors, so `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Creates a new time range, validating that start <= end when both are set.
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, TimeRangeError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(TimeRangeError::InvalidRange);
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an unbounded range.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a range covering everything at or after `start`.
    pub fn since(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Creates a range covering everything at or before `end`.
    pub fn until(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Creates a range covering the `duration` leading up to `now`.
    ///
    /// A negative duration counts by its magnitude.
    pub fn last(duration: Duration, now: DateTime<Utc>) -> Self {
        Self {
            start: Some(now - duration.abs()),
            end: Some(now),
        }
    }

    /// Inclusive lower bound, if any.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    /// Inclusive upper bound, if any.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Returns true if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns true if `at` falls inside the range.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.is_none_or(|start| at >= start) && self.end.is_none_or(|end| at <= end)
    }
}
