//! Half-open time intervals used for appointment slots and schedule windows.
//!
//! A [`TimeRange`] always satisfies `start < end`. Ranges are values: every
//! "change" produces a new, re-validated range.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// An immutable `[start, end)` interval.
///
/// Two ranges that merely touch (`a.end == b.start`) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = CoreError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Build a range, rejecting empty or inverted intervals.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidArgument {
                name: "time_range",
                reason: format!("start ({start}) must be before end ({end})"),
            });
        }
        Ok(Self { start, end })
    }

    /// Build a range of `minutes` length beginning at `start`.
    pub fn from_duration(start: Timestamp, minutes: i64) -> Result<Self, CoreError> {
        Self::new(start, offset(start, TimeDelta::try_minutes(minutes))?)
    }

    /// The 24-hour window beginning at `start`.
    pub fn one_day(start: Timestamp) -> Result<Self, CoreError> {
        Self::new(start, offset(start, TimeDelta::try_days(1))?)
    }

    /// The 7-day window beginning at `start`.
    pub fn one_week(start: Timestamp) -> Result<Self, CoreError> {
        Self::new(start, offset(start, TimeDelta::try_days(7))?)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// `true` iff the two intervals share at least one instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `true` iff `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn new_start(&self, start: Timestamp) -> Result<Self, CoreError> {
        Self::new(start, self.end)
    }

    pub fn new_end(&self, end: Timestamp) -> Result<Self, CoreError> {
        Self::new(self.start, end)
    }

    /// Keep the start, resize to `minutes`.
    pub fn new_duration(&self, minutes: i64) -> Result<Self, CoreError> {
        Self::from_duration(self.start, minutes)
    }
}

/// `start + delta`, or `InvalidArgument` when either step leaves chrono's range.
fn offset(start: Timestamp, delta: Option<TimeDelta>) -> Result<Timestamp, CoreError> {
    delta
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| CoreError::InvalidArgument {
            name: "time_range",
            reason: format!("end of range starting at {start} is out of bounds"),
        })
}
