//! Minute-of-day time ranges.
//!
//! A [`TimeRange`] is a half-open interval `[start, end)` measured in minutes since
//! midnight. Both constructors normalize to this exclusive-end form, so a range built
//! with an inclusive end compares equal to its exclusive twin.
//!
//! Ranges are validated on construction: once a `TimeRange` exists it lies within
//! the day and never ends before it starts.

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// First minute of the day.
pub const START_OF_DAY: i32 = 0;

/// Last minute of the day (inclusive).
pub const END_OF_DAY: i32 = MINUTES_PER_DAY - 1;

/// A validated `[start, end)` span of minutes within a single day.
///
/// Ordered by start, then by duration. Equality is value equality on the normalized
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TimeRangeRecord", into = "TimeRangeRecord")]
pub struct TimeRange {
    start: i32,
    end: i32,
}

impl TimeRange {
    /// The whole day, `00:00-24:00`.
    pub const WHOLE_DAY: TimeRange = TimeRange {
        start: START_OF_DAY,
        end: MINUTES_PER_DAY,
    };

    /// Build a range from a start minute and a length in minutes.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidRange` if the duration is negative or the range
    /// does not fit within the day.
    pub fn from_start_duration(start: i32, duration: i32) -> Result<Self> {
        let end = start
            .checked_add(duration)
            .ok_or(FinderError::InvalidRange { start, end: i32::MAX })?;
        Self::from_start_end(start, end, false)
    }

    /// Build a range from a start minute and an end minute.
    ///
    /// With `inclusive_end`, `end` is the last occupied minute and the stored end
    /// becomes `end + 1`; otherwise `end` is already exclusive.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidRange` if `end < start` or the range does not fit
    /// within the day.
    pub fn from_start_end(start: i32, end: i32, inclusive_end: bool) -> Result<Self> {
        if end < start {
            return Err(FinderError::InvalidRange { start, end });
        }
        let exclusive_end = if inclusive_end {
            end.saturating_add(1)
        } else {
            end
        };
        if start < START_OF_DAY || exclusive_end > MINUTES_PER_DAY {
            return Err(FinderError::InvalidRange { start, end });
        }
        Ok(Self {
            start,
            end: exclusive_end,
        })
    }

    /// Build a range from bounds the caller already knows to be valid.
    pub(crate) const fn from_bounds(start: i32, end: i32) -> Self {
        debug_assert!(START_OF_DAY <= start && start <= end && end <= MINUTES_PER_DAY);
        Self { start, end }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    /// The exclusive end minute.
    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn duration(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True iff the two ranges share at least one minute.
    ///
    /// Adjacent ranges (one ends exactly where the other starts) do not overlap, and
    /// an empty range overlaps nothing.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// True iff `minute` falls within `[start, end)`.
    pub fn contains(&self, minute: i32) -> bool {
        self.start <= minute && minute < self.end
    }

    /// True iff `other` lies entirely within this range.
    pub fn contains_range(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The minutes shared by both ranges, if any.
    pub fn intersection(&self, other: &TimeRange) -> Option<TimeRange> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::from_bounds(
            self.start.max(other.start),
            self.end.min(other.end),
        ))
    }

    /// Comparator ordering ranges by end, then by start.
    pub fn order_by_end(a: &TimeRange, b: &TimeRange) -> Ordering {
        (a.end, a.start).cmp(&(b.end, b.start))
    }

    /// Parse an `HH:MM` clock time into minutes since midnight.
    ///
    /// `"24:00"` is accepted as the end of the day.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidClockTime` if the string is not a time of day.
    pub fn parse_clock(clock: &str) -> Result<i32> {
        let clock = clock.trim();
        if clock == "24:00" {
            return Ok(MINUTES_PER_DAY);
        }
        let time = NaiveTime::parse_from_str(clock, "%H:%M")
            .map_err(|_| FinderError::InvalidClockTime(clock.to_string()))?;
        Ok((time.hour() * 60 + time.minute()) as i32)
    }
}

impl Ord for TimeRange {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.start, self.duration()).cmp(&(other.start, other.duration()))
    }
}

impl PartialOrd for TimeRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Clock(self.start), Clock(self.end))
    }
}

struct Clock(i32);

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// ---------------------------------------------------------------------------
// Wire form
// ---------------------------------------------------------------------------

/// A minute of the day as it appears on the wire: an integer or an `HH:MM` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MinuteOfDay {
    Minutes(i32),
    Clock(String),
}

impl MinuteOfDay {
    fn resolve(&self) -> Result<i32> {
        match self {
            MinuteOfDay::Minutes(m) => Ok(*m),
            MinuteOfDay::Clock(s) => TimeRange::parse_clock(s),
        }
    }
}

/// Serialized representation of a [`TimeRange`].
///
/// Decoding accepts either `end` or `duration` (or both, if they agree). Encoding
/// always writes `start`, exclusive `end`, and `duration` in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRangeRecord {
    pub start: MinuteOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<MinuteOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inclusive_end: bool,
}

impl TryFrom<TimeRangeRecord> for TimeRange {
    type Error = FinderError;

    fn try_from(record: TimeRangeRecord) -> Result<Self> {
        let start = record.start.resolve()?;
        match (&record.end, record.duration) {
            (Some(end), duration) => {
                let range = Self::from_start_end(start, end.resolve()?, record.inclusive_end)?;
                match duration {
                    Some(d) if d != range.duration() => Err(FinderError::InvalidRange {
                        start,
                        end: start.saturating_add(d),
                    }),
                    _ => Ok(range),
                }
            }
            (None, Some(duration)) => Self::from_start_duration(start, duration),
            (None, None) => Err(FinderError::InvalidRange { start, end: start.saturating_sub(1) }),
        }
    }
}

impl From<TimeRange> for TimeRangeRecord {
    fn from(range: TimeRange) -> Self {
        Self {
            start: MinuteOfDay::Minutes(range.start),
            end: Some(MinuteOfDay::Minutes(range.end)),
            duration: Some(range.duration()),
            inclusive_end: false,
        }
    }
}
