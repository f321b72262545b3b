//! The free-slot finder.
//!
//! [`FreeSlotFinder::query`] runs the gap search twice: first treating required and
//! optional attendees alike, then required attendees only. The first pass wins
//! whenever it finds anything. Otherwise the required-only result is returned, in
//! which optional attendees may have conflicts.
//!
//! Durations outside the day short-circuit: a meeting longer than a day never fits,
//! and a meeting of zero (or negative) length fits the whole day.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FinderError, Result};
use crate::event::{Attendee, Event, MeetingRequest};
use crate::freebusy;
use crate::time_range::{TimeRange, MINUTES_PER_DAY};

/// Tuning for a [`FreeSlotFinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Size of the occupancy grid in minutes. Must evenly divide 1440.
    ///
    /// `1` gives exact minute-resolution results. Coarser grids round every busy
    /// event outward to slot boundaries, so all returned ranges are slot aligned.
    pub granularity_minutes: u32,
}

impl FinderConfig {
    /// The half-hour grid: 48 slots per day.
    pub fn half_hour_grid() -> Self {
        Self {
            granularity_minutes: 30,
        }
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: 1,
        }
    }
}

/// Which attendee population the returned slots are free for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    /// Every required and optional attendee is free.
    AllAttendees,
    /// Required attendees are free; some optional attendees are not.
    RequiredOnly,
    /// No slot works even for the required attendees.
    Unavailable,
}

/// Slots found for a request, with the population they satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub slots: Vec<TimeRange>,
    pub coverage: Coverage,
}

/// Finds meeting slots within a single day.
///
/// Holds only configuration; every query is independent, so one finder can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeSlotFinder {
    granularity: i32,
}

impl Default for FreeSlotFinder {
    fn default() -> Self {
        Self { granularity: 1 }
    }
}

impl FreeSlotFinder {
    /// Build a finder from `config`.
    ///
    /// # Errors
    /// Returns `FinderError::InvalidGranularity` if the granularity is zero or does
    /// not evenly divide a day.
    pub fn new(config: FinderConfig) -> Result<Self> {
        let granularity = config.granularity_minutes;
        if granularity == 0 || MINUTES_PER_DAY as u32 % granularity != 0 {
            return Err(FinderError::InvalidGranularity(granularity));
        }
        Ok(Self {
            granularity: granularity as i32,
        })
    }

    pub fn granularity_minutes(&self) -> u32 {
        self.granularity as u32
    }

    /// Ranges during which the requested meeting can take place, sorted by start.
    ///
    /// Never fails: every well-formed input has a defined, possibly empty, answer.
    pub fn query(&self, events: &[Event], request: &MeetingRequest) -> Vec<TimeRange> {
        self.query_with_coverage(events, request).slots
    }

    /// Like [`query`](Self::query), but also reports which pass produced the slots.
    pub fn query_with_coverage(&self, events: &[Event], request: &MeetingRequest) -> Availability {
        let duration = request.duration_minutes();
        debug!(
            events = events.len(),
            duration,
            required = request.required_attendees().len(),
            optional = request.optional_attendees().len(),
            "finding meeting slots"
        );

        if duration > i64::from(MINUTES_PER_DAY) {
            debug!(duration, "meeting is longer than a day");
            return Availability {
                slots: Vec::new(),
                coverage: Coverage::Unavailable,
            };
        }
        if duration <= 0 {
            return Availability {
                slots: vec![TimeRange::WHOLE_DAY],
                coverage: Coverage::AllAttendees,
            };
        }

        let everyone = request.all_attendees();
        let slots = self.free_gaps(events, &everyone, duration);
        if !slots.is_empty() {
            debug!(slots = slots.len(), "found slots for all attendees");
            return Availability {
                slots,
                coverage: Coverage::AllAttendees,
            };
        }

        // Without optional attendees the second pass would search the same set.
        if request.optional_attendees().is_empty() {
            return Availability {
                slots,
                coverage: Coverage::Unavailable,
            };
        }

        let slots = self.free_gaps(events, request.required_attendees(), duration);
        let coverage = if slots.is_empty() {
            Coverage::Unavailable
        } else {
            Coverage::RequiredOnly
        };
        debug!(slots = slots.len(), ?coverage, "fell back to required attendees");
        Availability { slots, coverage }
    }

    /// Merged busy periods of `attendees` on this finder's grid.
    pub fn busy_periods(&self, events: &[Event], attendees: &BTreeSet<Attendee>) -> Vec<TimeRange> {
        freebusy::busy_periods_on_grid(events, attendees, self.granularity)
    }

    /// Free gaps of at least `min_duration` minutes for `attendees` on this finder's
    /// grid.
    pub fn free_gaps(
        &self,
        events: &[Event],
        attendees: &BTreeSet<Attendee>,
        min_duration: i64,
    ) -> Vec<TimeRange> {
        freebusy::free_gaps_on_grid(events, attendees, self.granularity, min_duration)
    }
}

/// Find meeting slots with the default, minute-resolution finder.
pub fn query(events: &[Event], request: &MeetingRequest) -> Vec<TimeRange> {
    FreeSlotFinder::default().query(events, request)
}
