//! Detect which events and attendees collide with a candidate range.
//!
//! A range conflicts with an event when they share at least one minute. Adjacent
//! ranges (where one ends exactly when the other starts) are NOT conflicts.

use std::collections::BTreeSet;

use crate::event::{Attendee, Event};
use crate::time_range::TimeRange;

/// An event that overlaps a candidate range.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict<'a> {
    pub event: &'a Event,
    /// The minutes shared by the event and the candidate range.
    pub overlap: TimeRange,
}

impl Conflict<'_> {
    pub fn overlap_minutes(&self) -> i32 {
        self.overlap.duration()
    }
}

/// Find every event attended by someone in `attendees` that overlaps `range`.
///
/// Conflicts are returned in input order.
pub fn find_conflicts<'a>(
    events: &'a [Event],
    range: TimeRange,
    attendees: &BTreeSet<Attendee>,
) -> Vec<Conflict<'a>> {
    events
        .iter()
        .filter(|event| event.is_relevant(attendees))
        .filter_map(|event| {
            event
                .when()
                .intersection(&range)
                .map(|overlap| Conflict { event, overlap })
        })
        .collect()
}

/// The members of `attendees` who have an event overlapping `range`.
pub fn conflicting_attendees(
    events: &[Event],
    range: TimeRange,
    attendees: &BTreeSet<Attendee>,
) -> BTreeSet<Attendee> {
    find_conflicts(events, range, attendees)
        .into_iter()
        .flat_map(|conflict| conflict.event.attendees().intersection(attendees))
        .cloned()
        .collect()
}
