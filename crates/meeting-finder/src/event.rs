//! Calendar events and meeting requests.
//!
//! Both are immutable value types. Attendees are held in ordered sets, so duplicate
//! identifiers collapse and serialized output is deterministic.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::time_range::TimeRange;

/// Opaque identifier of a person invited to an event or meeting.
pub type Attendee = String;

/// A fixed calendar entry: when it happens and who attends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    title: String,
    when: TimeRange,
    #[serde(default)]
    attendees: BTreeSet<Attendee>,
}

impl Event {
    pub fn new<I, S>(title: impl Into<String>, when: TimeRange, attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Attendee>,
    {
        Self {
            title: title.into(),
            when,
            attendees: attendees.into_iter().map(Into::into).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn when(&self) -> TimeRange {
        self.when
    }

    pub fn attendees(&self) -> &BTreeSet<Attendee> {
        &self.attendees
    }

    /// Shorthand for [`is_relevant`] on this event.
    pub fn is_relevant(&self, attendees: &BTreeSet<Attendee>) -> bool {
        is_relevant(self, attendees)
    }
}

/// True iff the event shares at least one attendee with `attendees`.
///
/// Only relevant events constrain the search for a given attendee population.
pub fn is_relevant(event: &Event, attendees: &BTreeSet<Attendee>) -> bool {
    let (smaller, larger) = if event.attendees.len() <= attendees.len() {
        (&event.attendees, attendees)
    } else {
        (attendees, &event.attendees)
    };
    smaller.iter().any(|a| larger.contains(a))
}

/// A request to find room for a meeting of `duration` minutes.
///
/// Required and optional attendees are expected to be disjoint; this is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    #[serde(rename = "attendees", alias = "required_attendees", default)]
    required_attendees: BTreeSet<Attendee>,
    #[serde(default)]
    optional_attendees: BTreeSet<Attendee>,
    #[serde(alias = "duration_minutes")]
    duration: i64,
}

impl MeetingRequest {
    pub fn new<I, S>(required_attendees: I, duration_minutes: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Attendee>,
    {
        Self {
            required_attendees: required_attendees.into_iter().map(Into::into).collect(),
            optional_attendees: BTreeSet::new(),
            duration: duration_minutes,
        }
    }

    /// Return this request with `optional_attendees` added.
    pub fn with_optional_attendees<I, S>(mut self, optional_attendees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Attendee>,
    {
        self.optional_attendees
            .extend(optional_attendees.into_iter().map(Into::into));
        self
    }

    pub fn required_attendees(&self) -> &BTreeSet<Attendee> {
        &self.required_attendees
    }

    pub fn optional_attendees(&self) -> &BTreeSet<Attendee> {
        &self.optional_attendees
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration
    }

    /// Required and optional attendees together.
    pub fn all_attendees(&self) -> BTreeSet<Attendee> {
        self.required_attendees
            .union(&self.optional_attendees)
            .cloned()
            .collect()
    }
}
