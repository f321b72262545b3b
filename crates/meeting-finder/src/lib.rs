//! # meeting-finder
//!
//! Find the time ranges within a single day when a meeting can take place.
//!
//! Given a fixed list of calendar [`Event`]s and a [`MeetingRequest`], the finder
//! returns every free span long enough for the meeting. Spans that also keep the
//! optional attendees free are preferred; when there are none, the finder falls
//! back to spans that only keep the required attendees free.
//!
//! ```rust
//! use meeting_finder::{query, Event, MeetingRequest, TimeRange};
//!
//! let events = vec![Event::new(
//!     "Standup",
//!     TimeRange::from_start_end(540, 600, false).unwrap(),
//!     ["alice"],
//! )];
//! let request = MeetingRequest::new(["alice"], 30);
//!
//! let slots = query(&events, &request);
//! assert_eq!(slots.len(), 2);
//! assert_eq!(slots[0].to_string(), "00:00-09:00");
//! assert_eq!(slots[1].to_string(), "10:00-24:00");
//! ```
//!
//! ## Modules
//!
//! - [`time_range`] — `TimeRange` minute-of-day intervals and clock parsing
//! - [`event`] — `Event` and `MeetingRequest` value types
//! - [`freebusy`] — Busy-period merging and gap extraction for one attendee set
//! - [`finder`] — The two-pass `FreeSlotFinder`
//! - [`conflict`] — Which attendees are busy during a given range
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod event;
pub mod finder;
pub mod freebusy;
pub mod time_range;

pub use conflict::{conflicting_attendees, find_conflicts, Conflict};
pub use error::FinderError;
pub use event::{Attendee, Event, MeetingRequest};
pub use finder::{query, Availability, Coverage, FinderConfig, FreeSlotFinder};
pub use freebusy::{busy_periods, free_gaps};
pub use time_range::TimeRange;
