//! Property-based tests for the meeting slot finder using proptest.
//!
//! These check invariants that should hold for *any* calendar and request, and
//! compare minute-resolution results against a brute-force occupancy scan.

use std::collections::BTreeSet;

use meeting_finder::time_range::MINUTES_PER_DAY;
use meeting_finder::{
    Attendee, Coverage, Event, FinderConfig, FreeSlotFinder, MeetingRequest, TimeRange,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

const PEOPLE: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];

fn arb_people() -> impl Strategy<Value = BTreeSet<Attendee>> {
    proptest::sample::subsequence(PEOPLE.to_vec(), 0..=3)
        .prop_map(|names| names.into_iter().map(String::from).collect())
}

fn arb_range() -> impl Strategy<Value = TimeRange> {
    (0..MINUTES_PER_DAY, 0..=240i32).prop_map(|(start, len)| {
        let end = (start + len).min(MINUTES_PER_DAY);
        TimeRange::from_start_end(start, end, false).unwrap()
    })
}

fn arb_event() -> impl Strategy<Value = Event> {
    (arb_range(), arb_people()).prop_map(|(when, people)| Event::new("event", when, people))
}

fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    proptest::collection::vec(arb_event(), 0..12)
}

fn arb_request() -> impl Strategy<Value = MeetingRequest> {
    (arb_people(), arb_people(), -30i64..=1500).prop_map(|(required, optional, duration)| {
        MeetingRequest::new(required, duration).with_optional_attendees(optional)
    })
}

fn arb_granularity() -> impl Strategy<Value = u32> {
    prop_oneof![Just(1u32), Just(5), Just(15), Just(30), Just(60)]
}

// ---------------------------------------------------------------------------
// Oracle
// ---------------------------------------------------------------------------

/// Free runs of at least `duration` minutes, found by marking every busy minute.
fn brute_force_gaps(
    events: &[Event],
    attendees: &BTreeSet<Attendee>,
    duration: i64,
) -> Vec<TimeRange> {
    let mut busy = vec![false; MINUTES_PER_DAY as usize];
    for event in events.iter().filter(|e| e.is_relevant(attendees)) {
        let when = event.when();
        for minute in when.start()..when.end() {
            busy[minute as usize] = true;
        }
    }

    let mut gaps = Vec::new();
    let mut run_start: Option<i32> = None;
    for minute in 0..=MINUTES_PER_DAY {
        let occupied = minute == MINUTES_PER_DAY || busy[minute as usize];
        match (occupied, run_start) {
            (true, Some(start)) => {
                if i64::from(minute - start) >= duration {
                    gaps.push(TimeRange::from_start_end(start, minute, false).unwrap());
                }
                run_start = None;
            }
            (false, None) => run_start = Some(minute),
            _ => {}
        }
    }
    gaps
}

fn relevant_to(events: &[Event], attendees: &BTreeSet<Attendee>) -> Vec<TimeRange> {
    events
        .iter()
        .filter(|e| e.is_relevant(attendees))
        .map(Event::when)
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn slots_are_sorted_disjoint_and_long_enough(
        events in arb_events(),
        request in arb_request(),
        granularity in arb_granularity(),
    ) {
        let finder = FreeSlotFinder::new(FinderConfig { granularity_minutes: granularity }).unwrap();
        let slots = finder.query(&events, &request);

        for pair in slots.windows(2) {
            prop_assert!(pair[0].end() < pair[1].start(), "{} then {}", pair[0], pair[1]);
        }
        if request.duration_minutes() > 0 {
            for slot in &slots {
                prop_assert!(i64::from(slot.duration()) >= request.duration_minutes());
            }
        }
    }

    #[test]
    fn duration_bounds_short_circuit(
        events in arb_events(),
        request in arb_request(),
    ) {
        let slots = FreeSlotFinder::default().query(&events, &request);
        let duration = request.duration_minutes();
        if duration > i64::from(MINUTES_PER_DAY) {
            prop_assert!(slots.is_empty());
        }
        if duration <= 0 {
            prop_assert_eq!(slots, vec![TimeRange::WHOLE_DAY]);
        }
    }

    #[test]
    fn slots_avoid_every_event_of_the_covered_population(
        events in arb_events(),
        request in arb_request(),
        granularity in arb_granularity(),
    ) {
        prop_assume!(request.duration_minutes() > 0);
        let finder = FreeSlotFinder::new(FinderConfig { granularity_minutes: granularity }).unwrap();
        let result = finder.query_with_coverage(&events, &request);

        let population = match result.coverage {
            Coverage::AllAttendees => request.all_attendees(),
            Coverage::RequiredOnly => request.required_attendees().clone(),
            Coverage::Unavailable => {
                prop_assert!(result.slots.is_empty());
                return Ok(());
            }
        };
        for slot in &result.slots {
            for busy in relevant_to(&events, &population) {
                prop_assert!(!slot.overlaps(&busy), "{} overlaps {}", slot, busy);
            }
        }
    }

    #[test]
    fn grid_slots_are_aligned(
        events in arb_events(),
        request in arb_request(),
        granularity in arb_granularity(),
    ) {
        prop_assume!(request.duration_minutes() > 0);
        let finder = FreeSlotFinder::new(FinderConfig { granularity_minutes: granularity }).unwrap();
        let g = granularity as i32;
        for slot in finder.query(&events, &request) {
            prop_assert_eq!(slot.start() % g, 0);
            prop_assert_eq!(slot.end() % g, 0);
        }
    }

    #[test]
    fn minute_resolution_matches_brute_force(
        events in arb_events(),
        request in arb_request(),
    ) {
        prop_assume!(request.duration_minutes() > 0);
        prop_assume!(request.duration_minutes() <= i64::from(MINUTES_PER_DAY));
        let duration = request.duration_minutes();

        let everyone = brute_force_gaps(&events, &request.all_attendees(), duration);
        let expected = if everyone.is_empty() {
            brute_force_gaps(&events, request.required_attendees(), duration)
        } else {
            everyone
        };

        prop_assert_eq!(FreeSlotFinder::default().query(&events, &request), expected);
    }

    #[test]
    fn query_is_idempotent(
        events in arb_events(),
        request in arb_request(),
        granularity in arb_granularity(),
    ) {
        let finder = FreeSlotFinder::new(FinderConfig { granularity_minutes: granularity }).unwrap();
        prop_assert_eq!(finder.query(&events, &request), finder.query(&events, &request));
    }

    #[test]
    fn calendar_without_relevant_events_is_whole_day(
        events in arb_events(),
        duration in 1i64..=1440,
    ) {
        let request = MeetingRequest::new(["zoe"], duration).with_optional_attendees(["yann"]);
        prop_assert_eq!(
            FreeSlotFinder::default().query(&events, &request),
            vec![TimeRange::WHOLE_DAY]
        );
    }
}
