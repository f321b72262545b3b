//! Tests for busy-period merging and gap extraction.

use std::collections::BTreeSet;

use meeting_finder::{busy_periods, free_gaps, Attendee, Event, FinderConfig, FreeSlotFinder, TimeRange};

fn range(start: i32, end: i32) -> TimeRange {
    TimeRange::from_start_end(start, end, false).unwrap()
}

fn event(start: i32, end: i32, attendees: &[&str]) -> Event {
    Event::new("", range(start, end), attendees.iter().copied())
}

fn set(names: &[&str]) -> BTreeSet<Attendee> {
    names.iter().map(|n| n.to_string()).collect()
}

#[test]
fn overlapping_and_adjacent_events_merge() {
    let events = vec![
        event(600, 660, &["alice"]),
        event(540, 610, &["alice"]),
        event(660, 700, &["bob"]),
        event(800, 860, &["alice"]),
    ];

    let busy = busy_periods(&events, &set(&["alice", "bob"]));

    assert_eq!(busy, vec![range(540, 700), range(800, 860)]);
}

#[test]
fn irrelevant_events_are_not_busy() {
    let events = vec![event(540, 600, &["carol"])];

    assert!(busy_periods(&events, &set(&["alice"])).is_empty());
    assert_eq!(free_gaps(&events, &set(&["alice"]), 0), vec![TimeRange::WHOLE_DAY]);
}

#[test]
fn empty_events_block_nothing() {
    let events = vec![event(600, 600, &["alice"])];

    assert!(busy_periods(&events, &set(&["alice"])).is_empty());
}

#[test]
fn gaps_shorter_than_minimum_are_dropped() {
    let events = vec![event(540, 600, &["alice"]), event(620, 1440, &["alice"])];

    assert_eq!(
        free_gaps(&events, &set(&["alice"]), 15),
        vec![range(0, 540), range(600, 620)]
    );
    assert_eq!(
        free_gaps(&events, &set(&["alice"]), 30),
        vec![range(0, 540)]
    );
}

#[test]
fn event_at_start_of_day_leaves_no_leading_gap() {
    let events = vec![event(0, 60, &["alice"])];

    assert_eq!(
        free_gaps(&events, &set(&["alice"]), 1),
        vec![range(60, 1440)]
    );
}

#[test]
fn grid_busy_periods_are_slot_aligned() {
    let finder = FreeSlotFinder::new(FinderConfig {
        granularity_minutes: 15,
    })
    .unwrap();
    let events = vec![event(545, 552, &["alice"]), event(601, 616, &["alice"])];

    let busy = finder.busy_periods(&events, &set(&["alice"]));

    assert_eq!(busy, vec![range(540, 555), range(600, 630)]);
}

#[test]
fn grid_clamps_to_end_of_day() {
    let finder = FreeSlotFinder::new(FinderConfig::half_hour_grid()).unwrap();
    let events = vec![event(1425, 1440, &["alice"])];

    let busy = finder.busy_periods(&events, &set(&["alice"]));

    assert_eq!(busy, vec![range(1410, 1440)]);
    assert_eq!(
        finder.free_gaps(&events, &set(&["alice"]), 30),
        vec![range(0, 1410)]
    );
}
