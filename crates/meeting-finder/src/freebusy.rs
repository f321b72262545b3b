//! Compute busy periods and free gaps for one attendee population.
//!
//! Events that share an attendee with the population are snapped outward to the
//! slot grid, sorted, and merged into non-overlapping busy periods. Free gaps are
//! the spans of the day between those periods. On a one-minute grid this is exact
//! interval arithmetic; on a coarser grid an event occupies every slot from the one
//! holding its start through the one holding its last minute.

use std::collections::BTreeSet;

use tracing::trace;

use crate::event::{Attendee, Event};
use crate::time_range::{TimeRange, MINUTES_PER_DAY, START_OF_DAY};

/// Span of the day an event blocks once snapped to the grid.
///
/// Empty events block nothing.
fn occupied_span(when: TimeRange, granularity: i32) -> Option<(i32, i32)> {
    if when.is_empty() {
        return None;
    }
    let start = when.start() / granularity * granularity;
    let end = (when.end() + granularity - 1) / granularity * granularity;
    Some((start, end.min(MINUTES_PER_DAY)))
}

/// Merge the grid spans of all relevant events into sorted, disjoint periods.
///
/// Adjacent periods are joined.
fn merge_busy_periods(
    events: &[Event],
    attendees: &BTreeSet<Attendee>,
    granularity: i32,
) -> Vec<(i32, i32)> {
    let mut intervals: Vec<(i32, i32)> = events
        .iter()
        .filter(|e| e.is_relevant(attendees))
        .filter_map(|e| occupied_span(e.when(), granularity))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_unstable();

    let mut merged: Vec<(i32, i32)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    trace!(periods = merged.len(), granularity, "merged busy periods");
    merged
}

pub(crate) fn busy_periods_on_grid(
    events: &[Event],
    attendees: &BTreeSet<Attendee>,
    granularity: i32,
) -> Vec<TimeRange> {
    merge_busy_periods(events, attendees, granularity)
        .into_iter()
        .map(|(start, end)| TimeRange::from_bounds(start, end))
        .collect()
}

pub(crate) fn free_gaps_on_grid(
    events: &[Event],
    attendees: &BTreeSet<Attendee>,
    granularity: i32,
    min_duration: i64,
) -> Vec<TimeRange> {
    let merged = merge_busy_periods(events, attendees, granularity);

    let mut gaps = Vec::with_capacity(merged.len() + 1);
    let mut cursor = START_OF_DAY;
    for &(busy_start, busy_end) in &merged {
        if cursor < busy_start {
            gaps.push(TimeRange::from_bounds(cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    // Trailing gap after the last busy period.
    if cursor < MINUTES_PER_DAY {
        gaps.push(TimeRange::from_bounds(cursor, MINUTES_PER_DAY));
    }

    gaps.retain(|gap| i64::from(gap.duration()) >= min_duration);
    gaps
}

/// Merged busy periods of `attendees`, sorted by start, at minute resolution.
pub fn busy_periods(events: &[Event], attendees: &BTreeSet<Attendee>) -> Vec<TimeRange> {
    busy_periods_on_grid(events, attendees, 1)
}

/// Free gaps of at least `min_duration` minutes during which none of `attendees`
/// has an event, sorted by start, at minute resolution.
pub fn free_gaps(
    events: &[Event],
    attendees: &BTreeSet<Attendee>,
    min_duration: i64,
) -> Vec<TimeRange> {
    free_gaps_on_grid(events, attendees, 1, min_duration)
}
