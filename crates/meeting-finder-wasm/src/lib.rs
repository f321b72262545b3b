//! WASM bindings for meeting-finder.
//!
//! Exposes the meeting slot search and busy-period merging to JavaScript via
//! `wasm-bindgen`. All complex types cross the boundary as JSON strings in the same
//! wire form the `meeting-finder` types use with serde.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p meeting-finder-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/meeting-finder-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/meeting_finder_wasm.wasm
//! ```

use std::collections::BTreeSet;

use meeting_finder::{
    conflicting_attendees, Attendee, Coverage, Event, FinderConfig, FreeSlotFinder,
    MeetingRequest, TimeRange,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    #[serde(flatten)]
    when: TimeRange,
    label: String,
    missing_optional: BTreeSet<Attendee>,
}

#[derive(Serialize)]
struct MeetingTimesDto {
    coverage: Coverage,
    slots: Vec<SlotDto>,
}

// ---------------------------------------------------------------------------
// JSON-level implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn finder_for(granularity: Option<u32>) -> Result<FreeSlotFinder, String> {
    let config = FinderConfig {
        granularity_minutes: granularity.unwrap_or(1),
    };
    FreeSlotFinder::new(config).map_err(|e| e.to_string())
}

fn parse_events_json(json: &str) -> Result<Vec<Event>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn find_meeting_times_json(
    events_json: &str,
    request_json: &str,
    granularity: Option<u32>,
) -> Result<String, String> {
    let finder = finder_for(granularity)?;
    let events = parse_events_json(events_json)?;
    let request: MeetingRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid request JSON: {}", e))?;

    let availability = finder.query_with_coverage(&events, &request);
    let slots = availability
        .slots
        .into_iter()
        .map(|when| SlotDto {
            when,
            label: when.to_string(),
            missing_optional: conflicting_attendees(&events, when, request.optional_attendees()),
        })
        .collect();

    let dto = MeetingTimesDto {
        coverage: availability.coverage,
        slots,
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

fn busy_periods_json(
    events_json: &str,
    attendees_json: &str,
    granularity: Option<u32>,
) -> Result<String, String> {
    let finder = finder_for(granularity)?;
    let events = parse_events_json(events_json)?;
    let attendees: BTreeSet<Attendee> = serde_json::from_str(attendees_json)
        .map_err(|e| format!("Invalid attendees JSON: {}", e))?;

    let busy = finder.busy_periods(&events, &attendees);
    serde_json::to_string(&busy).map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find the slots where a meeting fits.
///
/// `events_json` is a JSON array of `{title, when: {start, end}, attendees}` objects
/// and `request_json` a `{attendees, optional_attendees, duration}` object. Returns a
/// JSON string `{coverage, slots: [{start, end, duration, label, missing_optional}]}`.
///
/// # Arguments
/// - `granularity` -- Optional occupancy grid size in minutes (defaults to 1)
#[wasm_bindgen(js_name = "findMeetingTimes")]
pub fn find_meeting_times(
    events_json: &str,
    request_json: &str,
    granularity: Option<u32>,
) -> Result<String, JsValue> {
    find_meeting_times_json(events_json, request_json, granularity)
        .map_err(|e| JsValue::from_str(&e))
}

/// Merged busy periods for a JSON array of attendee ids.
///
/// Returns a JSON string containing an array of `{start, end, duration}` objects.
#[wasm_bindgen(js_name = "busyPeriods")]
pub fn busy_periods(
    events_json: &str,
    attendees_json: &str,
    granularity: Option<u32>,
) -> Result<String, JsValue> {
    busy_periods_json(events_json, attendees_json, granularity).map_err(|e| JsValue::from_str(&e))
}
