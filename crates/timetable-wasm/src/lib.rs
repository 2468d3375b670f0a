//! WASM bindings for timetable-core.
//!
//! Exposes conflict detection and schedule text export to the browser app via
//! `wasm-bindgen`. All records cross the boundary as JSON strings in the same
//! camelCase shape the app keeps in local storage.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p timetable-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/timetable-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/timetable_wasm.wasm
//! ```
//!
//! Each export is a thin wrapper over a `*_json` function that reports errors
//! as `String`, so the JSON bridge can be tested on native targets.

use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use timetable_core::{ExportFormatOptions, ScheduleTable, Subject, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON bridge
// ---------------------------------------------------------------------------

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// `slots_json` is an array of time slots; returns an object mapping each
/// conflicting slot id to `{slotId, conflictsWith}`.
pub fn detect_conflicts_json(slots_json: &str) -> Result<String, String> {
    let slots: Vec<TimeSlot> = parse("slots", slots_json)?;
    to_json(&timetable_core::detect_conflicts(&slots))
}

/// Badge text for one slot, or `None` when it does not conflict.
pub fn conflict_message_json(slots_json: &str, slot_id: &str) -> Result<Option<String>, String> {
    let slots: Vec<TimeSlot> = parse("slots", slots_json)?;
    let conflicts = timetable_core::detect_conflicts(&slots);
    Ok(timetable_core::conflict_message(slot_id, &conflicts))
}

/// Detailed export. `generated_at` is a local `YYYY-MM-DDTHH:MM:SS` timestamp;
/// when absent the current local time is used.
pub fn generate_schedule_text_json(
    schedule_json: &str,
    subjects_json: &str,
    options_json: &str,
    generated_at: Option<&str>,
) -> Result<String, String> {
    let schedule: ScheduleTable = parse("schedule", schedule_json)?;
    let subjects: Vec<Subject> = parse("subjects", subjects_json)?;
    let options = ExportFormatOptions::from_json(options_json).map_err(|e| e.to_string())?;
    let at = match generated_at {
        Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .map_err(|e| format!("Invalid datetime '{}': {}", raw, e))?,
        None => Local::now().naive_local(),
    };
    Ok(timetable_core::generate_detailed_text(
        &schedule, &subjects, &options, at,
    ))
}

pub fn generate_inline_schedule_json(
    schedule_json: &str,
    subjects_json: &str,
) -> Result<String, String> {
    let schedule: ScheduleTable = parse("schedule", schedule_json)?;
    let subjects: Vec<Subject> = parse("subjects", subjects_json)?;
    Ok(timetable_core::generate_inline_text(&schedule, &subjects))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Detect same-day overlaps within one schedule's slots.
///
/// Returns a JSON object keyed by slot id; slots without conflicts are absent.
#[wasm_bindgen(js_name = "detectConflicts")]
pub fn detect_conflicts(slots_json: &str) -> Result<String, JsValue> {
    detect_conflicts_json(slots_json).map_err(js_err)
}

/// "This slot conflicts with N other classes", or `undefined`.
#[wasm_bindgen(js_name = "conflictMessage")]
pub fn conflict_message(slots_json: &str, slot_id: &str) -> Result<Option<String>, JsValue> {
    conflict_message_json(slots_json, slot_id).map_err(js_err)
}

/// Detailed schedule text.
///
/// # Arguments
/// - `schedule_json` -- one schedule table
/// - `subjects_json` -- array of subjects
/// - `options_json` -- export options object; omitted keys use defaults
/// - `generated_at` -- optional local timestamp for the header (`YYYY-MM-DDTHH:MM:SS`)
#[wasm_bindgen(js_name = "generateScheduleText")]
pub fn generate_schedule_text(
    schedule_json: &str,
    subjects_json: &str,
    options_json: &str,
    generated_at: Option<String>,
) -> Result<String, JsValue> {
    generate_schedule_text_json(
        schedule_json,
        subjects_json,
        options_json,
        generated_at.as_deref(),
    )
    .map_err(js_err)
}

/// One line per day: `Monday: Math (9:00 AM, R101), ...`.
#[wasm_bindgen(js_name = "generateInlineSchedule")]
pub fn generate_inline_schedule(schedule_json: &str, subjects_json: &str) -> Result<String, JsValue> {
    generate_inline_schedule_json(schedule_json, subjects_json).map_err(js_err)
}

/// Suggested download name, e.g. `first-sem-schedule.txt`.
#[wasm_bindgen(js_name = "exportFilename")]
pub fn export_filename(schedule_name: &str) -> String {
    timetable_core::export_filename(schedule_name)
}
