//! Schedule text export.
//!
//! Two layouts are produced from a schedule and its subjects:
//!
//! - **Detailed**: a header with a generation timestamp, then one underlined
//!   section per day with one block per slot (time, room, teacher, notes).
//! - **Inline**: one line per day listing `Subject (start, room)` entries.
//!
//! Both layouts skip slots without a subject, or whose subject id resolves to
//! nothing, list days Monday→Sunday, and order slots within a day by start time.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};

use crate::clock::ClockTime;
use crate::model::{find_subject, Day, ScheduleTable, Subject, TimeSlot};
use crate::options::{ExportFormatOptions, TimeFormat};

/// Format of the `Generated:` header line, e.g. `3/14/2026, 9:05:00 AM`.
const GENERATED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Placeholder used by the inline layout when a slot has no room.
const NO_ROOM: &str = "No Room";

/// A slot paired with the subject it renders as.
type Entry<'a> = (&'a TimeSlot, &'a Subject);

/// Render the detailed layout, stamping the header with `generated_at`.
///
/// Identical inputs always produce identical output; the only varying line is
/// the `Generated:` header, which is fully determined by `generated_at`.
pub fn generate_detailed_text(
    schedule: &ScheduleTable,
    subjects: &[Subject],
    options: &ExportFormatOptions,
    generated_at: NaiveDateTime,
) -> String {
    let line = options.spacing.line_suffix();
    let section = options.spacing.section_suffix();

    let mut out = String::new();
    out.push_str(&format!("Schedule: {}\n", schedule.name));
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format(GENERATED_FORMAT)
    ));
    out.push_str(section);

    for (day, entries) in entries_by_day(schedule, subjects) {
        out.push_str(&format!("{}\n", day));
        out.push_str(&"=".repeat(day.name().len()));
        out.push('\n');

        for (slot, subject) in entries {
            out.push_str(&subject.name);
            if options.include_stub_code {
                out.push_str(&format!(" ({})", subject.stub_code));
            }
            push_line_end(&mut out, line);

            out.push_str(&format!(
                "  Time: {}",
                format_time_range(slot.start_time, slot.end_time, options.time_format)
            ));
            push_line_end(&mut out, line);

            if let Some(room) = present(&slot.room).filter(|_| options.include_room) {
                out.push_str(&format!("  Room: {}", room));
                push_line_end(&mut out, line);
            }
            if let Some(teacher) = present(&slot.teacher).filter(|_| options.include_teacher) {
                out.push_str(&format!("  Teacher: {}", teacher));
                push_line_end(&mut out, line);
            }
            if let Some(notes) = present(&slot.notes).filter(|_| options.include_notes) {
                out.push_str(&format!("  Notes: {}", notes));
                push_line_end(&mut out, line);
            }

            out.push('\n');
        }

        out.push_str(section);
    }

    out.trim().to_string()
}

/// [`generate_detailed_text`] stamped with the current local time.
pub fn generate_detailed_text_now(
    schedule: &ScheduleTable,
    subjects: &[Subject],
    options: &ExportFormatOptions,
) -> String {
    generate_detailed_text(schedule, subjects, options, Local::now().naive_local())
}

/// Render the terse inline layout:
///
/// ```text
/// First Sem
///
/// Monday: Math (9:00 AM, R101), Physics (9:30 AM, No Room)
/// ```
///
/// Only the subject name, 12-hour start time and room appear.
pub fn generate_inline_text(schedule: &ScheduleTable, subjects: &[Subject]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", schedule.name));

    for (day, entries) in entries_by_day(schedule, subjects) {
        let rendered: Vec<String> = entries
            .iter()
            .map(|(slot, subject)| {
                format!(
                    "{} ({}, {})",
                    subject.name,
                    slot.start_time.format_12h(),
                    present(&slot.room).unwrap_or(NO_ROOM)
                )
            })
            .collect();
        out.push_str(&format!("{}: {}\n", day, rendered.join(", ")));
    }

    out.trim().to_string()
}

/// `"9:00 AM - 10:30 AM"` or `"09:00 - 10:30"`.
pub fn format_time_range(start: ClockTime, end: ClockTime, format: TimeFormat) -> String {
    match format {
        TimeFormat::TwelveHour => format!("{} - {}", start.format_12h(), end.format_12h()),
        TimeFormat::TwentyFourHour => format!("{} - {}", start.format_24h(), end.format_24h()),
    }
}

/// Download name for an exported schedule: whitespace runs become a single
/// hyphen, the result is lower-cased, and `-schedule.txt` is appended.
///
/// `"First Sem"` → `"first-sem-schedule.txt"`.
pub fn export_filename(schedule_name: &str) -> String {
    let mut stem = String::with_capacity(schedule_name.len());
    let mut in_whitespace = false;
    for c in schedule_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                stem.push('-');
            }
            in_whitespace = true;
        } else {
            stem.push(c);
            in_whitespace = false;
        }
    }
    format!("{}-schedule.txt", stem.to_lowercase())
}

/// Group renderable slots by day in canonical order, each day sorted by start.
///
/// A slot is renderable when its subject id is set and resolves to a subject.
/// Days without renderable slots are left out. The sort is stable, so slots
/// sharing a start time keep their insertion order.
fn entries_by_day<'a>(
    schedule: &'a ScheduleTable,
    subjects: &'a [Subject],
) -> BTreeMap<Day, Vec<Entry<'a>>> {
    let mut by_day: BTreeMap<Day, Vec<Entry<'a>>> = BTreeMap::new();

    for slot in &schedule.slots {
        let Some(subject_id) = present(&slot.subject_id) else {
            continue;
        };
        let Some(subject) = find_subject(subjects, subject_id) else {
            continue;
        };
        by_day.entry(slot.day).or_default().push((slot, subject));
    }

    for entries in by_day.values_mut() {
        entries.sort_by_key(|(slot, _)| slot.start_time);
    }

    by_day
}

fn push_line_end(out: &mut String, line_suffix: &str) {
    out.push_str(line_suffix);
    out.push('\n');
}

/// Treat empty strings like absent values.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
