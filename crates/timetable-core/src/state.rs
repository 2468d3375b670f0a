//! The application document and its editing operations.
//!
//! [`AppState`] is a plain value. Every edit borrows the current state and
//! returns a new one, or an error with the original left untouched. Writing
//! the result to storage is up to the host (see [`crate::storage`]).
//!
//! Edits apply the checks the editing dialogs enforce: required names, and
//! a slot's start strictly before its end. Conflict detection and text
//! generation rely on these checks and never repeat them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, TimetableError};
use crate::ids::IdGenerator;
use crate::model::{find_subject, Day, ScheduleTable, Subject, SubjectColor, TimeSlot};

/// Document version written on every save.
pub const STATE_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySettings {
    pub font_size: FontSize,
    pub high_contrast: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub accessibility: AccessibilitySettings,
    /// Table opened first; `None` when the user has not picked one.
    pub default_schedule_id: Option<String>,
}

/// Everything the app persists: subjects, schedule tables and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub subjects: Vec<Subject>,
    pub schedule_tables: Vec<ScheduleTable>,
    pub settings: AppSettings,
    pub version: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            subjects: Vec::new(),
            schedule_tables: Vec::new(),
            settings: AppSettings::default(),
            version: STATE_VERSION.to_string(),
        }
    }
}

/// Fields of a subject being created.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewSubject {
    pub name: String,
    pub stub_code: String,
    pub color: SubjectColor,
    pub default_teacher: Option<String>,
    pub default_room: Option<String>,
}

/// Partial subject edit; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub stub_code: Option<String>,
    pub color: Option<SubjectColor>,
    pub default_teacher: Option<Option<String>>,
    pub default_room: Option<Option<String>>,
}

/// Fields of a slot being created.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimeSlot {
    pub day: Day,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub subject_id: Option<String>,
    pub room: Option<String>,
    pub teacher: Option<String>,
    pub notes: Option<String>,
}

impl NewTimeSlot {
    /// An unassigned slot with no room, teacher or notes.
    pub fn new(day: Day, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            day,
            start_time,
            end_time,
            subject_id: None,
            room: None,
            teacher: None,
            notes: None,
        }
    }

    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = Some(teacher.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial slot edit; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSlotUpdate {
    pub day: Option<Day>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
    pub subject_id: Option<Option<String>>,
    pub room: Option<Option<String>>,
    pub teacher: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

/// Partial settings edit; `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsUpdate {
    pub accessibility: Option<AccessibilitySettings>,
    pub default_schedule_id: Option<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        find_subject(&self.subjects, id)
    }

    pub fn schedule(&self, id: &str) -> Option<&ScheduleTable> {
        self.schedule_tables.iter().find(|t| t.id == id)
    }

    /// The table named by `settings.default_schedule_id`, if it still exists.
    pub fn default_schedule(&self) -> Option<&ScheduleTable> {
        self.settings
            .default_schedule_id
            .as_deref()
            .and_then(|id| self.schedule(id))
    }

    // -- subjects -----------------------------------------------------------

    pub fn add_subject(
        &self,
        ids: &mut dyn IdGenerator,
        subject: NewSubject,
    ) -> Result<(AppState, String)> {
        let name = required(&subject.name, "name", "Subject name is required")?;
        let stub_code =
            required(&subject.stub_code, "stubCode", "Subject code is required")?.to_uppercase();

        let id = ids.next_id();
        let subject = Subject {
            id: id.clone(),
            name,
            stub_code,
            color: subject.color,
            default_teacher: optional(subject.default_teacher),
            default_room: optional(subject.default_room),
        };

        tracing::debug!(subject_id = %id, name = %subject.name, "subject added");
        let mut next = self.clone();
        next.subjects.push(subject);
        Ok((next, id))
    }

    pub fn update_subject(&self, id: &str, update: SubjectUpdate) -> Result<AppState> {
        let mut next = self.clone();
        let subject = next
            .subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| TimetableError::not_found("Subject", id))?;

        if let Some(name) = update.name {
            subject.name = required(&name, "name", "Subject name is required")?;
        }
        if let Some(stub_code) = update.stub_code {
            subject.stub_code =
                required(&stub_code, "stubCode", "Subject code is required")?.to_uppercase();
        }
        if let Some(color) = update.color {
            subject.color = color;
        }
        if let Some(teacher) = update.default_teacher {
            subject.default_teacher = optional(teacher);
        }
        if let Some(room) = update.default_room {
            subject.default_room = optional(room);
        }

        tracing::debug!(subject_id = %id, "subject updated");
        Ok(next)
    }

    /// Remove a subject and unassign every slot that referenced it.
    pub fn delete_subject(&self, id: &str) -> Result<AppState> {
        if self.subject(id).is_none() {
            return Err(TimetableError::not_found("Subject", id));
        }

        let mut next = self.clone();
        next.subjects.retain(|s| s.id != id);
        let mut unassigned = 0usize;
        for table in &mut next.schedule_tables {
            for slot in &mut table.slots {
                if slot.subject_id.as_deref() == Some(id) {
                    slot.subject_id = None;
                    unassigned += 1;
                }
            }
        }

        tracing::debug!(subject_id = %id, unassigned, "subject deleted");
        Ok(next)
    }

    // -- schedule tables ----------------------------------------------------

    pub fn add_schedule_table(
        &self,
        ids: &mut dyn IdGenerator,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<(AppState, String)> {
        let name = required(name, "name", "Schedule name is required")?;
        let id = ids.next_id();
        let table = ScheduleTable {
            id: id.clone(),
            name,
            created_at: now,
            updated_at: now,
            slots: Vec::new(),
        };

        tracing::debug!(schedule_id = %id, name = %table.name, "schedule table added");
        let mut next = self.clone();
        next.schedule_tables.push(table);
        Ok((next, id))
    }

    pub fn rename_schedule_table(
        &self,
        id: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<AppState> {
        let name = required(name, "name", "Schedule name is required")?;
        self.edit_table(id, now, |table| {
            table.name = name;
            Ok(())
        })
    }

    /// Remove a table, clearing the default-schedule setting if it pointed there.
    pub fn delete_schedule_table(&self, id: &str) -> Result<AppState> {
        if self.schedule(id).is_none() {
            return Err(TimetableError::not_found("Schedule", id));
        }

        let mut next = self.clone();
        next.schedule_tables.retain(|t| t.id != id);
        if next.settings.default_schedule_id.as_deref() == Some(id) {
            next.settings.default_schedule_id = None;
        }

        tracing::debug!(schedule_id = %id, "schedule table deleted");
        Ok(next)
    }

    // -- time slots ---------------------------------------------------------

    /// Append a slot to a table.
    ///
    /// When a subject is assigned, an omitted room or teacher is filled from
    /// the subject's defaults.
    pub fn add_time_slot(
        &self,
        ids: &mut dyn IdGenerator,
        table_id: &str,
        slot: NewTimeSlot,
        now: DateTime<Utc>,
    ) -> Result<(AppState, String)> {
        check_range(slot.start_time, slot.end_time)?;
        let subject_id = optional(slot.subject_id);
        let subject = match subject_id.as_deref() {
            Some(sid) => Some(
                self.subject(sid)
                    .ok_or_else(|| TimetableError::not_found("Subject", sid))?,
            ),
            None => None,
        };

        let id = ids.next_id();
        let slot = TimeSlot {
            id: id.clone(),
            day: slot.day,
            start_time: slot.start_time,
            end_time: slot.end_time,
            room: optional(slot.room)
                .or_else(|| subject.and_then(|s| s.default_room.clone())),
            teacher: optional(slot.teacher)
                .or_else(|| subject.and_then(|s| s.default_teacher.clone())),
            notes: optional(slot.notes),
            subject_id,
        };

        let next = self.edit_table(table_id, now, |table| {
            table.slots.push(slot);
            Ok(())
        })?;
        tracing::debug!(schedule_id = %table_id, slot_id = %id, "time slot added");
        Ok((next, id))
    }

    pub fn update_time_slot(
        &self,
        table_id: &str,
        slot_id: &str,
        update: TimeSlotUpdate,
        now: DateTime<Utc>,
    ) -> Result<AppState> {
        if let Some(Some(sid)) = &update.subject_id {
            if !sid.trim().is_empty() && self.subject(sid.trim()).is_none() {
                return Err(TimetableError::not_found("Subject", sid));
            }
        }

        let next = self.edit_table(table_id, now, |table| {
            let slot = table
                .slots
                .iter_mut()
                .find(|s| s.id == slot_id)
                .ok_or_else(|| TimetableError::not_found("Time slot", slot_id))?;

            let start = update.start_time.unwrap_or(slot.start_time);
            let end = update.end_time.unwrap_or(slot.end_time);
            check_range(start, end)?;
            slot.start_time = start;
            slot.end_time = end;

            if let Some(day) = update.day {
                slot.day = day;
            }
            if let Some(subject_id) = update.subject_id {
                slot.subject_id = optional(subject_id);
            }
            if let Some(room) = update.room {
                slot.room = optional(room);
            }
            if let Some(teacher) = update.teacher {
                slot.teacher = optional(teacher);
            }
            if let Some(notes) = update.notes {
                slot.notes = optional(notes);
            }
            Ok(())
        })?;

        tracing::debug!(schedule_id = %table_id, slot_id = %slot_id, "time slot updated");
        Ok(next)
    }

    pub fn delete_time_slot(
        &self,
        table_id: &str,
        slot_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AppState> {
        let next = self.edit_table(table_id, now, |table| {
            let before = table.slots.len();
            table.slots.retain(|s| s.id != slot_id);
            if table.slots.len() == before {
                return Err(TimetableError::not_found("Time slot", slot_id));
            }
            Ok(())
        })?;

        tracing::debug!(schedule_id = %table_id, slot_id = %slot_id, "time slot deleted");
        Ok(next)
    }

    // -- settings -----------------------------------------------------------

    pub fn update_settings(&self, update: SettingsUpdate) -> Result<AppState> {
        let mut next = self.clone();
        if let Some(accessibility) = update.accessibility {
            next.settings.accessibility = accessibility;
        }
        if let Some(default_id) = update.default_schedule_id {
            if let Some(id) = default_id.as_deref() {
                if self.schedule(id).is_none() {
                    return Err(TimetableError::not_found("Schedule", id));
                }
            }
            next.settings.default_schedule_id = default_id;
        }
        Ok(next)
    }

    /// Clone the state, apply `edit` to one table and bump its `updated_at`.
    fn edit_table<F>(&self, table_id: &str, now: DateTime<Utc>, edit: F) -> Result<AppState>
    where
        F: FnOnce(&mut ScheduleTable) -> Result<()>,
    {
        let mut next = self.clone();
        let table = next
            .schedule_tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| TimetableError::not_found("Schedule", table_id))?;
        edit(table)?;
        table.updated_at = now;
        Ok(next)
    }
}

fn check_range(start: ClockTime, end: ClockTime) -> Result<()> {
    if start >= end {
        return Err(TimetableError::InvalidTimeRange {
            start: start.format_24h(),
            end: end.format_24h(),
        });
    }
    Ok(())
}

/// Trim a required text field, rejecting blank input.
fn required(value: &str, field: &'static str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimetableError::validation(field, message));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
