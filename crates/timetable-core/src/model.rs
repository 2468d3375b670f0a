//! Value records shared by the conflict detector, the text generator and the
//! state store.
//!
//! Field names serialize in camelCase so the persisted document keeps the
//! shape the browser host writes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, TimetableError};

/// Day of the week a slot repeats on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Canonical Monday→Sunday order used when rendering.
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed subject palette.
///
/// Serializes as the upper-case hex code; decoding accepts any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SubjectColor {
    #[default]
    #[serde(rename = "#FF6B35")]
    Orange,
    #[serde(rename = "#F7931E")]
    LightOrange,
    #[serde(rename = "#FFA07A")]
    LightSalmon,
    #[serde(rename = "#FF8C42")]
    Mango,
    #[serde(rename = "#FFB84D")]
    YellowOrange,
    #[serde(rename = "#4ECDC4")]
    Teal,
    #[serde(rename = "#95E1D3")]
    Mint,
    #[serde(rename = "#6C5CE7")]
    Purple,
    #[serde(rename = "#A29BFE")]
    LightPurple,
    #[serde(rename = "#FF6B9D")]
    Pink,
}

impl SubjectColor {
    pub const PALETTE: [SubjectColor; 10] = [
        SubjectColor::Orange,
        SubjectColor::LightOrange,
        SubjectColor::LightSalmon,
        SubjectColor::Mango,
        SubjectColor::YellowOrange,
        SubjectColor::Teal,
        SubjectColor::Mint,
        SubjectColor::Purple,
        SubjectColor::LightPurple,
        SubjectColor::Pink,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            SubjectColor::Orange => "#FF6B35",
            SubjectColor::LightOrange => "#F7931E",
            SubjectColor::LightSalmon => "#FFA07A",
            SubjectColor::Mango => "#FF8C42",
            SubjectColor::YellowOrange => "#FFB84D",
            SubjectColor::Teal => "#4ECDC4",
            SubjectColor::Mint => "#95E1D3",
            SubjectColor::Purple => "#6C5CE7",
            SubjectColor::LightPurple => "#A29BFE",
            SubjectColor::Pink => "#FF6B9D",
        }
    }
}

impl FromStr for SubjectColor {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        SubjectColor::PALETTE
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex))
            .ok_or_else(|| {
                TimetableError::validation("color", format!("Unknown subject color '{}'", s))
            })
    }
}

impl TryFrom<String> for SubjectColor {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for SubjectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// A course or activity that slots can be assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Short label, e.g. `"CS101"`.
    pub stub_code: String,
    pub color: SubjectColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_room: Option<String>,
}

/// One weekly time slot inside a schedule table.
///
/// `start_time < end_time` is not enforced here; the state store checks it
/// when slots are added or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    pub day: Day,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    /// `None` marks an unassigned slot.
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A named timetable such as "First Sem".
///
/// Documents written before timestamps were tracked decode with the Unix
/// epoch in place of a missing `createdAt`/`updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTable {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
    /// Insertion order; day/time order is computed when rendering.
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
}

impl ScheduleTable {
    pub fn slot(&self, id: &str) -> Option<&TimeSlot> {
        self.slots.iter().find(|s| s.id == id)
    }
}

/// Look up a subject by id in a flat subject list.
pub fn find_subject<'a>(subjects: &'a [Subject], id: &str) -> Option<&'a Subject> {
    subjects.iter().find(|s| s.id == id)
}
