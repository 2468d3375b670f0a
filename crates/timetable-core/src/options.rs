//! Formatting options for the detailed text export.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Vertical density of the detailed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spacing {
    Compact,
    #[default]
    Normal,
    Spacious,
}

impl Spacing {
    /// Suffix appended after every field line.
    pub(crate) fn line_suffix(self) -> &'static str {
        match self {
            Spacing::Spacious => "\n",
            Spacing::Compact | Spacing::Normal => "",
        }
    }

    /// Suffix appended after the header and after every day section.
    pub(crate) fn section_suffix(self) -> &'static str {
        match self {
            Spacing::Compact => "\n",
            Spacing::Normal => "\n\n",
            Spacing::Spacious => "\n\n\n",
        }
    }
}

impl FromStr for Spacing {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compact" => Ok(Spacing::Compact),
            "normal" => Ok(Spacing::Normal),
            "spacious" => Ok(Spacing::Spacious),
            other => Err(TimetableError::InvalidOptions(format!(
                "unknown spacing '{}': expected compact, normal or spacious",
                other
            ))),
        }
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Spacing::Compact => "compact",
            Spacing::Normal => "normal",
            Spacing::Spacious => "spacious",
        })
    }
}

/// Clock convention for rendered times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeFormat {
    #[default]
    #[serde(rename = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl FromStr for TimeFormat {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "12h" => Ok(TimeFormat::TwelveHour),
            "24h" => Ok(TimeFormat::TwentyFourHour),
            other => Err(TimetableError::InvalidOptions(format!(
                "unknown time format '{}': expected 12h or 24h",
                other
            ))),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeFormat::TwelveHour => "12h",
            TimeFormat::TwentyFourHour => "24h",
        })
    }
}

/// What the detailed export includes and how it is laid out.
///
/// Missing keys fall back to [`ExportFormatOptions::default`]; unknown keys
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ExportFormatOptions {
    pub include_room: bool,
    pub include_teacher: bool,
    pub include_stub_code: bool,
    pub include_notes: bool,
    pub spacing: Spacing,
    pub time_format: TimeFormat,
}

impl Default for ExportFormatOptions {
    fn default() -> Self {
        Self {
            include_room: true,
            include_teacher: true,
            include_stub_code: true,
            include_notes: false,
            spacing: Spacing::Normal,
            time_format: TimeFormat::TwelveHour,
        }
    }
}

impl ExportFormatOptions {
    /// Parse options from a JSON object such as
    /// `{"includeNotes": true, "spacing": "compact"}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TimetableError::InvalidOptions(e.to_string()))
    }
}
