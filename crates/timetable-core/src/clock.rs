//! Wall-clock time of day, as stored on time slots.
//!
//! Slot times are persisted as zero-padded 24-hour `"HH:MM"` strings. Parsing
//! them once into minutes since midnight makes overlap tests and per-day
//! sorting plain integer comparisons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// A time of day with minute precision, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Build a time from hour (0-23) and minute (0-59).
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(TimetableError::InvalidTime(format!("{}:{:02}", hour, minute)));
        }
        Ok(ClockTime(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Parse `"HH:MM"`. A single-digit hour (`"9:05"`) is accepted; minutes
    /// must always have two digits.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TimetableError::InvalidTime(s.to_string());

        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return Err(invalid());
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = hours.parse().map_err(|_| invalid())?;
        let minute: u8 = minutes.parse().map_err(|_| invalid())?;
        ClockTime::new(hour, minute).map_err(|_| invalid())
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// `"HH:MM"`, zero-padded 24-hour.
    pub fn format_24h(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// `"h:mm AM"` / `"h:mm PM"`. Midnight is `12:00 AM`, noon is `12:00 PM`.
    pub fn format_12h(self) -> String {
        let hour = self.hour();
        let period = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour {
            0 => 12,
            13..=23 => hour - 12,
            h => h,
        };
        format!("{}:{:02} {}", hour12, self.minute(), period)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self> {
        ClockTime::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self> {
        ClockTime::parse(&s)
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.format_24h()
    }
}
