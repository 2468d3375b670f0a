//! # timetable-core
//!
//! Weekly timetable engine: conflict detection and text export for schedules
//! made of subjects and day/time slots.
//!
//! The two core operations are pure functions over borrowed data. They never
//! fail and keep no state between calls:
//!
//! ```rust
//! use timetable_core::{detect_conflicts, ClockTime, Day, TimeSlot};
//!
//! let slot = |id: &str, start: &str, end: &str| TimeSlot {
//!     id: id.to_string(),
//!     day: Day::Monday,
//!     start_time: ClockTime::parse(start).unwrap(),
//!     end_time: ClockTime::parse(end).unwrap(),
//!     subject_id: None,
//!     room: None,
//!     teacher: None,
//!     notes: None,
//! };
//!
//! let conflicts = detect_conflicts(&[slot("a", "09:00", "10:00"), slot("b", "09:30", "10:30")]);
//! assert_eq!(conflicts["a"].conflicts_with, vec!["b".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`conflict`] — Same-day overlap detection between slots of one schedule
//! - [`generator`] — Detailed and inline schedule text
//! - [`model`] — Subjects, time slots, schedule tables
//! - [`clock`] — `"HH:MM"` wall-clock times
//! - [`options`] — Export formatting options
//! - [`state`] — The persisted document and its immutable edit operations
//! - [`storage`] — Key-value persistence, import and export of the document
//! - [`ids`] — Record id generation
//! - [`error`] — Error types

pub mod clock;
pub mod conflict;
pub mod error;
pub mod generator;
pub mod ids;
pub mod model;
pub mod options;
pub mod state;
pub mod storage;

pub use clock::ClockTime;
pub use conflict::{conflict_message, detect_conflicts, has_conflict, ConflictMap, TimeConflict};
pub use error::TimetableError;
pub use generator::{
    export_filename, generate_detailed_text, generate_detailed_text_now, generate_inline_text,
};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use model::{Day, ScheduleTable, Subject, SubjectColor, TimeSlot};
pub use options::{ExportFormatOptions, Spacing, TimeFormat};
pub use state::AppState;
