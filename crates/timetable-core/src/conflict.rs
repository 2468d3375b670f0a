//! Detect overlapping slots within one schedule.
//!
//! Performs a full pairwise comparison of the schedule's slots. Two slots
//! conflict when they fall on the same day and their half-open intervals
//! `[start, end)` overlap. Adjacent slots (one ends exactly when the other
//! starts) are NOT conflicts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::TimeSlot;

/// The slots a given slot overlaps with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConflict {
    pub slot_id: String,
    /// Ids of the overlapping slots, in input order.
    pub conflicts_with: Vec<String>,
}

/// Conflict lookup keyed by slot id. Slots without conflicts have no entry.
pub type ConflictMap = HashMap<String, TimeConflict>;

/// Whether two distinct slots overlap on the same day.
///
/// Uses `start1 < end2 && end1 > start2` on the raw values; inverted or
/// zero-length ranges are not clamped.
pub fn slots_overlap(a: &TimeSlot, b: &TimeSlot) -> bool {
    if a.day != b.day || a.id == b.id {
        return false;
    }
    a.start_time < b.end_time && a.end_time > b.start_time
}

/// Find every slot that overlaps another slot of the same schedule.
///
/// Unassigned slots take part like any other. The result is symmetric: when
/// A lists B, B lists A.
pub fn detect_conflicts(slots: &[TimeSlot]) -> ConflictMap {
    let mut conflicts = ConflictMap::new();

    for (i, slot) in slots.iter().enumerate() {
        let conflicts_with: Vec<String> = slots
            .iter()
            .enumerate()
            .filter(|&(j, other)| i != j && slots_overlap(slot, other))
            .map(|(_, other)| other.id.clone())
            .collect();

        if !conflicts_with.is_empty() {
            conflicts.insert(
                slot.id.clone(),
                TimeConflict {
                    slot_id: slot.id.clone(),
                    conflicts_with,
                },
            );
        }
    }

    conflicts
}

pub fn has_conflict(slot_id: &str, conflicts: &ConflictMap) -> bool {
    conflicts.contains_key(slot_id)
}

/// Warning text for a conflict badge, e.g. "This slot conflicts with 2 other classes".
pub fn conflict_message(slot_id: &str, conflicts: &ConflictMap) -> Option<String> {
    let conflict = conflicts.get(slot_id)?;
    let count = conflict.conflicts_with.len();
    let noun = if count == 1 { "class" } else { "classes" };
    Some(format!("This slot conflicts with {} other {}", count, noun))
}
