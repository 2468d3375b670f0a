//! Property-based tests for conflict detection and text generation.
//!
//! These tests check invariants that should hold for *any* slot set, not just
//! the fixtures in `conflict_tests.rs` and `generator_tests.rs`.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use timetable_core::conflict::slots_overlap;
use timetable_core::{
    detect_conflicts, generate_inline_text, ClockTime, Day, ScheduleTable, Subject, SubjectColor,
    TimeSlot,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day() -> impl Strategy<Value = Day> {
    prop::sample::select(Day::ALL.to_vec())
}

/// A well-formed slot (start < end) in 5-minute steps.
fn arb_range() -> impl Strategy<Value = (u16, u16)> {
    (0u16..287).prop_flat_map(|start| (Just(start), (start + 1)..=287))
}

fn to_time(step: u16) -> ClockTime {
    let minutes = step * 5;
    ClockTime::new((minutes / 60) as u8, (minutes % 60) as u8).unwrap()
}

/// Up to 20 slots with unique ids, some unassigned.
fn arb_slots() -> impl Strategy<Value = Vec<TimeSlot>> {
    prop::collection::vec((arb_day(), arb_range(), any::<bool>()), 0..20).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (day, (start, end), assigned))| TimeSlot {
                id: format!("slot-{}", i),
                day,
                start_time: to_time(start),
                end_time: to_time(end),
                subject_id: assigned.then(|| "s1".to_string()),
                room: None,
                teacher: None,
                notes: None,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn conflicts_are_symmetric(slots in arb_slots()) {
        let conflicts = detect_conflicts(&slots);
        for (id, conflict) in &conflicts {
            for other in &conflict.conflicts_with {
                let back = conflicts.get(other);
                prop_assert!(back.is_some(), "{} lists {} but {} has no entry", id, other, other);
                prop_assert!(back.unwrap().conflicts_with.contains(id));
            }
        }
    }

    #[test]
    fn no_slot_conflicts_with_itself(slots in arb_slots()) {
        let conflicts = detect_conflicts(&slots);
        for (id, conflict) in &conflicts {
            prop_assert_eq!(id, &conflict.slot_id);
            prop_assert!(!conflict.conflicts_with.contains(id));
        }
    }

    #[test]
    fn conflicts_never_cross_days(slots in arb_slots()) {
        let conflicts = detect_conflicts(&slots);
        let day_of = |id: &str| slots.iter().find(|s| s.id == id).map(|s| s.day);
        for (id, conflict) in &conflicts {
            for other in &conflict.conflicts_with {
                prop_assert_eq!(day_of(id), day_of(other));
            }
        }
    }

    #[test]
    fn map_matches_pairwise_overlap(slots in arb_slots()) {
        let conflicts = detect_conflicts(&slots);
        for a in &slots {
            let expected: Vec<String> = slots
                .iter()
                .filter(|b| slots_overlap(a, b))
                .map(|b| b.id.clone())
                .collect();
            match conflicts.get(&a.id) {
                Some(c) => prop_assert_eq!(&c.conflicts_with, &expected),
                None => prop_assert!(expected.is_empty()),
            }
        }
    }

    #[test]
    fn inline_days_follow_canonical_order(slots in arb_slots()) {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let schedule = ScheduleTable {
            id: "t".to_string(),
            name: "Prop".to_string(),
            created_at: created,
            updated_at: created,
            slots: slots.clone(),
        };
        let subjects = vec![Subject {
            id: "s1".to_string(),
            name: "Math".to_string(),
            stub_code: "M".to_string(),
            color: SubjectColor::Mint,
            default_teacher: None,
            default_room: None,
        }];

        let text = generate_inline_text(&schedule, &subjects);
        let listed: Vec<Day> = text
            .lines()
            .skip(2)
            .filter_map(|l| {
                let name = l.split(':').next()?;
                Day::ALL.iter().copied().find(|d| d.name() == name)
            })
            .collect();

        let mut expected: Vec<Day> = slots
            .iter()
            .filter(|s| s.subject_id.is_some())
            .map(|s| s.day)
            .collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(listed, expected);
    }
}
