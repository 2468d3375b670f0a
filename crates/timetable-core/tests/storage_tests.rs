//! Tests for persisting, importing and exporting the state document.

use chrono::{NaiveDate, TimeZone, Utc};
use timetable_core::state::{NewSubject, NewTimeSlot};
use timetable_core::storage::{
    backup_filename, clear_state, export_document, load_state, parse_document, save_state,
    FileStore, KeyValueStore, MemoryStore, STORAGE_KEY,
};
use timetable_core::{AppState, ClockTime, Day, SequentialIds, SubjectColor, TimetableError};

fn sample_state() -> AppState {
    let mut ids = SequentialIds::new("id");
    let now = Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap();
    let (state, subject) = AppState::new()
        .add_subject(
            &mut ids,
            NewSubject {
                name: "Chemistry".to_string(),
                stub_code: "CHEM".to_string(),
                color: SubjectColor::Mango,
                ..NewSubject::default()
            },
        )
        .unwrap();
    let (state, table) = state.add_schedule_table(&mut ids, "First Sem", now).unwrap();
    let (state, _) = state
        .add_time_slot(
            &mut ids,
            &table,
            NewTimeSlot::new(
                Day::Thursday,
                ClockTime::parse("08:00").unwrap(),
                ClockTime::parse("09:30").unwrap(),
            )
            .with_subject(&subject)
            .with_room("Lab 1"),
            now,
        )
        .unwrap();
    state
}

#[test]
fn load_from_empty_store_gives_default_state() {
    let store = MemoryStore::new();
    assert_eq!(load_state(&store).unwrap(), AppState::new());
}

#[test]
fn save_then_load_restores_the_same_state() {
    let mut store = MemoryStore::new();
    let state = sample_state();

    save_state(&mut store, &state).unwrap();

    assert_eq!(load_state(&store).unwrap(), state);
}

#[test]
fn save_stamps_current_version() {
    let mut store = MemoryStore::new();
    let mut state = sample_state();
    state.version = "0.9.0".to_string();

    save_state(&mut store, &state).unwrap();

    let raw = store.get(STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains(r#""version":"1.0.0""#), "{raw}");
}

#[test]
fn corrupt_stored_document_falls_back_to_default() {
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, "{not json").unwrap();
    assert_eq!(load_state(&store).unwrap(), AppState::new());

    store.set(STORAGE_KEY, r#"{"subjects": "nope"}"#).unwrap();
    assert_eq!(load_state(&store).unwrap(), AppState::new());
}

#[test]
fn clear_removes_the_document() {
    let mut store = MemoryStore::new();
    save_state(&mut store, &sample_state()).unwrap();

    clear_state(&mut store).unwrap();

    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn file_store_round_trips_through_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("data"));
    let state = sample_state();

    assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    save_state(&mut store, &state).unwrap();
    assert!(store.path_for(STORAGE_KEY).exists());
    assert_eq!(load_state(&store).unwrap(), state);

    clear_state(&mut store).unwrap();
    clear_state(&mut store).unwrap();
    assert!(!store.path_for(STORAGE_KEY).exists());
}

#[test]
fn parse_document_accepts_browser_shaped_json() {
    let json = r##"{
        "subjects": [
            {"id": "s1", "name": "Math", "stubCode": "MATH", "color": "#4ECDC4"}
        ],
        "scheduleTables": [
            {
                "id": "t1",
                "name": "First Sem",
                "createdAt": "2026-01-05T08:00:00.000Z",
                "updatedAt": "2026-01-06T10:30:00.000Z",
                "slots": [
                    {"id": "x", "day": "Monday", "startTime": "09:00", "endTime": "10:00", "subjectId": "s1", "room": "R1"},
                    {"id": "y", "day": "Sunday", "startTime": "18:00", "endTime": "19:00", "subjectId": null}
                ]
            }
        ],
        "settings": {
            "accessibility": {"fontSize": "extra-large", "highContrast": true, "reducedMotion": false},
            "defaultScheduleId": "t1"
        },
        "version": "1.0.0"
    }"##;

    let state = parse_document(json).unwrap();

    assert_eq!(state.subjects[0].color, SubjectColor::Teal);
    let table = state.default_schedule().unwrap();
    assert_eq!(table.slots.len(), 2);
    assert_eq!(table.slots[0].room.as_deref(), Some("R1"));
    assert_eq!(table.slots[1].subject_id, None);
}

#[test]
fn load_keeps_minimal_browser_document() {
    let json = r##"{
        "subjects": [{"id": "s1", "name": "Math", "stubCode": "M", "color": "#ff6b35"}],
        "scheduleTables": [
            {
                "id": "t1",
                "name": "Sem",
                "slots": [
                    {"id": "a", "day": "Monday", "startTime": "09:00", "endTime": "10:00", "subjectId": "s1"}
                ]
            }
        ],
        "settings": {}
    }"##;
    let mut store = MemoryStore::new();
    store.set(STORAGE_KEY, json).unwrap();

    let state = load_state(&store).unwrap();

    assert_eq!(state.subjects.len(), 1);
    assert_eq!(state.subjects[0].color, SubjectColor::Orange);
    assert_eq!(state.schedule_tables.len(), 1);
    let table = &state.schedule_tables[0];
    assert_eq!(table.slots.len(), 1);
    assert_eq!(table.created_at, Utc.timestamp_opt(0, 0).unwrap());
    assert_eq!(table.updated_at, Utc.timestamp_opt(0, 0).unwrap());
}

#[test]
fn subject_colors_decode_in_any_case_and_encode_upper_case() {
    for color in SubjectColor::PALETTE {
        let lower = format!("\"{}\"", color.hex().to_ascii_lowercase());
        assert_eq!(serde_json::from_str::<SubjectColor>(&lower).unwrap(), color);
        assert_eq!(
            serde_json::to_string(&color).unwrap(),
            format!("\"{}\"", color.hex())
        );
    }
    assert!(serde_json::from_str::<SubjectColor>("\"#123456\"").is_err());
}

#[test]
fn parse_document_distinguishes_bad_json_from_bad_shape() {
    assert!(matches!(
        parse_document("definitely not json"),
        Err(TimetableError::Json(_))
    ));

    let missing_stub = r##"{"subjects":[{"id":"s1","name":"Math","color":"#4ECDC4"}],"scheduleTables":[],"settings":{}}"##;
    assert!(matches!(
        parse_document(missing_stub),
        Err(TimetableError::InvalidDocument)
    ));

    let table_without_slots = r#"{"subjects":[],"scheduleTables":[{"id":"t","name":"T"}],"settings":{}}"#;
    assert!(matches!(
        parse_document(table_without_slots),
        Err(TimetableError::InvalidDocument)
    ));

    let bad_time = r#"{"subjects":[],"scheduleTables":[{"id":"t","name":"T","createdAt":"2026-01-05T08:00:00Z","updatedAt":"2026-01-05T08:00:00Z","slots":[{"id":"x","day":"Monday","startTime":"9am","endTime":"10:00"}]}],"settings":{}}"#;
    assert!(matches!(
        parse_document(bad_time),
        Err(TimetableError::InvalidDocument)
    ));
}

#[test]
fn export_document_can_be_imported_again() {
    let state = sample_state();

    let exported = export_document(&state).unwrap();

    assert!(exported.contains("\"scheduleTables\""));
    assert!(exported.contains("\"startTime\": \"08:00\""));
    assert_eq!(parse_document(&exported).unwrap(), state);
}

#[test]
fn backup_filename_uses_iso_date() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    assert_eq!(backup_filename(date), "schedule-backup-2026-03-04.json");
}
