//! Tests for `"HH:MM"` parsing and rendering.

use timetable_core::ClockTime;

#[test]
fn parses_zero_padded_and_short_hours() {
    assert_eq!(ClockTime::parse("09:30").unwrap().minutes_since_midnight(), 570);
    assert_eq!(ClockTime::parse("9:30").unwrap().minutes_since_midnight(), 570);
    assert_eq!(ClockTime::parse("23:59").unwrap().minutes_since_midnight(), 1439);
    assert_eq!(ClockTime::parse("00:00").unwrap(), ClockTime::MIDNIGHT);
}

#[test]
fn rejects_malformed_times() {
    for bad in ["", "9", "24:00", "12:60", "12:5", "ab:cd", "-1:00", "12:00:00", "123:00"] {
        assert!(ClockTime::parse(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn twelve_hour_rendering() {
    let t = |s: &str| ClockTime::parse(s).unwrap().format_12h();
    assert_eq!(t("00:00"), "12:00 AM");
    assert_eq!(t("00:05"), "12:05 AM");
    assert_eq!(t("09:00"), "9:00 AM");
    assert_eq!(t("11:59"), "11:59 AM");
    assert_eq!(t("12:00"), "12:00 PM");
    assert_eq!(t("13:07"), "1:07 PM");
    assert_eq!(t("23:45"), "11:45 PM");
}

#[test]
fn twenty_four_hour_rendering_is_zero_padded() {
    assert_eq!(ClockTime::parse("7:05").unwrap().format_24h(), "07:05");
    assert_eq!(ClockTime::parse("7:05").unwrap().to_string(), "07:05");
}

#[test]
fn ordering_matches_time_of_day() {
    let early = ClockTime::parse("08:59").unwrap();
    let late = ClockTime::parse("9:00").unwrap();
    assert!(early < late);
}

#[test]
fn serde_uses_hh_mm_strings() {
    let t: ClockTime = serde_json::from_str("\"14:30\"").unwrap();
    assert_eq!(t, ClockTime::new(14, 30).unwrap());
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"14:30\"");
    assert!(serde_json::from_str::<ClockTime>("\"25:00\"").is_err());
}
