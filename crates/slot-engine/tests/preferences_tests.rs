//! Tests for preference parsing, validation and meeting length suggestions.

use chrono::{NaiveTime, Weekday};
use slot_engine::duration::{suggest_duration, MeetingKind};
use slot_engine::preferences::MAX_LOOKAHEAD_DAYS;
use slot_engine::{LocalTimePolicy, Preferences, ScheduleError, WorkingHours};

#[test]
fn empty_json_yields_defaults() {
    let prefs: Preferences = serde_json::from_str("{}").unwrap();

    assert_eq!(prefs, Preferences::default());
    assert_eq!(prefs.timezone, "UTC");
    assert_eq!(prefs.buffer_minutes, 15);
    assert_eq!(prefs.lookahead_days, 14);
    assert_eq!(prefs.local_time_policy, LocalTimePolicy::ShiftForward);
    assert!(prefs.working_hours.for_weekday(Weekday::Sat).is_none());
    assert_eq!(
        prefs.working_hours.for_weekday(Weekday::Mon),
        Some(&WorkingHours::hours(9, 17).unwrap())
    );
}

#[test]
fn partial_json_overrides_fields() {
    let json = r#"{
        "timezone": "Europe/Berlin",
        "buffer_minutes": 5,
        "working_hours": {
            "monday": { "start": "08:30", "end": "16:00" },
            "saturday": { "start": "10:00:00", "end": "12:00:00" }
        },
        "max_meetings_per_day": 6,
        "local_time_policy": "wall_clock"
    }"#;
    let prefs: Preferences = serde_json::from_str(json).unwrap();

    assert!(prefs.validate().is_ok());
    assert_eq!(prefs.buffer_minutes, 5);
    assert_eq!(prefs.max_meetings_per_day, Some(6));
    assert_eq!(prefs.local_time_policy, LocalTimePolicy::WallClock);

    let monday = prefs.working_hours.for_weekday(Weekday::Mon).unwrap();
    assert_eq!(monday.start, NaiveTime::from_hms_opt(8, 30, 0).unwrap());
    // A present `working_hours` table replaces the defaults: Tuesday is now off.
    assert!(prefs.working_hours.for_weekday(Weekday::Tue).is_none());
    assert!(prefs.working_hours.for_weekday(Weekday::Sat).is_some());
}

#[test]
fn working_hours_serialize_as_hh_mm() {
    let json = serde_json::to_value(WorkingHours::hours(9, 17).unwrap()).unwrap();
    assert_eq!(json["start"], "09:00");
    assert_eq!(json["end"], "17:00");
}

#[test]
fn malformed_time_is_rejected() {
    let json = r#"{ "working_hours": { "monday": { "start": "nine", "end": "17:00" } } }"#;
    assert!(serde_json::from_str::<Preferences>(json).is_err());
}

#[test]
fn inverted_working_hours_fail_validation() {
    let json = r#"{ "working_hours": { "monday": { "start": "17:00", "end": "09:00" } } }"#;
    let prefs: Preferences = serde_json::from_str(json).unwrap();
    assert!(matches!(prefs.validate(), Err(ScheduleError::InvalidPreferences(_))));
    assert!(WorkingHours::hours(12, 12).is_err());
}

#[test]
fn unknown_timezone_fails_validation() {
    let prefs = Preferences {
        timezone: "Atlantis/Capital".to_string(),
        ..Preferences::default()
    };
    assert!(matches!(prefs.validate(), Err(ScheduleError::InvalidTimezone(_))));
}

#[test]
fn zero_lookahead_fails_validation() {
    let prefs = Preferences {
        lookahead_days: 0,
        ..Preferences::default()
    };
    assert!(matches!(prefs.validate(), Err(ScheduleError::InvalidPreferences(_))));
}

#[test]
fn lookahead_above_ten_years_fails_validation() {
    let at_limit = Preferences {
        lookahead_days: MAX_LOOKAHEAD_DAYS,
        ..Preferences::default()
    };
    assert!(at_limit.validate().is_ok());

    let beyond = Preferences {
        lookahead_days: MAX_LOOKAHEAD_DAYS + 1,
        ..Preferences::default()
    };
    assert!(matches!(beyond.validate(), Err(ScheduleError::InvalidPreferences(_))));
}

#[test]
fn working_day_can_end_at_midnight() {
    let json = r#"{ "working_hours": { "friday": { "start": "18:00", "end": "24:00" } } }"#;
    let prefs: Preferences = serde_json::from_str(json).unwrap();
    assert!(prefs.validate().is_ok());

    let friday = prefs.working_hours.for_weekday(Weekday::Fri).unwrap();
    assert!(friday.ends_at_midnight());
    assert_eq!(friday, &WorkingHours::hours(18, 24).unwrap());

    let json = serde_json::to_value(friday).unwrap();
    assert_eq!(json["start"], "18:00");
    assert_eq!(json["end"], "24:00");
}

#[test]
fn midnight_is_not_a_valid_start() {
    let json = r#"{ "working_hours": { "monday": { "start": "24:00", "end": "17:00" } } }"#;
    assert!(serde_json::from_str::<Preferences>(json).is_err());
}

// ── Meeting length suggestions ──────────────────────────────────────────────

#[test]
fn meeting_kind_sets_base_length() {
    assert_eq!(suggest_duration(MeetingKind::Standup, 3, 60), 15);
    assert_eq!(suggest_duration(MeetingKind::OneOnOne, 2, 60), 30);
    assert_eq!(suggest_duration(MeetingKind::Review, 4, 60), 90);
    assert_eq!(suggest_duration(MeetingKind::Workshop, 5, 60), 120);
    assert_eq!(suggest_duration(MeetingKind::Other, 2, 45), 45);
}

#[test]
fn large_meetings_get_extra_time() {
    assert_eq!(suggest_duration(MeetingKind::TeamMeeting, 6, 60), 70);
    assert_eq!(suggest_duration(MeetingKind::TeamMeeting, 10, 60), 70);
    assert_eq!(suggest_duration(MeetingKind::AllHands, 11, 60), 75);
}

#[test]
fn meeting_kind_parses_loosely() {
    assert_eq!("one-on-one".parse::<MeetingKind>().unwrap(), MeetingKind::OneOnOne);
    assert_eq!("All Hands".parse::<MeetingKind>().unwrap(), MeetingKind::AllHands);
    assert_eq!("STANDUP".parse::<MeetingKind>().unwrap(), MeetingKind::Standup);
    assert!(matches!(
        "brunch".parse::<MeetingKind>(),
        Err(ScheduleError::InvalidRequest(_))
    ));
}
