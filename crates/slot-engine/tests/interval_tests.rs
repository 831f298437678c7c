//! Tests for interval primitives: construction, overlap, merge, subtract, contains.

use chrono::{FixedOffset, TimeZone, Utc};
use slot_engine::interval::{parse_instant, Interval};
use slot_engine::ScheduleError;

/// Helper to create a UTC interval on 2026-03-16 from hour/minute pairs.
fn iv(start_hour: u32, start_min: u32, end_hour: u32, end_min: u32) -> Interval {
    Interval::new(
        Utc.with_ymd_and_hms(2026, 3, 16, start_hour, start_min, 0).unwrap(),
        Utc.with_ymd_and_hms(2026, 3, 16, end_hour, end_min, 0).unwrap(),
    )
    .unwrap()
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn zero_length_interval_rejected() {
    let t = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    let err = Interval::new(t, t).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidInterval(_)));
}

#[test]
fn inverted_interval_rejected() {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap();
    assert!(matches!(
        Interval::new(start, end),
        Err(ScheduleError::InvalidInterval(_))
    ));
}

#[test]
fn zoned_construction_normalizes_to_utc() {
    // 09:00-10:00 at UTC-4 is 13:00-14:00 UTC.
    let edt = FixedOffset::west_opt(4 * 3600).unwrap();
    let interval = Interval::from_zoned(
        edt.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap(),
        edt.with_ymd_and_hms(2026, 3, 16, 10, 0, 0).unwrap(),
    )
    .unwrap();

    assert_eq!(interval, iv(13, 0, 14, 0));
    assert_eq!(interval.duration_minutes(), 60);
}

#[test]
fn mixed_offsets_compare_on_the_normalized_instant() {
    // 08:00-09:00 at UTC+1 is 07:00-08:00 UTC.
    let cet = FixedOffset::east_opt(3600).unwrap();
    let early = Interval::from_zoned(
        cet.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap(),
        cet.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap(),
    )
    .unwrap();
    assert!(early.overlaps(&iv(7, 30, 8, 30)));
    assert!(!early.overlaps(&iv(8, 0, 9, 0)));
}

// ── Overlap / contains ──────────────────────────────────────────────────────

#[test]
fn overlapping_intervals_detected_both_ways() {
    let a = iv(9, 0, 10, 0);
    let b = iv(9, 30, 10, 30);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn adjacent_intervals_do_not_overlap() {
    let a = iv(9, 0, 10, 0);
    let b = iv(10, 0, 11, 0);
    assert!(!a.overlaps(&b));
    assert!(a.is_adjacent(&b));
}

#[test]
fn contains_is_half_open() {
    let a = iv(9, 0, 10, 0);
    assert!(a.contains(a.start()));
    assert!(a.contains(Utc.with_ymd_and_hms(2026, 3, 16, 9, 59, 59).unwrap()));
    assert!(!a.contains(a.end()));
}

// ── Merge ───────────────────────────────────────────────────────────────────

#[test]
fn merge_overlapping_returns_union() {
    let merged = iv(9, 0, 10, 30).merge(&iv(10, 0, 12, 0)).unwrap();
    assert_eq!(merged, iv(9, 0, 12, 0));
}

#[test]
fn merge_adjacent_returns_union() {
    let merged = iv(9, 0, 10, 0).merge(&iv(10, 0, 11, 0)).unwrap();
    assert_eq!(merged, iv(9, 0, 11, 0));
}

#[test]
fn merge_disjoint_fails_with_invalid_operation() {
    let err = iv(9, 0, 10, 0).merge(&iv(11, 0, 12, 0)).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidOperation(_)));
}

// ── Subtract ────────────────────────────────────────────────────────────────

#[test]
fn subtract_disjoint_leaves_interval_unchanged() {
    assert_eq!(iv(9, 0, 10, 0).subtract(&iv(11, 0, 12, 0)), vec![iv(9, 0, 10, 0)]);
}

#[test]
fn subtract_middle_produces_two_pieces() {
    assert_eq!(
        iv(9, 0, 17, 0).subtract(&iv(12, 0, 13, 0)),
        vec![iv(9, 0, 12, 0), iv(13, 0, 17, 0)]
    );
}

#[test]
fn subtract_head_and_tail_produce_one_piece() {
    assert_eq!(iv(9, 0, 17, 0).subtract(&iv(8, 0, 10, 0)), vec![iv(10, 0, 17, 0)]);
    assert_eq!(iv(9, 0, 17, 0).subtract(&iv(16, 0, 18, 0)), vec![iv(9, 0, 16, 0)]);
}

#[test]
fn subtract_covering_interval_produces_nothing() {
    assert!(iv(9, 0, 10, 0).subtract(&iv(9, 0, 10, 0)).is_empty());
    assert!(iv(9, 0, 10, 0).subtract(&iv(8, 0, 11, 0)).is_empty());
}

// ── Parsing / serde ─────────────────────────────────────────────────────────

#[test]
fn parse_instant_accepts_rfc3339_with_offset() {
    let t = parse_instant("2026-03-16T09:00:00-04:00", chrono_tz::UTC).unwrap();
    assert_eq!(t, Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap());
}

#[test]
fn parse_instant_interprets_naive_time_in_zone() {
    // March 16 2026 is after the US spring-forward (March 8): EDT, UTC-4.
    let t = parse_instant("2026-03-16T09:00", chrono_tz::America::New_York).unwrap();
    assert_eq!(t, Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap());
}

#[test]
fn parse_instant_rejects_time_in_dst_gap() {
    let err = parse_instant("2026-03-08T02:30:00", chrono_tz::America::New_York).unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidInterval(_)));
}

#[test]
fn parse_instant_rejects_garbage() {
    assert!(parse_instant("tomorrow at two", chrono_tz::UTC).is_err());
}

#[test]
fn deserializing_inverted_interval_fails() {
    let json = r#"{"start":"2026-03-16T10:00:00Z","end":"2026-03-16T09:00:00Z"}"#;
    assert!(serde_json::from_str::<Interval>(json).is_err());

    let json = r#"{"start":"2026-03-16T09:00:00Z","end":"2026-03-16T10:00:00Z"}"#;
    let interval: Interval = serde_json::from_str(json).unwrap();
    assert_eq!(interval, iv(9, 0, 10, 0));
}
