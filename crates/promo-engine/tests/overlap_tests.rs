//! Tests for inclusive date-range overlap.

use chrono::NaiveDate;
use promo_engine::{overlaps, DateRange, PromoError};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn touching_boundary_overlaps() {
    assert!(overlaps(
        date("2025-01-01"),
        date("2025-01-10"),
        date("2025-01-10"),
        date("2025-01-20"),
    ));
}

#[test]
fn disjoint_ranges_do_not_overlap() {
    assert!(!overlaps(
        date("2025-01-01"),
        date("2025-01-09"),
        date("2025-01-10"),
        date("2025-01-20"),
    ));
}

#[test]
fn equal_ranges_overlap() {
    let (s, e) = (date("2025-03-01"), date("2025-03-05"));
    assert!(overlaps(s, e, s, e));
}

#[test]
fn containing_range_overlaps() {
    assert!(overlaps(
        date("2025-01-01"),
        date("2025-12-31"),
        date("2025-06-01"),
        date("2025-06-02"),
    ));
    assert!(overlaps(
        date("2025-06-01"),
        date("2025-06-02"),
        date("2025-01-01"),
        date("2025-12-31"),
    ));
}

#[test]
fn single_day_ranges() {
    let day = date("2025-02-14");
    assert!(overlaps(day, day, day, day));
    assert!(!overlaps(day, day, date("2025-02-15"), date("2025-02-15")));
}

#[test]
fn date_range_rejects_inverted_bounds() {
    let err = DateRange::new(date("2025-02-02"), date("2025-02-01")).unwrap_err();
    assert!(matches!(err, PromoError::InvalidDateRange { .. }));
}

#[test]
fn date_range_contains_is_inclusive() {
    let range = DateRange::new(date("2025-01-01"), date("2025-01-31")).unwrap();
    assert!(range.contains(date("2025-01-01")));
    assert!(range.contains(date("2025-01-31")));
    assert!(!range.contains(date("2024-12-31")));
    assert!(!range.contains(date("2025-02-01")));
    assert_eq!(range.days(), 31);
}

#[test]
fn date_range_deserialize_validates() {
    let ok: DateRange =
        serde_json::from_str(r#"{"start":"2025-01-01","end":"2025-01-02"}"#).unwrap();
    assert_eq!(ok.start(), date("2025-01-01"));

    let bad = serde_json::from_str::<DateRange>(r#"{"start":"2025-01-03","end":"2025-01-02"}"#);
    assert!(bad.is_err());
}
