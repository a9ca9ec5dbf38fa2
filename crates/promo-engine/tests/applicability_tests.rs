//! Tests for promotion applicability and listing filters.

use chrono::NaiveDate;
use promo_engine::{
    available_promotions, is_promotion_applicable_now, DateRange, DiscountSpec, DiscountType,
    Promotion, PromotionFilter, PromotionKind, PromotionStatus, ResourceRef,
};
use rust_decimal::Decimal;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn promo(
    id: &str,
    kind: PromotionKind,
    discount: DiscountSpec,
    start: &str,
    end: &str,
) -> Promotion {
    Promotion {
        id: id.to_string(),
        name: id.to_string(),
        kind,
        discount,
        period: DateRange::new(date(start), date(end)).unwrap(),
        status: PromotionStatus::Active,
        room_ids: ["101".to_string()].into_iter().collect(),
        service_ids: ["breakfast".to_string()].into_iter().collect(),
    }
}

fn pct(n: i64) -> DiscountSpec {
    DiscountSpec::percent(Decimal::from(n)).unwrap()
}

#[test]
fn applicable_within_period_inclusive() {
    let p = promo("p", PromotionKind::Room, pct(10), "2025-01-01", "2025-01-31");
    let room = ResourceRef::room("101");

    assert!(is_promotion_applicable_now(&p, &room, date("2025-01-01")));
    assert!(is_promotion_applicable_now(&p, &room, date("2025-01-31")));
    assert!(!is_promotion_applicable_now(&p, &room, date("2024-12-31")));
    assert!(!is_promotion_applicable_now(&p, &room, date("2025-02-01")));
}

#[test]
fn not_applicable_when_inactive_or_expired() {
    let mut p = promo("p", PromotionKind::Room, pct(10), "2025-01-01", "2025-01-31");
    let room = ResourceRef::room("101");

    p.status = PromotionStatus::Inactive;
    assert!(!is_promotion_applicable_now(&p, &room, date("2025-01-10")));

    p.status = PromotionStatus::Expired;
    assert!(!is_promotion_applicable_now(&p, &room, date("2025-01-10")));
}

#[test]
fn kind_decides_which_assignments_count() {
    let room = ResourceRef::room("101");
    let service = ResourceRef::service("breakfast");
    let as_of = date("2025-01-10");

    let room_only = promo("r", PromotionKind::Room, pct(10), "2025-01-01", "2025-01-31");
    assert!(is_promotion_applicable_now(&room_only, &room, as_of));
    assert!(!is_promotion_applicable_now(&room_only, &service, as_of));

    let service_only = promo("s", PromotionKind::Service, pct(10), "2025-01-01", "2025-01-31");
    assert!(!is_promotion_applicable_now(&service_only, &room, as_of));
    assert!(is_promotion_applicable_now(&service_only, &service, as_of));

    let combo = promo("c", PromotionKind::Combo, pct(10), "2025-01-01", "2025-01-31");
    assert!(is_promotion_applicable_now(&combo, &room, as_of));
    assert!(is_promotion_applicable_now(&combo, &service, as_of));
}

#[test]
fn unassigned_resource_is_not_applicable() {
    let p = promo("p", PromotionKind::Room, pct(10), "2025-01-01", "2025-01-31");
    assert!(!is_promotion_applicable_now(
        &p,
        &ResourceRef::room("202"),
        date("2025-01-10")
    ));
}

#[test]
fn available_promotions_sorted_by_start_then_id() {
    let promotions = vec![
        promo("z", PromotionKind::Room, pct(10), "2025-01-05", "2025-01-31"),
        promo("b", PromotionKind::Room, pct(20), "2025-01-01", "2025-01-31"),
        promo("a", PromotionKind::Room, pct(5), "2025-01-01", "2025-01-31"),
        promo("later", PromotionKind::Room, pct(50), "2025-02-01", "2025-02-28"),
    ];

    let room = ResourceRef::room("101");
    let ids: Vec<&str> = available_promotions(&promotions, &room, date("2025-01-10"))
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();

    assert_eq!(ids, vec!["a", "b", "z"]);
}

#[test]
fn filter_by_derived_status_and_type() {
    let mut paused = promo("paused", PromotionKind::Room, pct(10), "2025-01-01", "2025-12-31");
    paused.status = PromotionStatus::Inactive;
    let old = promo("old", PromotionKind::Room, pct(10), "2024-01-01", "2024-01-31");
    let live_amount = promo(
        "live",
        PromotionKind::Room,
        DiscountSpec::amount(Decimal::from(1000)).unwrap(),
        "2025-01-01",
        "2025-12-31",
    );
    let promotions = vec![paused, old, live_amount];
    let as_of = date("2025-06-01");

    let expired = PromotionFilter {
        status: Some(PromotionStatus::Expired),
        discount_type: None,
    };
    let ids: Vec<&str> = expired.apply(&promotions, as_of).iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["old"]);

    let percent = PromotionFilter {
        status: None,
        discount_type: Some(DiscountType::Percent),
    };
    assert_eq!(percent.apply(&promotions, as_of).len(), 2);

    let active_amount = PromotionFilter {
        status: Some(PromotionStatus::Active),
        discount_type: Some(DiscountType::Amount),
    };
    let ids: Vec<&str> = active_amount
        .apply(&promotions, as_of)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["live"]);

    assert_eq!(PromotionFilter::default().apply(&promotions, as_of).len(), 3);
}
