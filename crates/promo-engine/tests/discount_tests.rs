//! Tests for discount arithmetic.

use promo_engine::discount::{round_currency, DiscountSpec, DiscountType};
use promo_engine::{compute_discounted_price, savings, PromoError};
use rust_decimal::Decimal;

fn d(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn percent_discount_twenty_percent() {
    let price = compute_discounted_price(d(100_000), DiscountType::Percent, d(20)).unwrap();
    assert_eq!(price, d(80_000));
}

#[test]
fn amount_discount_subtracts_value() {
    let price = compute_discounted_price(d(200_000), DiscountType::Amount, d(50_000)).unwrap();
    assert_eq!(price, d(150_000));
}

#[test]
fn amount_discount_never_negative() {
    let price = compute_discounted_price(d(5_000), DiscountType::Amount, d(10_000)).unwrap();
    assert_eq!(price, Decimal::ZERO);
}

#[test]
fn zero_and_full_percent() {
    assert_eq!(
        compute_discounted_price(d(123_456), DiscountType::Percent, d(0)).unwrap(),
        d(123_456)
    );
    assert_eq!(
        compute_discounted_price(d(123_456), DiscountType::Percent, d(100)).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn percent_result_rounds_to_whole_units() {
    // 999 * 0.85 = 849.15 -> 849
    assert_eq!(
        compute_discounted_price(d(999), DiscountType::Percent, d(15)).unwrap(),
        d(849)
    );
    // 5 * 0.5 = 2.5 -> 3 (halves round up)
    assert_eq!(
        compute_discounted_price(d(5), DiscountType::Percent, d(50)).unwrap(),
        d(3)
    );
}

#[test]
fn fractional_percent_is_supported() {
    // 200_000 * (1 - 0.125) = 175_000
    let value = Decimal::new(125, 1);
    assert_eq!(
        compute_discounted_price(d(200_000), DiscountType::Percent, value).unwrap(),
        d(175_000)
    );
}

#[test]
fn fractional_amount_rounds() {
    let value = Decimal::new(4995, 1); // 499.5
    // 1000 - 499.5 = 500.5 -> 501
    assert_eq!(
        compute_discounted_price(d(1_000), DiscountType::Amount, value).unwrap(),
        d(501)
    );
}

#[test]
fn percent_above_hundred_is_rejected() {
    let err = compute_discounted_price(d(100), DiscountType::Percent, d(101)).unwrap_err();
    assert!(matches!(err, PromoError::DiscountOutOfRange { .. }));
}

#[test]
fn negative_discount_is_rejected() {
    assert!(matches!(
        DiscountSpec::amount(d(-1)),
        Err(PromoError::DiscountOutOfRange { .. })
    ));
    assert!(matches!(
        DiscountSpec::percent(d(-5)),
        Err(PromoError::DiscountOutOfRange { .. })
    ));
}

#[test]
fn negative_base_price_is_rejected() {
    let err = compute_discounted_price(d(-1), DiscountType::Amount, d(0)).unwrap_err();
    assert!(matches!(err, PromoError::NegativeBasePrice(_)));
}

#[test]
fn savings_is_difference() {
    assert_eq!(savings(d(200_000), d(180_000)), d(20_000));
    assert_eq!(savings(d(5_000), d(0)), d(5_000));
}

#[test]
fn round_currency_midpoint() {
    assert_eq!(round_currency(Decimal::new(15, 1)), d(2));
    assert_eq!(round_currency(Decimal::new(14, 1)), d(1));
}

#[test]
fn discount_spec_deserialize_validates() {
    let ok: DiscountSpec = serde_json::from_str(r#"{"type":"percent","value":15}"#).unwrap();
    assert_eq!(ok.discount_type(), DiscountType::Percent);
    assert_eq!(ok.value(), d(15));

    let bad = serde_json::from_str::<DiscountSpec>(r#"{"type":"percent","value":150}"#);
    assert!(bad.is_err(), "out-of-range percent must not deserialize");
}

#[test]
fn discount_type_from_str() {
    assert_eq!("percent".parse::<DiscountType>().unwrap(), DiscountType::Percent);
    assert_eq!("amount".parse::<DiscountType>().unwrap(), DiscountType::Amount);
    assert!(matches!(
        "bogus".parse::<DiscountType>(),
        Err(PromoError::UnknownDiscountType(_))
    ));
}

#[test]
fn percent_discount_on_oversized_price_overflows() {
    let huge: Decimal = "70000000000000000000000000000".parse().unwrap();
    let result = compute_discounted_price(huge, DiscountType::Percent, d(10));
    assert!(matches!(result, Err(PromoError::Overflow(_))));
}
