//! Discount arithmetic.
//!
//! Prices are whole currency units; every computed price is rounded to the
//! nearest unit with halves rounding up. Inputs are never clamped: an out-of-range
//! discount or a negative base price is an error.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{PromoError, Result};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percentage of the base price, in `[0, 100]`.
    Percent,
    /// Fixed currency amount off the base price.
    Amount,
}

impl DiscountType {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscountType::Percent => "percent",
            DiscountType::Amount => "amount",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "percent" => Ok(DiscountType::Percent),
            "amount" => Ok(DiscountType::Amount),
            other => Err(PromoError::UnknownDiscountType(other.to_string())),
        }
    }
}

/// A validated discount: type plus value within that type's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDiscount")]
pub struct DiscountSpec {
    #[serde(rename = "type")]
    discount_type: DiscountType,
    value: Decimal,
}

#[derive(Deserialize)]
struct RawDiscount {
    #[serde(rename = "type")]
    discount_type: DiscountType,
    value: Decimal,
}

impl TryFrom<RawDiscount> for DiscountSpec {
    type Error = PromoError;

    fn try_from(raw: RawDiscount) -> Result<Self> {
        DiscountSpec::new(raw.discount_type, raw.value)
    }
}

impl DiscountSpec {
    /// # Errors
    /// Returns `PromoError::DiscountOutOfRange` if `value` is negative, or above
    /// 100 for a percent discount.
    pub fn new(discount_type: DiscountType, value: Decimal) -> Result<Self> {
        let in_range = match discount_type {
            DiscountType::Percent => value >= Decimal::ZERO && value <= HUNDRED,
            DiscountType::Amount => value >= Decimal::ZERO,
        };
        if !in_range {
            return Err(PromoError::DiscountOutOfRange {
                discount_type: discount_type.as_str(),
                value,
            });
        }
        Ok(Self {
            discount_type,
            value,
        })
    }

    pub fn percent(value: Decimal) -> Result<Self> {
        Self::new(DiscountType::Percent, value)
    }

    pub fn amount(value: Decimal) -> Result<Self> {
        Self::new(DiscountType::Amount, value)
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Final price after applying this discount to `base_price`.
    ///
    /// # Errors
    /// Returns `PromoError::NegativeBasePrice` if `base_price < 0`, and
    /// `PromoError::Overflow` if the price is too large to discount.
    pub fn apply(&self, base_price: Decimal) -> Result<Decimal> {
        if base_price < Decimal::ZERO {
            return Err(PromoError::NegativeBasePrice(base_price));
        }
        let raw = match self.discount_type {
            DiscountType::Percent => base_price
                .checked_mul(HUNDRED - self.value)
                .and_then(|scaled| scaled.checked_div(HUNDRED)),
            DiscountType::Amount => base_price.checked_sub(self.value),
        }
        .ok_or(PromoError::Overflow("discounted price"))?;
        Ok(round_currency(raw).max(Decimal::ZERO))
    }
}

/// Compute the discounted price for a base price and a discount specification.
///
/// - `percent`: `round(base * (1 - value / 100))`
/// - `amount`: `max(0, round(base - value))`
///
/// # Errors
/// Returns `PromoError::NegativeBasePrice`, `PromoError::DiscountOutOfRange` or
/// `PromoError::Overflow` when a precondition does not hold.
pub fn compute_discounted_price(
    base_price: Decimal,
    discount_type: DiscountType,
    discount_value: Decimal,
) -> Result<Decimal> {
    DiscountSpec::new(discount_type, discount_value)?.apply(base_price)
}

/// Money saved going from `base_price` to `discounted_price`.
pub fn savings(base_price: Decimal, discounted_price: Decimal) -> Decimal {
    base_price - discounted_price
}

/// Round to the nearest whole currency unit, halves away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
