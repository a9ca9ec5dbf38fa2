//! Price a booking selection with the best promotion per line.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PromoError, Result};
use crate::promotion::{Promotion, ResourceRef};
use crate::selector::select_best_promotion;

/// One room or service in a booking, e.g. a room for three nights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub resource: ResourceRef,
    pub unit_price: Decimal,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedLine {
    pub resource: ResourceRef,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub discounted_unit_price: Decimal,
    pub promotion_id: Option<String>,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub savings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub as_of: NaiveDate,
    pub lines: Vec<QuotedLine>,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub savings: Decimal,
}

/// Quote `lines` on `as_of`. The discount is applied to the unit price, then
/// multiplied by the quantity.
///
/// # Errors
/// Returns `PromoError::NegativeBasePrice` if any line has a negative unit price,
/// and `PromoError::Overflow` if a line or the booking total is too large.
pub fn quote(promotions: &[Promotion], lines: &[QuoteLine], as_of: NaiveDate) -> Result<Quote> {
    let mut quoted = Vec::with_capacity(lines.len());

    for line in lines {
        if line.unit_price < Decimal::ZERO {
            return Err(PromoError::NegativeBasePrice(line.unit_price));
        }
        let selection = select_best_promotion(promotions, &line.resource, line.unit_price, as_of);
        let quantity = Decimal::from(line.quantity);
        let subtotal = line
            .unit_price
            .checked_mul(quantity)
            .ok_or(PromoError::Overflow("line subtotal"))?;
        let total = selection
            .discounted_price
            .checked_mul(quantity)
            .ok_or(PromoError::Overflow("line total"))?;

        quoted.push(QuotedLine {
            resource: line.resource.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            discounted_unit_price: selection.discounted_price,
            promotion_id: selection.promotion_id().map(str::to_string),
            subtotal,
            total,
            savings: subtotal - total,
        });
    }

    let subtotal = checked_sum(quoted.iter().map(|l| l.subtotal), "quote subtotal")?;
    let total = checked_sum(quoted.iter().map(|l| l.total), "quote total")?;
    let savings = checked_sum(quoted.iter().map(|l| l.savings), "quote savings")?;

    Ok(Quote {
        as_of,
        lines: quoted,
        subtotal,
        total,
        savings,
    })
}

fn checked_sum(mut amounts: impl Iterator<Item = Decimal>, what: &'static str) -> Result<Decimal> {
    amounts.try_fold(Decimal::ZERO, |acc, amount| {
        acc.checked_add(amount).ok_or(PromoError::Overflow(what))
    })
}
