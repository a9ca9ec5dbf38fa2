//! Automatic best-promotion selection.

use std::cmp::Ordering;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::applicability::is_promotion_applicable_now;
use crate::discount::savings;
use crate::promotion::{Promotion, ResourceRef};

/// Outcome of best-promotion selection. `promotion` is `None` when nothing applies,
/// in which case the price is unchanged and savings are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub promotion: Option<Promotion>,
    pub discounted_price: Decimal,
    pub savings: Decimal,
}

impl Selection {
    pub fn none(base_price: Decimal) -> Self {
        Self {
            promotion: None,
            discounted_price: base_price,
            savings: Decimal::ZERO,
        }
    }

    pub fn promotion_id(&self) -> Option<&str> {
        self.promotion.as_ref().map(|p| p.id.as_str())
    }
}

/// Pick the applicable promotion with the greatest savings on `base_price`.
///
/// Candidates are first filtered with [`is_promotion_applicable_now`]. Ties on
/// savings go to the earliest start date, then the lowest id, so the result does
/// not depend on input order.
///
/// A negative `base_price` cannot be discounted, so it yields the empty selection.
/// A candidate whose discount overflows at this price is skipped.
pub fn select_best_promotion(
    candidates: &[Promotion],
    resource: &ResourceRef,
    base_price: Decimal,
    as_of: NaiveDate,
) -> Selection {
    if base_price < Decimal::ZERO {
        warn!(%base_price, %resource, "negative base price; no promotion applied");
        return Selection::none(base_price);
    }

    let mut best: Option<(&Promotion, Decimal)> = None;

    for promotion in candidates
        .iter()
        .filter(|p| is_promotion_applicable_now(p, resource, as_of))
    {
        let price = match promotion.discount.apply(base_price) {
            Ok(price) => price,
            Err(err) => {
                warn!(promotion = %promotion.id, %resource, %err, "discount not applicable");
                continue;
            }
        };
        best = match best {
            Some((current, current_price)) if !beats(promotion, price, current, current_price) => {
                Some((current, current_price))
            }
            _ => Some((promotion, price)),
        };
    }

    match best {
        Some((promotion, price)) => {
            debug!(promotion = %promotion.id, %resource, %price, "selected best promotion");
            Selection {
                promotion: Some(promotion.clone()),
                discounted_price: price,
                savings: savings(base_price, price),
            }
        }
        None => Selection::none(base_price),
    }
}

/// Whether `challenger` priced at `challenger_price` should replace `current`.
/// A lower price means greater savings against the same base.
fn beats(
    challenger: &Promotion,
    challenger_price: Decimal,
    current: &Promotion,
    current_price: Decimal,
) -> bool {
    let order = challenger_price
        .cmp(&current_price)
        .then_with(|| challenger.period.start().cmp(&current.period.start()))
        .then_with(|| challenger.id.cmp(&current.id));
    order == Ordering::Less
}
