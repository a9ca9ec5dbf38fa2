//! Whether a promotion applies to a resource on a given date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::discount::DiscountType;
use crate::promotion::{Promotion, PromotionStatus, ResourceRef};
use crate::status::derive_status;

/// True iff `promotion` is active on `as_of`, `as_of` lies within its period, and
/// `resource` is among its assignments for its kind.
pub fn is_promotion_applicable_now(
    promotion: &Promotion,
    resource: &ResourceRef,
    as_of: NaiveDate,
) -> bool {
    derive_status(promotion, as_of) == PromotionStatus::Active
        && promotion.period.contains(as_of)
        && promotion.is_assigned_to(resource)
}

/// All promotions applicable to `resource` on `as_of`, ordered by start date then id.
pub fn available_promotions<'a>(
    promotions: &'a [Promotion],
    resource: &ResourceRef,
    as_of: NaiveDate,
) -> Vec<&'a Promotion> {
    let mut available: Vec<&Promotion> = promotions
        .iter()
        .filter(|p| is_promotion_applicable_now(p, resource, as_of))
        .collect();
    available.sort_by(|a, b| {
        a.period
            .start()
            .cmp(&b.period.start())
            .then_with(|| a.id.cmp(&b.id))
    });
    available
}

/// Optional list filters, matching the promotion listing endpoint's query
/// parameters. Status is compared against the derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionFilter {
    pub status: Option<PromotionStatus>,
    pub discount_type: Option<DiscountType>,
}

impl PromotionFilter {
    pub fn matches(&self, promotion: &Promotion, as_of: NaiveDate) -> bool {
        let status_ok = self
            .status
            .is_none_or(|s| derive_status(promotion, as_of) == s);
        let type_ok = self
            .discount_type
            .is_none_or(|t| promotion.discount.discount_type() == t);
        status_ok && type_ok
    }

    /// Promotions passing the filter, in input order.
    pub fn apply<'a>(&self, promotions: &'a [Promotion], as_of: NaiveDate) -> Vec<&'a Promotion> {
        promotions
            .iter()
            .filter(|p| self.matches(p, as_of))
            .collect()
    }
}
