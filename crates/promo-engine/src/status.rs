//! Derived promotion status.
//!
//! Status is computed on read from the stored status and an explicit `as_of` date.
//! The only automatic transition is into `Expired` once `as_of` is past the end
//! date; nothing here ever produces `Active` from another state.

use chrono::NaiveDate;

use crate::promotion::{Promotion, PromotionStatus};

/// Effective status of `promotion` on `as_of`.
///
/// Operator-paused promotions expire the same way active ones do.
pub fn derive_status(promotion: &Promotion, as_of: NaiveDate) -> PromotionStatus {
    match promotion.status {
        PromotionStatus::Expired => PromotionStatus::Expired,
        _ if as_of > promotion.period.end() => PromotionStatus::Expired,
        stored => stored,
    }
}

impl Promotion {
    /// See [`derive_status`].
    pub fn status_on(&self, as_of: NaiveDate) -> PromotionStatus {
        derive_status(self, as_of)
    }
}
