//! Enforcement of the one-live-promotion-per-resource rule.
//!
//! Two active promotions with overlapping periods may not share a room or a
//! service. A new assignment is only accepted when its start date is strictly
//! after the end of every active promotion already holding that resource.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::conflict::{build_conflict_index, ConflictIndex};
use crate::error::{PromoError, Result};
use crate::promotion::{Promotion, PromotionStatus, Resource};
use crate::status::derive_status;

/// Conflict index over the promotions that are active on `as_of`, against the
/// candidate's period and excluding the candidate itself.
pub fn active_conflicts(
    existing: &[Promotion],
    candidate: &Promotion,
    as_of: NaiveDate,
) -> ConflictIndex {
    let live: Vec<Promotion> = existing
        .iter()
        .filter(|p| derive_status(p, as_of) == PromotionStatus::Active)
        .cloned()
        .collect();
    build_conflict_index(
        &live,
        candidate.period.start(),
        candidate.period.end(),
        Some(candidate.id.as_str()),
    )
}

/// Validate `candidate` against the already-saved `existing` promotions.
///
/// Candidates that are not active on `as_of` are not checked; the rule is
/// re-applied when they are switched back on.
///
/// # Errors
/// Returns `PromoError::AssignmentKindMismatch` if the candidate's assignments do
/// not fit its kind, and `PromoError::AssignmentConflict` for the first assigned
/// resource (rooms before services, ascending id) that is still blocked.
pub fn validate_assignment(
    existing: &[Promotion],
    candidate: &Promotion,
    as_of: NaiveDate,
) -> Result<()> {
    candidate.check_assignments()?;

    if derive_status(candidate, as_of) != PromotionStatus::Active {
        debug!(promotion = %candidate.id, "candidate not active; skipping conflict check");
        return Ok(());
    }

    let index = active_conflicts(existing, candidate, as_of);
    let start = candidate.period.start();

    for resource in candidate.assigned_resources() {
        if let Some(blocking_until) = index.blocking_until(&resource) {
            if !index.is_assignable(&resource, start) {
                return Err(PromoError::AssignmentConflict {
                    resource: resource.kind,
                    resource_id: resource.id,
                    blocking_until,
                });
            }
        }
    }
    Ok(())
}

/// A resource together with whether it can be assigned to the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAvailability {
    #[serde(flatten)]
    pub resource: Resource,
    pub assignable: bool,
    pub blocking_until: Option<NaiveDate>,
}

/// Assignability of each of `resources` for `candidate`, in input order.
///
/// This is what the admin form uses to enable or disable each room and service
/// checkbox while the candidate's dates are being edited.
pub fn assignable_resources(
    existing: &[Promotion],
    candidate: &Promotion,
    resources: &[Resource],
    as_of: NaiveDate,
) -> Vec<ResourceAvailability> {
    let index = active_conflicts(existing, candidate, as_of);
    let start = candidate.period.start();

    resources
        .iter()
        .map(|resource| ResourceAvailability {
            resource: resource.clone(),
            assignable: index.is_assignable(&resource.reference, start),
            blocking_until: index.blocking_until(&resource.reference),
        })
        .collect()
}
