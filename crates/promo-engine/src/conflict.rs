//! Conflict index: which resources are already promoted during a candidate range.
//!
//! For every promotion whose period overlaps the candidate range, each resource it
//! is assigned to is blocked until that promotion's end date. When several
//! overlapping promotions reference the same resource, the latest end date wins.
//! Rooms and services are indexed separately so a blocked room id never blocks a
//! service with the same id.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::overlap::overlaps;
use crate::promotion::{Promotion, ResourceKind, ResourceRef};

/// Per-kind map of `resource id -> latest blocking end date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictIndex {
    pub rooms: BTreeMap<String, NaiveDate>,
    pub services: BTreeMap<String, NaiveDate>,
}

impl ConflictIndex {
    /// The map for one resource kind.
    pub fn for_kind(&self, kind: ResourceKind) -> &BTreeMap<String, NaiveDate> {
        match kind {
            ResourceKind::Room => &self.rooms,
            ResourceKind::Service => &self.services,
        }
    }

    fn for_kind_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<String, NaiveDate> {
        match kind {
            ResourceKind::Room => &mut self.rooms,
            ResourceKind::Service => &mut self.services,
        }
    }

    /// Latest end date blocking `resource`, if any.
    pub fn blocking_until(&self, resource: &ResourceRef) -> Option<NaiveDate> {
        self.for_kind(resource.kind).get(&resource.id).copied()
    }

    /// Whether `resource` may be assigned to a promotion starting on `candidate_start`.
    pub fn is_assignable(&self, resource: &ResourceRef, candidate_start: NaiveDate) -> bool {
        is_assignable(&resource.id, self.for_kind(resource.kind), candidate_start)
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.services.is_empty()
    }

    fn record(&mut self, resource: ResourceRef, end: NaiveDate) {
        self.for_kind_mut(resource.kind)
            .entry(resource.id)
            .and_modify(|blocking| *blocking = (*blocking).max(end))
            .or_insert(end);
    }
}

/// Build the conflict index of `promotions` against `[candidate_start, candidate_end]`.
///
/// The promotion whose id equals `exclude_promotion_id` is skipped, so a promotion
/// being edited does not conflict with its own saved version. Promotions whose
/// period does not overlap the candidate range contribute nothing.
///
/// Stored status is not consulted; callers that only care about live promotions
/// filter the input first (see [`crate::assignment`]).
pub fn build_conflict_index(
    promotions: &[Promotion],
    candidate_start: NaiveDate,
    candidate_end: NaiveDate,
    exclude_promotion_id: Option<&str>,
) -> ConflictIndex {
    let mut index = ConflictIndex::default();

    for promotion in promotions {
        if exclude_promotion_id == Some(promotion.id.as_str()) {
            continue;
        }
        let period = promotion.period;
        if !overlaps(period.start(), period.end(), candidate_start, candidate_end) {
            continue;
        }
        trace!(promotion = %promotion.id, end = %period.end(), "overlapping promotion");
        for resource in promotion.assigned_resources() {
            index.record(resource, period.end());
        }
    }

    debug!(
        %candidate_start,
        %candidate_end,
        rooms = index.rooms.len(),
        services = index.services.len(),
        "built conflict index"
    );
    index
}

/// Whether `resource_id` may be assigned given one kind's conflict map.
///
/// True when the id is not blocked at all, or when `candidate_start` is strictly
/// after the blocking end date. Starting on the blocking end date itself is not
/// allowed.
pub fn is_assignable(
    resource_id: &str,
    conflicts: &BTreeMap<String, NaiveDate>,
    candidate_start: NaiveDate,
) -> bool {
    match conflicts.get(resource_id) {
        None => true,
        Some(blocking_until) => candidate_start > *blocking_until,
    }
}
