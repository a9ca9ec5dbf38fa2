//! Canonical promotion model.
//!
//! These are the shapes every other module works with. Records arriving from the
//! booking API are translated into them once, in [`crate::wire`]; nothing past
//! that boundary looks at localized field names.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::discount::DiscountSpec;
use crate::error::PromoError;
use crate::overlap::DateRange;

/// Which resource collections a promotion's assignments reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    Room,
    Service,
    /// Rooms and services together.
    Combo,
}

impl PromotionKind {
    /// Whether promotions of this kind may be assigned to resources of `resource`.
    pub fn covers(self, resource: ResourceKind) -> bool {
        matches!(
            (self, resource),
            (PromotionKind::Combo, _)
                | (PromotionKind::Room, ResourceKind::Room)
                | (PromotionKind::Service, ResourceKind::Service)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromotionKind::Room => "room",
            PromotionKind::Service => "service",
            PromotionKind::Combo => "combo",
        }
    }
}

impl fmt::Display for PromotionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionKind {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(PromotionKind::Room),
            "service" => Ok(PromotionKind::Service),
            "combo" => Ok(PromotionKind::Combo),
            other => Err(PromoError::UnknownKind(other.to_string())),
        }
    }
}

/// Stored promotion status.
///
/// `Expired` is normally derived from dates (see [`crate::status`]); a record may
/// also arrive already marked expired by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionStatus {
    Active,
    /// Paused by an operator.
    Inactive,
    Expired,
}

impl PromotionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PromotionStatus::Active => "active",
            PromotionStatus::Inactive => "inactive",
            PromotionStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionStatus {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(PromotionStatus::Active),
            "inactive" => Ok(PromotionStatus::Inactive),
            "expired" => Ok(PromotionStatus::Expired),
            other => Err(PromoError::UnknownStatus(other.to_string())),
        }
    }
}

/// The two assignable resource namespaces. Ids are only unique within a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Room,
    Service,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Room => f.write_str("room"),
            ResourceKind::Service => f.write_str("service"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = PromoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(ResourceKind::Room),
            "service" => Ok(ResourceKind::Service),
            other => Err(PromoError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// Identity of a room or service, as far as promotion resolution is concerned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: String,
}

impl ResourceRef {
    pub fn room(id: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Room,
            id: id.into(),
        }
    }

    pub fn service(id: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Service,
            id: id.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A room or service with its display name, as listed in the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(flatten)]
    pub reference: ResourceRef,
    pub name: String,
}

/// A discount campaign over a date range, assigned to rooms and/or services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub name: String,
    pub kind: PromotionKind,
    pub discount: DiscountSpec,
    pub period: DateRange,
    pub status: PromotionStatus,
    #[serde(default)]
    pub room_ids: BTreeSet<String>,
    #[serde(default)]
    pub service_ids: BTreeSet<String>,
}

impl Promotion {
    /// Assigned ids for `resource`, or `None` when the promotion's kind does not
    /// cover that resource kind (stray assignments are ignored).
    pub fn assigned(&self, resource: ResourceKind) -> Option<&BTreeSet<String>> {
        if !self.kind.covers(resource) {
            return None;
        }
        match resource {
            ResourceKind::Room => Some(&self.room_ids),
            ResourceKind::Service => Some(&self.service_ids),
        }
    }

    /// Whether this promotion is assigned to `resource` under its kind.
    pub fn is_assigned_to(&self, resource: &ResourceRef) -> bool {
        self.assigned(resource.kind)
            .is_some_and(|ids| ids.contains(&resource.id))
    }

    /// Every resource this promotion is assigned to under its kind, rooms first.
    pub fn assigned_resources(&self) -> impl Iterator<Item = ResourceRef> + '_ {
        let rooms = self
            .assigned(ResourceKind::Room)
            .into_iter()
            .flatten()
            .map(|id| ResourceRef::room(id.clone()));
        let services = self
            .assigned(ResourceKind::Service)
            .into_iter()
            .flatten()
            .map(|id| ResourceRef::service(id.clone()));
        rooms.chain(services)
    }

    /// Reject assignments the promotion's kind cannot carry.
    ///
    /// # Errors
    /// Returns `PromoError::AssignmentKindMismatch` when a room promotion lists
    /// services or a service promotion lists rooms.
    pub fn check_assignments(&self) -> crate::error::Result<()> {
        for (resource, ids) in [
            (ResourceKind::Room, &self.room_ids),
            (ResourceKind::Service, &self.service_ids),
        ] {
            if !ids.is_empty() && !self.kind.covers(resource) {
                return Err(PromoError::AssignmentKindMismatch {
                    promotion_id: self.id.clone(),
                    kind: self.kind.as_str(),
                    resource,
                });
            }
        }
        Ok(())
    }
}
