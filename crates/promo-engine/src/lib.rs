//! # promo-engine
//!
//! Deterministic promotion resolution for hotel rooms and services.
//!
//! The engine answers the questions the booking site and the admin back-office
//! keep asking about promotions: what does this room cost after its discount,
//! which promotion is the best deal today, and may this promotion be assigned to
//! this room without clashing with another live promotion. Every function is pure
//! and takes the evaluation date explicitly, so results never depend on the wall
//! clock.
//!
//! ## Modules
//!
//! - [`discount`]: Percent / fixed-amount discount arithmetic
//! - [`overlap`]: Inclusive calendar date ranges and their overlap test
//! - [`conflict`]: Per-resource index of promotions blocking a candidate range
//! - [`applicability`]: Whether a promotion applies to a resource on a date
//! - [`selector`]: Best-promotion selection by savings
//! - [`status`]: Date-derived promotion status
//! - [`assignment`]: Rejecting assignments that would double-promote a resource
//! - [`quote`]: Pricing a whole booking selection
//! - [`wire`]: Booking-API record mapping
//! - [`error`]: Error types

pub mod applicability;
pub mod assignment;
pub mod conflict;
pub mod discount;
pub mod error;
pub mod overlap;
pub mod promotion;
pub mod quote;
pub mod selector;
pub mod status;
pub mod wire;

pub use applicability::{available_promotions, is_promotion_applicable_now, PromotionFilter};
pub use assignment::{assignable_resources, validate_assignment, ResourceAvailability};
pub use conflict::{build_conflict_index, is_assignable, ConflictIndex};
pub use discount::{compute_discounted_price, savings, DiscountSpec, DiscountType};
pub use error::PromoError;
pub use overlap::{overlaps, DateRange};
pub use promotion::{
    Promotion, PromotionKind, PromotionStatus, Resource, ResourceKind, ResourceRef,
};
pub use quote::{quote, Quote, QuoteLine, QuotedLine};
pub use selector::{select_best_promotion, Selection};
pub use status::derive_status;
pub use wire::{parse_date, parse_promotions, WirePromotion};
