//! Error types for promo-engine operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::promotion::ResourceKind;

#[derive(Error, Debug)]
pub enum PromoError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Discount value {value} out of range for {discount_type}")]
    DiscountOutOfRange {
        discount_type: &'static str,
        value: Decimal,
    },

    #[error("Base price must not be negative, got {0}")]
    NegativeBasePrice(Decimal),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("Unknown discount type: {0}")]
    UnknownDiscountType(String),

    #[error("Unknown promotion kind: {0}")]
    UnknownKind(String),

    #[error("Unknown promotion status: {0}")]
    UnknownStatus(String),

    #[error("Unknown resource kind: {0}")]
    UnknownResourceKind(String),

    #[error("Promotion {promotion_id}: {kind} promotions cannot carry {resource} assignments")]
    AssignmentKindMismatch {
        promotion_id: String,
        kind: &'static str,
        resource: ResourceKind,
    },

    #[error("{resource} {resource_id} is already promoted until {blocking_until}")]
    AssignmentConflict {
        resource: ResourceKind,
        resource_id: String,
        blocking_until: NaiveDate,
    },

    #[error("Invalid promotion record: {0}")]
    InvalidRecord(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PromoError>;
