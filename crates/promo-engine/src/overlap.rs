//! Closed-interval overlap of calendar date ranges.
//!
//! Promotion periods are inclusive on both ends and carry no time of day, so two
//! ranges that touch on a single day DO overlap. This differs from datetime
//! intervals, where an event ending at 10:00 and another starting at 10:00 are
//! merely adjacent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PromoError, Result};

/// Returns true iff `[a_start, a_end]` and `[b_start, b_end]` share at least one day.
///
/// Equal ranges overlap, as does a range fully containing another.
pub fn overlaps(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// An inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = PromoError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// # Errors
    /// Returns `PromoError::InvalidDateRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(PromoError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
