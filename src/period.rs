use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::budget::YearMonth;
use crate::errors::{BudgetError, Result};

/// Inclusive date interval. Both ends count as whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawPeriod> for Period {
    type Error = BudgetError;

    fn try_from(raw: RawPeriod) -> Result<Self> {
        Period::new(raw.start, raw.end)
    }
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(BudgetError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self> {
        Ok(YearMonth::of(date)?.period())
    }

    /// Callers guarantee `first <= last`.
    pub(crate) fn month_span(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: first,
            end: last,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive day count; at least 1.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn overlaps(&self, other: &Period) -> bool {
        !(self.end < other.start || self.start > other.end)
    }

    /// The days both periods share, or `None` when they are disjoint.
    pub fn overlapping_period(&self, other: &Period) -> Option<Period> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Period {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }

    pub fn overlapping_days(&self, other: &Period) -> i64 {
        self.overlapping_period(other)
            .map(|overlap| overlap.total_days())
            .unwrap_or(0)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
