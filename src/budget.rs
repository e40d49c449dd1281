//! Monthly budget records and the calendar month they cover.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{BudgetError, Result};
use crate::period::Period;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A specific calendar month, keyed as `yyyyMM` (e.g. `201801`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl YearMonth {
    /// Years are limited to what the four-digit key can carry.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let invalid = || BudgetError::InvalidYearMonth(format!("{year:04}{month:02}"));
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(invalid());
        }
        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last_day = last_day_of(first_day).ok_or_else(invalid)?;
        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day.day()
    }

    pub fn period(&self) -> Period {
        Period::month_span(self.first_day, self.last_day)
    }
}

impl FromStr for YearMonth {
    type Err = BudgetError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = || BudgetError::InvalidYearMonth(raw.to_string());
        if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = raw[..4].parse().map_err(|_| invalid())?;
        let month: u32 = raw[4..].parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for YearMonth {
    type Error = BudgetError;

    fn try_from(raw: String) -> Result<Self> {
        raw.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year(), self.month())
    }
}

/// A monthly allocation, accrued uniformly across the days of its month.
///
/// Records arrive from a repository as-is; `year_month` is only validated when a
/// calculation needs it, so malformed data surfaces as
/// [`BudgetError::InvalidYearMonth`] instead of being skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub year_month: String,
    pub amount: i64,
}

impl Budget {
    pub fn new(year_month: impl Into<String>, amount: i64) -> Self {
        Self {
            year_month: year_month.into(),
            amount,
        }
    }

    pub fn month(&self) -> Result<YearMonth> {
        self.year_month.parse()
    }

    pub fn month_period(&self) -> Result<Period> {
        Ok(self.month()?.period())
    }

    /// `amount / days_in_month`, truncated toward zero.
    pub fn daily_rate(&self) -> Result<i64> {
        let month = self.month()?;
        Ok(rate_for(self.amount, &month))
    }

    /// The prorated share of this budget that falls inside `query`.
    ///
    /// The daily rate is truncated before it is multiplied by the overlapping
    /// day count, so a full month of a budget that does not divide evenly
    /// yields less than `amount`.
    pub fn effective_amount(&self, query: &Period) -> Result<i64> {
        let month = self.month()?;
        let days = query.overlapping_days(&month.period());
        rate_for(self.amount, &month)
            .checked_mul(days)
            .ok_or_else(|| BudgetError::AmountOverflow(query.to_string()))
    }
}

fn rate_for(amount: i64, month: &YearMonth) -> i64 {
    amount / i64::from(month.days_in_month())
}

fn last_day_of(first_day: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = match first_day.month() {
        12 => (first_day.year() + 1, 1),
        month => (first_day.year(), month + 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
}
