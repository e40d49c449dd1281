//! Total budget owed over a date range.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::budget::{Budget, YearMonth};
use crate::errors::{BudgetError, Result};
use crate::period::Period;
use crate::storage::BudgetRepository;

/// One budget month's share of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyContribution {
    pub year_month: YearMonth,
    pub overlapping_days: i64,
    pub daily_rate: i64,
    pub amount: i64,
}

/// Stateless calculator over a budget repository.
#[derive(Debug, Clone)]
pub struct Accounting<R> {
    repo: R,
}

impl<R: BudgetRepository> Accounting<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Sums every budget's prorated share of `start..=end`.
    ///
    /// Fails with [`BudgetError::InvalidRange`] before touching the repository
    /// when `start > end`. Months without a budget contribute nothing.
    pub fn total_amount(&self, start: NaiveDate, end: NaiveDate) -> Result<i64> {
        let query = Period::new(start, end)?;
        let budgets = self.load_budgets()?;
        let mut total: i64 = 0;
        for budget in &budgets {
            total = total
                .checked_add(budget.effective_amount(&query)?)
                .ok_or_else(|| overflow(&query))?;
        }
        tracing::debug!(%query, budgets = budgets.len(), total, "computed total amount");
        Ok(total)
    }

    /// Per-month contributions to `start..=end`, ordered by month. Only months
    /// with a budget that overlaps the query appear; amounts sum to
    /// [`Accounting::total_amount`].
    pub fn breakdown(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<MonthlyContribution>> {
        let query = Period::new(start, end)?;
        let budgets = self.load_budgets()?;
        let mut contributions = Vec::new();
        for budget in &budgets {
            let month = budget.month()?;
            let overlapping_days = query.overlapping_days(&month.period());
            if overlapping_days == 0 {
                continue;
            }
            let daily_rate = budget.daily_rate()?;
            let amount = daily_rate
                .checked_mul(overlapping_days)
                .ok_or_else(|| overflow(&query))?;
            contributions.push(MonthlyContribution {
                year_month: month,
                overlapping_days,
                daily_rate,
                amount,
            });
        }
        contributions.sort_by_key(|c| c.year_month);
        tracing::debug!(%query, months = contributions.len(), "computed breakdown");
        Ok(contributions)
    }

    fn load_budgets(&self) -> Result<Vec<Budget>> {
        let budgets = self.repo.all()?;
        ensure_unique_months(&budgets)?;
        Ok(budgets)
    }
}

fn overflow(query: &Period) -> BudgetError {
    tracing::warn!(%query, "budget total does not fit in i64");
    BudgetError::AmountOverflow(query.to_string())
}

/// Rejects malformed month keys and repeated months.
fn ensure_unique_months(budgets: &[Budget]) -> Result<()> {
    let mut seen = HashSet::with_capacity(budgets.len());
    for budget in budgets {
        let month = budget.month()?;
        if !seen.insert(month) {
            tracing::warn!(year_month = %month, "repository returned duplicate budget month");
            return Err(BudgetError::DuplicateYearMonth(month.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBudgetRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct CountingRepository {
        inner: InMemoryBudgetRepository,
        fetches: AtomicUsize,
    }

    impl BudgetRepository for CountingRepository {
        fn all(&self) -> Result<Vec<Budget>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.all()
        }
    }

    struct FailingRepository;

    impl BudgetRepository for FailingRepository {
        fn all(&self) -> Result<Vec<Budget>> {
            Err(BudgetError::Repository("offline".into()))
        }
    }

    #[test]
    fn invalid_range_is_raised_before_fetching() {
        let repo = CountingRepository {
            inner: InMemoryBudgetRepository::default(),
            fetches: AtomicUsize::new(0),
        };
        let accounting = Accounting::new(&repo);
        let err = accounting
            .total_amount(date(2018, 3, 1), date(2018, 2, 1))
            .unwrap_err();
        assert!(matches!(err, BudgetError::InvalidRange { .. }));
        assert_eq!(repo.fetches.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fetches_once_per_query() {
        let repo = CountingRepository {
            inner: InMemoryBudgetRepository::new(vec![
                Budget::new("201801", 62),
                Budget::new("201802", 280),
            ]),
            fetches: AtomicUsize::new(0),
        };
        let accounting = Accounting::new(&repo);
        assert_eq!(
            accounting
                .total_amount(date(2018, 1, 1), date(2018, 2, 28))
                .unwrap(),
            342
        );
        assert_eq!(repo.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repository_failures_propagate() {
        let accounting = Accounting::new(FailingRepository);
        let err = accounting
            .total_amount(date(2018, 1, 1), date(2018, 1, 31))
            .unwrap_err();
        assert!(matches!(err, BudgetError::Repository(_)));
    }

    #[test]
    fn duplicate_months_are_rejected() {
        let accounting = Accounting::new(InMemoryBudgetRepository::new(vec![
            Budget::new("201801", 62),
            Budget::new("201801", 31),
        ]));
        let err = accounting
            .total_amount(date(2018, 1, 1), date(2018, 1, 31))
            .unwrap_err();
        assert!(matches!(err, BudgetError::DuplicateYearMonth(ref m) if m == "201801"));
    }

    #[test]
    fn total_overflow_is_an_error_not_a_panic() {
        let accounting = Accounting::new(InMemoryBudgetRepository::new(vec![
            Budget::new("201801", i64::MAX),
            Budget::new("201802", i64::MAX),
        ]));
        let err = accounting
            .total_amount(date(2018, 1, 1), date(2018, 2, 28))
            .unwrap_err();
        assert!(matches!(err, BudgetError::AmountOverflow(ref q) if q == "2018-01-01..2018-02-28"));
    }

    #[test]
    fn negative_overflow_is_an_error_too() {
        let accounting = Accounting::new(InMemoryBudgetRepository::new(vec![
            Budget::new("201801", i64::MIN),
            Budget::new("201802", i64::MIN),
        ]));
        assert!(matches!(
            accounting.total_amount(date(2018, 1, 1), date(2018, 2, 28)),
            Err(BudgetError::AmountOverflow(_))
        ));
    }

    #[test]
    fn breakdown_of_extreme_amounts_stays_per_month() {
        let accounting = Accounting::new(InMemoryBudgetRepository::new(vec![
            Budget::new("201801", i64::MAX),
            Budget::new("201802", i64::MAX),
        ]));
        let rows = accounting
            .breakdown(date(2018, 1, 1), date(2018, 2, 28))
            .unwrap();
        assert_eq!(rows[0].amount, (i64::MAX / 31) * 31);
        assert_eq!(rows[1].amount, (i64::MAX / 28) * 28);
    }

    #[test]
    fn breakdown_lists_overlapping_months_in_order() {
        let accounting = Accounting::new(InMemoryBudgetRepository::new(vec![
            Budget::new("201803", 62),
            Budget::new("201801", 62),
            Budget::new("201806", 300),
        ]));
        let rows = accounting
            .breakdown(date(2018, 1, 1), date(2018, 3, 10))
            .unwrap();
        let months: Vec<String> = rows.iter().map(|r| r.year_month.to_string()).collect();
        assert_eq!(months, ["201801", "201803"]);
        assert_eq!(rows[1].overlapping_days, 10);
        assert_eq!(rows[1].daily_rate, 2);
        assert_eq!(rows[1].amount, 20);
    }
}
