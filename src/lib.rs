#![doc(test(attr(deny(warnings))))]

//! Budget Calculator prorates monthly budget allocations over arbitrary date
//! ranges.
//!
//! Each [`Budget`] assigns an amount to one calendar month, accrued at a
//! truncated daily rate. [`Accounting`] fetches every budget from a
//! [`BudgetRepository`] and sums the share of each month that falls inside the
//! queried range.
//!
//! ```
//! use budget_calculator::{Accounting, Budget, InMemoryBudgetRepository};
//! use chrono::NaiveDate;
//!
//! let repo = InMemoryBudgetRepository::new(vec![Budget::new("201801", 62)]);
//! let accounting = Accounting::new(repo);
//! let total = accounting
//!     .total_amount(
//!         NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2018, 1, 15).unwrap(),
//!     )
//!     .unwrap();
//! assert_eq!(total, 30);
//! ```

pub mod accounting;
pub mod budget;
pub mod config;
pub mod errors;
pub mod period;
pub mod storage;
pub mod utils;

pub use accounting::{Accounting, MonthlyContribution};
pub use budget::{Budget, YearMonth};
pub use config::{CalculatorConfig, ConfigManager};
pub use errors::{BudgetError, Result};
pub use period::Period;
pub use storage::{BudgetRepository, InMemoryBudgetRepository, JsonBudgetRepository};

/// Initializes global tracing with the default filter.
pub fn init() {
    init_with_filter(utils::DEFAULT_LOG_FILTER);
}

/// Initializes global tracing using the filter from `config`.
pub fn init_with_config(config: &CalculatorConfig) {
    init_with_filter(&config.log_filter);
}

fn init_with_filter(filter: &str) {
    if utils::init_tracing(filter) {
        tracing::info!("Budget Calculator tracing initialized.");
    }
}
