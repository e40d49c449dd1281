use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Error type shared by the calculator, its repositories, and configuration.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("Invalid year-month: `{0}`")]
    InvalidYearMonth(String),
    #[error("Duplicate budget for month {0}")]
    DuplicateYearMonth(String),
    #[error("Total amount does not fit in i64 for {0}")]
    AmountOverflow(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Repository error: {0}")]
    Repository(String),
}
