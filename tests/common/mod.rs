#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use budget_calculator::{Accounting, Budget, InMemoryBudgetRepository};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn given_budgets(budgets: &[(&str, i64)]) -> Accounting<InMemoryBudgetRepository> {
    let repo = budgets
        .iter()
        .map(|(month, amount)| Budget::new(*month, *amount))
        .collect();
    Accounting::new(repo)
}

/// A fresh directory that outlives the calling test.
pub fn temp_base_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}
