pub mod json_backend;

use std::sync::Arc;

use crate::{budget::Budget, errors::Result};

pub use json_backend::JsonBudgetRepository;

/// Source of budget records. The calculator always fetches the whole collection
/// and filters in memory, so implementations need no query support.
pub trait BudgetRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Budget>>;
}

impl<R: BudgetRepository + ?Sized> BudgetRepository for &R {
    fn all(&self) -> Result<Vec<Budget>> {
        (**self).all()
    }
}

impl<R: BudgetRepository + ?Sized> BudgetRepository for Box<R> {
    fn all(&self) -> Result<Vec<Budget>> {
        (**self).all()
    }
}

impl<R: BudgetRepository + ?Sized> BudgetRepository for Arc<R> {
    fn all(&self) -> Result<Vec<Budget>> {
        (**self).all()
    }
}

/// Budgets held in memory, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBudgetRepository {
    budgets: Vec<Budget>,
}

impl InMemoryBudgetRepository {
    pub fn new(budgets: Vec<Budget>) -> Self {
        Self { budgets }
    }

    pub fn push(&mut self, budget: Budget) {
        self.budgets.push(budget);
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

impl From<Vec<Budget>> for InMemoryBudgetRepository {
    fn from(budgets: Vec<Budget>) -> Self {
        Self::new(budgets)
    }
}

impl FromIterator<Budget> for InMemoryBudgetRepository {
    fn from_iter<I: IntoIterator<Item = Budget>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl BudgetRepository for InMemoryBudgetRepository {
    fn all(&self) -> Result<Vec<Budget>> {
        Ok(self.budgets.clone())
    }
}
