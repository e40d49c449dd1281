use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{budget::Budget, errors::Result};

use super::BudgetRepository;

const TMP_SUFFIX: &str = "tmp";

/// Budgets stored as a JSON array of `{ "year_month": "201801", "amount": 62 }`
/// records in a single file.
#[derive(Debug, Clone)]
pub struct JsonBudgetRepository {
    path: PathBuf,
}

impl JsonBudgetRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the stored collection, staging to a temporary file first.
    pub fn save(&self, budgets: &[Budget]) -> Result<()> {
        let json = serde_json::to_string_pretty(budgets)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), count = budgets.len(), "saved budgets");
        Ok(())
    }
}

impl BudgetRepository for JsonBudgetRepository {
    /// A missing file is an empty collection.
    fn all(&self) -> Result<Vec<Budget>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "budget file not found; no budgets");
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let budgets: Vec<Budget> = serde_json::from_str(&data)?;
        tracing::trace!(path = %self.path.display(), count = budgets.len(), "loaded budgets");
        Ok(budgets)
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
