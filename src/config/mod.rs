use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    storage::{
        json_backend::{tmp_path, write_atomic},
        JsonBudgetRepository,
    },
    utils::{app_data_dir, DEFAULT_LOG_FILTER},
};

const CONFIG_FILE: &str = "config.json";
const BUDGETS_FILE: &str = "budgets.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Budget file; relative paths resolve against the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets_file: Option<PathBuf>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            budgets_file: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.into()
}

/// Loads and saves `config.json` inside the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Defaults apply when no config file exists yet.
    pub fn load(&self) -> Result<CalculatorConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(CalculatorConfig::default())
        }
    }

    pub fn save(&self, config: &CalculatorConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn budgets_file(&self, config: &CalculatorConfig) -> PathBuf {
        match &config.budgets_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => self.base.join(BUDGETS_FILE),
        }
    }

    pub fn open_repository(&self) -> Result<JsonBudgetRepository> {
        let config = self.load()?;
        let path = self.budgets_file(&config);
        tracing::debug!(path = %path.display(), "opening budget repository");
        Ok(JsonBudgetRepository::new(path))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
