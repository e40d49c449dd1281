use dirs::home_dir;
use std::{env, path::PathBuf, sync::Once};

pub const DEFAULT_LOG_FILTER: &str = "budget_calculator=info";

const DEFAULT_DIR_NAME: &str = ".budget_calculator";
const HOME_ENV: &str = "BUDGET_CALCULATOR_HOME";

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber once. `RUST_LOG` wins over `filter`.
/// Returns `true` only for the call that performed the installation.
pub fn init_tracing(filter: &str) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
        installed = fmt().with_env_filter(filter).try_init().is_ok();
    });
    installed
}

/// Returns the application data directory, defaulting to `~/.budget_calculator`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
