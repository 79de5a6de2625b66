use std::{
    env,
    fs::{self, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Installs the global tracing subscriber.
///
/// The terminal belongs to the UI, so output goes to `log_file` only.
/// `RUST_LOG` takes precedence over `log_level` when it parses.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref(), &config.log_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}

fn env_filter(directives: Option<&str>, level: &str) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("expense_tui={level},api_types={level}")))
}
