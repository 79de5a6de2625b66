use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/expense_tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub currency_symbol: String,
    pub request_timeout_secs: u64,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            currency_symbol: "₹".to_string(),
            request_timeout_secs: 10,
            log_file: "config/expense_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[derive(Debug, Parser)]
#[command(name = "expense_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the currency symbol shown before amounts.
    #[arg(long)]
    currency_symbol: Option<String>,
    /// Override the per-request timeout, in seconds.
    #[arg(long)]
    request_timeout_secs: Option<u64>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();
    resolve(args)
}

fn resolve(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("EXPENSE_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(symbol) = args.currency_symbol {
        settings.currency_symbol = symbol;
    }
    if let Some(timeout) = args.request_timeout_secs {
        settings.request_timeout_secs = timeout;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_apply_without_file() {
        let args = Args::parse_from(["expense_tui", "--config", "does/not/exist"]);
        let settings = resolve(args).unwrap();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn file_values_are_overridden_by_flags() {
        let dir = std::env::temp_dir().join(format!("expense_tui_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://10.0.0.2:8080\"").unwrap();
        writeln!(file, "currency_symbol = \"€\"").unwrap();
        drop(file);

        let path = path.display().to_string();
        let args = Args::parse_from([
            "expense_tui",
            "--config",
            path.as_str(),
            "--currency-symbol",
            "$",
        ]);
        let settings = resolve(args).unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.2:8080");
        assert_eq!(settings.currency_symbol, "$");

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let settings = AppConfig {
            request_timeout_secs: 0,
            ..AppConfig::default()
        };
        assert_eq!(settings.request_timeout(), Duration::from_secs(1));
    }
}
