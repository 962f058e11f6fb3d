use crate::config::Config;
use crate::storage::project_dirs;
use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::str::FromStr;

const LOG_FILE: &str = "daymark.log";
const LOG_ENV: &str = "DAYMARK_LOG";

/// Starts the file logger. The terminal belongs to the UI, so log records
/// never go to stderr.
pub fn init(config: &Config) -> Result<PathBuf> {
    let level = match config.log_level.as_deref() {
        Some(raw) => LevelFilter::from_str(raw.trim())
            .map_err(|_| anyhow::anyhow!("unsupported log level `{}`", raw))?,
        None => LevelFilter::Info,
    };
    let path = match &config.log_file {
        Some(path) => path.clone(),
        None => project_dirs()?.data_dir().join(LOG_FILE),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {:?}", path))?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("installing logger")?;

    log::info!("daymark {} starting, level {}", env!("CARGO_PKG_VERSION"), level);
    Ok(path)
}
