//! Logger setup shared by the binaries.

use anyhow::{Context, Result};
use log::{LevelFilter, info};
use std::path::PathBuf;

use crate::config::{self, PathConfig};

/// 0 (default) = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ (-vvv) = trace
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialise env_logger.
///
/// `log_file`: `None` logs to the console (RUST_LOG honoured), `Some(None)`
/// logs to `default_name` in the data directory, `Some(Some(path))` to `path`.
pub fn init_logger(
    verbosity: u8,
    log_file: Option<&Option<PathBuf>>,
    default_name: &str,
    path_config: &PathConfig,
) -> Result<()> {
    let log_level = level_filter(verbosity);

    if let Some(log_path_opt) = log_file {
        let log_path = log_path_opt
            .clone()
            .unwrap_or_else(|| config::data_file(default_name, path_config));
        let file = std::fs::File::create(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        env_logger::Builder::new()
            .filter_level(log_level)
            .filter_module("egui", LevelFilter::Info) // egui DEBUG spam
            .filter_module("eframe", LevelFilter::Info)
            .format_timestamp_millis()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();

        info!("Logging to file: {} (level: {:?})", log_path.display(), log_level);
    } else {
        let default_level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
            .filter_module("egui", LevelFilter::Info)
            .filter_module("eframe", LevelFilter::Info)
            .format_timestamp_millis()
            .init();
    }
    Ok(())
}
