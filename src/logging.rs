//! File logging bootstrap.
//!
//! The terminal belongs to the UI, so diagnostics go to a rotating log file
//! under the configured log directory.

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::path::Path;

const LOG_FILE_BASENAME: &str = "constituency-tui";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start file logging.
///
/// # Arguments
/// * `level` - trace, debug, info, warn or error (`warning` accepted)
/// * `log_dir` - Directory for log files, created if missing
///
/// # Returns
/// * `Result<LoggerHandle>` - Handle that must be kept alive while logging
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle> {
    let level = normalize_level(level)?;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let handle = Logger::try_with_str(level)
        .with_context(|| format!("Invalid log level: {level}"))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("Failed to start logger")?;

    log::info!(
        "event=app_start level={} log_dir={} version={}",
        level,
        log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(anyhow::anyhow!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
