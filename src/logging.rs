//! Tracing setup for the command-line and terminal UI modes.
//!
//! The TUI owns the terminal, so in that mode logs go to a file under the
//! platform's local data directory instead of stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "askdocs=info";

/// Gets the cross-platform log file path.
///
/// Returns `{data_local_dir}/askdocs/logs/askdocs.log` where `data_local_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Local`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn get_log_path() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to determine local data directory"))?;

    Ok(data_dir.join("askdocs").join("logs").join("askdocs.log"))
}

/// Ensures the parent directory of the log file exists.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_log_directory(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Installs a subscriber that writes to stderr.
///
/// Used by the one-shot `ask` command, where stdout carries the answer.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("askdocs=warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

/// Installs a subscriber that appends to `log_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a global subscriber is
/// already installed.
pub fn init_file_logging(log_path: &Path) -> Result<()> {
    ensure_log_directory(log_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_writer(Arc::new(file))
        .with_target(false)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_ends_with_app_log_file() {
        let path = get_log_path().expect("data dir should resolve in tests");
        assert!(path.ends_with("askdocs/logs/askdocs.log"));
    }

    #[test]
    fn ensure_log_directory_creates_nested_parents() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("a").join("b").join("askdocs.log");

        ensure_log_directory(&log_path).unwrap();

        assert!(log_path.parent().unwrap().is_dir());
        assert!(!log_path.exists());
    }

    #[test]
    fn ensure_log_directory_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let log_path = temp.path().join("logs").join("askdocs.log");

        ensure_log_directory(&log_path).unwrap();
        ensure_log_directory(&log_path).unwrap();
    }
}
