//! Logging configuration using the tracing ecosystem.
//!
//! This module configures structured logging with:
//! - File-based output (to avoid TUI corruption)
//! - Daily log rotation
//! - Environment-based log level configuration
//!
//! Failed requests are reported here and nowhere else when the UI stays
//! silent about them (e.g. a failed list fetch).

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "student_tui=info,warn";

/// Log level used when debug logging is forced from the command line.
const DEBUG_LOG_FILTER: &str = "student_tui=debug,warn";

/// Initialize the logging system.
///
/// Sets up tracing with a daily rotating file appender in the user's local
/// data directory. The level comes from `RUST_LOG` unless `debug` is set.
///
/// # Log Directory
///
/// - Linux: `~/.local/share/student-tui/logs/`
/// - macOS: `~/Library/Application Support/student-tui/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\student-tui\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or the global subscriber is already set.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "student-tui.log");

    let filter = build_filter(debug);

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "student-tui starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

/// Build the level filter.
fn build_filter(debug: bool) -> EnvFilter {
    if debug {
        return EnvFilter::new(DEBUG_LOG_FILTER);
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Get the log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("student-tui").join("logs"))
}

/// Get the path where logs are stored.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("student-tui shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_has_expected_structure() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("student-tui/logs"));
        }
    }

    #[test]
    fn test_debug_filter_overrides_env() {
        let filter = build_filter(true);
        assert!(filter.to_string().contains("student_tui=debug"));
    }
}
