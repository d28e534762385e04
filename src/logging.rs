//! Log output.
//!
//! The terminal UI owns stdout, so logs are written to a file or not at
//! all.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::types::LogConfig;

/// Default log file: `<data dir>/luminous-rehab/luminous-rehab.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("luminous-rehab")
        .join("luminous-rehab.log")
}

/// Filter directive for this crate at the configured level.
pub fn filter_directive(config: &LogConfig) -> String {
    let level = if config.verbose { "debug" } else { "info" };
    format!("luminous_rehab={}", level)
}

/// Open `path` for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. Does nothing when no path is configured.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let Some(path) = &config.path else {
        return Ok(());
    };

    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_directive(config)))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::other(format!("Failed to install logger: {}", e)))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn verbose_raises_level() {
        let quiet = LogConfig::default();
        let loud = LogConfig {
            verbose: true,
            ..LogConfig::default()
        };
        assert_eq!(filter_directive(&quiet), "luminous_rehab=info");
        assert_eq!(filter_directive(&loud), "luminous_rehab=debug");
    }

    #[test]
    fn open_log_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("logs").join("app.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn init_without_path_is_a_noop() {
        assert!(init(&LogConfig::default()).is_ok());
    }

    #[test]
    fn default_log_path_ends_with_crate_file() {
        let path = default_log_path();
        assert!(path.ends_with("luminous-rehab/luminous-rehab.log"));
    }
}
