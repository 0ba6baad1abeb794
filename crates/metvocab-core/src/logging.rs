//! Tracing subscriber setup for host applications.
//!
//! Library code only emits `tracing` events. Applications that do not bring
//! their own subscriber can call [`init_logging`] once at startup.

use crate::error::{Result, VocabError};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log level.
pub const ENV_LOG_LEVEL: &str = "METVOCAB_LOGLEVEL";
/// Environment variable naming an optional log file.
pub const ENV_LOG_FILE: &str = "METVOCAB_LOGFILE";

/// Logging options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// Also append log output to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Read `METVOCAB_LOGLEVEL` and `METVOCAB_LOGFILE`.
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(ENV_LOG_LEVEL).ok(),
            std::env::var(ENV_LOG_FILE).ok(),
        )
    }

    fn from_values(level: Option<String>, log_file: Option<String>) -> Self {
        let level = match level {
            Some(name) => parse_level(&name).unwrap_or_else(|| {
                eprintln!(
                    "Invalid logging level '{}' in environment variable {}",
                    name, ENV_LOG_LEVEL
                );
                Level::INFO
            }),
            None => Level::INFO,
        };
        Self {
            level,
            log_file: log_file.filter(|p| !p.is_empty()).map(PathBuf::from),
        }
    }

    /// Debug and trace output carries timestamps and source locations.
    fn is_verbose(&self) -> bool {
        self.level > Level::INFO
    }
}

/// Accepts tracing level names plus the `WARNING` and `CRITICAL` aliases.
fn parse_level(name: &str) -> Option<Level> {
    match name.trim().to_uppercase().as_str() {
        "TRACE" => Some(Level::TRACE),
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" | "CRITICAL" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install a global fmt subscriber. Returns `Ok(())` without changes if a
/// subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::new(config.level.as_str().to_lowercase());

    let file = match &config.log_file {
        Some(path) => Some(Arc::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| VocabError::io_with_path(e, path))?,
        )),
        None => None,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // try_init fails only when a global subscriber exists already.
    let _ = match (file, config.is_verbose()) {
        (Some(file), true) => builder
            .with_ansi(false)
            .with_line_number(true)
            .with_writer(std::io::stderr.and(file))
            .try_init(),
        (Some(file), false) => builder
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr.and(file))
            .try_init(),
        (None, true) => builder.with_line_number(true).with_writer(std::io::stderr).try_init(),
        (None, false) => builder
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .try_init(),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("WARNING"), Some(Level::WARN));
        assert_eq!(parse_level("CRITICAL"), Some(Level::ERROR));
        assert_eq!(parse_level("LOUD"), None);
    }

    #[test]
    fn test_from_values() {
        let config = LogConfig::from_values(None, None);
        assert_eq!(config, LogConfig::default());

        let config = LogConfig::from_values(Some("NOPE".into()), Some(String::new()));
        assert_eq!(config.level, Level::INFO);
        assert!(config.log_file.is_none());

        let config = LogConfig::from_values(Some("DEBUG".into()), Some("/tmp/mv.log".into()));
        assert_eq!(config.level, Level::DEBUG);
        assert!(config.is_verbose());
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/mv.log")));
    }

    #[test]
    fn test_init_logging_twice() {
        let temp_dir = TempDir::new().unwrap();
        let config = LogConfig {
            level: Level::DEBUG,
            log_file: Some(temp_dir.path().join("metvocab.log")),
        };
        init_logging(&config).unwrap();
        init_logging(&LogConfig::default()).unwrap();
        assert!(temp_dir.path().join("metvocab.log").exists());
    }
}
