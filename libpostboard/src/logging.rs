//! Centralized logging configuration for Postboard front ends
//!
//! Provides consistent logging setup with support for:
//! - Text, JSON, and pretty-printed output
//! - Environment variable configuration
//! - Writing to stderr or to a file (a TUI owns the terminal, so it logs to a file)
//!
//! # Examples
//!
//! ```no_run
//! use libpostboard::logging::{LoggingConfig, LogFormat, LogTarget};
//!
//! let config = LoggingConfig::new(LogFormat::Json, "debug".to_string(), LogTarget::Stderr);
//! config.init().unwrap();
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output (no colors, for piping)
    Text,
    /// Machine-parseable JSON (one JSON object per line)
    Json,
    /// Pretty-printed with colors (for development)
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file, creating it if needed
    File(PathBuf),
}

/// Configuration for logging initialization
pub struct LoggingConfig {
    pub format: LogFormat,
    pub level: String,
    pub target: LogTarget,
}

impl LoggingConfig {
    /// Create a new logging configuration
    ///
    /// # Arguments
    ///
    /// * `format` - Log output format (text, json, or pretty)
    /// * `level` - Minimum log level (error, warn, info, debug, trace)
    /// * `target` - Destination for log lines
    pub fn new(format: LogFormat, level: String, target: LogTarget) -> Self {
        Self {
            format,
            level,
            target,
        }
    }

    fn make_writer(&self) -> std::io::Result<BoxMakeWriter> {
        match &self.target {
            LogTarget::Stderr => Ok(BoxMakeWriter::new(std::io::stderr)),
            LogTarget::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }

    /// Initialize logging with the configured settings
    ///
    /// This should be called once at the start of your program. `RUST_LOG`
    /// takes precedence over the configured level.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened.
    ///
    /// # Panics
    ///
    /// Panics if the logging subscriber has already been initialized
    pub fn init(&self) -> std::io::Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let writer = self.make_writer()?;
        let ansi = self.target == LogTarget::Stderr;

        match self.format {
            LogFormat::Json => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::fmt()
                    .pretty()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .init();
            }
            LogFormat::Text => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(false)
                    .with_level(true)
                    .init();
            }
        }

        Ok(())
    }
}

/// Read format and level from `POSTBOARD_LOG_FORMAT` / `POSTBOARD_LOG_LEVEL`,
/// falling back to text at info level.
pub fn env_defaults() -> (LogFormat, String) {
    let format = std::env::var("POSTBOARD_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);

    let level = std::env::var("POSTBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    (format, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        // Case insensitive
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("Json".parse::<LogFormat>().unwrap(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let result = "invalid".parse::<LogFormat>();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("Invalid log format: 'invalid'"));
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Pretty.to_string(), "pretty");
    }

    #[test]
    fn test_file_target_fails_for_missing_directory() {
        let config = LoggingConfig::new(
            LogFormat::Text,
            "info".to_string(),
            LogTarget::File(PathBuf::from("/nonexistent/dir/postboard.log")),
        );
        assert!(config.make_writer().is_err());
    }

    #[test]
    #[serial]
    fn test_env_defaults() {
        std::env::set_var("POSTBOARD_LOG_FORMAT", "json");
        std::env::set_var("POSTBOARD_LOG_LEVEL", "debug");
        let (format, level) = env_defaults();
        std::env::remove_var("POSTBOARD_LOG_FORMAT");
        std::env::remove_var("POSTBOARD_LOG_LEVEL");

        assert_eq!(format, LogFormat::Json);
        assert_eq!(level, "debug");
    }

    #[test]
    #[serial]
    fn test_env_defaults_fallback() {
        std::env::remove_var("POSTBOARD_LOG_FORMAT");
        std::env::remove_var("POSTBOARD_LOG_LEVEL");
        let (format, level) = env_defaults();

        assert_eq!(format, LogFormat::Text);
        assert_eq!(level, "info");
    }
}
