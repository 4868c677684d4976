//! `[logging]` section: filter level and the optional rolling JSON log file

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

/// How often the log file rolls over
///
/// Parsed strictly: a typo in `file_rotation` is a config error, not a
/// silent fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// A single file that grows forever
    Never,
}

impl LogRotation {
    pub const ALL: [LogRotation; 3] = [LogRotation::Hourly, LogRotation::Daily, LogRotation::Never];

    /// Name as written in config.toml
    pub fn as_str(self) -> &'static str {
        match self {
            LogRotation::Hourly => "hourly",
            LogRotation::Daily => "daily",
            LogRotation::Never => "never",
        }
    }

    fn rotation(self) -> Rotation {
        match self {
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Error returned when a rotation name is not one of `LogRotation::ALL`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLogRotationError(String);

impl fmt::Display for ParseLogRotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log rotation '{}' (expected hourly, daily or never)",
            self.0
        )
    }
}

impl std::error::Error for ParseLogRotationError {}

impl FromStr for LogRotation {
    type Err = ParseLogRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        LogRotation::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLogRotationError(s.to_string()))
    }
}

impl TryFrom<String> for LogRotation {
    type Error = ParseLogRotationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Resolved `[logging]` settings
///
/// `level` seeds the `reelsearch=<level>` filter when `RUST_LOG` is unset.
/// The file sink is opt-in and writes JSON alongside the TUI buffer or stderr.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem; rotated files get a date suffix ("reelsearch.2026-10-18")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::default(),
            file_prefix: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// `[logging]` as written in the file; every key optional
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<PathBuf>,
    pub file_rotation: Option<LogRotation>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file.file_dir.unwrap_or(defaults.file_dir),
            file_rotation: file.file_rotation.unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }

    /// Open the rolling appender, creating `file_dir` if needed
    pub fn appender(&self) -> Result<RollingFileAppender, InitError> {
        RollingFileAppender::builder()
            .rotation(self.file_rotation.rotation())
            .filename_prefix(&self.file_prefix)
            .build(&self.file_dir)
    }
}
