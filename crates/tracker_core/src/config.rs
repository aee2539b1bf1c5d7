//! Runtime settings supplied by the host process.
//!
//! # Invariants
//! - `TrackerConfig::validate` is the only place log levels and log
//!   directories are normalized.
//! - An absent `db_path` means an in-memory store that dies with the process.

use crate::router::Route;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Log verbosity accepted by `init_logging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Case-insensitive; `warning` is accepted as `warn`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
        }
    }

    /// `debug` for debug builds, `info` otherwise.
    pub fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    RelativeLogDir(PathBuf),
    EmptyPath(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => write!(
                f,
                "log_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::EmptyPath(name) => write!(f, "{name} cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// SQLite file backing the key/value store.
    pub db_path: Option<PathBuf>,
    pub log_level: LogLevel,
    /// Directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Fragment used for the page-load render.
    pub initial_route: Route,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: LogLevel::build_default(),
            log_dir: None,
            initial_route: Route::Projects,
        }
    }
}

impl TrackerConfig {
    /// Checks path settings.
    ///
    /// # Errors
    /// - `EmptyPath` when a configured path is empty.
    /// - `RelativeLogDir` when `log_dir` is not absolute.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(db_path) = &self.db_path {
            if db_path.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath("db_path"));
            }
        }
        if let Some(log_dir) = &self.log_dir {
            if log_dir.as_os_str().is_empty() {
                return Err(ConfigError::EmptyPath("log_dir"));
            }
            if !log_dir.is_absolute() {
                return Err(ConfigError::RelativeLogDir(log_dir.clone()));
            }
        }
        Ok(())
    }
}
