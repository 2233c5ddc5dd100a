//! Severity levels and threshold resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

use crate::config::LoggingOptions;

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    #[default]
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl Severity {
    /// Name used in the log line prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    /// RFC 5424 severity code used in the syslog `<PRI>` header.
    pub fn syslog_code(&self) -> u8 {
        match self {
            Severity::Debug => 7,
            Severity::Info => 6,
            Severity::Warning => 4,
            Severity::Error => 3,
        }
    }

    /// Map a `tracing` level. `TRACE` has no counterpart and is never emitted.
    pub fn from_level(level: &Level) -> Option<Self> {
        match *level {
            Level::TRACE => None,
            Level::DEBUG => Some(Severity::Debug),
            Level::INFO => Some(Severity::Info),
            Level::WARN => Some(Severity::Warning),
            Level::ERROR => Some(Severity::Error),
        }
    }

    pub fn as_level(&self) -> Level {
        match self {
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error => Level::ERROR,
        }
    }
}

impl From<Severity> for LevelFilter {
    fn from(severity: Severity) -> Self {
        LevelFilter::from_level(severity.as_level())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity '{0}' (expected debug, info, warning or error)")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Resolve the threshold shared by every handler of one configuration run.
///
/// First match wins: `debug`, `warning`, `error`, `info`. When no flag is
/// set the `level` key of a config file applies, then the default `WARNING`.
pub fn resolve(options: &LoggingOptions) -> Severity {
    if options.debug {
        Severity::Debug
    } else if options.warning {
        Severity::Warning
    } else if options.error {
        Severity::Error
    } else if options.info {
        Severity::Info
    } else {
        options.level.unwrap_or_default()
    }
}
