//! Severity definitions
//!
//! Lower rank means higher priority. A threshold of `Info` lets
//! `Error`, `Warn` and `Info` through and suppresses everything ranked
//! after it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Http = 3,
    Verbose = 4,
    Debug = 5,
    Silly = 6,
    Event = 7,
    Audit = 8,
}

impl LogLevel {
    /// Every severity in rank order.
    pub const ALL: [LogLevel; 9] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Http,
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Silly,
        LogLevel::Event,
        LogLevel::Audit,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Http => "http",
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Silly => "silly",
            LogLevel::Event => "event",
            LogLevel::Audit => "audit",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Whether a record at `level` passes when `self` is the threshold.
    #[inline]
    pub fn permits(&self, level: LogLevel) -> bool {
        level <= *self
    }

    /// Severities added on top of the base set.
    pub fn is_custom(&self) -> bool {
        matches!(self, LogLevel::Event | LogLevel::Audit)
    }

    #[cfg(feature = "console")]
    pub fn default_color(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Info => Green,
            LogLevel::Http => Green,
            LogLevel::Verbose => Cyan,
            LogLevel::Debug => Blue,
            LogLevel::Silly => Magenta,
            LogLevel::Event => BrightMagenta,
            LogLevel::Audit => BrightCyan,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "http" => Ok(LogLevel::Http),
            "verbose" => Ok(LogLevel::Verbose),
            "debug" => Ok(LogLevel::Debug),
            "silly" => Ok(LogLevel::Silly),
            "event" => Ok(LogLevel::Event),
            "audit" => Ok(LogLevel::Audit),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
