//! Severity levels

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::Error;

/// ANSI sequence restoring the default terminal color
pub const COLOR_RESET: &str = "\x1b[0m";

/// Log severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    /// Debug level
    #[default]
    Debug,
    /// Info level
    Info,
    /// Warn level
    Warn,
    /// Error level
    Error,
    /// Fatal level, terminates the process after the line is written
    Fatal,
}

impl Severity {
    /// All severities in ascending order
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
    ];

    /// Upper-case name as printed in log lines
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// File name used for this level in split-folder mode
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Debug => "debug.log",
            Self::Info => "info.log",
            Self::Warn => "warn.log",
            Self::Error => "error.log",
            Self::Fatal => "fatal.log",
        }
    }

    /// ANSI color sequence for the level name on a terminal
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Debug => "\x1b[34m",
            Self::Info => "\x1b[32m",
            Self::Warn => "\x1b[33m",
            Self::Error => "\x1b[91m",
            Self::Fatal => "\x1b[31m",
        }
    }

    /// Lenient, case-insensitive lookup.
    ///
    /// Unrecognized names fall back to [`Severity::Info`]; use
    /// [`str::parse`] when a typo should be an error instead.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or(Self::Info)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width/alignment flags working, e.g. `{:<5}`
        f.pad(self.name())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownLevel(s.to_string()))
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::INFO => Self::Info,
            // TRACE and DEBUG
            _ => Self::Debug,
        }
    }
}
