//! Line layout
//!
//! `<timestamp> <LEVEL padded to 5> <message>\n`, with the level name
//! optionally wrapped in its ANSI color.

use std::fmt::Write as _;

use chrono::Local;

use crate::config::{COLOR_RESET, Severity};

/// Timestamp layout, `YYYY/MM/DD HH:MM:SS.mmm`
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Current local time in [`TIMESTAMP_FORMAT`]
#[must_use]
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Assemble one complete log line, trailing newline included
#[must_use]
pub fn format_line(timestamp: &str, level: Severity, message: &str, color: bool) -> String {
    let mut line = String::with_capacity(timestamp.len() + message.len() + 24);
    // Writing into a String cannot fail
    let _ = if color {
        writeln!(
            line,
            "{timestamp} {}{level:<5}{COLOR_RESET} {message}",
            level.color()
        )
    } else {
        writeln!(line, "{timestamp} {level:<5} {message}")
    };
    line
}
