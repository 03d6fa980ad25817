//! # lvlog - leveled logging to terminal, file or folder
//!
//! Five ordered severities, one line per call:
//!
//! ```text
//! 2024/05/01 12:00:00.123 INFO  server listening on :8080
//! ```
//!
//! Lines go to exactly one destination: the terminal (stdout, with
//! optional ANSI colors), a single append-only file, or a folder holding
//! either a shared `log.log` or one file per severity (`debug.log`,
//! `info.log`, ...), the latter created on first use.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lvlog::{Config, Severity};
//!
//! fn main() -> lvlog::Result<()> {
//!     lvlog::configure(Config::folder("logs", true).with_min_level(Severity::Info))?;
//!
//!     lvlog::info!("listening on port {}", 8080)?;
//!     lvlog::global().warnf("retry %d of %d", &[&1, &3])?;
//!     Ok(())
//! }
//! ```
//!
//! A [`Severity::Fatal`] line terminates the process with exit status 1
//! right after it is written. Independent [`Logger`] instances can be built
//! for tests; the process-wide one is reached through [`global`].

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod core;
mod format;
mod layer;
mod logger;
mod macros;
mod printf;
mod writer;

#[cfg(test)]
mod testing;

use std::sync::LazyLock;

// Public API
pub use config::{COLOR_RESET, Config, Severity, Target};
pub use crate::core::{Error, Result};
pub use format::{TIMESTAMP_FORMAT, format_line, timestamp};
pub use layer::{LogLayer, install_tracing_bridge};
pub use logger::{Logger, LoggerBuilder};
pub use printf::render as render_template;
pub use writer::SHARED_FILE_NAME;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Config, Logger, Result, Severity, debug, error, fatal, info, log, warn,
    };
}

static GLOBAL: LazyLock<Logger> = LazyLock::new(Logger::new);

/// The process-wide logger, created on first use.
///
/// The terminal probe of stdout runs once, when this is first called.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Apply a configuration to the process-wide logger
pub fn configure(config: Config) -> Result<()> {
    global().configure(config)
}

/// Set the threshold of the process-wide logger
pub fn set_min_level(level: Severity) {
    global().set_min_level(level);
}

/// Threshold of the process-wide logger
pub fn min_level() -> Severity {
    global().min_level()
}

/// Request colors on the process-wide logger (terminal only)
pub fn set_color_enabled(enable: bool) {
    global().set_color_enabled(enable);
}
