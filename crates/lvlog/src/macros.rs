//! Logging macros for the process-wide logger
//!
//! They take standard `format!` syntax. All but [`fatal!`] evaluate to
//! [`crate::Result<()>`] so lazy file creation failures can be handled.

/// Log at an explicit severity
///
/// ```no_run
/// let retries = 3;
/// lvlog::log!(lvlog::Severity::Warn, "retrying {retries} times")?;
/// # Ok::<(), lvlog::Error>(())
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        $crate::global().emit($level, ::std::format_args!($($arg)+))
    };
}

/// Log at `DEBUG`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Debug, $($arg)+)
    };
}

/// Log at `INFO`
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Info, $($arg)+)
    };
}

/// Log at `WARN`
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Warn, $($arg)+)
    };
}

/// Log at `ERROR`
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::log!($crate::Severity::Error, $($arg)+)
    };
}

/// Log at `FATAL`, then exit the process with status 1
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)+) => {
        $crate::global().fatal_args(::std::format_args!($($arg)+))
    };
}
