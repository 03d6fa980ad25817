//! The dispatcher: gate, format, resolve, write

use std::fmt::{self, Display};
use std::io::{self, IsTerminal, Write};

use parking_lot::{Mutex, RwLock};

use crate::config::{Config, Severity};
use crate::core::Result;
use crate::format::{format_line, timestamp};
use crate::printf;
use crate::writer::Destination;

/// A leveled logger
///
/// Settings sit behind a read-write lock so the level gate stays cheap.
/// The destination, its lazily opened level files and the terminal writer
/// share one mutex that is held across resolution and write, so lines from
/// concurrent threads never interleave and each level file is created once.
pub struct Logger {
    is_terminal: bool,
    settings: RwLock<Settings>,
    output: Mutex<Output>,
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    min_level: Severity,
    color: bool,
}

struct Output {
    destination: Destination,
    terminal: Box<dyn Write + Send>,
}

/// Builder for [`Logger`] instances with injected environment
pub struct LoggerBuilder {
    is_terminal: Option<bool>,
    terminal: Option<Box<dyn Write + Send>>,
    config: Config,
}

impl LoggerBuilder {
    /// Override the interactive-terminal probe
    #[must_use]
    pub fn is_terminal(mut self, is_terminal: bool) -> Self {
        self.is_terminal = Some(is_terminal);
        self
    }

    /// Replace standard output as the terminal destination
    #[must_use]
    pub fn terminal_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.terminal = Some(Box::new(writer));
        self
    }

    /// Initial configuration, applied by [`LoggerBuilder::build`]
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Build the logger, opening whatever the configuration needs
    pub fn build(self) -> Result<Logger> {
        let is_terminal = self
            .is_terminal
            .unwrap_or_else(|| io::stdout().is_terminal());
        let terminal: Box<dyn Write + Send> =
            self.terminal.unwrap_or_else(|| Box::new(io::stdout()));
        let destination = Destination::open(&self.config.target())?;

        Ok(Logger::assemble(&self.config, is_terminal, destination, terminal))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = *self.settings.read();
        f.debug_struct("Logger")
            .field("is_terminal", &self.is_terminal)
            .field("min_level", &settings.min_level)
            .field("color", &settings.color)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Terminal logger at `DEBUG`, colored when stdout is a terminal
    #[must_use]
    pub fn new() -> Self {
        Self::assemble(
            &Config::default(),
            io::stdout().is_terminal(),
            Destination::Terminal,
            Box::new(io::stdout()),
        )
    }

    fn assemble(
        config: &Config,
        is_terminal: bool,
        destination: Destination,
        terminal: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            is_terminal,
            settings: RwLock::new(Settings {
                min_level: config.min_level,
                color: effective_color(config.enable_color, is_terminal),
            }),
            output: Mutex::new(Output {
                destination,
                terminal,
            }),
        }
    }

    /// Start building a logger with an injected terminal probe or writer
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            is_terminal: None,
            terminal: None,
            config: Config::default(),
        }
    }

    /// Apply a new configuration.
    ///
    /// New resources are opened before anything is swapped, so on error
    /// the previous configuration stays fully active. On success the
    /// previous destination is dropped, which closes its files.
    pub fn configure(&self, config: Config) -> Result<()> {
        let target = config.target();
        let destination = Destination::open(&target)?;

        let previous = {
            let mut output = self.output.lock();
            let mut settings = self.settings.write();
            settings.min_level = config.min_level;
            settings.color = effective_color(config.enable_color, self.is_terminal);
            std::mem::replace(&mut output.destination, destination)
        };
        drop(previous);

        tracing::debug!(?target, min_level = %config.min_level, "logger configured");
        Ok(())
    }

    /// Change the threshold for subsequent calls
    pub fn set_min_level(&self, level: Severity) {
        self.settings.write().min_level = level;
    }

    /// Current threshold
    pub fn min_level(&self) -> Severity {
        self.settings.read().min_level
    }

    /// Request colors; only takes effect on an interactive terminal
    pub fn set_color_enabled(&self, enable: bool) {
        self.settings.write().color = effective_color(enable, self.is_terminal);
    }

    /// Whether terminal lines are currently colored
    pub fn color_enabled(&self) -> bool {
        self.settings.read().color
    }

    /// Whether `level` passes the gate
    pub fn is_enabled(&self, level: Severity) -> bool {
        level >= self.settings.read().min_level
    }

    /// Emit preformatted arguments at `level`.
    ///
    /// A [`Severity::Fatal`] call never returns: it exits like
    /// [`Logger::fatal_args`].
    pub fn emit(&self, level: Severity, args: fmt::Arguments<'_>) -> Result<()> {
        if level == Severity::Fatal {
            self.fatal_args(args)
        }
        self.dispatch(level, args)
    }

    fn dispatch(&self, level: Severity, args: fmt::Arguments<'_>) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }

        let message = fmt::format(args);

        let mut output = self.output.lock();
        // Taken under the lock so lines land in timestamp order
        let ts = timestamp();
        let settings = *self.settings.read();
        if level < settings.min_level {
            return Ok(());
        }

        let Output {
            destination,
            terminal,
        } = &mut *output;
        let color = settings.color && destination.is_terminal();
        let line = format_line(&ts, level, &message, color);
        destination.write(level, &line, &mut **terminal)
    }

    /// Emit a single value through its `Display` form
    pub fn log(&self, level: Severity, msg: impl Display) -> Result<()> {
        self.emit(level, format_args!("{msg}"))
    }

    /// Emit a printf-style template (`%s`, `%v`, `%d`, ...)
    pub fn logf(&self, level: Severity, template: &str, args: &[&dyn Display]) -> Result<()> {
        if !self.is_enabled(level) {
            return Ok(());
        }
        let message = printf::render(template, args);
        self.emit(level, format_args!("{message}"))
    }

    /// Write a fatal line, then exit the process with status 1.
    ///
    /// The process exits even if the write fails; the failure is reported
    /// on stderr since there is no caller left to return it to.
    pub fn fatal_args(&self, args: fmt::Arguments<'_>) -> ! {
        if let Err(err) = self.dispatch(Severity::Fatal, args) {
            eprintln!("lvlog: fatal line lost: {err}");
        }
        std::process::exit(1)
    }

    /// Log at `DEBUG`
    pub fn debug(&self, msg: impl Display) -> Result<()> {
        self.log(Severity::Debug, msg)
    }

    /// Log at `INFO`
    pub fn info(&self, msg: impl Display) -> Result<()> {
        self.log(Severity::Info, msg)
    }

    /// Log at `WARN`
    pub fn warn(&self, msg: impl Display) -> Result<()> {
        self.log(Severity::Warn, msg)
    }

    /// Log at `ERROR`
    pub fn error(&self, msg: impl Display) -> Result<()> {
        self.log(Severity::Error, msg)
    }

    /// Log at `FATAL` and exit with status 1
    pub fn fatal(&self, msg: impl Display) -> ! {
        self.fatal_args(format_args!("{msg}"))
    }

    /// Template form of [`Logger::debug`]
    pub fn debugf(&self, template: &str, args: &[&dyn Display]) -> Result<()> {
        self.logf(Severity::Debug, template, args)
    }

    /// Template form of [`Logger::info`]
    pub fn infof(&self, template: &str, args: &[&dyn Display]) -> Result<()> {
        self.logf(Severity::Info, template, args)
    }

    /// Template form of [`Logger::warn`]
    pub fn warnf(&self, template: &str, args: &[&dyn Display]) -> Result<()> {
        self.logf(Severity::Warn, template, args)
    }

    /// Template form of [`Logger::error`]
    pub fn errorf(&self, template: &str, args: &[&dyn Display]) -> Result<()> {
        self.logf(Severity::Error, template, args)
    }

    /// Template form of [`Logger::fatal`]
    pub fn fatalf(&self, template: &str, args: &[&dyn Display]) -> ! {
        let message = printf::render(template, args);
        self.fatal_args(format_args!("{message}"))
    }

    #[cfg(test)]
    pub(crate) fn open_levels(&self) -> Vec<Severity> {
        self.output.lock().destination.open_levels()
    }
}

fn effective_color(requested: bool, is_terminal: bool) -> bool {
    cfg!(feature = "ansi") && requested && is_terminal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{body, capture_logger};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_gate_suppresses_below_min_level() {
        let (logger, out) = capture_logger(false);
        logger.set_min_level(Severity::Info);

        logger.debug("x").unwrap();
        assert_eq!(out.text(), "");

        logger.info("x").unwrap();
        assert_eq!(out.lines().len(), 1);
    }

    #[test]
    fn test_gate_applies_to_warn_and_error() {
        let (logger, out) = capture_logger(false);
        logger.set_min_level(Severity::Fatal);

        logger.warn("w").unwrap();
        logger.error("e").unwrap();
        logger.errorf("%s", &[&"e"]).unwrap();

        assert_eq!(out.text(), "");
    }

    #[test]
    fn test_plain_line_layout() {
        let (logger, out) = capture_logger(false);
        logger.info("hello info").unwrap();

        let lines = out.lines();
        assert_eq!(body(&lines[0]), "INFO  hello info");
    }

    #[test]
    fn test_color_requires_terminal() {
        let (logger, out) = capture_logger(false);
        logger.set_color_enabled(true);
        assert!(!logger.color_enabled());

        logger.warn("w").unwrap();
        assert!(!out.text().contains('\x1b'));
    }

    #[test]
    fn test_color_on_terminal() {
        let (logger, out) = capture_logger(true);
        logger.set_color_enabled(true);

        logger.warn("careful").unwrap();
        assert_eq!(
            body(&out.lines()[0]),
            "\x1b[33mWARN \x1b[0m careful"
        );

        logger.set_color_enabled(false);
        logger.warn("plain").unwrap();
        assert_eq!(body(&out.lines()[1]), "WARN  plain");
    }

    #[test]
    fn test_template_rendering() {
        let (logger, out) = capture_logger(false);
        logger.infof("-->%s<--", &[&"x"]).unwrap();
        logger.errorf("hello %s", &[&"error"]).unwrap();

        let lines = out.lines();
        assert_eq!(body(&lines[0]), "INFO  -->x<--");
        assert_eq!(body(&lines[1]), "ERROR hello error");
    }

    #[test]
    fn test_emit_with_format_args() {
        let (logger, out) = capture_logger(false);
        logger
            .emit(Severity::Debug, format_args!("{} + {} = {}", 1, 2, 3))
            .unwrap();
        assert_eq!(body(&out.lines()[0]), "DEBUG 1 + 2 = 3");
    }

    #[test]
    fn test_failed_configure_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let (logger, out) = capture_logger(false);
        logger.set_min_level(Severity::Warn);

        let err = logger
            .configure(Config::folder(blocker.join("sub"), true).with_min_level(Severity::Debug))
            .unwrap_err();
        assert!(matches!(err, crate::Error::CreateDir { .. }));

        assert_eq!(logger.min_level(), Severity::Warn);
        logger.warn("still terminal").unwrap();
        assert_eq!(body(&out.lines()[0]), "WARN  still terminal");
    }

    #[test]
    fn test_configure_to_split_folder_then_back() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, out) = capture_logger(true);

        logger.configure(Config::folder(dir.path(), true)).unwrap();
        logger.error("to file").unwrap();
        assert_eq!(logger.open_levels(), vec![Severity::Error]);
        assert_eq!(out.text(), "");

        let file = std::fs::read_to_string(dir.path().join("error.log")).unwrap();
        assert_eq!(body(file.trim_end()), "ERROR to file");

        logger.configure(Config::terminal().with_color(false)).unwrap();
        logger.info("back").unwrap();
        assert!(logger.open_levels().is_empty());
        assert_eq!(body(&out.lines()[0]), "INFO  back");
    }

    #[test]
    fn test_new_matches_default_builder() {
        let built = Logger::builder().build().unwrap();
        let fresh = Logger::new();

        assert_eq!(fresh.min_level(), Severity::Debug);
        assert_eq!(fresh.min_level(), built.min_level());
        assert_eq!(fresh.color_enabled(), built.color_enabled());
        assert_eq!(fresh.is_terminal, built.is_terminal);
    }

    #[test]
    fn test_builder_config_sets_initial_settings() {
        let logger = Logger::builder()
            .is_terminal(true)
            .config(Config::terminal().with_min_level(Severity::Error).with_color(false))
            .build()
            .unwrap();

        assert_eq!(logger.min_level(), Severity::Error);
        assert!(!logger.color_enabled());
    }

    #[test]
    fn test_concurrent_emits_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Arc::new(
            Logger::builder()
                .is_terminal(false)
                .config(Config::folder(dir.path(), true))
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = Arc::clone(&logger);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.infof("thread %d line %d", &[&t, &i]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(dir.path().join("info.log")).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| body(l).starts_with("INFO  thread ")));

        // Fixed-width timestamps sort lexically
        let stamps: Vec<_> = lines.iter().map(|l| &l[..23]).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }
}
