//! Bridge from `tracing` events into a [`Logger`]

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Severity;
use crate::core::{Error, Result};
use crate::logger::Logger;

/// Layer forwarding `tracing` events to a [`Logger`]
///
/// `TRACE` and `DEBUG` map to [`Severity::Debug`]; the other levels map
/// one to one. Bridged events never reach [`Severity::Fatal`], so a
/// `tracing` call can never exit the process.
#[derive(Debug, Clone)]
pub struct LogLayer {
    logger: Option<Arc<Logger>>,
}

impl LogLayer {
    /// Forward into the process-wide logger
    #[must_use]
    pub fn global() -> Self {
        Self { logger: None }
    }

    /// Forward into a specific logger
    #[must_use]
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    fn logger(&self) -> &Logger {
        self.logger.as_deref().unwrap_or_else(|| crate::global())
    }
}

impl<S> Layer<S> for LogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        // Our own diagnostics fire while the output lock is held
        if is_internal(metadata.target()) {
            return;
        }

        let level = Severity::from(*metadata.level());
        let logger = self.logger();
        if !logger.is_enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Err(err) = logger.emit(level, format_args!("{}", visitor.finish())) {
            eprintln!("lvlog: dropped tracing event: {err}");
        }
    }
}

fn is_internal(target: &str) -> bool {
    let krate = env!("CARGO_CRATE_NAME");
    target
        .strip_prefix(krate)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{value}"));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            self.push_field(field.name(), format_args!("{value:?}"));
        }
    }
}

/// Install a registry with [`LogLayer::global`] as the default subscriber.
///
/// Fails if another global subscriber is already set.
pub fn install_tracing_bridge() -> Result<()> {
    tracing_subscriber::registry()
        .with(LogLayer::global())
        .try_init()
        .map_err(|e| Error::Subscriber(e.to_string()))
}
