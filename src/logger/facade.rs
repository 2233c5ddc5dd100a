//! Named logger handle.

use std::fmt;
use std::sync::Arc;

use crate::handlers::{Handler, Record};
use crate::logger::registry::{LoggerEntry, LoggerRegistry};
use crate::logger::Severity;

/// Handle to a registered logger.
///
/// Handles are cheap to clone; every handle obtained for the same name from
/// the same registry shares one entry.
///
/// ```
/// use startup_logging::{Logger, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// let logger = registry.logger("example");
/// assert!(logger.same_as(&registry.logger("example")));
/// assert!(!Logger::get("example").same_as(&logger));
/// ```
#[derive(Clone)]
pub struct Logger {
    entry: Arc<LoggerEntry>,
}

impl Logger {
    pub(crate) fn from_entry(entry: Arc<LoggerEntry>) -> Self {
        Self { entry }
    }

    /// Register `name` in the global registry.
    pub fn get(name: impl Into<String>) -> Self {
        LoggerRegistry::global().logger(name)
    }

    pub fn name(&self) -> &str {
        self.entry.name()
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Severity::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Severity::Info, message)
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Severity::Warning, message)
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Severity::Error, message)
    }

    /// Emit `message` at `severity`.
    ///
    /// A logger without handlers forwards the message to the current
    /// `tracing` dispatcher, tagged with a `logger` field.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) {
        if !self.is_enabled_for(severity) {
            return;
        }

        let message = message.to_string();
        let handlers = self.entry.handlers();
        if handlers.is_empty() {
            drop(handlers);
            self.forward(severity, &message);
            return;
        }

        let record = Record::new(severity, self.name(), &message);
        for handler in handlers.iter() {
            handler.handle(&record);
        }
    }

    fn forward(&self, severity: Severity, message: &str) {
        let name = self.name();
        match severity {
            Severity::Debug => tracing::debug!(logger = %name, "{}", message),
            Severity::Info => tracing::info!(logger = %name, "{}", message),
            Severity::Warning => tracing::warn!(logger = %name, "{}", message),
            Severity::Error => tracing::error!(logger = %name, "{}", message),
        }
    }

    /// True unless a logger-level threshold filters `severity` out.
    pub fn is_enabled_for(&self, severity: Severity) -> bool {
        self.entry.threshold().map_or(true, |min| severity >= min)
    }

    pub fn add_handler(&self, handler: Arc<Handler>) {
        self.entry.handlers_mut().push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.entry.handlers().len()
    }

    /// Logger-level threshold applied before any handler. `None` passes
    /// everything through to the handlers.
    pub fn set_threshold(&self, threshold: Option<Severity>) {
        self.entry.set_threshold(threshold);
    }

    pub fn threshold(&self) -> Option<Severity> {
        self.entry.threshold()
    }

    pub fn is_configured(&self) -> bool {
        self.entry.is_configured()
    }

    /// True if both handles point at the same registry entry.
    pub fn same_as(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.entry, &other.entry)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("configured", &self.is_configured())
            .field("handlers", &self.handler_count())
            .finish()
    }
}
