//! Root capture layer.
//!
//! Applies a handler set to every `tracing` event, not only to registered
//! loggers. Events emitted by an unconfigured [`Logger`](crate::logger::Logger)
//! carry a `logger` field, which takes the place of the event target as the
//! record name.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::handlers::{Handler, Record};
use crate::logger::Severity;

/// Field naming the originating logger on forwarded events.
pub const LOGGER_FIELD: &str = "logger";

/// `tracing` layer forwarding events to a handler set.
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    handlers: Vec<Arc<Handler>>,
}

impl CaptureLayer {
    pub fn new(handlers: Vec<Arc<Handler>>) -> Self {
        Self { handlers }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(severity) = Severity::from_level(metadata.level()) else {
            return;
        };

        let mut visitor = RecordVisitor::default();
        event.record(&mut visitor);

        let name = visitor.logger.as_deref().unwrap_or_else(|| metadata.target());
        let message = visitor.message();
        let record = Record::new(severity, name, &message);
        for handler in &self.handlers {
            handler.handle(&record);
        }
    }
}

#[derive(Default)]
struct RecordVisitor {
    logger: Option<String>,
    message: String,
    fields: String,
}

impl RecordVisitor {
    fn message(&self) -> String {
        if self.fields.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for RecordVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            LOGGER_FIELD => self.logger = Some(value.to_string()),
            name => {
                let _ = write!(self.fields, " {}={}", name, value);
            }
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            LOGGER_FIELD => self.logger = Some(format!("{:?}", value)),
            name => {
                let _ = write!(self.fields, " {}={:?}", name, value);
            }
        }
    }
}
