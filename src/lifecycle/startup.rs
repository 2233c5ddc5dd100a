//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate options
//! - Build the handler set and resolve the shared threshold
//! - Prepare the capture subscriber when every event should be handled
//! - Configure every registered logger
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned to the caller, nothing is retried
//! - No rollback: loggers configured before a failure keep their handlers
//! - The result is a value the caller owns, not hidden global state

use std::sync::Arc;

use tracing::dispatcher::{self, Dispatch, SetGlobalDefaultError};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer as _;

use crate::config::validation::{join_errors, validate_options, ValidationError};
use crate::config::LoggingOptions;
use crate::handlers::{build_handlers, CaptureLayer, Handler, HandlerError};
use crate::lifecycle::discovery::configure_registered;
use crate::logger::{severity, LoggerRegistry, Severity};

/// Error returned by [`init`] and [`LoggingContext::discover`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigureError {
    #[error("invalid logging options: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Handler(#[from] HandlerError),

    #[error(
        "logger name {name:?} cannot be configured: names must be non-empty \
         and contain no whitespace or ':'"
    )]
    InvalidLoggerName { name: String },
}

/// Result of one startup configuration run.
#[derive(Debug)]
pub struct LoggingContext {
    severity: Severity,
    handlers: Vec<Arc<Handler>>,
    configured: Vec<String>,
    capture: Option<Dispatch>,
}

impl LoggingContext {
    /// Threshold shared by every handler.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn handlers(&self) -> &[Arc<Handler>] {
        &self.handlers
    }

    /// Loggers configured by this context, in configuration order.
    pub fn configured_loggers(&self) -> &[String] {
        &self.configured
    }

    /// True if every `tracing` event is routed to the handlers.
    pub fn captures_all(&self) -> bool {
        self.capture.is_some()
    }

    /// Configure loggers registered since the last run with this context's
    /// handlers. Already-configured loggers are left alone.
    pub fn discover(&mut self, registry: &LoggerRegistry) -> Result<usize, ConfigureError> {
        let names = configure_registered(registry, &self.handlers)?;
        let count = names.len();
        self.configured.extend(names);
        Ok(count)
    }

    /// Run `f` with the capture subscriber as the thread's default.
    /// Without capture, `f` runs under whatever dispatcher is current.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.capture {
            Some(dispatch) => dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }

    /// Make the capture subscriber the process-wide default. Does nothing
    /// without capture.
    pub fn install_global(&self) -> Result<(), SetGlobalDefaultError> {
        match &self.capture {
            Some(dispatch) => dispatcher::set_global_default(dispatch.clone()),
            None => Ok(()),
        }
    }
}

fn capture_dispatch(handlers: &[Arc<Handler>], severity: Severity) -> Dispatch {
    let layer = CaptureLayer::new(handlers.to_vec()).with_filter(LevelFilter::from(severity));
    Dispatch::new(tracing_subscriber::registry().with(layer))
}

/// Configure logging for the process.
///
/// Builds the handler set from `options`, then attaches it to every
/// unconfigured logger in `registry`.
pub fn init(
    options: &LoggingOptions,
    registry: &LoggerRegistry,
) -> Result<LoggingContext, ConfigureError> {
    validate_options(options).map_err(ConfigureError::Validation)?;

    let severity = severity::resolve(options);
    let handlers = build_handlers(options, severity)?;
    let capture = options
        .all_loggers
        .then(|| capture_dispatch(&handlers, severity));

    let mut context = LoggingContext {
        severity,
        handlers,
        configured: Vec::new(),
        capture,
    };
    context.discover(registry)?;

    context.in_scope(|| {
        tracing::info!(
            severity = %context.severity,
            handlers = context.handlers.len(),
            loggers = context.configured.len(),
            all_loggers = context.captures_all(),
            "Logging configured"
        );
    });

    Ok(context)
}

/// Configure logging, then run `entry` with the resulting context.
///
/// With `all_loggers`, `entry` runs with the capture subscriber as its
/// thread's default.
pub fn run<T>(
    options: &LoggingOptions,
    registry: &LoggerRegistry,
    entry: impl FnOnce(&LoggingContext) -> T,
) -> Result<T, ConfigureError> {
    let context = init(options, registry)?;
    Ok(context.in_scope(|| entry(&context)))
}
