//! Discovery loop.
//!
//! Claims unconfigured registry entries one at a time and attaches the
//! handler set to each. The registry is rescanned after every claim, so
//! loggers registered while the loop runs are picked up too. The loop ends
//! when a full scan finds nothing left to claim.
//!
//! Names are checked before anything is claimed. An unusable name stays
//! unconfigured and fails every run until it is deregistered.

use std::sync::Arc;

use crate::handlers::Handler;
use crate::lifecycle::ConfigureError;
use crate::logger::LoggerRegistry;

/// Attach `handlers` to every unconfigured logger in `registry`.
///
/// Returns the configured names in claim order. A pending entry whose name
/// breaks the naming rules fails the run before any logger is configured.
pub fn configure_registered(
    registry: &LoggerRegistry,
    handlers: &[Arc<Handler>],
) -> Result<Vec<String>, ConfigureError> {
    if let Some(name) = registry.first_unusable_pending() {
        tracing::error!(name = ?name, "Registered logger has an unusable name");
        return Err(ConfigureError::InvalidLoggerName { name });
    }

    let mut configured = Vec::new();

    while let Some(logger) = registry.claim_next_unconfigured() {
        for handler in handlers {
            logger.add_handler(Arc::clone(handler));
        }
        tracing::debug!(name = %logger.name(), handlers = handlers.len(), "Logger configured");
        configured.push(logger.name().to_string());
    }

    Ok(configured)
}
