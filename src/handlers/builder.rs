//! Handler set construction from parsed options.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::LoggingOptions;
use crate::handlers::syslog::{SyslogTarget, LOCAL_SYSLOG_SOCKET, SYSLOG_UDP_PORT};
use crate::handlers::{Handler, HandlerError};
use crate::logger::Severity;

/// Syslog target selected by the options.
///
/// The port only applies when a host is given.
pub fn syslog_target(options: &LoggingOptions) -> SyslogTarget {
    match &options.syslog_host {
        Some(host) => SyslogTarget::Remote {
            host: host.clone(),
            port: options.syslog_port.unwrap_or(SYSLOG_UDP_PORT),
        },
        None => SyslogTarget::Local(LOCAL_SYSLOG_SOCKET.into()),
    }
}

/// A handler the options ask for. Caller-supplied writers never come from
/// options, so they have no plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerPlan {
    Syslog(SyslogTarget),
    File(PathBuf),
    Console,
}

/// Ordered handlers requested by the options: syslog, file, then console
/// when nothing else was requested or `console` is set.
pub fn plan_handlers(options: &LoggingOptions) -> Vec<HandlerPlan> {
    let mut plans = Vec::new();

    if options.syslog {
        plans.push(HandlerPlan::Syslog(syslog_target(options)));
    }
    if let Some(path) = &options.file_name {
        plans.push(HandlerPlan::File(path.clone()));
    }
    if plans.is_empty() || options.console {
        plans.push(HandlerPlan::Console);
    }

    plans
}

/// Open every planned destination with the shared `threshold`.
///
/// Fails on the first destination that cannot be opened.
pub fn build_handlers(
    options: &LoggingOptions,
    threshold: Severity,
) -> Result<Vec<Arc<Handler>>, HandlerError> {
    plan_handlers(options)
        .into_iter()
        .map(|plan| {
            let handler = match plan {
                HandlerPlan::Syslog(target) => {
                    Handler::syslog(target, options.facility(), threshold)?
                }
                HandlerPlan::File(path) => Handler::file(path, threshold)?,
                HandlerPlan::Console => Handler::console(threshold),
            };
            tracing::debug!(destination = %handler.destination(), threshold = %threshold, "Handler opened");
            Ok(Arc::new(handler))
        })
        .collect()
}
