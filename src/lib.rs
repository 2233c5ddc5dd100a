//! Startup logging configuration for named loggers.
//!
//! Components register a named [`Logger`] when they are constructed. At
//! startup the program calls [`init`] once with its parsed
//! [`LoggingOptions`]; every registered logger that has not been configured
//! yet receives the same handler set (console, file, syslog) and threshold.
//!
//! ```no_run
//! use clap::Parser;
//! use startup_logging::{Logger, LoggerRegistry, LoggingOptions};
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     logging: LoggingOptions,
//! }
//!
//! let logger = Logger::get("example");
//! let cli = Cli::parse();
//! let _context = startup_logging::init(&cli.logging, LoggerRegistry::global())?;
//!
//! logger.debug("example debug");
//! logger.warning("example warning");
//! # Ok::<(), startup_logging::ConfigureError>(())
//! ```
//!
//! Lines are written as `LEVEL:name message`.

pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod logger;

pub use config::LoggingOptions;
pub use handlers::{Handler, SyslogFacility};
pub use lifecycle::{init, run, ConfigureError, LoggingContext};
pub use logger::{Logger, LoggerRegistry, Severity};
