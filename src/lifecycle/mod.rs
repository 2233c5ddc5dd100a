//! Startup configuration.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate options → resolve threshold → open handlers
//!     → [all_loggers] capture subscriber
//!     → discovery.rs
//!
//! Discovery (discovery.rs):
//!     claim next unconfigured logger → attach handlers → rescan
//!     until nothing is left
//! ```
//!
//! # Design Decisions
//! - Runs once, synchronously, before the program's own logic
//! - Loggers registered later are configured by `LoggingContext::discover`

pub mod discovery;
pub mod startup;

pub use startup::{init, run, ConfigureError, LoggingContext};
