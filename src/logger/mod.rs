//! Named loggers and their registry.
//!
//! # Data Flow
//! ```text
//! component startup:
//!     Logger::get("name") / registry.logger("name")
//!     → registry.rs (entry created once per name, unconfigured)
//!
//! configuration (lifecycle::discovery):
//!     registry.claim_next_unconfigured()
//!     → entry marked configured, handlers attached
//!
//! emission:
//!     facade.rs (logger threshold)
//!     → attached handlers, or the tracing dispatcher when none
//! ```
//!
//! # Design Decisions
//! - Registration is explicit; nothing is discovered by introspection
//! - An entry is configured at most once for the registry's lifetime
//! - Severity set is fixed: DEBUG < INFO < WARNING < ERROR

pub mod facade;
pub mod registry;
pub mod severity;

pub use facade::Logger;
pub use registry::{is_valid_name, LoggerRegistry};
pub use severity::Severity;
