//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line (clap)          config file (TOML)
//!     → schema.rs                → loader.rs (parse & deserialize)
//!           ╲                   ╱
//!            LoggingOptions::merge (CLI over file)
//!     → validation.rs (semantic checks)
//!     → lifecycle::init
//! ```
//!
//! # Design Decisions
//! - One options struct for both sources; every field has a default
//! - Validation separates syntactic (clap/serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_options, ConfigError};
pub use schema::LoggingOptions;
pub use validation::{validate_options, ValidationError};
