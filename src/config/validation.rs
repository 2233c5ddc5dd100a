//! Option validation.
//!
//! # Responsibilities
//! - Semantic validation (clap and serde handle syntax)
//! - Reject values that would only fail later, when a handler is opened
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingOptions → Result<(), Vec<ValidationError>>
//! - Runs before any handler is opened

use crate::config::schema::LoggingOptions;

/// A single semantic problem in the options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("file_name must not be empty")]
    EmptyFileName,

    #[error("syslog_host must not be empty")]
    EmptySyslogHost,

    #[error("syslog_port must be between 1 and 65535")]
    SyslogPortZero,
}

/// Check `options`, collecting every problem found.
pub fn validate_options(options: &LoggingOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if options
        .file_name
        .as_ref()
        .is_some_and(|path| path.as_os_str().is_empty())
    {
        errors.push(ValidationError::EmptyFileName);
    }
    if options
        .syslog_host
        .as_deref()
        .is_some_and(|host| host.trim().is_empty())
    {
        errors.push(ValidationError::EmptySyslogHost);
    }
    if options.syslog_port == Some(0) {
        errors.push(ValidationError::SyslogPortZero);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Render a list of errors as one comma-separated message.
pub(crate) fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_options(&LoggingOptions::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let opts = LoggingOptions {
            file_name: Some(PathBuf::new()),
            syslog_host: Some("  ".into()),
            syslog_port: Some(0),
            ..Default::default()
        };
        let errors = validate_options(&opts).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyFileName,
                ValidationError::EmptySyslogHost,
                ValidationError::SyslogPortZero,
            ]
        );
        assert_eq!(
            join_errors(&errors),
            "file_name must not be empty, syslog_host must not be empty, syslog_port must be between 1 and 65535"
        );
    }
}
