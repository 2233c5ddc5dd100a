//! Logging options.
//!
//! The same struct is parsed from the command line (clap) and deserialized
//! from a TOML file (serde). Flag names keep their underscore spelling
//! (`--file_name`, `--syslog_host`, ...).

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::handlers::SyslogFacility;
use crate::logger::Severity;

/// Options driving the startup configuration of every registered logger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingOptions {
    /// Apply the handlers to all tracing events, not only registered loggers.
    #[arg(long = "all_loggers")]
    pub all_loggers: bool,

    /// Log messages to the console (default when no other handler is given).
    #[arg(long)]
    pub console: bool,

    /// Turn on verbose debugging.
    #[arg(long)]
    pub debug: bool,

    /// Turn on error messages.
    #[arg(long)]
    pub error: bool,

    /// Turn on info messages.
    #[arg(long)]
    pub info: bool,

    /// Turn on syslog messages.
    #[arg(long)]
    pub syslog: bool,

    /// Syslog host to send messages to (UDP). Without it the local socket is used.
    #[arg(long = "syslog_host", value_name = "HOST")]
    pub syslog_host: Option<String>,

    /// Port for the syslog host.
    #[arg(long = "syslog_port", value_name = "PORT")]
    pub syslog_port: Option<u16>,

    /// Facility to use for syslog messages.
    #[arg(long = "syslog_facility", value_name = "FACILITY", value_enum)]
    pub syslog_facility: Option<SyslogFacility>,

    /// Turn on warning messages.
    #[arg(long)]
    pub warning: bool,

    /// Append log messages to this file.
    #[arg(long = "file_name", value_name = "PATH")]
    pub file_name: Option<PathBuf>,

    /// Threshold used when no level flag is set. Config file only.
    #[arg(skip)]
    pub level: Option<Severity>,
}

impl LoggingOptions {
    /// Overlay `overrides` on `self`: flags are OR-ed, values set in
    /// `overrides` win.
    pub fn merge(self, overrides: LoggingOptions) -> LoggingOptions {
        LoggingOptions {
            all_loggers: self.all_loggers || overrides.all_loggers,
            console: self.console || overrides.console,
            debug: self.debug || overrides.debug,
            error: self.error || overrides.error,
            info: self.info || overrides.info,
            syslog: self.syslog || overrides.syslog,
            syslog_host: overrides.syslog_host.or(self.syslog_host),
            syslog_port: overrides.syslog_port.or(self.syslog_port),
            syslog_facility: overrides.syslog_facility.or(self.syslog_facility),
            warning: self.warning || overrides.warning,
            file_name: overrides.file_name.or(self.file_name),
            level: overrides.level.or(self.level),
        }
    }

    /// Facility for syslog datagrams, `LOG_USER` unless set.
    pub fn facility(&self) -> SyslogFacility {
        self.syslog_facility.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        logging: LoggingOptions,
    }

    fn parse(args: &[&str]) -> LoggingOptions {
        let argv = std::iter::once("prog").chain(args.iter().copied());
        TestCli::try_parse_from(argv).unwrap().logging
    }

    #[test]
    fn test_no_flags() {
        assert_eq!(parse(&[]), LoggingOptions::default());
    }

    #[test]
    fn test_underscore_flags() {
        let opts = parse(&[
            "--all_loggers",
            "--debug",
            "--syslog",
            "--syslog_host",
            "collector",
            "--syslog_port=1514",
            "--syslog_facility",
            "LOG_LOCAL3",
            "--file_name=/tmp/out.log",
        ]);
        assert!(opts.all_loggers && opts.debug && opts.syslog);
        assert_eq!(opts.syslog_host.as_deref(), Some("collector"));
        assert_eq!(opts.syslog_port, Some(1514));
        assert_eq!(opts.facility(), SyslogFacility::Local3);
        assert_eq!(opts.file_name, Some(PathBuf::from("/tmp/out.log")));
    }

    #[test]
    fn test_rejects_unknown_facility_and_bad_port() {
        let argv = ["prog", "--syslog_facility", "LOG_NOPE"];
        assert!(TestCli::try_parse_from(argv).is_err());
        let argv = ["prog", "--syslog_port", "seventy"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = LoggingOptions {
            info: true,
            syslog_host: Some("file-host".into()),
            syslog_port: Some(600),
            level: Some(Severity::Error),
            ..Default::default()
        };
        let cli = LoggingOptions {
            console: true,
            syslog_host: Some("cli-host".into()),
            ..Default::default()
        };

        let merged = file.merge(cli);
        assert!(merged.info && merged.console);
        assert_eq!(merged.syslog_host.as_deref(), Some("cli-host"));
        assert_eq!(merged.syslog_port, Some(600));
        assert_eq!(merged.level, Some(Severity::Error));
        assert_eq!(merged.facility(), SyslogFacility::User);
    }
}
