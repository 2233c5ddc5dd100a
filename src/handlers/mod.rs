//! Output handlers.
//!
//! # Data Flow
//! ```text
//! LoggingOptions
//!     → builder.rs (ordered handler set: syslog, file, console)
//!     → Arc<Handler> shared by every configured logger
//!
//! Logger::log / CaptureLayer::on_event
//!     → Record { severity, name, message }
//!     → Handler::handle (threshold check, "LEVEL:name message")
//!     → console stream | file | syslog datagram
//! ```
//!
//! # Design Decisions
//! - One handler instance per destination per configuration run, shared via Arc
//! - Writes are serialized per handler with a Mutex
//! - Write failures are reported on stderr and never reach the caller

pub mod builder;
pub mod capture;
pub mod syslog;

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::logger::Severity;

pub use builder::build_handlers;
pub use capture::CaptureLayer;
pub use syslog::{SyslogFacility, SyslogTarget};

use self::syslog::SyslogWriter;

/// Error raised while opening a handler's destination.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("cannot open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot connect to syslog at {target}: {source}")]
    SyslogConnect {
        target: SyslogTarget,
        #[source]
        source: io::Error,
    },
}

/// A single log record on its way to the handlers.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub severity: Severity,
    pub name: &'a str,
    pub message: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(severity: Severity, name: &'a str, message: &'a str) -> Self {
        Self { severity, name, message }
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.severity, self.name, self.message)
    }
}

/// Describes where a handler writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Console,
    File(PathBuf),
    Syslog(SyslogTarget),
    /// A caller-supplied writer.
    Writer,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Console => f.write_str("console"),
            Destination::File(path) => write!(f, "file:{}", path.display()),
            Destination::Syslog(target) => write!(f, "syslog:{}", target),
            Destination::Writer => f.write_str("writer"),
        }
    }
}

enum Sink {
    Stream(Box<dyn Write + Send>),
    Syslog {
        writer: SyslogWriter,
        facility: SyslogFacility,
    },
}

/// An output destination with its own severity threshold.
pub struct Handler {
    destination: Destination,
    threshold: Severity,
    sink: Mutex<Sink>,
}

impl Handler {
    /// Handler writing to standard error.
    pub fn console(threshold: Severity) -> Self {
        Self {
            destination: Destination::Console,
            threshold,
            sink: Mutex::new(Sink::Stream(Box::new(io::stderr()))),
        }
    }

    /// Handler appending to `path`, creating it if missing.
    pub fn file(path: impl AsRef<Path>, threshold: Severity) -> Result<Self, HandlerError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| HandlerError::OpenFile { path: path.clone(), source })?;

        Ok(Self {
            destination: Destination::File(path),
            threshold,
            sink: Mutex::new(Sink::Stream(Box::new(file))),
        })
    }

    /// Handler sending datagrams to a syslog daemon.
    pub fn syslog(
        target: SyslogTarget,
        facility: SyslogFacility,
        threshold: Severity,
    ) -> Result<Self, HandlerError> {
        let writer = SyslogWriter::connect(&target)
            .map_err(|source| HandlerError::SyslogConnect { target: target.clone(), source })?;

        Ok(Self {
            destination: Destination::Syslog(target),
            threshold,
            sink: Mutex::new(Sink::Syslog { writer, facility }),
        })
    }

    /// Handler writing lines to an arbitrary writer.
    pub fn from_writer<W>(writer: W, threshold: Severity) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            destination: Destination::Writer,
            threshold,
            sink: Mutex::new(Sink::Stream(Box::new(writer))),
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn is_console(&self) -> bool {
        self.destination == Destination::Console
    }

    /// Emit `record` if it meets the threshold.
    pub fn handle(&self, record: &Record<'_>) {
        if record.severity < self.threshold {
            return;
        }
        if let Err(e) = self.write(record) {
            // Reporting through tracing could loop back into this handler.
            eprintln!("--- logging error --- {} ({}): {}", self.destination, record, e);
        }
    }

    fn write(&self, record: &Record<'_>) -> io::Result<()> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "handler mutex poisoned"))?;
        match &mut *sink {
            Sink::Stream(out) => {
                writeln!(out, "{}", record)?;
                out.flush()
            }
            Sink::Syslog { writer, facility } => {
                writer.send(facility.priority(record.severity), &record.to_string())
            }
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("destination", &self.destination)
            .field("threshold", &self.threshold)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// In-memory writer whose contents outlive the handler.
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::SharedBuffer;
    use super::*;

    #[test]
    fn test_line_format() {
        let record = Record::new(Severity::Warning, "db.pool", "connection lost");
        assert_eq!(record.to_string(), "WARNING:db.pool connection lost");
    }

    #[test]
    fn test_threshold_filters_records() {
        let buf = SharedBuffer::default();
        let handler = Handler::from_writer(buf.clone(), Severity::Warning);

        handler.handle(&Record::new(Severity::Info, "app", "dropped"));
        handler.handle(&Record::new(Severity::Warning, "app", "kept"));
        handler.handle(&Record::new(Severity::Error, "app", "also kept"));

        assert_eq!(buf.contents(), "WARNING:app kept\nERROR:app also kept\n");
    }

    #[test]
    fn test_file_handler_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "existing\n").unwrap();

        let handler = Handler::file(&path, Severity::Debug).unwrap();
        handler.handle(&Record::new(Severity::Debug, "app", "appended"));

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing\nDEBUG:app appended\n");
        assert_eq!(handler.destination(), &Destination::File(path));
    }

    #[test]
    fn test_file_handler_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");

        let err = Handler::file(&path, Severity::Debug).unwrap_err();
        assert!(matches!(err, HandlerError::OpenFile { .. }));
        assert!(err.to_string().contains("out.log"));
    }

    #[test]
    fn test_syslog_handler_prefixes_priority() {
        let receiver = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = receiver.local_addr().unwrap().port();
        let target = SyslogTarget::Remote { host: "127.0.0.1".into(), port };

        let handler = Handler::syslog(target, SyslogFacility::Local0, Severity::Info).unwrap();
        handler.handle(&Record::new(Severity::Error, "svc", "failed"));

        let mut buf = [0u8; 128];
        let n = receiver.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"<131>ERROR:svc failed\0");
    }

    #[cfg(unix)]
    #[test]
    fn test_local_syslog_socket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.sock");
        let receiver = std::os::unix::net::UnixDatagram::bind(&path).unwrap();

        let target = SyslogTarget::Local(path.clone());
        let handler = Handler::syslog(target, SyslogFacility::User, Severity::Debug).unwrap();
        assert_eq!(handler.destination(), &Destination::Syslog(SyslogTarget::Local(path)));

        handler.handle(&Record::new(Severity::Warning, "local", "disk low"));

        let mut buf = [0u8; 128];
        let n = receiver.recv(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"<12>WARNING:local disk low\0");
    }
}
