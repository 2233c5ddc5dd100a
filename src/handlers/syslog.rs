//! Syslog transport.
//!
//! Datagrams carry a `<PRI>` header followed by the formatted line and a
//! trailing NUL byte. Remote targets use UDP, the local target uses the Unix
//! datagram socket.

use std::fmt;
use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::net::UnixDatagram;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::logger::Severity;

/// Standard syslog UDP port.
pub const SYSLOG_UDP_PORT: u16 = 514;

/// Local syslog socket path.
pub const LOCAL_SYSLOG_SOCKET: &str = "/dev/log";

/// Where syslog datagrams are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogTarget {
    /// The local syslog daemon's datagram socket.
    Local(PathBuf),
    /// A remote collector reached over UDP.
    Remote { host: String, port: u16 },
}

impl fmt::Display for SyslogTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyslogTarget::Local(path) => write!(f, "{}", path.display()),
            SyslogTarget::Remote { host, port } => write!(f, "{}:{}", host, port),
        }
    }
}

/// Syslog facility selecting the `<PRI>` facility code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum SyslogFacility {
    #[value(name = "LOG_KERN")]
    #[serde(rename = "LOG_KERN")]
    Kern,
    #[default]
    #[value(name = "LOG_USER")]
    #[serde(rename = "LOG_USER")]
    User,
    #[value(name = "LOG_MAIL")]
    #[serde(rename = "LOG_MAIL")]
    Mail,
    #[value(name = "LOG_DAEMON")]
    #[serde(rename = "LOG_DAEMON")]
    Daemon,
    #[value(name = "LOG_AUTH")]
    #[serde(rename = "LOG_AUTH")]
    Auth,
    #[value(name = "LOG_SYSLOG")]
    #[serde(rename = "LOG_SYSLOG")]
    Syslog,
    #[value(name = "LOG_LPR")]
    #[serde(rename = "LOG_LPR")]
    Lpr,
    #[value(name = "LOG_NEWS")]
    #[serde(rename = "LOG_NEWS")]
    News,
    #[value(name = "LOG_UUCP")]
    #[serde(rename = "LOG_UUCP")]
    Uucp,
    #[value(name = "LOG_CRON")]
    #[serde(rename = "LOG_CRON")]
    Cron,
    #[value(name = "LOG_AUTHPRIV")]
    #[serde(rename = "LOG_AUTHPRIV")]
    AuthPriv,
    #[value(name = "LOG_FTP")]
    #[serde(rename = "LOG_FTP")]
    Ftp,
    #[value(name = "LOG_LOCAL0")]
    #[serde(rename = "LOG_LOCAL0")]
    Local0,
    #[value(name = "LOG_LOCAL1")]
    #[serde(rename = "LOG_LOCAL1")]
    Local1,
    #[value(name = "LOG_LOCAL2")]
    #[serde(rename = "LOG_LOCAL2")]
    Local2,
    #[value(name = "LOG_LOCAL3")]
    #[serde(rename = "LOG_LOCAL3")]
    Local3,
    #[value(name = "LOG_LOCAL4")]
    #[serde(rename = "LOG_LOCAL4")]
    Local4,
    #[value(name = "LOG_LOCAL5")]
    #[serde(rename = "LOG_LOCAL5")]
    Local5,
    #[value(name = "LOG_LOCAL6")]
    #[serde(rename = "LOG_LOCAL6")]
    Local6,
    #[value(name = "LOG_LOCAL7")]
    #[serde(rename = "LOG_LOCAL7")]
    Local7,
}

impl SyslogFacility {
    /// Numeric facility code (RFC 5424 section 6.2.1).
    pub fn code(&self) -> u8 {
        match self {
            SyslogFacility::Kern => 0,
            SyslogFacility::User => 1,
            SyslogFacility::Mail => 2,
            SyslogFacility::Daemon => 3,
            SyslogFacility::Auth => 4,
            SyslogFacility::Syslog => 5,
            SyslogFacility::Lpr => 6,
            SyslogFacility::News => 7,
            SyslogFacility::Uucp => 8,
            SyslogFacility::Cron => 9,
            SyslogFacility::AuthPriv => 10,
            SyslogFacility::Ftp => 11,
            SyslogFacility::Local0 => 16,
            SyslogFacility::Local1 => 17,
            SyslogFacility::Local2 => 18,
            SyslogFacility::Local3 => 19,
            SyslogFacility::Local4 => 20,
            SyslogFacility::Local5 => 21,
            SyslogFacility::Local6 => 22,
            SyslogFacility::Local7 => 23,
        }
    }

    /// `<PRI>` value for a record of the given severity.
    pub fn priority(&self, severity: Severity) -> u8 {
        self.code() * 8 + severity.syslog_code()
    }
}

/// A connected syslog socket.
#[derive(Debug)]
pub(crate) enum SyslogWriter {
    Udp(UdpSocket),
    #[cfg(unix)]
    Unix(UnixDatagram),
}

impl SyslogWriter {
    pub(crate) fn connect(target: &SyslogTarget) -> io::Result<Self> {
        match target {
            SyslogTarget::Remote { host, port } => {
                let addr = (host.as_str(), *port)
                    .to_socket_addrs()?
                    .next()
                    .ok_or_else(|| {
                        io::Error::new(io::ErrorKind::NotFound, format!("no address for {}", host))
                    })?;
                let local: SocketAddr = if addr.is_ipv4() {
                    ([0, 0, 0, 0], 0).into()
                } else {
                    ([0u16; 8], 0).into()
                };
                let socket = UdpSocket::bind(local)?;
                socket.connect(addr)?;
                Ok(SyslogWriter::Udp(socket))
            }
            #[cfg(unix)]
            SyslogTarget::Local(path) => {
                let socket = UnixDatagram::unbound()?;
                socket.connect(path)?;
                Ok(SyslogWriter::Unix(socket))
            }
            #[cfg(not(unix))]
            SyslogTarget::Local(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "local syslog socket is only available on unix",
            )),
        }
    }

    pub(crate) fn send(&self, priority: u8, line: &str) -> io::Result<()> {
        let datagram = format!("<{}>{}\0", priority, line);
        match self {
            SyslogWriter::Udp(socket) => socket.send(datagram.as_bytes()).map(|_| ()),
            #[cfg(unix)]
            SyslogWriter::Unix(socket) => socket.send(datagram.as_bytes()).map(|_| ()),
        }
    }
}
