//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::net::UdpSocket;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use startup_logging::LoggingOptions;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    logging: LoggingOptions,
}

/// Parse logging flags the way a program embedding the options would.
pub fn parse_flags(args: &[&str]) -> LoggingOptions {
    let argv = std::iter::once("test").chain(args.iter().copied());
    TestCli::try_parse_from(argv).unwrap().logging
}

/// In-memory writer whose contents outlive the handler.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
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

/// Bind a local UDP socket standing in for a syslog collector.
#[allow(dead_code)]
pub fn syslog_collector() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let port = socket.local_addr().unwrap().port();
    (socket, port)
}

/// Receive one datagram as text.
#[allow(dead_code)]
pub fn recv_line(socket: &UdpSocket) -> String {
    let mut buf = [0u8; 1024];
    let n = socket.recv(&mut buf).unwrap();
    String::from_utf8_lossy(&buf[..n]).into_owned()
}
