//! Small helpers around `socket2`, used only for the knobs `std::net` does
//! not expose (`TCP_NODELAY`, keepalive). Everything else goes through
//! plain `std::net::{TcpListener, TcpStream}`.

use std::io;
use std::net::TcpStream;
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};

const KEEPALIVE_TIME: Duration = Duration::from_secs(30);
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(10);

/// Puts a freshly accepted stream into non-blocking mode, disables Nagle's
/// algorithm, and enables TCP keepalive. Non-blocking keeps a broadcast
/// write from ever parking the calling thread on a full send buffer;
/// keepalive reaps clients that vanished without a clean close.
pub fn tune(stream: &TcpStream) -> io::Result<()> {
    stream.set_nonblocking(true)?;
    stream.set_nodelay(true)?;
    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(KEEPALIVE_TIME)
        .with_interval(KEEPALIVE_INTERVAL);
    sock.set_tcp_keepalive(&keepalive)
}
