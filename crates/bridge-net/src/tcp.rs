//! The plain-TCP data feed (spec §4.5) and command port (spec §4.7's
//! transport half). Both accept loops poll a non-blocking listener so
//! shutdown never depends on a client connecting (spec §8 property 6).

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client_set::{ClientId, ClientSet};
use crate::command_queue::CommandQueue;
use crate::error::NetError;
use crate::socket::tune;
use crate::throttle::BroadcastThrottle;

/// How long `accept()` polling sleeps between non-blocking attempts.
const ACCEPT_POLL: Duration = Duration::from_millis(20);
/// Ceiling on a single command read before the connection is dropped.
const MAX_COMMAND_BYTES: usize = 64 * 1024;

fn bind(addr: &str, port: u16) -> Result<TcpListener, NetError> {
    let listener = TcpListener::bind((addr, port))
        .map_err(|e| NetError::ResourceUnavailable(format!("bind {addr}:{port}: {e}")))?;
    listener
        .set_nonblocking(true)
        .map_err(|e| NetError::ResourceUnavailable(format!("set_nonblocking: {e}")))?;
    Ok(listener)
}

/// Broadcasts pre-built JSON documents to every connected plain-TCP reader.
pub struct TcpDataServer {
    clients: ClientSet<Arc<TcpStream>>,
    running: Arc<AtomicBool>,
    throttle: BroadcastThrottle,
}

impl TcpDataServer {
    /// Binds the listener and spawns the accept-loop thread. Returns
    /// immediately; the server keeps running until `shutdown` flips `running`
    /// to `false` and the accept thread notices on its next poll.
    pub fn spawn(
        addr: &str,
        port: u16,
        running: Arc<AtomicBool>,
        broadcast_interval_ms: u64,
    ) -> Result<Arc<Self>, NetError> {
        let listener = bind(addr, port)?;
        let server = Arc::new(TcpDataServer {
            clients: ClientSet::new(),
            running,
            throttle: BroadcastThrottle::new(broadcast_interval_ms),
        });
        let accept_server = Arc::clone(&server);
        thread::Builder::new()
            .name("bridge-tcp-data-accept".into())
            .spawn(move || accept_server.accept_loop(listener))
            .map_err(|e| NetError::ResourceUnavailable(format!("spawn accept thread: {e}")))?;
        Ok(server)
    }

    fn accept_loop(&self, listener: TcpListener) {
        while self.running.load(Ordering::Acquire) {
            match listener.accept() {
                Ok((stream, peer)) => {
                    if let Err(e) = tune(&stream) {
                        warn!(%peer, error = %e, "failed to tune accepted data stream");
                    }
                    let id = self.clients.insert(Arc::new(stream));
                    debug!(%peer, client_id = id, "tcp data client connected");
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    warn!(error = %e, "tcp data accept error");
                    thread::sleep(ACCEPT_POLL);
                }
            }
        }
    }

    /// Sends `payload` to every connected client, snapshotting handles under
    /// the lock and writing outside it, then drops whichever clients the
    /// write failed for (spec §9). Self-throttled: calls inside the
    /// configured interval since the last send are a no-op (spec §4.5).
    ///
    /// Streams are non-blocking (spec §4.5), so a client whose receive
    /// buffer is full reports `WouldBlock`/`Interrupted` here rather than
    /// parking this thread; that is treated as transient and the client is
    /// simply retried on the next broadcast instead of being evicted.
    pub fn broadcast(&self, payload: &[u8]) {
        if !self.throttle.try_tick() {
            return;
        }
        let snapshot = self.clients.snapshot();
        if snapshot.is_empty() {
            return;
        }
        let mut dead: Vec<ClientId> = Vec::new();
        for (id, stream) in snapshot {
            match (&*stream).write(payload) {
                Ok(_) => {}
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {}
                Err(_) => dead.push(id),
            }
        }
        self.clients.remove_many(&dead);
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

/// Accepts short-lived connections, reads one command body per connection,
/// and enqueues it for the sim thread to drain on its next tick.
pub struct TcpCommandServer {
    running: Arc<AtomicBool>,
}

impl TcpCommandServer {
    pub fn spawn(
        addr: &str,
        port: u16,
        running: Arc<AtomicBool>,
        queue: Arc<CommandQueue>,
    ) -> Result<(), NetError> {
        let listener = bind(addr, port)?;
        let server = TcpCommandServer { running };
        thread::Builder::new()
            .name("bridge-tcp-command-accept".into())
            .spawn(move || server.accept_loop(listener, queue))
            .map_err(|e| NetError::ResourceUnavailable(format!("spawn command thread: {e}")))?;
        Ok(())
    }

    fn accept_loop(&self, listener: TcpListener, queue: Arc<CommandQueue>) {
        while self.running.load(Ordering::Acquire) {
            match listener.accept() {
                Ok((stream, peer)) => {
                    let queue = Arc::clone(&queue);
                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &queue) {
                            debug!(%peer, error = %e, "tcp command connection ended");
                        }
                    });
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    warn!(error = %e, "tcp command accept error");
                    thread::sleep(ACCEPT_POLL);
                }
            }
        }
    }

    fn handle_connection(mut stream: TcpStream, queue: &CommandQueue) -> io::Result<()> {
        stream.set_nonblocking(false)?;
        let mut body = Vec::new();
        stream.take(MAX_COMMAND_BYTES as u64).read_to_end(&mut body)?;
        if body.is_empty() {
            return Ok(());
        }
        match String::from_utf8(body) {
            Ok(text) => queue.push(text),
            Err(e) => warn!(error = %e, "command body was not valid utf-8, dropped"),
        }
        Ok(())
    }
}
