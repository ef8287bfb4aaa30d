//! The self-contained WebSocket server (spec §4.6): one accept loop, one
//! reader thread per connection, and a broadcast path that shares a
//! connection's write half with its reader thread's pong replies.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client_set::{ClientId, ClientSet};
use crate::command_queue::CommandQueue;
use crate::error::NetError;
use crate::socket::tune;
use crate::throttle::BroadcastThrottle;
use crate::ws::frame::{self, Opcode};
use crate::ws::handshake;

const ACCEPT_POLL: Duration = Duration::from_millis(20);
/// Ceiling on the handshake request line so a slow-loris client can't
/// block the reader thread forever.
const MAX_HANDSHAKE_BYTES: usize = 8 * 1024;
/// spec §4.6 step 1: read the HTTP upgrade headers with a 2-second deadline.
const HANDSHAKE_DEADLINE: Duration = Duration::from_secs(2);
/// Ceiling on a single post-handshake frame read so the reader thread
/// re-checks `running` at least this often (spec §5, ≤200ms for WebSocket).
const FRAME_READ_DEADLINE: Duration = Duration::from_millis(200);

type WriteHalf = Arc<Mutex<TcpStream>>;

/// Broadcasts pre-built JSON documents to every connected WebSocket client
/// as a single text frame each.
pub struct WebSocketServer {
    clients: ClientSet<WriteHalf>,
    running: Arc<AtomicBool>,
    commands: Arc<CommandQueue>,
    throttle: BroadcastThrottle,
}

impl WebSocketServer {
    pub fn spawn(
        addr: &str,
        port: u16,
        running: Arc<AtomicBool>,
        commands: Arc<CommandQueue>,
        broadcast_interval_ms: u64,
    ) -> Result<Arc<Self>, NetError> {
        let listener = TcpListener::bind((addr, port))
            .map_err(|e| NetError::ResourceUnavailable(format!("bind {addr}:{port}: {e}")))?;
        listener
            .set_nonblocking(true)
            .map_err(|e| NetError::ResourceUnavailable(format!("set_nonblocking: {e}")))?;
        let server = Arc::new(WebSocketServer {
            clients: ClientSet::new(),
            running,
            commands,
            throttle: BroadcastThrottle::new(broadcast_interval_ms),
        });
        let accept_server = Arc::clone(&server);
        thread::Builder::new()
            .name("bridge-ws-accept".into())
            .spawn(move || accept_server.accept_loop(listener))
            .map_err(|e| NetError::ResourceUnavailable(format!("spawn ws accept thread: {e}")))?;
        Ok(server)
    }

    fn accept_loop(self: &Arc<Self>, listener: TcpListener) {
        while self.running.load(Ordering::Acquire) {
            match listener.accept() {
                Ok((stream, peer)) => {
                    if let Err(e) = tune(&stream) {
                        warn!(%peer, error = %e, "failed to tune accepted ws stream");
                    }
                    let server = Arc::clone(self);
                    thread::spawn(move || {
                        if let Err(e) = server.handle_connection(stream) {
                            debug!(%peer, error = %e, "websocket connection ended");
                        }
                    });
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    warn!(error = %e, "ws accept error");
                    thread::sleep(ACCEPT_POLL);
                }
            }
        }
    }

    fn handle_connection(self: &Arc<Self>, mut stream: TcpStream) -> Result<(), NetError> {
        stream
            .set_nonblocking(false)
            .map_err(|e| NetError::Protocol(format!("set_nonblocking(false): {e}")))?;
        // spec §4.6 step 1: the handshake read has a 2-second deadline so a
        // client that opens a socket and never sends headers can't pin a
        // reader thread forever.
        stream
            .set_read_timeout(Some(HANDSHAKE_DEADLINE))
            .map_err(|e| NetError::Protocol(format!("set_read_timeout: {e}")))?;
        let request = read_handshake_request(&mut stream)
            .map_err(|e| NetError::Protocol(format!("reading handshake: {e}")))?;
        let key = handshake::extract_key(&request)?;
        let response = handshake::build_response(&key);
        stream
            .write_all(response.as_bytes())
            .map_err(|e| NetError::Protocol(format!("writing handshake response: {e}")))?;
        // Frames after the handshake are read against a short deadline so
        // an idle connection still lets the reader thread notice `running`
        // went false and exit (spec §5) instead of blocking indefinitely.
        stream
            .set_read_timeout(Some(FRAME_READ_DEADLINE))
            .map_err(|e| NetError::Protocol(format!("set_read_timeout: {e}")))?;

        let mut reader = stream
            .try_clone()
            .map_err(|e| NetError::Protocol(format!("try_clone: {e}")))?;
        let write_half: WriteHalf = Arc::new(Mutex::new(stream));
        let id = self.clients.insert(Arc::clone(&write_half));
        debug!(client_id = id, "websocket client connected");

        let result = self.reader_loop(&mut reader, &write_half);
        self.clients.remove(id);
        result
    }

    fn reader_loop(&self, reader: &mut TcpStream, write_half: &WriteHalf) -> Result<(), NetError> {
        while self.running.load(Ordering::Acquire) {
            let incoming = match frame::read_frame(reader)? {
                Some(frame) => frame,
                None => continue,
            };
            match incoming.opcode {
                Opcode::Close => {
                    let mut guard = write_half.lock().expect("ws write mutex poisoned");
                    let _ = guard.write_all(&frame::encode_close());
                    return Ok(());
                }
                Opcode::Ping => {
                    let reply = frame::encode_pong(&incoming.payload);
                    let mut guard = write_half.lock().expect("ws write mutex poisoned");
                    guard
                        .write_all(&reply)
                        .map_err(|e| NetError::Protocol(format!("pong write: {e}")))?;
                }
                // Continuation is accepted as single-frame text (spec
                // §4.6); reassembly across frames is not implemented.
                Opcode::Text | Opcode::Continuation => match String::from_utf8(incoming.payload) {
                    Ok(text) => self.commands.push(text),
                    Err(_) => {
                        debug!("dropped a non-utf8 websocket text frame");
                    }
                },
                // The bridge is telemetry-out only; binary and pong frames
                // carry nothing it acts on.
                Opcode::Binary | Opcode::Pong => {}
            }
        }
        Ok(())
    }

    /// Sends `payload` as a single text frame to every connected client.
    /// Self-throttled like the TCP transport (spec §4.6).
    pub fn broadcast(&self, payload: &[u8]) {
        if !self.throttle.try_tick() {
            return;
        }
        let snapshot = self.clients.snapshot();
        if snapshot.is_empty() {
            return;
        }
        let frame = frame::encode_text(payload);
        let mut dead: Vec<ClientId> = Vec::new();
        for (id, write_half) in snapshot {
            let mut guard = write_half.lock().expect("ws write mutex poisoned");
            if guard.write_all(&frame).is_err() {
                dead.push(id);
            }
        }
        self.clients.remove_many(&dead);
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

/// Reads byte-at-a-time until the blank line terminating the HTTP request
/// headers. Small requests only; the bridge never serves a websocket proxy.
fn read_handshake_request(stream: &mut TcpStream) -> io::Result<String> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    while buf.len() < MAX_HANDSHAKE_BYTES {
        stream.read_exact(&mut byte)?;
        buf.push(byte[0]);
        if buf.ends_with(b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
