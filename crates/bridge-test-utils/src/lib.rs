//! Bare test clients and harness helpers used only from `#[cfg(test)]` code
//! across the workspace — not part of the bridge's own runtime.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha1::{Digest, Sha1};

/// Binds an ephemeral port and hands back the bound port number, then drops
/// the listener so the caller's server under test can bind it instead.
/// Good enough for single-process test suites; accepts the small TOCTOU
/// race inherent to "reserve a port, then rebind it" port allocation.
#[must_use]
pub fn free_port() -> u16 {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral port");
    listener.local_addr().expect("local_addr").port()
}

/// A thin wrapper over a connected plain-TCP reader, for exercising the
/// telemetry broadcast feed.
pub struct TcpTestClient {
    reader: BufReader<TcpStream>,
}

impl TcpTestClient {
    pub fn connect(addr: &str, port: u16, timeout: Duration) -> std::io::Result<Self> {
        let stream = connect_with_retry(addr, port, timeout)?;
        Ok(TcpTestClient {
            reader: BufReader::new(stream),
        })
    }

    /// Reads one newline-terminated broadcast document.
    pub fn read_line(&mut self) -> std::io::Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line)
    }

    pub fn into_inner(self) -> TcpStream {
        self.reader.into_inner()
    }
}

/// A bare RFC 6455 client: performs the handshake by hand and exposes
/// minimal masked-send / unmasked-receive helpers.
pub struct WsTestClient {
    stream: TcpStream,
}

impl WsTestClient {
    pub fn connect(addr: &str, port: u16, path: &str, timeout: Duration) -> std::io::Result<Self> {
        let mut stream = connect_with_retry(addr, port, timeout)?;
        let key = BASE64.encode(b"0123456789abcdef");
        let request = format!(
            "GET {path} HTTP/1.1\r\nHost: {addr}\r\nUpgrade: websocket\r\nConnection: Upgrade\r\nSec-WebSocket-Key: {key}\r\nSec-WebSocket-Version: 13\r\n\r\n"
        );
        stream.write_all(request.as_bytes())?;

        let mut response = Vec::new();
        let mut byte = [0u8; 1];
        while !response.ends_with(b"\r\n\r\n") {
            stream.read_exact(&mut byte)?;
            response.push(byte[0]);
        }
        let response = String::from_utf8_lossy(&response);
        let expected_accept = compute_accept(&key);
        assert!(
            response.contains(&expected_accept),
            "handshake response missing expected Sec-WebSocket-Accept: {response}"
        );

        Ok(WsTestClient { stream })
    }

    /// Reads one server frame and returns its opcode byte and unmasked
    /// (server frames are never masked) payload.
    pub fn read_frame(&mut self) -> std::io::Result<(u8, Vec<u8>)> {
        let mut header = [0u8; 2];
        self.stream.read_exact(&mut header)?;
        let opcode = header[0] & 0x0F;
        let len_field = header[1] & 0x7F;
        let len = match len_field {
            126 => {
                let mut ext = [0u8; 2];
                self.stream.read_exact(&mut ext)?;
                u16::from_be_bytes(ext) as usize
            }
            127 => {
                let mut ext = [0u8; 8];
                self.stream.read_exact(&mut ext)?;
                u64::from_be_bytes(ext) as usize
            }
            n => n as usize,
        };
        let mut payload = vec![0u8; len];
        self.stream.read_exact(&mut payload)?;
        Ok((opcode, payload))
    }

    /// Sends a masked client ping frame.
    pub fn send_ping(&mut self, payload: &[u8]) -> std::io::Result<()> {
        self.send_masked(0x9, payload)
    }

    /// Sends a masked client close frame.
    pub fn send_close(&mut self) -> std::io::Result<()> {
        self.send_masked(0x8, &[])
    }

    fn send_masked(&mut self, opcode: u8, payload: &[u8]) -> std::io::Result<()> {
        let mask = [0x11u8, 0x22, 0x33, 0x44];
        let mut frame = vec![0x80 | opcode, 0x80 | payload.len() as u8];
        frame.extend_from_slice(&mask);
        for (i, b) in payload.iter().enumerate() {
            frame.push(b ^ mask[i % 4]);
        }
        self.stream.write_all(&frame)
    }

    pub fn shutdown(&self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}

fn compute_accept(client_key: &str) -> String {
    const GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";
    let mut hasher = Sha1::new();
    hasher.update(client_key.as_bytes());
    hasher.update(GUID.as_bytes());
    BASE64.encode(hasher.finalize())
}

fn connect_with_retry(addr: &str, port: u16, timeout: Duration) -> std::io::Result<TcpStream> {
    let deadline = std::time::Instant::now() + timeout;
    loop {
        match TcpStream::connect((addr, port)) {
            Ok(stream) => return Ok(stream),
            Err(e) if std::time::Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(10));
                let _ = e;
            }
            Err(e) => return Err(e),
        }
    }
}
