//! RFC 6455 §5 framing, encoded and decoded by hand. The bridge only ever
//! sends unmasked server frames and only ever receives masked client
//! frames (workload is a single text frame per JSON document — the sim
//! never fragments a broadcast across continuation frames).

use std::io::{self, Read};

use crate::error::NetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Continuation,
    Text,
    Binary,
    Close,
    Ping,
    Pong,
}

impl Opcode {
    fn from_byte(b: u8) -> Result<Self, NetError> {
        match b {
            0x0 => Ok(Opcode::Continuation),
            0x1 => Ok(Opcode::Text),
            0x2 => Ok(Opcode::Binary),
            0x8 => Ok(Opcode::Close),
            0x9 => Ok(Opcode::Ping),
            0xA => Ok(Opcode::Pong),
            other => Err(NetError::Protocol(format!("unsupported websocket opcode 0x{other:x}"))),
        }
    }

    fn to_byte(self) -> u8 {
        match self {
            Opcode::Continuation => 0x0,
            Opcode::Text => 0x1,
            Opcode::Binary => 0x2,
            Opcode::Close => 0x8,
            Opcode::Ping => 0x9,
            Opcode::Pong => 0xA,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}

/// Encodes an unmasked server-to-client frame (final bit always set; the
/// bridge never fragments an outgoing message).
#[must_use]
pub fn encode(opcode: Opcode, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 10);
    out.push(0x80 | opcode.to_byte());
    let len = payload.len();
    if len < 126 {
        out.push(len as u8);
    } else if len <= u16::MAX as usize {
        out.push(126);
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        out.push(127);
        out.extend_from_slice(&(len as u64).to_be_bytes());
    }
    out.extend_from_slice(payload);
    out
}

#[must_use]
pub fn encode_text(payload: &[u8]) -> Vec<u8> {
    encode(Opcode::Text, payload)
}

#[must_use]
pub fn encode_pong(payload: &[u8]) -> Vec<u8> {
    encode(Opcode::Pong, payload)
}

#[must_use]
pub fn encode_close() -> Vec<u8> {
    encode(Opcode::Close, &[])
}

fn read_exact_n(reader: &mut impl Read, n: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}

/// Reads and unmasks one client frame. Client frames are always masked per
/// RFC 6455 §5.1; an unmasked client frame is a protocol violation.
///
/// Returns `Ok(None)` if the first header byte times out (`WouldBlock` or
/// `TimedOut`) with no frame in progress — the caller re-checks its running
/// flag and tries again rather than treating an idle connection as an
/// error. A timeout partway through a frame is not tolerated: it means a
/// peer started sending and stalled, which is a protocol violation.
pub fn read_frame(reader: &mut impl Read) -> Result<Option<Frame>, NetError> {
    let mut first = [0u8; 1];
    match reader.read(&mut first) {
        Ok(0) => return Err(NetError::Protocol("connection closed".into())),
        Ok(_) => {}
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => return Ok(None),
        Err(e) => return Err(NetError::Protocol(format!("frame header: {e}"))),
    }
    let second = read_exact_n(reader, 1).map_err(|e| NetError::Protocol(format!("frame header: {e}")))?;
    let header = [first[0], second[0]];
    let opcode = Opcode::from_byte(header[0] & 0x0F)?;
    let masked = header[1] & 0x80 != 0;
    if !masked {
        return Err(NetError::Protocol("client frame must be masked".into()));
    }
    let len_field = header[1] & 0x7F;
    let payload_len: u64 = match len_field {
        126 => {
            let ext = read_exact_n(reader, 2).map_err(|e| NetError::Protocol(format!("ext len: {e}")))?;
            u16::from_be_bytes([ext[0], ext[1]]) as u64
        }
        127 => {
            let ext = read_exact_n(reader, 8).map_err(|e| NetError::Protocol(format!("ext len: {e}")))?;
            u64::from_be_bytes(ext.try_into().expect("8 bytes"))
        }
        n => n as u64,
    };
    let mask_key = read_exact_n(reader, 4).map_err(|e| NetError::Protocol(format!("mask key: {e}")))?;
    let mut payload = read_exact_n(reader, payload_len as usize)
        .map_err(|e| NetError::Protocol(format!("payload: {e}")))?;
    for (i, byte) in payload.iter_mut().enumerate() {
        *byte ^= mask_key[i % 4];
    }
    Ok(Some(Frame { opcode, payload }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_masked_text_frame() {
        let text = b"hello";
        let mask = [0x12u8, 0x34, 0x56, 0x78];
        let masked: Vec<u8> = text.iter().enumerate().map(|(i, b)| b ^ mask[i % 4]).collect();
        let mut raw = vec![0x81, 0x80 | text.len() as u8];
        raw.extend_from_slice(&mask);
        raw.extend_from_slice(&masked);

        let frame = read_frame(&mut raw.as_slice()).unwrap().expect("a complete frame");
        assert_eq!(frame.opcode, Opcode::Text);
        assert_eq!(frame.payload, text);
    }

    #[test]
    fn rejects_an_unmasked_client_frame() {
        let raw = [0x81, 0x05, b'h', b'e', b'l', b'l', b'o'];
        assert!(read_frame(&mut raw.as_slice()).is_err());
    }

    #[test]
    fn encodes_a_short_text_frame_unmasked() {
        let encoded = encode_text(b"hi");
        assert_eq!(encoded, vec![0x81, 0x02, b'h', b'i']);
    }

    #[test]
    fn encodes_an_extended_length_frame() {
        let payload = vec![0u8; 200];
        let encoded = encode_text(&payload);
        assert_eq!(encoded[0], 0x81);
        assert_eq!(encoded[1], 126);
        assert_eq!(u16::from_be_bytes([encoded[2], encoded[3]]) as usize, 200);
    }

    struct WouldBlockOnce;

    impl Read for WouldBlockOnce {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::WouldBlock))
        }
    }

    #[test]
    fn a_timed_out_header_read_yields_none_instead_of_an_error() {
        let mut reader = WouldBlockOnce;
        assert!(read_frame(&mut reader).unwrap().is_none());
    }
}
