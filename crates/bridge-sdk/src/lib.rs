//! The host plugin ABI's per-message wire format.
//!
//! `spec.md` treats this boundary as an external SDK helper: "the core calls
//! into an SDK helper to parse one message from a byte stream and to append
//! one message to a byte stream." The real simulator ships that helper as
//! part of its native SDK; this crate is a minimal, concrete stand-in with
//! the same two operations (`parse_from`, `append_to`) so the rest of the
//! workspace has something real to build and test against. Swapping this
//! crate for vendor bindings should not require touching any other crate —
//! callers only see `SimMessage`, `DataType`, `Payload`, and the two
//! functions below.

use std::fmt;
use thiserror::Error;

pub mod hash;

pub use hash::message_id_of;

/// The data kind carried by a single message on the wire.
///
/// `None` is a real, observed case (spec §9 open question): some host
/// messages — e.g. certain `Aircraft.Crashed` notifications — declare no
/// payload at all and are ignored by the dispatch layer without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    None = 0,
    F64 = 1,
    I64 = 2,
    U64 = 3,
    F32 = 4,
    U8 = 5,
    String = 6,
    Vector2d = 7,
    Vector3d = 8,
    Vector4d = 9,
}

impl DataType {
    fn from_tag(tag: u8) -> Result<Self, SdkError> {
        Ok(match tag {
            0 => DataType::None,
            1 => DataType::F64,
            2 => DataType::I64,
            3 => DataType::U64,
            4 => DataType::F32,
            5 => DataType::U8,
            6 => DataType::String,
            7 => DataType::Vector2d,
            8 => DataType::Vector3d,
            9 => DataType::Vector4d,
            other => return Err(SdkError::UnknownDataType(other)),
        })
    }
}

/// The decoded payload of one message, tagged by `DataType`.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    None,
    F64(f64),
    I64(i64),
    U64(u64),
    F32(f32),
    U8(u8),
    String(String),
    Vector2d([f64; 2]),
    Vector3d([f64; 3]),
    Vector4d([f64; 4]),
}

impl Payload {
    #[must_use]
    pub fn data_type(&self) -> DataType {
        match self {
            Payload::None => DataType::None,
            Payload::F64(_) => DataType::F64,
            Payload::I64(_) => DataType::I64,
            Payload::U64(_) => DataType::U64,
            Payload::F32(_) => DataType::F32,
            Payload::U8(_) => DataType::U8,
            Payload::String(_) => DataType::String,
            Payload::Vector2d(_) => DataType::Vector2d,
            Payload::Vector3d(_) => DataType::Vector3d,
            Payload::Vector4d(_) => DataType::Vector4d,
        }
    }

    /// Read the payload as a scalar `f64`, if it is one of the numeric
    /// single-value kinds. Used by generic scalar/step handlers.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Payload::F64(v) => Some(v),
            Payload::F32(v) => Some(f64::from(v)),
            Payload::I64(v) => Some(v as f64),
            Payload::U64(v) => Some(v as f64),
            Payload::U8(v) => Some(f64::from(v)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Payload::Vector2d(v) => Some(v),
            Payload::Vector3d(v) => Some(v),
            Payload::Vector4d(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }
}

/// One inbound or outbound message: a 64-bit id (hash of the variable's
/// dotted name), flag bits, and a tagged payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SimMessage {
    pub id: u64,
    pub flags: u8,
    pub payload: Payload,
}

impl SimMessage {
    #[must_use]
    pub fn new(id: u64, payload: Payload) -> Self {
        SimMessage {
            id,
            flags: 0,
            payload,
        }
    }

    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.payload.data_type()
    }
}

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("unexpected end of message stream at offset {0}")]
    Truncated(usize),
    #[error("unknown data type tag {0}")]
    UnknownDataType(u8),
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::None => "none",
            DataType::F64 => "f64",
            DataType::I64 => "i64",
            DataType::U64 => "u64",
            DataType::F32 => "f32",
            DataType::U8 => "u8",
            DataType::String => "string",
            DataType::Vector2d => "vector2d",
            DataType::Vector3d => "vector3d",
            DataType::Vector4d => "vector4d",
        };
        f.write_str(name)
    }
}

/// Wire layout: `id:u64 LE | flags:u8 | type:u8 | payload`.
///
/// String payloads are `len:u16 LE | bytes`. Vectors are packed `f64`
/// components. This is deliberately simple — the real host ABI's framing is
/// out of scope per `spec.md` and owned by the vendor SDK.
fn read_u8(bytes: &[u8], pos: &mut usize) -> Result<u8, SdkError> {
    let b = *bytes.get(*pos).ok_or(SdkError::Truncated(*pos))?;
    *pos += 1;
    Ok(b)
}

fn read_bytes<'a>(bytes: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], SdkError> {
    let end = pos.checked_add(len).ok_or(SdkError::Truncated(*pos))?;
    let slice = bytes.get(*pos..end).ok_or(SdkError::Truncated(*pos))?;
    *pos = end;
    Ok(slice)
}

fn read_u64(bytes: &[u8], pos: &mut usize) -> Result<u64, SdkError> {
    let slice = read_bytes(bytes, pos, 8)?;
    Ok(u64::from_le_bytes(slice.try_into().unwrap()))
}

fn read_i64(bytes: &[u8], pos: &mut usize) -> Result<i64, SdkError> {
    let slice = read_bytes(bytes, pos, 8)?;
    Ok(i64::from_le_bytes(slice.try_into().unwrap()))
}

fn read_f64(bytes: &[u8], pos: &mut usize) -> Result<f64, SdkError> {
    let slice = read_bytes(bytes, pos, 8)?;
    Ok(f64::from_le_bytes(slice.try_into().unwrap()))
}

fn read_f32(bytes: &[u8], pos: &mut usize) -> Result<f32, SdkError> {
    let slice = read_bytes(bytes, pos, 4)?;
    Ok(f32::from_le_bytes(slice.try_into().unwrap()))
}

/// Parse exactly one message from `bytes` starting at `*pos`, advancing
/// `*pos` past it. Mirrors the host ABI's `parse_from(bytes, &pos) -> message`.
pub fn parse_from(bytes: &[u8], pos: &mut usize) -> Result<SimMessage, SdkError> {
    let id = read_u64(bytes, pos)?;
    let flags = read_u8(bytes, pos)?;
    let type_tag = read_u8(bytes, pos)?;
    let data_type = DataType::from_tag(type_tag)?;

    let payload = match data_type {
        DataType::None => Payload::None,
        DataType::F64 => Payload::F64(read_f64(bytes, pos)?),
        DataType::I64 => Payload::I64(read_i64(bytes, pos)?),
        DataType::U64 => Payload::U64(read_u64(bytes, pos)?),
        DataType::F32 => Payload::F32(read_f32(bytes, pos)?),
        DataType::U8 => Payload::U8(read_u8(bytes, pos)?),
        DataType::String => {
            let len = u16::from_le_bytes(read_bytes(bytes, pos, 2)?.try_into().unwrap()) as usize;
            let raw = read_bytes(bytes, pos, len)?;
            let s = std::str::from_utf8(raw).map_err(|_| SdkError::InvalidUtf8)?;
            Payload::String(s.to_owned())
        }
        DataType::Vector2d => Payload::Vector2d([read_f64(bytes, pos)?, read_f64(bytes, pos)?]),
        DataType::Vector3d => Payload::Vector3d([
            read_f64(bytes, pos)?,
            read_f64(bytes, pos)?,
            read_f64(bytes, pos)?,
        ]),
        DataType::Vector4d => Payload::Vector4d([
            read_f64(bytes, pos)?,
            read_f64(bytes, pos)?,
            read_f64(bytes, pos)?,
            read_f64(bytes, pos)?,
        ]),
    };

    Ok(SimMessage { id, flags, payload })
}

/// Append one message to `bytes`, growing it. Mirrors the host ABI's
/// `append_to(bytes, &size, &count)` — the count/size bookkeeping is the
/// caller's responsibility (a `Vec<u8>` tracks its own length already).
pub fn append_to(bytes: &mut Vec<u8>, msg: &SimMessage) {
    bytes.extend_from_slice(&msg.id.to_le_bytes());
    bytes.push(msg.flags);
    bytes.push(msg.data_type() as u8);
    match &msg.payload {
        Payload::None => {}
        Payload::F64(v) => bytes.extend_from_slice(&v.to_le_bytes()),
        Payload::I64(v) => bytes.extend_from_slice(&v.to_le_bytes()),
        Payload::U64(v) => bytes.extend_from_slice(&v.to_le_bytes()),
        Payload::F32(v) => bytes.extend_from_slice(&v.to_le_bytes()),
        Payload::U8(v) => bytes.push(*v),
        Payload::String(s) => {
            let len = u16::try_from(s.len().min(u16::MAX as usize)).unwrap_or(u16::MAX);
            bytes.extend_from_slice(&len.to_le_bytes());
            bytes.extend_from_slice(&s.as_bytes()[..len as usize]);
        }
        Payload::Vector2d(v) => {
            for component in v {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        Payload::Vector3d(v) => {
            for component in v {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
        Payload::Vector4d(v) => {
            for component in v {
                bytes.extend_from_slice(&component.to_le_bytes());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_payload_kind() {
        let messages = vec![
            SimMessage::new(1, Payload::None),
            SimMessage::new(2, Payload::F64(1524.0)),
            SimMessage::new(3, Payload::I64(-7)),
            SimMessage::new(4, Payload::U64(9)),
            SimMessage::new(5, Payload::F32(0.5)),
            SimMessage::new(6, Payload::U8(3)),
            SimMessage::new(7, Payload::String("N123AB".to_owned())),
            SimMessage::new(8, Payload::Vector2d([1.0, 2.0])),
            SimMessage::new(9, Payload::Vector3d([1.0, 2.0, 3.0])),
            SimMessage::new(10, Payload::Vector4d([1.0, 2.0, 3.0, 4.0])),
        ];

        let mut buf = Vec::new();
        for m in &messages {
            append_to(&mut buf, m);
        }

        let mut pos = 0;
        for expected in &messages {
            let parsed = parse_from(&buf, &mut pos).expect("message should parse");
            assert_eq!(&parsed, expected);
        }
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn truncated_stream_is_an_error_not_a_panic() {
        let mut buf = Vec::new();
        append_to(&mut buf, &SimMessage::new(1, Payload::F64(1.0)));
        buf.truncate(buf.len() - 1);
        let mut pos = 0;
        assert!(parse_from(&buf, &mut pos).is_err());
    }

    #[test]
    fn unknown_data_type_tag_is_rejected() {
        let mut buf = vec![0u8; 10];
        buf[9] = 200;
        let mut pos = 0;
        assert!(matches!(
            parse_from(&buf, &mut pos),
            Err(SdkError::UnknownDataType(200))
        ));
    }
}
