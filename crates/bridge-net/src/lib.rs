//! Transports: the plain-TCP telemetry feed and command port (spec §4.5,
//! §4.7) and the hand-rolled WebSocket server (spec §4.6), plus the
//! client-set and broadcast-throttle primitives they share (spec §9).

mod client_set;
mod command_queue;
mod error;
mod socket;
mod tcp;
mod throttle;
mod ws;

pub use client_set::{ClientId, ClientSet};
pub use command_queue::CommandQueue;
pub use error::NetError;
pub use tcp::{TcpCommandServer, TcpDataServer};
pub use throttle::{BroadcastThrottle, MIN_INTERVAL_MS};
pub use ws::frame::{encode_text, Opcode};
pub use ws::handshake::accept_key;
pub use ws::WebSocketServer;
