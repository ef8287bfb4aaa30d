//! The bridge's top-level error taxonomy (spec §7). `ProtocolError`,
//! `PeerError`, and `DecodeError` are handled entirely inside the crate
//! that detects them (a bad handshake drops one client, a malformed
//! inbound message is skipped and logged) and never reach this type;
//! `ConfigError` never arises because [`crate::BridgeConfig::from_env`]
//! treats an unparsable value as "use the default" rather than a fatal
//! condition. What remains here is what can actually fail the two
//! operations that return a `Result`: opening shared memory or a network
//! transport (`ResourceUnavailable`), and an invariant a correct build
//! should never violate (`Internal`, `Protocol` for handshake/transport
//! setup failures that aren't bind failures).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("internal invariant violation: {0}")]
    Internal(String),
}

impl From<bridge_record::RecordError> for BridgeError {
    fn from(e: bridge_record::RecordError) -> Self {
        match e {
            bridge_record::RecordError::ResourceUnavailable(msg) => {
                BridgeError::ResourceUnavailable(msg)
            }
            other => BridgeError::Internal(other.to_string()),
        }
    }
}

impl From<bridge_dispatch::DispatchError> for BridgeError {
    fn from(e: bridge_dispatch::DispatchError) -> Self {
        BridgeError::Internal(e.to_string())
    }
}

impl From<bridge_net::NetError> for BridgeError {
    fn from(e: bridge_net::NetError) -> Self {
        match e {
            bridge_net::NetError::ResourceUnavailable(msg) => {
                BridgeError::ResourceUnavailable(msg)
            }
            bridge_net::NetError::Protocol(msg) => BridgeError::Protocol(msg),
        }
    }
}
