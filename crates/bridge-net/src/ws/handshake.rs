//! RFC 6455 §1.3 opening handshake: compute `Sec-WebSocket-Accept` from the
//! client's `Sec-WebSocket-Key` and write the upgrade response by hand (no
//! HTTP library — the bridge only ever speaks this one fixed handshake).

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha1::{Digest, Sha1};

use crate::error::NetError;

/// The GUID RFC 6455 fixes for computing the accept digest.
const WEBSOCKET_GUID: &str = "258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// Derives `Sec-WebSocket-Accept` from a client's `Sec-WebSocket-Key`.
#[must_use]
pub fn accept_key(client_key: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(client_key.as_bytes());
    hasher.update(WEBSOCKET_GUID.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Pulls `Sec-WebSocket-Key` out of a raw HTTP upgrade request's header
/// lines. Returns an error if the request is not a well-formed websocket
/// upgrade.
pub fn extract_key(request: &str) -> Result<String, NetError> {
    let has_header = |name: &str, expect: &str| {
        request.lines().any(|line| {
            line.split_once(':').is_some_and(|(header_name, value)| {
                header_name.trim().eq_ignore_ascii_case(name)
                    && value.to_ascii_lowercase().contains(expect)
            })
        })
    };
    if !has_header("Upgrade", "websocket") {
        return Err(NetError::Protocol("missing Upgrade: websocket header".into()));
    }
    if !has_header("Connection", "upgrade") {
        return Err(NetError::Protocol("missing Connection: Upgrade header".into()));
    }
    request
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("sec-websocket-key") {
                Some(value.trim().to_owned())
            } else {
                None
            }
        })
        .ok_or_else(|| NetError::Protocol("missing Sec-WebSocket-Key header".into()))
}

/// Builds the `101 Switching Protocols` response for a validated key.
#[must_use]
pub fn build_response(client_key: &str) -> String {
    format!(
        "HTTP/1.1 101 Switching Protocols\r\n\
         Upgrade: websocket\r\n\
         Connection: Upgrade\r\n\
         Sec-WebSocket-Accept: {}\r\n\r\n",
        accept_key(client_key)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The canonical RFC 6455 §1.3 worked example.
    #[test]
    fn matches_the_rfc_6455_worked_example() {
        assert_eq!(
            accept_key("dGhlIHNhbXBsZSBub25jZQ=="),
            "s3pPLMBiTxaQ9kYGzzhZRbK+xOo="
        );
    }

    #[test]
    fn extracts_key_case_insensitively() {
        let request = "GET /ws HTTP/1.1\r\nHost: localhost\r\nUpgrade: websocket\r\nConnection: Upgrade\r\nSec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\nSec-WebSocket-Version: 13\r\n\r\n";
        assert_eq!(extract_key(request).unwrap(), "dGhlIHNhbXBsZSBub25jZQ==");
    }

    #[test]
    fn rejects_a_non_upgrade_request() {
        let request = "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";
        assert!(extract_key(request).is_err());
    }
}
