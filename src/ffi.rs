//! The host plugin ABI (spec §6): four `extern "C"` entry points over a
//! single lazily-constructed orchestrator. Every entry point catches
//! panics at the boundary and, on failure, returns the ABI's failure value
//! — the simulator must never crash because of the bridge (spec §7).

use crate::{init_logging, Bridge, BridgeConfig};
use bridge_sdk::{append_to, parse_from, SimMessage};
use std::os::raw::c_void;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tracing::error;

/// Bumped only if the four entry points' calling convention changes.
pub const INTERFACE_VERSION: i32 = 1;

static ORCHESTRATOR: OnceLock<Mutex<Bridge>> = OnceLock::new();

fn orchestrator() -> &'static Mutex<Bridge> {
    ORCHESTRATOR.get_or_init(|| {
        let config = BridgeConfig::from_env();
        init_logging(&config);
        Mutex::new(Bridge::new(config))
    })
}

fn plugin_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Interface-version query.
#[no_mangle]
pub extern "C" fn aerofly_bridge_interface_version() -> i32 {
    INTERFACE_VERSION
}

/// Constructs the catalog, opens the shared record, and starts every
/// configured transport.
///
/// `host_instance` is an opaque handle supplied by the simulator; the
/// bridge never dereferences it, so any value (including null) is
/// accepted.
///
/// @return `true` on success, `false` if initialization failed (logged).
///
/// # Safety
/// `host_instance` is never dereferenced; no safety obligation on the
/// caller beyond passing whatever the host gives it.
#[no_mangle]
pub unsafe extern "C" fn aerofly_bridge_init(host_instance: *mut c_void) -> bool {
    let _ = host_instance;
    match std::panic::catch_unwind(|| {
        let dir = plugin_dir();
        let mut bridge = orchestrator().lock().expect("orchestrator mutex poisoned");
        bridge.initialize(&dir)
    }) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            error!(error = %e, "aerofly_bridge_init failed");
            false
        }
        Err(_) => {
            error!("panic inside aerofly_bridge_init");
            false
        }
    }
}

/// One tick. Parses `inbound_count` messages out of `inbound_bytes`,
/// applies them, broadcasts the record, drains both command queues, and
/// encodes the resulting outbound messages into `outbound_bytes` up to
/// `outbound_capacity` bytes. `*outbound_size` and `*outbound_count` are
/// always written, even on failure (to `0`).
///
/// # Safety
/// `inbound_bytes` must point to at least `inbound_size` readable bytes.
/// `outbound_bytes` must point to at least `outbound_capacity` writable
/// bytes. `outbound_size` and `outbound_count` must point to valid `usize`
/// storage.
#[no_mangle]
pub unsafe extern "C" fn aerofly_bridge_update(
    delta_time: f64,
    inbound_bytes: *const u8,
    inbound_size: usize,
    inbound_count: usize,
    outbound_bytes: *mut u8,
    outbound_size: *mut usize,
    outbound_count: *mut usize,
    outbound_capacity: usize,
) -> bool {
    let _ = delta_time;

    // SAFETY: caller contract guarantees `inbound_size` readable bytes at
    // `inbound_bytes`, or the pointer is null/size zero (empty slice).
    let inbound_slice = if inbound_bytes.is_null() || inbound_size == 0 {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(inbound_bytes, inbound_size) }
    };

    let result = std::panic::catch_unwind(|| {
        let mut pos = 0;
        let mut inbound = Vec::with_capacity(inbound_count);
        for _ in 0..inbound_count {
            match parse_from(inbound_slice, &mut pos) {
                Ok(message) => inbound.push(message),
                Err(e) => {
                    error!(error = %e, "stopping inbound parse at a malformed message");
                    break;
                }
            }
        }

        let mut bridge = orchestrator().lock().expect("orchestrator mutex poisoned");
        let outbound = bridge.tick(&inbound);
        encode_outbound(&outbound, outbound_capacity)
    });

    match result {
        Ok(encoded) => {
            // SAFETY: caller contract guarantees `outbound_capacity`
            // writable bytes at `outbound_bytes`.
            unsafe {
                if !outbound_bytes.is_null() && !encoded.is_empty() {
                    std::ptr::copy_nonoverlapping(encoded.bytes.as_ptr(), outbound_bytes, encoded.bytes.len());
                }
                write_out(outbound_size, encoded.bytes.len());
                write_out(outbound_count, encoded.count);
            }
            true
        }
        Err(_) => {
            error!("panic inside aerofly_bridge_update");
            // SAFETY: same pointer contract as above.
            unsafe {
                write_out(outbound_size, 0);
                write_out(outbound_count, 0);
            }
            false
        }
    }
}

struct EncodedOutbound {
    bytes: Vec<u8>,
    count: usize,
}

impl EncodedOutbound {
    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encodes as many of `messages` as fit within `capacity` bytes. A message
/// that would overflow the buffer is dropped along with the rest of the
/// batch — the host always gets a well-formed, if truncated, stream.
fn encode_outbound(messages: &[SimMessage], capacity: usize) -> EncodedOutbound {
    let mut bytes = Vec::new();
    let mut count = 0;
    for message in messages {
        let before = bytes.len();
        append_to(&mut bytes, message);
        if bytes.len() > capacity {
            bytes.truncate(before);
            break;
        }
        count += 1;
    }
    EncodedOutbound { bytes, count }
}

/// # Safety
/// `ptr` must point to valid, writable `usize` storage (or be null).
unsafe fn write_out(ptr: *mut usize, value: usize) {
    if !ptr.is_null() {
        unsafe { *ptr = value };
    }
}

/// Stops WebSocket then TCP, unmaps the record, releases all handles.
/// Idempotent.
#[no_mangle]
pub extern "C" fn aerofly_bridge_shutdown() {
    if std::panic::catch_unwind(|| {
        let mut bridge = orchestrator().lock().expect("orchestrator mutex poisoned");
        bridge.shutdown();
    })
    .is_err()
    {
        error!("panic inside aerofly_bridge_shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_sdk::Payload;

    #[test]
    fn encode_outbound_truncates_at_capacity() {
        let messages = vec![
            SimMessage::new(1, Payload::F64(1.0)),
            SimMessage::new(2, Payload::F64(2.0)),
        ];
        let one_message_capacity = {
            let mut probe = Vec::new();
            append_to(&mut probe, &messages[0]);
            probe.len()
        };
        let encoded = encode_outbound(&messages, one_message_capacity);
        assert_eq!(encoded.count, 1);
        assert_eq!(encoded.bytes.len(), one_message_capacity);
    }

    #[test]
    fn encode_outbound_handles_ample_capacity() {
        let messages = vec![SimMessage::new(1, Payload::F64(1.0))];
        let encoded = encode_outbound(&messages, 4096);
        assert_eq!(encoded.count, 1);
        assert!(!encoded.is_empty());
    }
}
