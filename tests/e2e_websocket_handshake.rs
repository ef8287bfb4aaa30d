//! S4: the WebSocket transport performs a real RFC 6455 handshake and then
//! carries the same broadcast documents the plain-TCP transport does.

use aerofly_bridge::{Bridge, BridgeConfig};
use bridge_sdk::{Payload, SimMessage};
use bridge_test_utils::{free_port, WsTestClient};
use std::time::Duration;

#[test]
fn websocket_client_completes_handshake_and_receives_a_telemetry_frame() {
    let mut config = BridgeConfig::default();
    config.tcp_data_port = free_port();
    config.tcp_cmd_port = free_port();
    config.ws_enable = true;
    config.ws_port = free_port();

    let mut bridge = Bridge::new(config.clone()).with_region_name(format!(
        "aerofly_bridge_e2e_ws_{}",
        std::process::id()
    ));
    let dir = tempfile::tempdir().unwrap();
    bridge.initialize(dir.path()).expect("bridge should initialize");

    let mut client = WsTestClient::connect("127.0.0.1", config.ws_port, "/", Duration::from_secs(2))
        .expect("handshake should succeed");
    std::thread::sleep(Duration::from_millis(100));

    let index = bridge.catalog().index_of("Aircraft.Altitude").unwrap();
    let entry = bridge.catalog().entry(index).unwrap();
    let message = SimMessage::new(entry.message_id, Payload::F64(3048.0));
    bridge.tick(std::slice::from_ref(&message));

    let (opcode, payload) = client.read_frame().expect("should receive a text frame");
    assert_eq!(opcode, 0x1, "telemetry frames are sent as WebSocket text frames");
    let text = String::from_utf8(payload).expect("payload should be valid UTF-8");
    assert!(text.contains("\"Aircraft.Altitude\":3048.000000"));

    client.send_close().unwrap();
    bridge.shutdown();
}
