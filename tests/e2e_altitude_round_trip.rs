//! S1: a scalar telemetry value applied via `tick` shows up, correctly
//! formatted, in the broadcast JSON that plain-TCP clients receive.

use aerofly_bridge::{Bridge, BridgeConfig};
use bridge_sdk::{Payload, SimMessage};
use bridge_test_utils::{free_port, TcpTestClient};
use std::time::Duration;

#[test]
fn altitude_value_reaches_a_connected_tcp_client() {
    let tcp_data_port = free_port();
    let mut config = BridgeConfig::default();
    config.tcp_data_port = tcp_data_port;
    config.tcp_cmd_port = free_port();
    config.ws_enable = false;
    config.broadcast_ms = 5;

    let mut bridge =
        Bridge::new(config).with_region_name(format!("aerofly_bridge_e2e_altitude_{}", std::process::id()));
    let dir = tempfile::tempdir().unwrap();
    bridge.initialize(dir.path()).expect("bridge should initialize");

    let mut client = TcpTestClient::connect("127.0.0.1", tcp_data_port, Duration::from_secs(2))
        .expect("client should connect to the data port");
    // Give the accept-loop thread a chance to register the new connection
    // before the broadcast that should reach it.
    std::thread::sleep(Duration::from_millis(100));

    let altitude_index = bridge.catalog().index_of("Aircraft.Altitude").unwrap();
    let altitude_entry = bridge.catalog().entry(altitude_index).unwrap();
    let message = SimMessage::new(altitude_entry.message_id, Payload::F64(1524.0));
    bridge.tick(std::slice::from_ref(&message));

    let line = client.read_line().expect("read a broadcast line");

    assert!(line.starts_with('{'));
    assert!(line.trim_end().ends_with('}'));
    assert!(line.contains("\"schema\":\"aerofly-bridge-telemetry\""));
    assert!(line.contains("\"Aircraft.Altitude\":1524.000000"));

    bridge.shutdown();
}
