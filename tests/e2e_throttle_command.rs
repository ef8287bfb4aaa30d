//! S2: a client-sent `{"variable":"Controls.Throttle","value":...}` command
//! on the TCP command port produces an outbound message on the next tick.

use aerofly_bridge::{Bridge, BridgeConfig};
use bridge_sdk::Payload;
use bridge_test_utils::free_port;
use std::io::Write;
use std::net::TcpStream;
use std::time::Duration;

#[test]
fn command_sent_over_tcp_produces_an_outbound_message_next_tick() {
    let mut config = BridgeConfig::default();
    config.tcp_data_port = free_port();
    config.tcp_cmd_port = free_port();
    config.ws_enable = false;

    let mut bridge = Bridge::new(config.clone())
        .with_region_name(format!("aerofly_bridge_e2e_throttle_{}", std::process::id()));
    let dir = tempfile::tempdir().unwrap();
    bridge.initialize(dir.path()).expect("bridge should initialize");

    let mut conn = TcpStream::connect(("127.0.0.1", config.tcp_cmd_port))
        .expect("should connect to the command port");
    conn.write_all(br#"{"variable":"Controls.Throttle","value":0.66}"#)
        .unwrap();
    drop(conn);

    // The command queue is drained once per tick; give the command server
    // a moment to have read and enqueued it.
    std::thread::sleep(Duration::from_millis(100));

    let outbound = bridge.tick(&[]);
    let throttle_index = bridge.catalog().index_of("Controls.Throttle").unwrap();
    let throttle_entry = bridge.catalog().entry(throttle_index).unwrap();

    assert_eq!(outbound.len(), 1);
    assert_eq!(outbound[0].id, throttle_entry.message_id);
    assert_eq!(outbound[0].payload, Payload::F64(0.66));

    bridge.shutdown();
}
