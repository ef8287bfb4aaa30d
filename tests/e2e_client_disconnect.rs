//! S5: a client dropping its connection is quietly evicted from the
//! broadcast set; it never poisons later broadcasts to the clients that
//! remain connected.

use aerofly_bridge::{Bridge, BridgeConfig};
use bridge_sdk::{Payload, SimMessage};
use bridge_test_utils::{free_port, TcpTestClient};
use std::time::Duration;

#[test]
fn a_disconnected_client_does_not_disrupt_broadcasts_to_others() {
    let data_port = free_port();
    let mut config = BridgeConfig::default();
    config.tcp_data_port = data_port;
    config.tcp_cmd_port = free_port();
    config.ws_enable = false;

    let mut bridge = Bridge::new(config).with_region_name(format!(
        "aerofly_bridge_e2e_disconnect_{}",
        std::process::id()
    ));
    let dir = tempfile::tempdir().unwrap();
    bridge.initialize(dir.path()).expect("bridge should initialize");

    let doomed = TcpTestClient::connect("127.0.0.1", data_port, Duration::from_secs(2))
        .expect("first client should connect");
    let mut survivor = TcpTestClient::connect("127.0.0.1", data_port, Duration::from_secs(2))
        .expect("second client should connect");
    std::thread::sleep(Duration::from_millis(100));

    // Close the first client's socket outright, without waiting on the
    // bridge at all.
    drop(doomed.into_inner());
    std::thread::sleep(Duration::from_millis(50));

    let index = bridge.catalog().index_of("Aircraft.Altitude").unwrap();
    let entry = bridge.catalog().entry(index).unwrap();
    let message = SimMessage::new(entry.message_id, Payload::F64(900.0));
    // Two ticks: the first broadcast is the one that discovers the dead
    // write end and evicts it; the second proves the survivor still works.
    bridge.tick(std::slice::from_ref(&message));
    bridge.tick(std::slice::from_ref(&message));

    let line = survivor.read_line().expect("surviving client should still receive broadcasts");
    assert!(line.contains("\"Aircraft.Altitude\":900.000000"));

    bridge.shutdown();
}
