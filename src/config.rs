//! Environment-driven configuration (spec §6). No config-file layer — a
//! plugin loaded in-process by the simulator reads its handful of knobs
//! straight out of the environment, the way the workspace's small services
//! read `std::env::var` at startup rather than building a TOML layer they
//! don't need.

use std::env;

/// Minimum accepted broadcast interval, matching `bridge-net`'s own floor.
const MIN_BROADCAST_MS: u64 = bridge_net::MIN_INTERVAL_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub ws_enable: bool,
    pub ws_port: u16,
    pub broadcast_ms: u64,
    pub tcp_data_port: u16,
    pub tcp_cmd_port: u16,
    pub log_level: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            ws_enable: true,
            ws_port: 8765,
            broadcast_ms: 20,
            tcp_data_port: 12345,
            tcp_cmd_port: 12346,
            log_level: default_log_level(),
        }
    }
}

#[cfg(debug_assertions)]
fn default_log_level() -> String {
    "debug".to_owned()
}

#[cfg(not(debug_assertions))]
fn default_log_level() -> String {
    "info".to_owned()
}

impl BridgeConfig {
    /// Reads every variable in spec §6's table, falling back to the default
    /// for anything unset or unparsable. `BRIDGE_BROADCAST_MS` is clamped to
    /// the transport's minimum interval regardless of what was requested.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = BridgeConfig::default();

        let ws_enable = env_flag("BRIDGE_WS_ENABLE").unwrap_or(defaults.ws_enable);
        let ws_port = env_u16("BRIDGE_WS_PORT").unwrap_or(defaults.ws_port);
        let broadcast_ms = env_u64("BRIDGE_BROADCAST_MS")
            .unwrap_or(defaults.broadcast_ms)
            .max(MIN_BROADCAST_MS);
        let tcp_data_port = env_u16("BRIDGE_TCP_DATA_PORT").unwrap_or(defaults.tcp_data_port);
        let tcp_cmd_port = env_u16("BRIDGE_TCP_CMD_PORT").unwrap_or(defaults.tcp_cmd_port);
        let log_level = env::var("BRIDGE_LOG_LEVEL").unwrap_or(defaults.log_level);

        BridgeConfig {
            ws_enable,
            ws_port,
            broadcast_ms,
            tcp_data_port,
            tcp_cmd_port,
            log_level,
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    Some(env::var(key).ok()? != "0")
}

fn env_u16(key: &str) -> Option<u16> {
    env::var(key).ok()?.parse().ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let config = BridgeConfig::default();
        assert!(config.ws_enable);
        assert_eq!(config.ws_port, 8765);
        assert_eq!(config.broadcast_ms, 20);
        assert_eq!(config.tcp_data_port, 12345);
        assert_eq!(config.tcp_cmd_port, 12346);
    }

    #[test]
    fn broadcast_ms_floor_is_enforced_directly() {
        let clamped = 1u64.max(MIN_BROADCAST_MS);
        assert_eq!(clamped, MIN_BROADCAST_MS);
    }
}
