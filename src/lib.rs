//! Bridge Orchestrator (spec §4.8): owns every component and exposes the
//! three operations the host integration layer calls through `src/ffi.rs`.
//!
//! No state machine beyond `uninitialized -> running -> stopped`.
//! Re-entering [`Bridge::initialize`] while running performs a clean
//! [`Bridge::shutdown`] first.

pub mod config;
mod error;
pub mod ffi;

pub use config::BridgeConfig;
pub use error::BridgeError;

use bridge_catalog::Catalog;
use bridge_command::CommandProcessor;
use bridge_dispatch::{DispatchStats, Dispatcher};
use bridge_json::JsonBuilder;
use bridge_net::{CommandQueue, TcpCommandServer, TcpDataServer, WebSocketServer};
use bridge_record::{Record, DEFAULT_REGION_NAME};
use bridge_sdk::SimMessage;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Filename the offsets descriptor is written under, next to the plugin
/// binary (spec §6).
pub const OFFSETS_FILENAME: &str = "AeroflyBridge_offsets.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Uninitialized,
    Running,
    Stopped,
}

/// Everything started by a successful [`Bridge::initialize`]. Dropped as a
/// unit by [`Bridge::shutdown`].
struct Components {
    record: Arc<Record>,
    dispatcher: Dispatcher,
    command_processor: CommandProcessor,
    json_builder: JsonBuilder,
    running: Arc<AtomicBool>,
    tcp_data: Arc<TcpDataServer>,
    tcp_commands: Arc<CommandQueue>,
    ws: Option<Arc<WebSocketServer>>,
    ws_commands: Option<Arc<CommandQueue>>,
}

/// Owns the catalog (valid for the process lifetime) and, once
/// initialized, every other component.
pub struct Bridge {
    state: State,
    config: BridgeConfig,
    region_name: String,
    catalog: Catalog,
    components: Option<Components>,
}

impl Bridge {
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Bridge {
            state: State::Uninitialized,
            config,
            region_name: DEFAULT_REGION_NAME.to_owned(),
            catalog: Catalog::new().expect("the static variable table is internally consistent"),
            components: None,
        }
    }

    /// Overrides the shared-memory region name. The host ABI never needs
    /// this (it always uses [`DEFAULT_REGION_NAME`]); it exists so test
    /// binaries running concurrently don't collide on one named region.
    #[must_use]
    pub fn with_region_name(mut self, name: impl Into<String>) -> Self {
        self.region_name = name.into();
        self
    }

    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Constructs the catalog-dependent components, opens the shared
    /// record, starts TCP (always) and WebSocket (if enabled), and writes
    /// the offsets descriptor into `plugin_dir`.
    ///
    /// Failure to open shared memory is fatal. Failure to start a network
    /// transport is logged and that transport is simply absent — the
    /// others keep running (spec §4.8, §7).
    pub fn initialize(&mut self, plugin_dir: &Path) -> Result<(), BridgeError> {
        if self.state == State::Running {
            self.shutdown();
        }

        let record = Arc::new(Record::open_or_create(&self.region_name, &self.catalog)?);
        let descriptor = record.as_offsets_descriptor(&self.catalog);
        descriptor
            .write_atomic(&plugin_dir.join(OFFSETS_FILENAME))
            .map_err(|e| BridgeError::ResourceUnavailable(e.to_string()))?;

        let dispatcher = Dispatcher::build(&self.catalog)?;
        let command_processor = CommandProcessor::build(&self.catalog);

        let running = Arc::new(AtomicBool::new(true));

        let tcp_data = TcpDataServer::spawn(
            "0.0.0.0",
            self.config.tcp_data_port,
            Arc::clone(&running),
            self.config.broadcast_ms,
        )?;
        let tcp_commands = Arc::new(CommandQueue::new());
        TcpCommandServer::spawn(
            "0.0.0.0",
            self.config.tcp_cmd_port,
            Arc::clone(&running),
            Arc::clone(&tcp_commands),
        )?;

        let (ws, ws_commands) = if self.config.ws_enable {
            let ws_commands = Arc::new(CommandQueue::new());
            match WebSocketServer::spawn(
                "0.0.0.0",
                self.config.ws_port,
                Arc::clone(&running),
                Arc::clone(&ws_commands),
                self.config.broadcast_ms,
            ) {
                Ok(server) => (Some(server), Some(ws_commands)),
                Err(e) => {
                    warn!(error = %e, "websocket transport failed to start, continuing without it");
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        self.components = Some(Components {
            record,
            dispatcher,
            command_processor,
            json_builder: JsonBuilder::new(),
            running,
            tcp_data,
            tcp_commands,
            ws,
            ws_commands,
        });
        self.state = State::Running;
        info!(
            tcp_data_port = self.config.tcp_data_port,
            tcp_cmd_port = self.config.tcp_cmd_port,
            ws_enabled = self.config.ws_enable,
            "bridge initialized"
        );
        Ok(())
    }

    /// One tick (spec §4.8): apply inbound messages, broadcast the record
    /// over every live transport, drain and process both command queues,
    /// and return the resulting outbound messages.
    ///
    /// A no-op returning an empty vec if the bridge isn't running — the
    /// host entry points are expected to treat that as "nothing to send".
    pub fn tick(&mut self, inbound: &[SimMessage]) -> Vec<SimMessage> {
        let Some(components) = self.components.as_mut() else {
            return Vec::new();
        };

        components.record.begin_tick();
        let stats: DispatchStats = components.dispatcher.dispatch_all(inbound, &components.record);
        components.record.end_tick();
        if stats.ignored_kind_mismatch > 0 || stats.ignored_unknown_id > 0 {
            tracing::debug!(
                applied = stats.applied,
                ignored_unknown_id = stats.ignored_unknown_id,
                ignored_kind_mismatch = stats.ignored_kind_mismatch,
                "dispatched one tick"
            );
        }

        let rate_hz = 1000.0 / self.config.broadcast_ms.max(1) as f64;
        let document = components
            .json_builder
            .build(&self.catalog, &components.record, rate_hz)
            .as_bytes();
        components.tcp_data.broadcast(document);
        if let Some(ws) = &components.ws {
            ws.broadcast(document);
        }

        let mut commands = components.tcp_commands.drain();
        if let Some(ws_commands) = &components.ws_commands {
            commands.extend(ws_commands.drain());
        }
        components.command_processor.process(&commands, &components.record)
    }

    /// Stops WebSocket then TCP (in that order), unmaps the record, and
    /// releases all handles. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(components) = self.components.take() {
            components.running.store(false, Ordering::Release);
            info!("bridge shutting down");
        }
        self.state = State::Stopped;
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Bridge::new(BridgeConfig::default())
    }
}

/// Installs the `tracing` subscriber once, honoring `BRIDGE_LOG_LEVEL`.
/// Safe to call more than once (e.g. repeated `init()` from the host) —
/// later calls are no-ops.
pub fn init_logging(config: &BridgeConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_sdk::Payload;
    use std::sync::atomic::AtomicU32;
    use std::sync::atomic::Ordering as AtomicOrdering;

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn unique_config() -> (BridgeConfig, String) {
        let n = TEST_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
        let pid = std::process::id();
        let mut config = BridgeConfig::default();
        config.tcp_data_port = 0;
        config.tcp_cmd_port = 0;
        config.ws_port = 0;
        config.ws_enable = false;
        (config, format!("aerofly_bridge_test_{pid}_{n}"))
    }

    #[test]
    fn tick_before_initialize_is_a_harmless_no_op() {
        let (config, region) = unique_config();
        let mut bridge = Bridge::new(config).with_region_name(region);
        assert!(bridge.tick(&[]).is_empty());
    }

    #[test]
    fn initialize_then_tick_applies_inbound_and_returns_no_outbound_without_commands() {
        let (config, region) = unique_config();
        let mut bridge = Bridge::new(config).with_region_name(region);
        let dir = tempfile::tempdir().unwrap();
        bridge.initialize(dir.path()).unwrap();
        assert!(bridge.is_running());

        let index = bridge.catalog().index_of("Aircraft.Altitude").unwrap();
        let entry = bridge.catalog().entry(index).unwrap();
        let message = SimMessage::new(entry.message_id, Payload::F64(2500.0));
        let outbound = bridge.tick(&[message]);
        assert!(outbound.is_empty());

        assert!(dir.path().join(OFFSETS_FILENAME).exists());
        bridge.shutdown();
    }

    #[test]
    fn shutdown_is_idempotent() {
        let (config, region) = unique_config();
        let mut bridge = Bridge::new(config).with_region_name(region);
        let dir = tempfile::tempdir().unwrap();
        bridge.initialize(dir.path()).unwrap();
        bridge.shutdown();
        bridge.shutdown();
        assert!(!bridge.is_running());
    }

    #[test]
    fn reinitializing_while_running_shuts_down_cleanly_first() {
        let (config, region) = unique_config();
        let mut bridge = Bridge::new(config).with_region_name(region);
        let dir = tempfile::tempdir().unwrap();
        bridge.initialize(dir.path()).unwrap();
        bridge.initialize(dir.path()).unwrap();
        assert!(bridge.is_running());
        bridge.shutdown();
    }
}
