//! Desktop server for testing the web UI without relay hardware.
//!
//! Runs the door controller with a simulated (or mock) relay, the tick
//! loop and the HTTP API, allowing you to:
//! - Access the web UI at http://localhost:8080
//! - Test all API endpoints
//! - Watch the state machine in the log
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin desktop_server --features web
//! cargo run --bin desktop_server --features web -- config.json
//! DEBUG='*' RUST_LOG=debug cargo run --bin desktop_server --features web
//! ```
//!
//! # Configuration
//!
//! An optional JSON file path may be given as the first argument. Every
//! section and field is optional; see `Config` for the defaults.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rs_garagedoor::hal::{DoorActuator, MockActuator};
use rs_garagedoor::services::{
    run_server_with_state, spawn_update_loop, BroadcastNotifier, SharedDoorState, WebServerConfig,
};
use rs_garagedoor::{Config, GarageDoorController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "rs_garagedoor=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    }
    .apply_env();

    if !config.web.enabled {
        anyhow::bail!("web server disabled in configuration, nothing to run");
    }

    let relay = DoorActuator::select(config.device.simulate, || {
        log::info!("No GPIO on desktop, using a mock relay");
        Ok::<_, anyhow::Error>(MockActuator::new())
    })?;

    let notifier = BroadcastNotifier::default();
    let mut changes = notifier.subscribe();

    let door = GarageDoorController::new(config.door, relay, notifier);
    let state = Arc::new(SharedDoorState::new(door).with_device(config.device.clone()));

    // Single update loop for all services
    let ticker = spawn_update_loop(Arc::clone(&state), u64::from(config.device.tick_ms));

    // Mirror every change with the full snapshot
    let observed = Arc::clone(&state);
    tokio::spawn(async move {
        while let Ok(door_state) = changes.recv().await {
            let snapshot = observed.state();
            log::info!(
                "{} (target {}, {} pulses)",
                door_state,
                snapshot.target,
                snapshot.trigger_count
            );
        }
    });

    let web_config = WebServerConfig::from_config(&config.web);
    log::info!("{} ready", config.device.name);
    log::info!("  Web UI: http://{}", web_config.addr);
    log::info!("  API:    http://{}/api/state", web_config.addr);

    let server = run_server_with_state(Arc::clone(&state), web_config);
    tokio::select! {
        result = server => result.context("web server failed")?,
        _ = tokio::signal::ctrl_c() => log::info!("Ctrl+C received"),
    }

    ticker.abort();
    state.shutdown();
    Ok(())
}
