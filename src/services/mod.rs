//! Network services for the HTTP API.
//!
//! This module provides the std side of the door controller:
//! - `shared`: one `GarageDoorController` behind a mutex, with a common
//!   time base
//! - `runner`: the tick loop that delivers confirmations
//! - `notify`: state changes on a tokio broadcast channel
//! - `web`: Axum-based HTTP API server with JSON endpoints
//!
//! # Shared State Pattern
//!
//! Every service shares a single controller via `SharedDoorState`:
//!
//! ```ignore
//! use std::sync::Arc;
//! use rs_garagedoor::services::{build_router, spawn_update_loop, SharedDoorState};
//!
//! let state = Arc::new(SharedDoorState::new(controller));
//!
//! // Tick loop and web server use the same state
//! spawn_update_loop(Arc::clone(&state), 50);
//! let web_router = build_router(Arc::clone(&state), &web_config);
//! ```

pub mod api;
pub mod notify;
pub mod runner;
pub mod shared;
pub mod web;

// Re-exports
pub use api::*;
pub use notify::BroadcastNotifier;
pub use runner::spawn_update_loop;
pub use shared::*;
pub use web::{build_router, run_server_with_state, WebServerConfig};
