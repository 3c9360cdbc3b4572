//! # rs-garagedoor
//!
//! A garage door opener controller for a single push-button relay, with a
//! web UI and an ESP32 firmware target.
//!
//! ## Features
//!
//! - **Open-loop state tracking**: No position sensor; open and closed are
//!   inferred from relay pulses and the configured travel time
//! - **Single-button semantics**: Stop, reverse and resume all come from
//!   one momentary pulse, mapped from open/closed requests
//! - **Hardware abstraction**: Relay over any `embedded-hal` output pin,
//!   a logging simulation, and mocks for tests
//! - **HTTP API**: axum server with a state snapshot and target control
//!   (`web` feature)
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Relay, clock and notification abstractions
//! - `door` - Door state and target types
//! - `timer` - Supersedable confirmation deadline
//! - `controller` - The door state machine
//! - `hal` - Concrete implementations (mock, relay, simulated, esp32)
//! - `services` - Shared state, tick loop and HTTP API (`web` feature)
//!
//! ## Example
//!
//! ```rust
//! use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, TargetState};
//! use rs_garagedoor::hal::MockActuator;
//! use rs_garagedoor::traits::LogNotifier;
//!
//! let config = DoorConfig::default()
//!     .with_time_to_move_s(10.0)
//!     .with_trigger_hold_s(0.1);
//! let mut door = GarageDoorController::new(config, MockActuator::new(), LogNotifier);
//!
//! assert_eq!(door.request_target(TargetState::Open, 0), DoorState::Opening);
//! assert_eq!(door.actuator().trigger_count, 1);
//!
//! // Update in your main loop
//! door.update(10_000);
//! assert_eq!(door.current_state(), DoorState::Open);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Door state machine that maps requests onto relay pulses.
pub mod controller;
/// Door state and target types.
pub mod door;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Confirmation timer for in-flight moves.
pub mod timer;
/// Core traits for hardware abstraction.
pub mod traits;

/// Shared configuration system for desktop and ESP32.
pub mod config;

/// Shared message types for the HTTP API (serde-based).
#[cfg(feature = "serde")]
pub mod messages;

/// Network services for the HTTP API (feature-gated).
#[cfg(feature = "web")]
pub mod services;

// Re-exports for convenience
pub use controller::{DoorAction, DoorSnapshot, GarageDoorController, IgnoreReason, TargetOutcome};
pub use door::{DoorState, TargetState};
pub use timer::{PendingTransition, TimerHandle, TimerProgress, TransitionTimer};
pub use traits::{Actuator, Clock, DoorNotifier, LogNotifier};

// Config re-exports
pub use config::{Config, DeviceConfig, DoorConfig, WebConfig};

// Message re-exports (for the HTTP API)
#[cfg(feature = "serde")]
pub use messages::SetTargetRequest;

// Parsing function re-exports (serde-json-core based)
#[cfg(feature = "serde-json-core")]
pub use messages::parse_target_request;
