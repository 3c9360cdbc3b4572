//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `relay`: Push-button relay over any `embedded-hal` output pin
//! - `simulated`: Logging stand-in selected by the debug flag
//! - `esp32`: ESP32-C3 SuperMini relay and wall button (requires `esp32` feature)

pub mod mock;
pub mod relay;
pub mod simulated;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;
pub use relay::RelayActuator;
pub use simulated::{DoorActuator, SimulatedActuator};

#[cfg(feature = "esp32")]
pub use esp32::*;
