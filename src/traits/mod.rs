//! Trait definitions for hardware abstraction.
//!
//! This module defines the core abstractions that allow rs-garagedoor to:
//! - Run on different hardware (ESP32 relay, desktop simulation, mocks)
//! - Report door state changes to whatever host layer is listening
//!
//! # Hardware Abstraction
//!
//! The key traits are:
//!
//! - [`Actuator`]: Momentary relay pulse on the opener's button terminals
//! - [`Clock`]: Time source for `no_std` environments
//! - [`DoorNotifier`]: Door state change side channel

pub mod hardware;

pub use hardware::*;
