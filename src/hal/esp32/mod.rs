//! ESP32-C3 SuperMini hardware abstraction layer for a relay-driven
//! garage door opener.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Relay**: 3.3V relay module (or optocoupler) across the opener's
//!   push-button terminals
//! - **Wall button**: momentary switch to ground
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod button;
mod clock;

pub use button::Esp32WallButton;
pub use clock::Esp32Clock;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{Output, OutputPin, PinDriver};
use esp_idf_hal::peripheral::Peripheral;

use crate::hal::RelayActuator;

/// Relay on an ESP32 GPIO, holding with the FreeRTOS delay.
pub type Esp32Relay<'d, P> = RelayActuator<PinDriver<'d, P, Output>, FreeRtos>;

/// Build the door relay on `pin`.
///
/// The pin is driven low before this returns.
///
/// # Errors
///
/// Returns an error if GPIO initialization fails.
pub fn esp32_relay<'d, P: OutputPin>(
    pin: impl Peripheral<P = P> + 'd,
    hold_ms: u32,
) -> anyhow::Result<Esp32Relay<'d, P>> {
    let driver = PinDriver::output(pin)?;
    RelayActuator::new(driver, FreeRtos, hold_ms)
        .map_err(|e| anyhow::anyhow!("Failed to release relay pin: {:?}", e))
}

/// Pin assignments for SuperMini ESP32-C3.
pub mod pins {
    /// Relay driver output (active high)
    pub const DOOR_RELAY: i32 = 2;

    /// Wall push-button input (active low, internal pull-up)
    pub const WALL_BUTTON: i32 = 10;

    /// Onboard blue LED, lit while the door is moving
    pub const STATUS_LED: i32 = 8;
}
