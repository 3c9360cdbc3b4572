//! Wall push-button input for ESP32.
//!
//! # Wiring
//!
//! - Button → GPIO10 and GND
//! - Internal pull-up enabled, so pressed reads low

use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Presses closer together than this are contact bounce.
const DEBOUNCE_MS: u64 = 250;

/// Wall push-button with polled edge detection.
///
/// # Example
///
/// ```ignore
/// use rs_garagedoor::hal::esp32::Esp32WallButton;
///
/// let peripherals = Peripherals::take()?;
/// let mut button = Esp32WallButton::new(peripherals.pins.gpio10)?;
///
/// loop {
///     if button.poll(clock.now_ms()) {
///         println!("Pressed!");
///     }
/// }
/// ```
pub struct Esp32WallButton<'d, P>
where
    P: InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
    last_pressed: bool,
    last_press_ms: Option<u64>,
}

impl<'d, P> Esp32WallButton<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Configures the pin as an input with pull-up.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        let last_pressed = pin.is_low();

        Ok(Self {
            pin,
            last_pressed,
            last_press_ms: None,
        })
    }

    /// Polls the button. Returns true once per debounced press.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        // Active low
        let pressed = self.pin.is_low();
        let edge = pressed && !self.last_pressed;
        self.last_pressed = pressed;

        if !edge {
            return false;
        }
        if let Some(last) = self.last_press_ms {
            if now_ms.saturating_sub(last) < DEBOUNCE_MS {
                return false;
            }
        }
        self.last_press_ms = Some(now_ms);
        true
    }

    /// Returns true while the button is held.
    pub fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
