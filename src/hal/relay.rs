//! Relay actuator over any `embedded-hal` output pin.
//!
//! The relay (or transistor) bridges the opener's push-button terminals
//! while the pin is high. One [`trigger`](crate::traits::Actuator::trigger)
//! is one simulated button press:
//!
//! ```text
//! pin:  ___/‾‾‾‾‾‾‾‾\___
//!          |<-hold->|
//! ```
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::hal::{MockDelay, MockPin, RelayActuator};
//! use rs_garagedoor::traits::Actuator;
//!
//! let mut relay = RelayActuator::new(MockPin::new(), MockDelay::new(), 100).unwrap();
//! relay.trigger().unwrap();
//!
//! // Released at construction, then one high/low pulse
//! assert_eq!(relay.pin().levels, vec![false, true, false]);
//! assert_eq!(relay.delay().total_ms(), 100);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::DoorConfig;
use crate::traits::Actuator;

/// Push-button relay driven by a GPIO output.
pub struct RelayActuator<P, D> {
    pin: P,
    delay: D,
    hold_ms: u32,
}

impl<P: OutputPin, D: DelayNs> RelayActuator<P, D> {
    /// Creates a relay and drives the pin low so the button starts released.
    pub fn new(mut pin: P, delay: D, hold_ms: u32) -> Result<Self, P::Error> {
        pin.set_low()?;
        Ok(Self {
            pin,
            delay,
            hold_ms,
        })
    }

    /// Creates a relay using the hold time from `config`.
    pub fn from_config(pin: P, delay: D, config: &DoorConfig) -> Result<Self, P::Error> {
        Self::new(pin, delay, config.trigger_hold_ms())
    }

    /// Button hold time in milliseconds.
    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }

    /// The underlying pin.
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// The underlying delay provider.
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Release the relay and return the pin and delay.
    pub fn release(mut self) -> (P, D) {
        let _ = self.pin.set_low();
        (self.pin, self.delay)
    }
}

impl<P: OutputPin, D: DelayNs> Actuator for RelayActuator<P, D> {
    type Error = P::Error;

    fn trigger(&mut self) -> Result<(), P::Error> {
        if let Err(e) = self.pin.set_high() {
            // A half-applied write must not leave the button held
            let _ = self.pin.set_low();
            return Err(e);
        }
        self.delay.delay_ms(self.hold_ms);
        self.pin.set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockPin, MockPinError};

    #[test]
    fn construction_releases_pin() {
        let relay = RelayActuator::new(MockPin::new(), MockDelay::new(), 100).unwrap();
        assert_eq!(relay.pin().levels, vec![false]);
        assert_eq!(relay.hold_ms(), 100);
    }

    #[test]
    fn each_trigger_is_one_pulse() {
        let mut relay = RelayActuator::new(MockPin::new(), MockDelay::new(), 250).unwrap();
        relay.trigger().unwrap();
        relay.trigger().unwrap();

        assert_eq!(relay.pin().levels, vec![false, true, false, true, false]);
        assert_eq!(relay.delay().calls, 2);
        assert_eq!(relay.delay().total_ms(), 500);
        assert!(!relay.pin().is_high());
    }

    #[test]
    fn hold_time_from_config() {
        let config = DoorConfig::default().with_trigger_hold_s(0.3);
        let relay = RelayActuator::from_config(MockPin::new(), MockDelay::new(), &config).unwrap();
        assert_eq!(relay.hold_ms(), 300);
    }

    #[test]
    fn failed_press_leaves_pin_low_and_skips_hold() {
        let mut pin = MockPin::new();
        pin.fail_high = true;
        let mut relay = RelayActuator::new(pin, MockDelay::new(), 100).unwrap();

        assert_eq!(relay.trigger(), Err(MockPinError));
        assert_eq!(relay.pin().levels, vec![false, false]);
        assert_eq!(relay.delay().calls, 0);
    }

    #[test]
    fn release_returns_parts_low() {
        let mut relay = RelayActuator::new(MockPin::new(), MockDelay::new(), 100).unwrap();
        relay.trigger().unwrap();
        let (pin, delay) = relay.release();
        assert!(!pin.is_high());
        assert_eq!(delay.total_ms(), 100);
    }
}
