//! Hardware abstraction traits for the door relay, time source, and state
//! change notifications.
//!
//! This module defines the seams that let the door controller run against a
//! real relay on an ESP32, a logging simulation on a desktop, or mocks in
//! tests.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Actuator`] | Momentary pulse on the opener's push-button terminals |
//! | [`Clock`] | Time source for `no_std` environments |
//! | [`DoorNotifier`] | Side channel for door state changes |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`] or the [`SimulatedActuator`]. For real relays
//! use [`RelayActuator`] over any `embedded-hal` output pin.
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::traits::Actuator;
//! use rs_garagedoor::hal::MockActuator;
//!
//! let mut relay = MockActuator::new();
//! relay.trigger().unwrap();
//! assert_eq!(relay.trigger_count, 1);
//! ```
//!
//! [`SimulatedActuator`]: crate::hal::SimulatedActuator
//! [`RelayActuator`]: crate::hal::RelayActuator

use crate::door::DoorState;

/// Momentary-contact actuator - abstracts the relay that "presses" the
/// garage door opener's button.
///
/// The opener only has one input: every pulse toggles the motor between
/// moving and stopped, in whatever direction the opener picks next.
///
/// # Implementation Notes
///
/// - `trigger()` must hold the contact for the configured hold time and
///   release it before returning
/// - The hold time is short (sub-second), so blocking is acceptable
/// - Return an error only if the pulse definitely did not reach the opener
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_garagedoor::traits::Actuator;
///
/// struct MyRelay { /* hardware handles */ }
///
/// impl Actuator for MyRelay {
///     type Error = ();
///
///     fn trigger(&mut self) -> Result<(), ()> {
///         // Drive GPIO high, wait, drive low...
///         Ok(())
///     }
/// }
/// ```
pub trait Actuator {
    /// Error type for relay operations.
    type Error: core::fmt::Debug;

    /// Pulse the opener's control line once.
    fn trigger(&mut self) -> Result<(), Self::Error>;
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    type Error = T::Error;

    fn trigger(&mut self) -> Result<(), Self::Error> {
        (**self).trigger()
    }
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for confirmation timers.
/// On desktop, this can wrap `std::time::Instant`. On embedded,
/// use a hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_garagedoor::traits::Clock;
/// use rs_garagedoor::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Receives every change of the controller's [`DoorState`].
///
/// Called exactly once per change, after the new state is in place, and
/// never for requests that turned out to be no-ops. Implementations run
/// inside the controller's call, so they must not block.
pub trait DoorNotifier {
    /// The door state changed to `state`.
    fn state_changed(&mut self, state: DoorState);
}

impl<T: DoorNotifier + ?Sized> DoorNotifier for &mut T {
    fn state_changed(&mut self, state: DoorState) {
        (**self).state_changed(state)
    }
}

/// Notifier that only writes a log line.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl DoorNotifier for LogNotifier {
    fn state_changed(&mut self, state: DoorState) {
        log::info!("Door state is now {}", state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingRelay {
        pulses: u32,
    }

    impl Actuator for CountingRelay {
        type Error = ();

        fn trigger(&mut self) -> Result<(), ()> {
            self.pulses += 1;
            Ok(())
        }
    }

    fn pulse_twice<A: Actuator>(mut actuator: A) {
        actuator.trigger().unwrap();
        actuator.trigger().unwrap();
    }

    #[test]
    fn actuator_through_mut_reference() {
        let mut relay = CountingRelay { pulses: 0 };
        pulse_twice(&mut relay);
        assert_eq!(relay.pulses, 2);
    }

    struct LastState(Option<DoorState>);

    impl DoorNotifier for LastState {
        fn state_changed(&mut self, state: DoorState) {
            self.0 = Some(state);
        }
    }

    fn notify<N: DoorNotifier>(mut notifier: N, state: DoorState) {
        notifier.state_changed(state);
    }

    #[test]
    fn notifier_through_mut_reference() {
        let mut last = LastState(None);
        notify(&mut last, DoorState::Opening);
        assert_eq!(last.0, Some(DoorState::Opening));
    }

    #[test]
    fn log_notifier_accepts_every_state() {
        let mut notifier = LogNotifier;
        for state in [
            DoorState::Open,
            DoorState::Closed,
            DoorState::Opening,
            DoorState::Closing,
            DoorState::Stopped,
        ] {
            notifier.state_changed(state);
        }
    }
}
