//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without a relay board.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockActuator`] | [`Actuator`] | Counts pulses, can be made to fail |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`RecordingNotifier`] | [`DoorNotifier`] | Records every state change |
//! | [`MockPin`] | `embedded_hal::digital::OutputPin` | Records pin levels |
//! | [`MockDelay`] | `embedded_hal::delay::DelayNs` | Accumulates requested delays |
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, TargetState};
//! use rs_garagedoor::hal::{MockActuator, RecordingNotifier};
//!
//! let mut door = GarageDoorController::new(
//!     DoorConfig::default(),
//!     MockActuator::new(),
//!     RecordingNotifier::new(),
//! );
//!
//! door.request_target(TargetState::Open, 0);
//!
//! assert_eq!(door.actuator().trigger_count, 1);
//! assert_eq!(door.notifier().states, vec![DoorState::Opening]);
//! ```
//!
//! [`Actuator`]: crate::traits::Actuator
//! [`Clock`]: crate::traits::Clock
//! [`DoorNotifier`]: crate::traits::DoorNotifier

use alloc::vec::Vec;

use crate::door::DoorState;
use crate::traits::{Actuator, Clock, DoorNotifier};

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Error returned by a failing [`MockActuator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockActuatorError;

/// Mock relay for testing.
///
/// Counts successful pulses. Set [`fail`](Self::fail) to make the next
/// triggers return an error without counting.
///
/// # Example
///
/// ```rust
/// use rs_garagedoor::hal::MockActuator;
/// use rs_garagedoor::traits::Actuator;
///
/// let mut relay = MockActuator::new();
/// relay.trigger().unwrap();
/// assert_eq!(relay.trigger_count, 1);
///
/// relay.fail = true;
/// assert!(relay.trigger().is_err());
/// assert_eq!(relay.trigger_count, 1);
/// assert_eq!(relay.failed_count, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockActuator {
    /// Number of successful pulses.
    pub trigger_count: usize,
    /// Number of failed pulse attempts.
    pub failed_count: usize,
    /// When true, `trigger` fails.
    pub fail: bool,
}

impl MockActuator {
    /// Creates a new mock relay that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock relay that fails every pulse.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Actuator for MockActuator {
    type Error = MockActuatorError;

    fn trigger(&mut self) -> Result<(), MockActuatorError> {
        if self.fail {
            self.failed_count += 1;
            return Err(MockActuatorError);
        }
        self.trigger_count += 1;
        Ok(())
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent logic.
///
/// # Example
///
/// ```rust
/// use rs_garagedoor::hal::MockClock;
/// use rs_garagedoor::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Notifier that records every change in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    /// States reported so far, oldest first.
    pub states: Vec<DoorState>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently reported state.
    pub fn last(&self) -> Option<DoorState> {
        self.states.last().copied()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

impl DoorNotifier for RecordingNotifier {
    fn state_changed(&mut self, state: DoorState) {
        self.states.push(state);
    }
}

// ============================================================================
// embedded-hal Mocks
// ============================================================================

/// Mock output pin.
///
/// Records every level written, `true` for high. Writes fail while
/// [`fail_high`](Self::fail_high) is set and the pin is driven high.
#[derive(Debug, Default)]
pub struct MockPin {
    /// Levels written, oldest first.
    pub levels: Vec<bool>,
    /// When true, `set_high` fails and does not record.
    pub fail_high: bool,
}

impl MockPin {
    /// Creates a new pin with no writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level (low if never written).
    pub fn is_high(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }
}

/// Error returned by a failing [`MockPin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockPinError> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockPinError> {
        if self.fail_high {
            return Err(MockPinError);
        }
        self.levels.push(true);
        Ok(())
    }
}

/// Mock delay that records instead of sleeping.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds requested.
    pub total_ns: u64,
    /// Number of delay calls.
    pub calls: usize,
}

impl MockDelay {
    /// Creates a new delay with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total milliseconds requested.
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.calls += 1;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns += ms as u64 * 1_000_000;
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;
    use embedded_hal::digital::OutputPin;

    #[test]
    fn mock_actuator_counts_and_fails() {
        let mut relay = MockActuator::new();
        relay.trigger().unwrap();
        relay.trigger().unwrap();
        assert_eq!(relay.trigger_count, 2);

        let mut broken = MockActuator::failing();
        assert_eq!(broken.trigger(), Err(MockActuatorError));
        assert_eq!(broken.trigger_count, 0);
        assert_eq!(broken.failed_count, 1);
    }

    #[test]
    fn mock_clock_advances() {
        let mut clock = MockClock::new();
        clock.advance(10);
        clock.advance(15);
        assert_eq!(clock.now_ms(), 25);
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let mut notifier = RecordingNotifier::new();
        assert_eq!(notifier.last(), None);

        notifier.state_changed(DoorState::Opening);
        notifier.state_changed(DoorState::Open);
        assert_eq!(notifier.states, vec![DoorState::Opening, DoorState::Open]);
        assert_eq!(notifier.last(), Some(DoorState::Open));

        notifier.clear();
        assert!(notifier.states.is_empty());
    }

    #[test]
    fn mock_pin_records_levels() {
        let mut pin = MockPin::new();
        assert!(!pin.is_high());

        pin.set_high().unwrap();
        assert!(pin.is_high());
        pin.set_low().unwrap();
        assert_eq!(pin.levels, vec![true, false]);

        pin.fail_high = true;
        assert_eq!(pin.set_high(), Err(MockPinError));
        assert_eq!(pin.levels, vec![true, false]);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_ms(100);
        delay.delay_us(500);
        assert_eq!(delay.calls, 2);
        assert_eq!(delay.total_ns, 100_500_000);
        assert_eq!(delay.total_ms(), 100);
    }
}
