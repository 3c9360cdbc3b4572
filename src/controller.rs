//! Door state machine.
//!
//! This module provides [`GarageDoorController`], which turns open/close
//! requests into relay pulses and tracks where the door is believed to be.
//!
//! # Overview
//!
//! The opener behind the relay has a single button. Each pulse either starts
//! the motor or stops it, so the controller has to work out from its own
//! history which pulse means what:
//!
//! | current | request Open | request Closed |
//! |---------|--------------|----------------|
//! | Closed  | pulse, Opening | nothing |
//! | Closing | pulse, Opening | pulse, Stopped |
//! | Open    | nothing | pulse, Closing |
//! | Opening | pulse, Stopped | pulse, Stopped |
//! | Stopped | first: nothing, second: pulse, Opening | pulse, Closing |
//!
//! Every move arms a confirmation for the configured travel time. Call
//! [`update`](GarageDoorController::update) from the main loop and the
//! controller promotes `Opening`/`Closing` to `Open`/`Closed` once the time
//! is up, unless something else happened first.
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, TargetState};
//! use rs_garagedoor::hal::{MockActuator, RecordingNotifier};
//!
//! let config = DoorConfig::default().with_time_to_move_s(10.0);
//! let mut door = GarageDoorController::new(config, MockActuator::new(), RecordingNotifier::new());
//!
//! assert_eq!(door.request_target(TargetState::Open, 0), DoorState::Opening);
//!
//! // Main loop
//! for tick in 0..=200 {
//!     door.update(tick * 50);
//! }
//!
//! assert_eq!(door.current_state(), DoorState::Open);
//! assert_eq!(door.actuator().trigger_count, 1);
//! ```
//!
//! # Stop and resume
//!
//! After a stop, the first Open request is swallowed. The host UI flips its
//! target back to open as a side effect of showing the stop, so only a
//! second Open is taken as a real request:
//!
//! ```rust
//! use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, TargetState};
//! use rs_garagedoor::hal::MockActuator;
//! use rs_garagedoor::traits::LogNotifier;
//!
//! let mut door = GarageDoorController::new(DoorConfig::default(), MockActuator::new(), LogNotifier)
//!     .starting_in(DoorState::Stopped);
//!
//! assert_eq!(door.request_target(TargetState::Open, 0), DoorState::Stopped);
//! assert!(door.resume_armed());
//! assert_eq!(door.request_target(TargetState::Open, 0), DoorState::Opening);
//! ```

use crate::config::DoorConfig;
use crate::door::{DoorState, TargetState};
use crate::timer::{PendingTransition, TimerProgress, TransitionTimer};
use crate::traits::{Actuator, DoorNotifier};

/// Why a request did not pulse the relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IgnoreReason {
    /// Open requested while already open.
    AlreadyOpen,
    /// Closed requested while already closed.
    AlreadyClosed,
    /// First Open after a stop; the next one resumes.
    ResumeArmed,
    /// The controller has been shut down.
    ShutDown,
}

impl IgnoreReason {
    /// Returns the reason as a snake_case string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            IgnoreReason::AlreadyOpen => "already_open",
            IgnoreReason::AlreadyClosed => "already_closed",
            IgnoreReason::ResumeArmed => "resume_armed",
            IgnoreReason::ShutDown => "shut_down",
        }
    }
}

/// What a request did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorAction {
    /// The relay was pulsed and the state changed.
    Triggered {
        /// State before the pulse.
        from: DoorState,
        /// State after the pulse.
        to: DoorState,
    },
    /// Nothing was pulsed.
    Ignored(IgnoreReason),
    /// The relay reported an error, so nothing changed.
    TriggerFailed,
}

impl DoorAction {
    /// Short result name for API responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DoorAction::Triggered { .. } => "triggered",
            DoorAction::Ignored(_) => "ignored",
            DoorAction::TriggerFailed => "trigger_failed",
        }
    }
}

/// Result of [`GarageDoorController::apply_target`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetOutcome {
    /// Door state after the request.
    pub state: DoorState,
    /// What the request did.
    pub action: DoorAction,
}

impl TargetOutcome {
    /// Returns true if the relay was pulsed.
    pub fn triggered(&self) -> bool {
        matches!(self.action, DoorAction::Triggered { .. })
    }
}

/// Full state snapshot for UI/API.
///
/// ```rust
/// use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, TargetState};
/// use rs_garagedoor::hal::MockActuator;
/// use rs_garagedoor::traits::LogNotifier;
///
/// let door = GarageDoorController::new(DoorConfig::default(), MockActuator::new(), LogNotifier);
///
/// let snapshot = door.state(0);
/// assert_eq!(snapshot.current, DoorState::Closed);
/// assert_eq!(snapshot.target, TargetState::Closed);
/// assert!(snapshot.pending.is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoorSnapshot {
    /// Believed door state.
    pub current: DoorState,
    /// Last requested target.
    pub target: TargetState,
    /// Pending confirmation, if a move is in progress.
    pub pending: Option<TimerProgress>,
    /// True when the next Open request will resume a stopped door.
    pub resume_armed: bool,
    /// Relay pulses sent since startup.
    pub trigger_count: u32,
}

/// Garage door controller.
///
/// Owns the relay, the confirmation timer and the notifier. Not thread-safe
/// by itself; the `web` feature wraps it in
/// `SharedDoorState` for use from several tasks.
///
/// # Type Parameters
///
/// - `A`: the relay ([`Actuator`])
/// - `N`: receiver of state changes ([`DoorNotifier`])
pub struct GarageDoorController<A: Actuator, N: DoorNotifier> {
    config: DoorConfig,
    actuator: A,
    notifier: N,
    current: DoorState,
    target: TargetState,
    timer: TransitionTimer,
    resume_armed: bool,
    trigger_count: u32,
}

impl<A: Actuator, N: DoorNotifier> GarageDoorController<A, N> {
    /// Create a controller for a door assumed to be closed.
    pub fn new(config: DoorConfig, actuator: A, notifier: N) -> Self {
        log::info!(
            "Garage door on pin {}: {} ms travel, {} ms button hold",
            config.door_pin,
            config.time_to_move_ms(),
            config.trigger_hold_ms()
        );
        Self {
            config,
            actuator,
            notifier,
            current: DoorState::Closed,
            target: TargetState::Closed,
            timer: TransitionTimer::new(),
            resume_armed: false,
            trigger_count: 0,
        }
    }

    /// Start from a known state instead of `Closed`.
    ///
    /// The target follows the state's direction. Does not notify.
    pub fn starting_in(mut self, state: DoorState) -> Self {
        self.current = state;
        self.target = match state {
            DoorState::Open | DoorState::Opening => TargetState::Open,
            _ => TargetState::Closed,
        };
        self
    }

    /// Request a target and return the resulting door state.
    pub fn request_target(&mut self, target: TargetState, now_ms: u64) -> DoorState {
        self.apply_target(target, now_ms).state
    }

    /// Request a target and report what happened.
    pub fn apply_target(&mut self, target: TargetState, now_ms: u64) -> TargetOutcome {
        if self.timer.is_shut_down() {
            log::warn!("Ignoring {} request, controller is shut down", target);
            return self.outcome(DoorAction::Ignored(IgnoreReason::ShutDown));
        }

        log::info!("Target {} requested while {}", target, self.current);
        self.target = target;

        let action = match (self.current, target) {
            (DoorState::Closed, TargetState::Closed) => {
                log::info!("Door is already closed");
                DoorAction::Ignored(IgnoreReason::AlreadyClosed)
            }
            (DoorState::Open, TargetState::Open) => {
                log::info!("Door is already open");
                DoorAction::Ignored(IgnoreReason::AlreadyOpen)
            }
            (DoorState::Closed | DoorState::Closing, TargetState::Open) => {
                self.start_move(DoorState::Opening, now_ms)
            }
            (DoorState::Open | DoorState::Stopped, TargetState::Closed) => {
                self.start_move(DoorState::Closing, now_ms)
            }
            (DoorState::Opening, _) | (DoorState::Closing, TargetState::Closed) => self.stop(),
            (DoorState::Stopped, TargetState::Open) => {
                if self.resume_armed {
                    self.start_move(DoorState::Opening, now_ms)
                } else {
                    log::info!("Door is stopped, next open request resumes");
                    self.resume_armed = true;
                    DoorAction::Ignored(IgnoreReason::ResumeArmed)
                }
            }
        };

        self.outcome(action)
    }

    /// Apply `resolved` if the door is still in `expected`.
    ///
    /// Returns false, and changes nothing, if something else moved the door
    /// since the confirmation was scheduled.
    pub fn confirm_if_still_transitioning(
        &mut self,
        expected: DoorState,
        resolved: DoorState,
    ) -> bool {
        if self.current != expected {
            log::debug!(
                "Dropping stale confirmation {} -> {}, door is {}",
                expected,
                resolved,
                self.current
            );
            return false;
        }

        log::info!("Door finished moving: {} -> {}", expected, resolved);
        self.set_state(resolved);
        true
    }

    /// Update the controller - call every tick.
    ///
    /// Returns the confirmed state if a pending move completed.
    pub fn update(&mut self, now_ms: u64) -> Option<DoorState> {
        let fired = self.timer.poll(now_ms)?;
        log::debug!(
            "Confirmation timer #{} fired at {} ms",
            fired.handle.generation(),
            now_ms
        );
        if self.confirm_if_still_transitioning(fired.expected, fired.resolved) {
            Some(self.current)
        } else {
            None
        }
    }

    /// Cancel any pending confirmation and refuse further requests.
    pub fn shutdown(&mut self) {
        if !self.timer.is_shut_down() {
            log::info!("Shutting down garage door controller");
        }
        self.timer.shutdown();
    }

    /// Returns true after [`shutdown`](Self::shutdown).
    pub fn is_shut_down(&self) -> bool {
        self.timer.is_shut_down()
    }

    /// Get the full state for UI/API.
    pub fn state(&self, now_ms: u64) -> DoorSnapshot {
        DoorSnapshot {
            current: self.current,
            target: self.target,
            pending: self.timer.progress(now_ms),
            resume_armed: self.resume_armed,
            trigger_count: self.trigger_count,
        }
    }

    /// Believed door state.
    pub fn current_state(&self) -> DoorState {
        self.current
    }

    /// Last requested target.
    pub fn target_state(&self) -> TargetState {
        self.target
    }

    /// Check if a move is awaiting confirmation.
    pub fn is_transitioning(&self) -> bool {
        self.timer.is_armed()
    }

    /// The pending confirmation, if any.
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.timer.pending()
    }

    /// True when the next Open request will resume a stopped door.
    pub fn resume_armed(&self) -> bool {
        self.resume_armed
    }

    /// Relay pulses sent since startup.
    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    /// Door configuration.
    pub fn config(&self) -> &DoorConfig {
        &self.config
    }

    /// The relay.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// The state change receiver.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the state change receiver.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    fn outcome(&self, action: DoorAction) -> TargetOutcome {
        TargetOutcome {
            state: self.current,
            action,
        }
    }

    /// Pulse, move to `next` and schedule its confirmation.
    fn start_move(&mut self, next: DoorState, now_ms: u64) -> DoorAction {
        if !self.pulse() {
            return DoorAction::TriggerFailed;
        }

        let from = self.current;
        self.set_state(next);

        let resolved = match next {
            DoorState::Opening => DoorState::Open,
            _ => DoorState::Closed,
        };
        self.timer
            .arm(now_ms, self.config.time_to_move_ms(), next, resolved);

        DoorAction::Triggered { from, to: next }
    }

    /// Pulse to halt the motor and drop the pending confirmation.
    fn stop(&mut self) -> DoorAction {
        if !self.pulse() {
            return DoorAction::TriggerFailed;
        }

        let from = self.current;
        if let Some(cancelled) = self.timer.cancel() {
            log::debug!("Cancelled confirmation timer #{}", cancelled.handle.generation());
        }
        self.set_state(DoorState::Stopped);

        DoorAction::Triggered {
            from,
            to: DoorState::Stopped,
        }
    }

    fn pulse(&mut self) -> bool {
        match self.actuator.trigger() {
            Ok(()) => {
                self.trigger_count = self.trigger_count.wrapping_add(1);
                log::info!("Relay pulsed (#{})", self.trigger_count);
                true
            }
            Err(e) => {
                log::error!("Relay trigger failed, door state unchanged: {:?}", e);
                false
            }
        }
    }

    fn set_state(&mut self, next: DoorState) {
        if next == self.current {
            return;
        }
        log::info!("Door {} -> {}", self.current, next);
        self.current = next;
        self.resume_armed = false;
        self.notifier.state_changed(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockActuator, RecordingNotifier};

    fn door() -> GarageDoorController<MockActuator, RecordingNotifier> {
        GarageDoorController::new(
            DoorConfig::default(),
            MockActuator::new(),
            RecordingNotifier::new(),
        )
    }

    #[test]
    fn starts_closed_and_idle() {
        let door = door();
        assert_eq!(door.current_state(), DoorState::Closed);
        assert_eq!(door.target_state(), TargetState::Closed);
        assert!(!door.is_transitioning());
        assert!(!door.resume_armed());
        assert_eq!(door.trigger_count(), 0);
    }

    #[test]
    fn open_from_closed_arms_confirmation() {
        let mut door = door();
        let outcome = door.apply_target(TargetState::Open, 1_000);

        assert_eq!(outcome.state, DoorState::Opening);
        assert_eq!(
            outcome.action,
            DoorAction::Triggered {
                from: DoorState::Closed,
                to: DoorState::Opening
            }
        );
        let pending = door.pending().unwrap();
        assert_eq!(pending.expected, DoorState::Opening);
        assert_eq!(pending.resolved, DoorState::Open);
        assert_eq!(pending.due_ms, 11_000);
    }

    #[test]
    fn update_confirms_after_travel_time() {
        let mut door = door();
        door.request_target(TargetState::Open, 0);

        assert_eq!(door.update(9_999), None);
        assert_eq!(door.update(10_000), Some(DoorState::Open));
        assert_eq!(door.current_state(), DoorState::Open);
        assert_eq!(door.update(20_000), None);
    }

    #[test]
    fn redundant_requests_do_not_pulse() {
        let mut door = door();
        let outcome = door.apply_target(TargetState::Closed, 0);
        assert_eq!(
            outcome.action,
            DoorAction::Ignored(IgnoreReason::AlreadyClosed)
        );

        let mut open = door.starting_in(DoorState::Open);
        let outcome = open.apply_target(TargetState::Open, 0);
        assert_eq!(outcome.action, DoorAction::Ignored(IgnoreReason::AlreadyOpen));
        assert_eq!(open.actuator().trigger_count, 0);
        assert!(open.notifier().states.is_empty());
    }

    #[test]
    fn stop_cancels_confirmation() {
        let mut door = door();
        door.request_target(TargetState::Open, 0);
        assert_eq!(door.request_target(TargetState::Closed, 100), DoorState::Stopped);

        assert!(!door.is_transitioning());
        assert_eq!(door.update(60_000), None);
        assert_eq!(door.current_state(), DoorState::Stopped);
    }

    #[test]
    fn closing_reverses_on_open() {
        let mut door = door().starting_in(DoorState::Open);
        door.request_target(TargetState::Closed, 0);
        assert_eq!(door.request_target(TargetState::Open, 5_000), DoorState::Opening);

        // Old close deadline passes without effect
        assert_eq!(door.update(10_000), None);
        assert_eq!(door.update(15_000), Some(DoorState::Open));
    }

    #[test]
    fn resume_flag_clears_on_state_change() {
        let mut door = door().starting_in(DoorState::Stopped);
        door.request_target(TargetState::Open, 0);
        assert!(door.resume_armed());

        door.request_target(TargetState::Closed, 0);
        assert_eq!(door.current_state(), DoorState::Closing);
        assert!(!door.resume_armed());
    }

    #[test]
    fn trigger_failure_leaves_state_alone() {
        let mut door = GarageDoorController::new(
            DoorConfig::default(),
            MockActuator::failing(),
            RecordingNotifier::new(),
        );

        let outcome = door.apply_target(TargetState::Open, 0);
        assert_eq!(outcome.action, DoorAction::TriggerFailed);
        assert_eq!(outcome.state, DoorState::Closed);
        assert!(!door.is_transitioning());
        assert_eq!(door.trigger_count(), 0);
        assert_eq!(door.actuator().failed_count, 1);
        assert!(door.notifier().states.is_empty());
    }

    #[test]
    fn target_is_recorded_even_for_no_ops() {
        let mut door = door().starting_in(DoorState::Open);
        assert_eq!(door.target_state(), TargetState::Open);
        door.request_target(TargetState::Open, 0);
        assert_eq!(door.target_state(), TargetState::Open);

        door.request_target(TargetState::Closed, 0);
        assert_eq!(door.target_state(), TargetState::Closed);
    }

    #[test]
    fn stale_confirmation_is_rejected() {
        let mut door = door();
        door.request_target(TargetState::Open, 0);
        door.request_target(TargetState::Open, 10);

        assert!(!door.confirm_if_still_transitioning(DoorState::Opening, DoorState::Open));
        assert_eq!(door.current_state(), DoorState::Stopped);
    }

    #[test]
    fn shutdown_ignores_requests_and_timers() {
        let mut door = door();
        door.request_target(TargetState::Open, 0);
        door.shutdown();

        assert!(door.is_shut_down());
        assert_eq!(door.update(10_000), None);

        let outcome = door.apply_target(TargetState::Closed, 20_000);
        assert_eq!(outcome.action, DoorAction::Ignored(IgnoreReason::ShutDown));
        assert_eq!(outcome.state, DoorState::Opening);
        assert_eq!(door.actuator().trigger_count, 1);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut door = door();
        door.request_target(TargetState::Open, 0);

        let snapshot = door.state(2_500);
        assert_eq!(snapshot.current, DoorState::Opening);
        assert_eq!(snapshot.target, TargetState::Open);
        assert_eq!(snapshot.trigger_count, 1);
        let progress = snapshot.pending.unwrap();
        assert_eq!(progress.elapsed_ms, 2_500);
        assert_eq!(progress.total_ms, 10_000);
    }

    #[test]
    fn action_names() {
        assert_eq!(
            DoorAction::Triggered {
                from: DoorState::Closed,
                to: DoorState::Opening
            }
            .as_str(),
            "triggered"
        );
        assert_eq!(DoorAction::Ignored(IgnoreReason::AlreadyOpen).as_str(), "ignored");
        assert_eq!(DoorAction::TriggerFailed.as_str(), "trigger_failed");
        assert_eq!(IgnoreReason::ResumeArmed.as_str(), "resume_armed");
    }
}
