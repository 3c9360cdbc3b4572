//! Shared door state for the HTTP API and the tick loop.
//!
//! `SharedDoorState` gives several tasks access to a single
//! `GarageDoorController`. Requests from HTTP handlers and timer deliveries
//! from the tick loop all go through the same mutex, so a confirmation can
//! never interleave with a request.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rs_garagedoor::hal::MockActuator;
//! use rs_garagedoor::services::SharedDoorState;
//! use rs_garagedoor::{DoorConfig, DoorState, GarageDoorController, LogNotifier, TargetState};
//!
//! let door = GarageDoorController::new(DoorConfig::default(), MockActuator::new(), LogNotifier);
//! let state = Arc::new(SharedDoorState::new(door));
//!
//! // HTTP handlers request targets
//! let outcome = state.request_target(TargetState::Open);
//! assert_eq!(outcome.state, DoorState::Opening);
//!
//! // The tick loop delivers confirmations
//! state.tick();
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::config::DeviceConfig;
use crate::traits::{Actuator, DoorNotifier};
use crate::{DoorSnapshot, DoorState, GarageDoorController, TargetOutcome, TargetState};

// ============================================================================
// State Provider Trait
// ============================================================================

/// Door access for services.
///
/// Lets the HTTP layer stay generic over one type instead of the
/// controller's relay and notifier parameters.
pub trait DoorStateProvider: Send + Sync {
    /// Get the current door snapshot.
    fn state(&self) -> DoorSnapshot;

    /// Get the current timestamp in milliseconds.
    fn now_ms(&self) -> u64;

    /// Request a door target.
    fn request_target(&self, target: TargetState) -> TargetOutcome;

    /// Deliver a due confirmation, if any.
    fn tick(&self) -> Option<DoorState>;

    /// Accessory information.
    fn device(&self) -> &DeviceConfig;
}

// ============================================================================
// Shared Door State
// ============================================================================

/// Shared state for all services (web, tick loop, wall button).
///
/// # Thread Safety
///
/// - Uses `Mutex` for controller access. Every operation writes.
/// - All timestamps come from the same `start_time`, so deadlines armed by
///   a request and checked by the tick loop agree.
/// - A poisoned lock is recovered; the controller never panics midway
///   through a transition.
pub struct SharedDoorState<A: Actuator, N: DoorNotifier> {
    controller: Mutex<GarageDoorController<A, N>>,
    start_time: Instant,
    device: DeviceConfig,
}

impl<A: Actuator, N: DoorNotifier> SharedDoorState<A, N> {
    /// Create new shared state wrapping a controller.
    ///
    /// The `start_time` is set to `Instant::now()`, which becomes the time base
    /// for all `now_ms()` calls.
    pub fn new(controller: GarageDoorController<A, N>) -> Self {
        Self {
            controller: Mutex::new(controller),
            start_time: Instant::now(),
            device: DeviceConfig::default(),
        }
    }

    /// Set the accessory information served by the API.
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Get current timestamp in milliseconds since state creation.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Get the start time instant.
    #[inline]
    pub fn start_time(&self) -> Instant {
        self.start_time
    }

    /// Access the controller with a mutable lock.
    ///
    /// The closure pattern prevents accidentally holding the lock across
    /// await points.
    pub fn with_controller<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut GarageDoorController<A, N>) -> R,
    {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Get a state snapshot.
    pub fn state(&self) -> DoorSnapshot {
        let now_ms = self.now_ms();
        self.lock().state(now_ms)
    }

    /// Request a target at the current time.
    pub fn request_target(&self, target: TargetState) -> TargetOutcome {
        let now_ms = self.now_ms();
        self.lock().apply_target(target, now_ms)
    }

    /// Run one controller update at the current time.
    pub fn tick(&self) -> Option<DoorState> {
        let now_ms = self.now_ms();
        self.lock().update(now_ms)
    }

    /// Shut the controller down.
    pub fn shutdown(&self) {
        self.lock().shutdown();
    }

    /// Accessory information.
    pub fn device(&self) -> &DeviceConfig {
        &self.device
    }

    fn lock(&self) -> MutexGuard<'_, GarageDoorController<A, N>> {
        self.controller
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A, N> DoorStateProvider for SharedDoorState<A, N>
where
    A: Actuator + Send,
    N: DoorNotifier + Send,
{
    fn state(&self) -> DoorSnapshot {
        SharedDoorState::state(self)
    }

    fn now_ms(&self) -> u64 {
        SharedDoorState::now_ms(self)
    }

    fn request_target(&self, target: TargetState) -> TargetOutcome {
        SharedDoorState::request_target(self, target)
    }

    fn tick(&self) -> Option<DoorState> {
        SharedDoorState::tick(self)
    }

    fn device(&self) -> &DeviceConfig {
        SharedDoorState::device(self)
    }
}
