//! Simulated relay for running without hardware.
//!
//! Selected by the debug flag (`DEBUG=*` or `DeviceConfig::simulate`).
//! A pulse only writes a log line, so the full controller can run on a
//! desktop or in CI without GPIO access.

use core::convert::Infallible;

use crate::traits::Actuator;

/// Relay stand-in that logs each pulse and never touches hardware.
#[derive(Debug, Default)]
pub struct SimulatedActuator {
    pulses: u32,
}

impl SimulatedActuator {
    /// Creates a simulated relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulated pulses so far.
    pub fn pulses(&self) -> u32 {
        self.pulses
    }
}

impl Actuator for SimulatedActuator {
    type Error = Infallible;

    fn trigger(&mut self) -> Result<(), Infallible> {
        self.pulses = self.pulses.wrapping_add(1);
        log::info!("TOGGLE (simulated relay, pulse #{})", self.pulses);
        Ok(())
    }
}

/// Either a real relay or the simulation, chosen once at startup.
#[derive(Debug)]
pub enum DoorActuator<A> {
    /// Real relay hardware.
    Hardware(A),
    /// Logging stand-in.
    Simulated(SimulatedActuator),
}

impl<A: Actuator> DoorActuator<A> {
    /// Pick the simulation when `simulate` is set, otherwise build the
    /// hardware relay.
    ///
    /// `hardware` is not called in simulation, so no pin gets claimed.
    ///
    /// ```rust
    /// use rs_garagedoor::hal::{DoorActuator, MockActuator};
    ///
    /// let relay = DoorActuator::select(true, || -> Result<MockActuator, ()> {
    ///     panic!("hardware must not be touched in simulation")
    /// })
    /// .unwrap();
    /// assert!(relay.is_simulated());
    /// ```
    pub fn select<E, F>(simulate: bool, hardware: F) -> Result<Self, E>
    where
        F: FnOnce() -> Result<A, E>,
    {
        if simulate {
            log::warn!("Relay simulation enabled, GPIO will not be driven");
            Ok(DoorActuator::Simulated(SimulatedActuator::new()))
        } else {
            hardware().map(DoorActuator::Hardware)
        }
    }

    /// Returns true for the simulation.
    pub fn is_simulated(&self) -> bool {
        matches!(self, DoorActuator::Simulated(_))
    }
}

impl<A: Actuator> Actuator for DoorActuator<A> {
    type Error = A::Error;

    fn trigger(&mut self) -> Result<(), A::Error> {
        match self {
            DoorActuator::Hardware(relay) => relay.trigger(),
            DoorActuator::Simulated(sim) => match sim.trigger() {
                Ok(()) => Ok(()),
                Err(never) => match never {},
            },
        }
    }
}
