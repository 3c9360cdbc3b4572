//! Confirmation timer for in-flight door moves.
//!
//! Nothing tells the controller when the door has actually finished moving,
//! so each move arms a timer for the configured travel time. When it expires
//! the controller promotes `Opening`/`Closing` to `Open`/`Closed`, but only
//! if nothing else happened to the door in the meantime.
//!
//! The timer never calls back on its own. The owner calls
//! [`TransitionTimer::poll`] from its tick and gets the fired
//! [`PendingTransition`] back, so confirmation runs in the same serialized
//! context as every other command.
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::timer::TransitionTimer;
//! use rs_garagedoor::DoorState;
//!
//! let mut timer = TransitionTimer::new();
//! timer.arm(0, 10_000, DoorState::Opening, DoorState::Open);
//!
//! assert!(timer.poll(9_999).is_none());
//!
//! let fired = timer.poll(10_000).unwrap();
//! assert_eq!(fired.expected, DoorState::Opening);
//! assert_eq!(fired.resolved, DoorState::Open);
//!
//! // Fires only once
//! assert!(timer.poll(20_000).is_none());
//! ```
//!
//! # Supersession
//!
//! Arming always replaces the previous timer. Every arm bumps a generation
//! counter, and the returned [`TimerHandle`] only matches the live timer:
//!
//! ```rust
//! use rs_garagedoor::timer::TransitionTimer;
//! use rs_garagedoor::DoorState;
//!
//! let mut timer = TransitionTimer::new();
//! let first = timer.arm(0, 1_000, DoorState::Opening, DoorState::Open).unwrap();
//! let second = timer.arm(500, 1_000, DoorState::Closing, DoorState::Closed).unwrap();
//!
//! assert!(!timer.is_current(first));
//! assert!(timer.is_current(second));
//!
//! // The first deadline passes without firing
//! assert!(timer.poll(1_000).is_none());
//! assert_eq!(timer.poll(1_500).unwrap().resolved, DoorState::Closed);
//! ```

use crate::door::DoorState;

/// Identifies one arming of a [`TransitionTimer`].
///
/// Handles from superseded or cancelled timers never match again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerHandle(u32);

impl TimerHandle {
    /// Raw generation number.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.0
    }
}

/// A confirmation waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    /// State the door must still be in for the confirmation to apply.
    pub expected: DoorState,
    /// State to apply on confirmation.
    pub resolved: DoorState,
    /// Time the timer was armed (milliseconds).
    pub armed_ms: u64,
    /// Time the timer fires (milliseconds).
    pub due_ms: u64,
    /// Generation of this arming.
    pub handle: TimerHandle,
}

impl PendingTransition {
    /// Total delay between arming and firing.
    #[inline]
    pub fn total_ms(&self) -> u64 {
        self.due_ms.saturating_sub(self.armed_ms)
    }
}

/// Progress of the pending confirmation for UI/API display.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerProgress {
    /// State being waited on.
    pub expected: DoorState,
    /// State that will be confirmed.
    pub resolved: DoorState,
    /// Milliseconds since the timer was armed.
    pub elapsed_ms: u64,
    /// Total travel time in milliseconds.
    pub total_ms: u64,
}

impl TimerProgress {
    /// Progress as 0.0 to 1.0.
    pub fn percent(&self) -> f32 {
        if self.total_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f32 / self.total_ms as f32).min(1.0)
    }
}

/// Single-slot, supersedable deadline timer.
///
/// Holds at most one [`PendingTransition`]. After [`shutdown`](Self::shutdown)
/// it refuses to arm and never fires again.
#[derive(Debug, Default)]
pub struct TransitionTimer {
    pending: Option<PendingTransition>,
    generation: u32,
    shut_down: bool,
}

impl TransitionTimer {
    /// Create an idle timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a confirmation `delay_ms` from `now_ms`, discarding any pending one.
    ///
    /// Returns `None` without arming if the timer has been shut down.
    pub fn arm(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        expected: DoorState,
        resolved: DoorState,
    ) -> Option<TimerHandle> {
        if self.shut_down {
            return None;
        }

        if let Some(previous) = self.pending.take() {
            log::debug!(
                "Superseding confirmation timer #{} ({} -> {})",
                previous.handle.0,
                previous.expected,
                previous.resolved
            );
        }

        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle(self.generation);
        self.pending = Some(PendingTransition {
            expected,
            resolved,
            armed_ms: now_ms,
            due_ms: now_ms.saturating_add(delay_ms),
            handle,
        });
        Some(handle)
    }

    /// Discard the pending confirmation, if any.
    ///
    /// Once this returns, no later [`poll`](Self::poll) can deliver it.
    pub fn cancel(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    /// Deliver the pending confirmation if its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<PendingTransition> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_ms => self.pending.take(),
            _ => None,
        }
    }

    /// Returns true while a confirmation is pending.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending confirmation, if any.
    #[inline]
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    /// Returns true if `handle` identifies the live timer.
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.pending.map(|p| p.handle == handle).unwrap_or(false)
    }

    /// Milliseconds until the pending confirmation fires.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending.map(|p| p.due_ms.saturating_sub(now_ms))
    }

    /// Progress of the pending confirmation.
    pub fn progress(&self, now_ms: u64) -> Option<TimerProgress> {
        self.pending.map(|p| TimerProgress {
            expected: p.expected,
            resolved: p.resolved,
            elapsed_ms: now_ms.saturating_sub(p.armed_ms).min(p.total_ms()),
            total_ms: p.total_ms(),
        })
    }

    /// Cancel and refuse all further arming.
    pub fn shutdown(&mut self) {
        self.pending = None;
        self.shut_down = true;
    }

    /// Returns true after [`shutdown`](Self::shutdown).
    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}
