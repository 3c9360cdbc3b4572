//! Door state and target types.
//!
//! [`DoorState`] is the controller's belief about where the door is. It is
//! never sensed, only inferred from relay pulses and elapsed time.
//! [`TargetState`] is what a user or host UI asks for, which can only ever be
//! open or closed.
//!
//! Both types carry the numeric codes used by HomeKit's `CurrentDoorState`
//! and `TargetDoorState` characteristics so a bridge can map them directly.
//!
//! # Example
//!
//! ```
//! use rs_garagedoor::{DoorState, TargetState};
//!
//! assert_eq!(DoorState::default(), DoorState::Closed);
//! assert!(DoorState::Opening.is_moving());
//!
//! assert_eq!(TargetState::from_text("close"), Some(TargetState::Closed));
//! assert_eq!(TargetState::Open.toggled(), TargetState::Closed);
//! ```

/// Believed position or motion of the door.
///
/// # Default
///
/// Defaults to [`Closed`](Self::Closed), the state assumed at power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DoorState {
    /// Fully open.
    Open,
    /// Fully closed.
    #[default]
    Closed,
    /// Travelling towards open.
    Opening,
    /// Travelling towards closed.
    Closing,
    /// Halted somewhere between open and closed.
    Stopped,
}

impl DoorState {
    /// Returns the state as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_garagedoor::DoorState;
    ///
    /// assert_eq!(DoorState::Open.as_str(), "open");
    /// assert_eq!(DoorState::Stopped.as_str(), "stopped");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DoorState::Open => "open",
            DoorState::Closed => "closed",
            DoorState::Opening => "opening",
            DoorState::Closing => "closing",
            DoorState::Stopped => "stopped",
        }
    }

    /// Returns true while the door is believed to be travelling.
    #[inline]
    pub const fn is_moving(&self) -> bool {
        matches!(self, DoorState::Opening | DoorState::Closing)
    }

    /// HomeKit `CurrentDoorState` code.
    #[inline]
    pub const fn hap_code(&self) -> u8 {
        match self {
            DoorState::Open => 0,
            DoorState::Closed => 1,
            DoorState::Opening => 2,
            DoorState::Closing => 3,
            DoorState::Stopped => 4,
        }
    }

    /// Parse a HomeKit `CurrentDoorState` code.
    ///
    /// ```
    /// use rs_garagedoor::DoorState;
    ///
    /// assert_eq!(DoorState::from_hap_code(2), Some(DoorState::Opening));
    /// assert_eq!(DoorState::from_hap_code(5), None);
    /// ```
    pub const fn from_hap_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DoorState::Open),
            1 => Some(DoorState::Closed),
            2 => Some(DoorState::Opening),
            3 => Some(DoorState::Closing),
            4 => Some(DoorState::Stopped),
            _ => None,
        }
    }
}

impl core::fmt::Display for DoorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Door position requested by a user or host UI.
///
/// There is no "stopped" target: a wall-button opener only
/// understands "move" and the host only offers open or closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TargetState {
    /// Request the door to be open.
    #[cfg_attr(feature = "serde", serde(alias = "opened", alias = "up"))]
    Open,
    /// Request the door to be closed.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "close", alias = "down"))]
    Closed,
}

impl TargetState {
    /// Returns the target as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TargetState::Open => "open",
            TargetState::Closed => "closed",
        }
    }

    /// Parse a target from text input.
    ///
    /// Accepts `open`/`opened`/`up`/`0` and `close`/`closed`/`down`/`1`.
    /// The numeric forms follow the HomeKit `TargetDoorState` codes. Input is
    /// trimmed and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_garagedoor::TargetState;
    ///
    /// assert_eq!(TargetState::from_text("open"), Some(TargetState::Open));
    /// assert_eq!(TargetState::from_text(" UP "), Some(TargetState::Open));
    /// assert_eq!(TargetState::from_text("1"), Some(TargetState::Closed));
    /// assert_eq!(TargetState::from_text("stop"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        for (name, target) in [
            ("open", TargetState::Open),
            ("opened", TargetState::Open),
            ("up", TargetState::Open),
            ("0", TargetState::Open),
            ("close", TargetState::Closed),
            ("closed", TargetState::Closed),
            ("down", TargetState::Closed),
            ("1", TargetState::Closed),
        ] {
            if s.eq_ignore_ascii_case(name) {
                return Some(target);
            }
        }
        None
    }

    /// HomeKit `TargetDoorState` code.
    #[inline]
    pub const fn hap_code(&self) -> u8 {
        match self {
            TargetState::Open => 0,
            TargetState::Closed => 1,
        }
    }

    /// Parse a HomeKit `TargetDoorState` code.
    pub const fn from_hap_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TargetState::Open),
            1 => Some(TargetState::Closed),
            _ => None,
        }
    }

    /// The opposite target, as a single-button UI would request next.
    #[inline]
    pub const fn toggled(&self) -> Self {
        match self {
            TargetState::Open => TargetState::Closed,
            TargetState::Closed => TargetState::Open,
        }
    }
}

impl core::fmt::Display for TargetState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
