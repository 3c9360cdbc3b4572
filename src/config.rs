//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! Door timing values follow the "missing or nonsense means default" rule:
//! a pin of 0, or a time that is zero, negative or not finite, is replaced
//! by the documented default both in the builders and when deserializing.
//!
//! # Example
//!
//! ```rust
//! use rs_garagedoor::config::{Config, DoorConfig, WebConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.door.door_pin, 12);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_door(DoorConfig::default().with_time_to_move_s(14.0))
//!     .with_web(WebConfig::default().with_port(3000));
//! assert_eq!(config.door.time_to_move_ms(), 14_000);
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (names, serial numbers)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Default GPIO pin driving the door relay
pub const DEFAULT_DOOR_PIN: u8 = 12;

/// Default time for the door to travel fully open or closed, in seconds
pub const DEFAULT_TIME_TO_MOVE_S: f32 = 10.0;

/// Default time the relay holds the button contact, in seconds
pub const DEFAULT_TRIGGER_HOLD_S: f32 = 0.1;

// ============================================================================
// Helpers
// ============================================================================

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

fn positive_or(value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

fn secs_to_ms(secs: f32) -> u64 {
    (secs * 1000.0 + 0.5) as u64
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Accessory identification and runtime settings
    pub device: DeviceConfig,
    /// Door relay and timing
    pub door: DoorConfig,
    /// Web server configuration
    pub web: WebConfig,
}

impl Config {
    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Set door configuration
    pub fn with_door(mut self, door: DoorConfig) -> Self {
        self.door = door;
        self
    }

    /// Set web configuration
    pub fn with_web(mut self, web: WebConfig) -> Self {
        self.web = web;
        self
    }

    /// Apply environment overrides.
    ///
    /// `DEBUG=*` switches the relay to simulation so no GPIO is touched.
    #[cfg(feature = "std")]
    pub fn apply_env(mut self) -> Self {
        if std::env::var("DEBUG").map(|v| v == "*").unwrap_or(false) {
            self.device.simulate = true;
        }
        self
    }

    /// Parse a JSON configuration document.
    ///
    /// Every section and field is optional.
    #[cfg(feature = "web")]
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        serde_json::from_str(json).context("invalid configuration JSON")
    }

    /// Load a JSON configuration file.
    #[cfg(feature = "web")]
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }
}

// ============================================================================
// Door Config
// ============================================================================

/// Door relay pin and timing.
///
/// Fields are public for reading; construct through [`DoorConfig::new`] or the
/// `with_*` builders so invalid values fall back to their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawDoorConfig"))]
pub struct DoorConfig {
    /// GPIO pin driving the relay
    pub door_pin: u8,
    /// Seconds for the door to travel fully open or closed
    pub time_to_move_s: f32,
    /// Seconds the relay holds the button contact
    pub trigger_hold_s: f32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            door_pin: DEFAULT_DOOR_PIN,
            time_to_move_s: DEFAULT_TIME_TO_MOVE_S,
            trigger_hold_s: DEFAULT_TRIGGER_HOLD_S,
        }
    }
}

impl DoorConfig {
    /// Create a door config, replacing invalid values with defaults.
    pub fn new(door_pin: u8, time_to_move_s: f32, trigger_hold_s: f32) -> Self {
        Self::default()
            .with_door_pin(door_pin)
            .with_time_to_move_s(time_to_move_s)
            .with_trigger_hold_s(trigger_hold_s)
    }

    /// Set the relay pin (0 selects the default)
    pub fn with_door_pin(mut self, pin: u8) -> Self {
        self.door_pin = if pin == 0 { DEFAULT_DOOR_PIN } else { pin };
        self
    }

    /// Set the travel time
    pub fn with_time_to_move_s(mut self, secs: f32) -> Self {
        self.time_to_move_s = positive_or(secs, DEFAULT_TIME_TO_MOVE_S);
        self
    }

    /// Set the relay hold time
    pub fn with_trigger_hold_s(mut self, secs: f32) -> Self {
        self.trigger_hold_s = positive_or(secs, DEFAULT_TRIGGER_HOLD_S);
        self
    }

    /// Travel time in milliseconds
    pub fn time_to_move_ms(&self) -> u64 {
        secs_to_ms(self.time_to_move_s)
    }

    /// Relay hold time in milliseconds
    pub fn trigger_hold_ms(&self) -> u32 {
        secs_to_ms(self.trigger_hold_s).min(u32::MAX as u64) as u32
    }
}

/// Wire form of [`DoorConfig`]; also accepts the Homebridge plugin keys.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct RawDoorConfig {
    #[serde(alias = "doorPin")]
    door_pin: Option<u8>,
    #[serde(alias = "timeToOpen")]
    time_to_move_s: Option<f32>,
    #[serde(alias = "buttonHoldTime")]
    trigger_hold_s: Option<f32>,
}

#[cfg(feature = "serde")]
impl From<RawDoorConfig> for DoorConfig {
    fn from(raw: RawDoorConfig) -> Self {
        DoorConfig::new(
            raw.door_pin.unwrap_or(0),
            raw.time_to_move_s.unwrap_or(0.0),
            raw.trigger_hold_s.unwrap_or(0.0),
        )
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Accessory identification and runtime settings
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Human-readable accessory name
    pub name: ShortString,
    /// Manufacturer reported to hosts
    pub manufacturer: ShortString,
    /// Model reported to hosts
    pub model: ShortString,
    /// Serial number reported to hosts
    pub serial: ShortString,
    /// Controller tick interval in milliseconds
    pub tick_ms: u32,
    /// Log relay pulses instead of driving hardware
    pub simulate: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("Garage Door"),
            manufacturer: short_string("rs-garagedoor"),
            model: short_string("Garage Opener"),
            serial: short_string("8675309"),
            tick_ms: 50,
            simulate: false,
        }
    }
}

impl DeviceConfig {
    /// Set the accessory name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the manufacturer
    pub fn with_manufacturer(mut self, manufacturer: &str) -> Self {
        self.manufacturer = short_string(manufacturer);
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = short_string(model);
        self
    }

    /// Set the serial number
    pub fn with_serial(mut self, serial: &str) -> Self {
        self.serial = short_string(serial);
        self
    }

    /// Set the tick interval (0 selects the default)
    pub fn with_tick_ms(mut self, ms: u32) -> Self {
        self.tick_ms = if ms == 0 { 50 } else { ms };
        self
    }

    /// Enable or disable relay simulation
    pub fn with_simulate(mut self, simulate: bool) -> Self {
        self.simulate = simulate;
        self
    }
}

// ============================================================================
// Web Config
// ============================================================================

/// Web server configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WebConfig {
    /// Port to listen on
    pub port: u16,
    /// Whether to enable CORS for all origins
    pub cors_permissive: bool,
    /// Polling interval hint for web UI (milliseconds)
    pub poll_interval_ms: u32,
    /// Whether web server is enabled
    pub enabled: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cors_permissive: true,
            poll_interval_ms: 500,
            enabled: true,
        }
    }
}

impl WebConfig {
    /// Set the port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set CORS mode
    pub fn with_cors(mut self, permissive: bool) -> Self {
        self.cors_permissive = permissive;
        self
    }

    /// Set the poll interval hint
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Enable or disable web server
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
