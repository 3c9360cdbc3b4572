//! API request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::config::DeviceConfig;
use crate::{DoorAction, DoorSnapshot, DoorState, TargetOutcome, TargetState};

// Re-export shared request types from messages module
pub use crate::messages::SetTargetRequest;

// ============================================================================
// Response Types
// ============================================================================

/// API response wrapper for consistent JSON structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (present when success=true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present when success=false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Current door state response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    /// Believed door state
    pub current: DoorState,
    /// HomeKit CurrentDoorState code
    pub current_code: u8,
    /// Last requested target
    pub target: TargetState,
    /// HomeKit TargetDoorState code
    pub target_code: u8,
    /// Whether a move is awaiting confirmation
    pub transitioning: bool,
    /// Whether the next open request resumes a stopped door
    pub resume_armed: bool,
    /// Relay pulses since startup
    pub trigger_count: u32,
    /// Pending move progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressResponse>,
}

/// Move progress response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    /// State being waited on
    pub expected: DoorState,
    /// State that will be confirmed
    pub resolved: DoorState,
    /// Elapsed time in milliseconds
    pub elapsed_ms: u64,
    /// Configured travel time in milliseconds
    pub total_ms: u64,
    /// Progress percentage (0.0 to 1.0)
    pub percent: f32,
}

impl From<&DoorSnapshot> for StateResponse {
    fn from(state: &DoorSnapshot) -> Self {
        Self {
            current: state.current,
            current_code: state.current.hap_code(),
            target: state.target,
            target_code: state.target.hap_code(),
            transitioning: state.pending.is_some(),
            resume_armed: state.resume_armed,
            trigger_count: state.trigger_count,
            progress: state.pending.as_ref().map(|p| ProgressResponse {
                expected: p.expected,
                resolved: p.resolved,
                elapsed_ms: p.elapsed_ms,
                total_ms: p.total_ms,
                percent: p.percent(),
            }),
        }
    }
}

/// Current target response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetResponse {
    /// Last requested target
    pub target: TargetState,
    /// HomeKit TargetDoorState code
    pub target_code: u8,
}

impl From<TargetState> for TargetResponse {
    fn from(target: TargetState) -> Self {
        Self {
            target,
            target_code: target.hap_code(),
        }
    }
}

/// Target request result response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Door state after the request
    pub state: DoorState,
    /// `triggered`, `ignored` or `trigger_failed`
    pub result: String,
    /// Why nothing happened, for ignored requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&TargetOutcome> for CommandResponse {
    fn from(outcome: &TargetOutcome) -> Self {
        let reason = match outcome.action {
            DoorAction::Ignored(reason) => Some(reason.as_str().to_string()),
            _ => None,
        };
        Self {
            state: outcome.state,
            result: outcome.action.as_str().to_string(),
            reason,
        }
    }
}

/// Accessory information response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Accessory name
    pub name: String,
    /// Manufacturer
    pub manufacturer: String,
    /// Model
    pub model: String,
    /// Serial number
    pub serial: String,
    /// Crate version
    pub firmware: String,
}

impl From<&DeviceConfig> for InfoResponse {
    fn from(device: &DeviceConfig) -> Self {
        Self {
            name: device.name.as_str().to_string(),
            manufacturer: device.manufacturer.as_str().to_string(),
            model: device.model.as_str().to_string(),
            serial: device.serial.as_str().to_string(),
            firmware: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
