//! Shared message types for the HTTP API.
//!
//! These types are `no_std` compatible and can be deserialized using either
//! `serde_json` (desktop) or `serde-json-core` (embedded).
//!
//! # Example
//!
//! ```
//! use rs_garagedoor::messages::SetTargetRequest;
//! use rs_garagedoor::TargetState;
//!
//! // Desktop: using serde_json
//! #[cfg(feature = "std")]
//! {
//!     let json = r#"{"target": "open"}"#;
//!     let req: SetTargetRequest = serde_json::from_str(json).unwrap();
//!     assert_eq!(req.target, TargetState::Open);
//! }
//! ```

use crate::TargetState;
use serde::{Deserialize, Serialize};

// ============================================================================
// Request Types
// ============================================================================

/// Request to move the door towards a target.
///
/// # JSON Examples
///
/// ```json
/// {"target": "open"}
/// {"target": "closed"}
/// ```
///
/// `"up"`/`"opened"` and `"down"`/`"close"` are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTargetRequest {
    /// Requested door position
    pub target: TargetState,
}

impl SetTargetRequest {
    /// Create a new target request.
    pub fn new(target: TargetState) -> Self {
        Self { target }
    }
}

// ============================================================================
// Parsing Functions (using serde-json-core for no_std compatibility)
// ============================================================================

/// Parse a target request from JSON bytes.
///
/// Works in both `std` and `no_std` environments using `serde-json-core`.
///
/// # Example
///
/// ```
/// use rs_garagedoor::messages::parse_target_request;
/// use rs_garagedoor::TargetState;
///
/// let req = parse_target_request(br#"{"target": "closed"}"#).unwrap();
/// assert_eq!(req.target, TargetState::Closed);
///
/// assert!(parse_target_request(br#"{"target": "sideways"}"#).is_none());
/// ```
#[cfg(feature = "serde-json-core")]
pub fn parse_target_request(json: &[u8]) -> Option<SetTargetRequest> {
    serde_json_core::from_slice(json).ok().map(|(req, _)| req)
}
