//! REST DTOs for the stack calculator module
//!
//! These types are transport-specific (serde for JSON bodies).

use serde::{Deserialize, Serialize};
use stack_calculator_sdk::SessionId;

/// Response to session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    /// Opaque token to pass to every later call.
    pub session_id: SessionId,
}

/// Request to push one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PushRequest {
    pub value: i32,
}

/// A value removed from the stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueResponse {
    pub value: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsEmptyResponse {
    pub is_empty: bool,
}

/// Request to pop after waiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelayPopRequest {
    /// Milliseconds to wait before popping.
    pub delay_millis: u64,
}

/// Request to reduce the whole stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReduceRequest {
    /// One of `min`, `max`, `gcd`, `lcm`.
    pub operator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}
