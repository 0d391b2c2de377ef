//! HTTP DTOs for the relay endpoints.
//!
//! Field names are camelCase on the wire (`sessionId`, `toolOutputs`,
//! `isEmergency`) to stay compatible with the existing frontend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::Facility;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a session. The whole body is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub metadata: Option<Value>,
}

/// Request to append a message and start a processing task.
///
/// Required fields are modeled as options so the handler can answer with a
/// descriptive 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAndProcessRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
}

/// Request to submit tool outputs for a pending task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitToolOutputsRequest {
    pub session_id: Option<String>,
    pub task_id: Option<String>,
    pub tool_outputs: Option<Value>,
}

/// Request to screen a message for emergency keywords.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectEmergencyRequest {
    pub message: Option<String>,
}

/// Request to find hospitals near a location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindHospitalsRequest {
    pub location: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response from the emergency screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectEmergencyResponse {
    pub is_emergency: bool,
}

/// Response from the hospital finder. Always HTTP 200; the `message`
/// variant keeps the conversational flow unbroken on misses and upstream
/// trouble.
#[derive(Debug, Clone, Serialize)]
pub struct FindHospitalsResponse {
    pub hospitals: Vec<Facility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FindHospitalsResponse {
    /// An empty result set with an explanatory message.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            hospitals: vec![],
            count: None,
            location: None,
            message: Some(message.into()),
        }
    }

    /// A populated result set.
    pub fn found(hospitals: Vec<Facility>, location: impl Into<String>) -> Self {
        Self {
            count: Some(hospitals.len()),
            hospitals,
            location: Some(location.into()),
            message: None,
        }
    }
}

/// Error payload for 400/500 responses on the session/task endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// A client-input error (400): message only.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    /// An upstream failure (500): context plus normalized error text.
    pub fn upstream(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// Error payload for the hospital finder's missing-API-key case.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigErrorResponse {
    pub error: String,
}
