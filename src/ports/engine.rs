//! Engine Gateway Port - Interface to the conversational-AI engine.
//!
//! The relay forwards opaque JSON between the frontend and the engine's
//! session/task API, so every operation takes and returns
//! `serde_json::Value`. Domain validation is deferred to the engine; this
//! port only carries the calls.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ToolChoice;

/// Port for the external conversational-AI engine.
#[async_trait]
pub trait EngineGateway: Send + Sync {
    /// Create a session, returning the engine-assigned session object.
    async fn create_session(&self, metadata: Value) -> Result<Value, EngineError>;

    /// Append a user message to a session's history.
    async fn send_message(&self, session_id: &str, content: &str) -> Result<Value, EngineError>;

    /// Create a processing task for a session.
    async fn create_task(&self, session_id: &str, task: TaskRequest) -> Result<Value, EngineError>;

    /// Fetch the current task object.
    async fn get_task(&self, session_id: &str, task_id: &str) -> Result<Value, EngineError>;

    /// Submit tool outputs for a pending task.
    async fn submit_tool_outputs(
        &self,
        session_id: &str,
        task_id: &str,
        tool_outputs: Value,
    ) -> Result<Value, EngineError>;

    /// List a session's messages.
    async fn list_messages(&self, session_id: &str) -> Result<Value, EngineError>;
}

/// Parameters for task creation.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    /// Model the engine should run.
    pub model: String,
    /// System instructions for this turn.
    pub instructions: String,
    /// Tool schema the model may call.
    pub tools: Value,
    /// Tool-choice policy.
    pub tool_choice: ToolChoice,
}

/// Normalized engine failure: a stable kind plus best-effort message text
/// extracted from whatever shape the upstream returned.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct EngineError {
    pub kind: EngineErrorKind,
    pub message: String,
}

/// Engine failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// Request exceeded the configured timeout.
    Timeout,
    /// Upstream returned HTTP 429.
    RateLimited,
    /// Upstream returned any other error status.
    Upstream,
    /// Connection or transport failure.
    Network,
    /// Response body could not be decoded.
    Parse,
}

impl std::fmt::Display for EngineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EngineErrorKind::Timeout => "timeout",
            EngineErrorKind::RateLimited => "rate limited",
            EngineErrorKind::Upstream => "upstream error",
            EngineErrorKind::Network => "network error",
            EngineErrorKind::Parse => "parse error",
        };
        f.write_str(name)
    }
}

impl EngineError {
    pub fn new(kind: EngineErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::Parse, message)
    }
}
