//! HTTP Engine Gateway - EngineGateway implementation over the engine's
//! REST API.
//!
//! Every call is a single request with a fixed timeout and bearer
//! authentication; no retries. Upstream failures are normalized into
//! `EngineError {kind, message}` with best-effort message extraction from
//! heterogeneous error bodies.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use std::time::Duration;

use crate::ports::{EngineError, EngineErrorKind, EngineGateway, TaskRequest};

/// Configuration for the engine gateway.
#[derive(Debug, Clone)]
pub struct EngineGatewayConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Worker routed on session creation, when configured.
    pub worker_id: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl EngineGatewayConfig {
    /// Creates a new configuration with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            worker_id: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the worker id sent on session creation.
    pub fn with_worker_id(mut self, worker_id: Option<String>) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Engine gateway over HTTP.
pub struct HttpEngineGateway {
    config: EngineGatewayConfig,
    client: Client,
}

impl HttpEngineGateway {
    /// Creates a new gateway with the given configuration.
    pub fn new(config: EngineGatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Sends one request and decodes the JSON body.
    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value, EngineError> {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.config.api_key()));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::timeout(format!(
                    "engine request timed out after {}s",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                EngineError::network(format!("Connection failed: {e}"))
            } else {
                EngineError::network(e.to_string())
            }
        })?;

        let response = self.handle_response_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| EngineError::parse(format!("Failed to parse engine response: {e}")))
    }

    /// Maps non-success statuses to normalized errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, EngineError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let message = normalize_error_body(&error_body);

        let kind = match status {
            StatusCode::TOO_MANY_REQUESTS => EngineErrorKind::RateLimited,
            _ => EngineErrorKind::Upstream,
        };
        Err(EngineError::new(kind, message))
    }
}

/// Extracts a human-readable message from an engine error body.
///
/// Preference order: nested provider `error.message`, then a top-level
/// `message` field, then the raw body.
fn normalize_error_body(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(message) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
        if let Some(message) = parsed.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    if body.is_empty() {
        "Unknown error".to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl EngineGateway for HttpEngineGateway {
    async fn create_session(&self, metadata: Value) -> Result<Value, EngineError> {
        let mut body = json!({ "metadata": metadata });
        if let Some(ref worker_id) = self.config.worker_id {
            body["workerId"] = json!(worker_id);
        }
        self.request(Method::POST, "/sessions", Some(body)).await
    }

    async fn send_message(&self, session_id: &str, content: &str) -> Result<Value, EngineError> {
        let body = json!({ "content": content, "role": "user" });
        self.request(
            Method::POST,
            &format!("/sessions/{session_id}/messages"),
            Some(body),
        )
        .await
    }

    async fn create_task(&self, session_id: &str, task: TaskRequest) -> Result<Value, EngineError> {
        let body = json!({
            "model": task.model,
            "instructions": task.instructions,
            "tools": task.tools,
            "toolChoice": task.tool_choice,
        });
        self.request(
            Method::POST,
            &format!("/sessions/{session_id}/tasks"),
            Some(body),
        )
        .await
    }

    async fn get_task(&self, session_id: &str, task_id: &str) -> Result<Value, EngineError> {
        self.request(
            Method::GET,
            &format!("/sessions/{session_id}/tasks/{task_id}"),
            None,
        )
        .await
    }

    async fn submit_tool_outputs(
        &self,
        session_id: &str,
        task_id: &str,
        tool_outputs: Value,
    ) -> Result<Value, EngineError> {
        let body = json!({ "toolOutputs": tool_outputs });
        self.request(
            Method::POST,
            &format!("/sessions/{session_id}/tasks/{task_id}/tool-outputs"),
            Some(body),
        )
        .await
    }

    async fn list_messages(&self, session_id: &str) -> Result<Value, EngineError> {
        self.request(Method::GET, &format!("/sessions/{session_id}/messages"), None)
            .await
    }
}
