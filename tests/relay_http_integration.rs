//! Integration tests for the relay HTTP surface.
//!
//! The router is exercised end to end with mock port implementations, so
//! these tests verify routing, request validation, upstream call payloads,
//! and response shaping without any network access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use health_relay::adapters::http::{relay_router, AppState};
use health_relay::domain::Facility;
use health_relay::ports::{
    EngineError, EngineErrorKind, EngineGateway, FacilitySearch, SearchError, TaskRequest,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Records every engine call so tests can assert on payloads and on the
/// absence of calls.
#[derive(Default)]
struct MockEngine {
    calls: Mutex<Vec<String>>,
    created_sessions: Mutex<Vec<Value>>,
    created_tasks: Mutex<Vec<(String, String, Value)>>,
    fail_with: Mutex<Option<String>>,
}

impl MockEngine {
    fn failing(message: &str) -> Self {
        Self {
            fail_with: Mutex::new(Some(message.to_string())),
            ..Default::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, name: &str) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(name.to_string());
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(EngineError::new(EngineErrorKind::Upstream, message));
        }
        Ok(())
    }
}

#[async_trait]
impl EngineGateway for MockEngine {
    async fn create_session(&self, metadata: Value) -> Result<Value, EngineError> {
        self.record("create_session")?;
        self.created_sessions.lock().unwrap().push(metadata.clone());
        Ok(json!({ "data": { "id": "session-1", "metadata": metadata } }))
    }

    async fn send_message(&self, session_id: &str, _content: &str) -> Result<Value, EngineError> {
        self.record("send_message")?;
        Ok(json!({ "data": { "sessionId": session_id } }))
    }

    async fn create_task(&self, session_id: &str, task: TaskRequest) -> Result<Value, EngineError> {
        self.record("create_task")?;
        let tool_choice = serde_json::to_value(task.tool_choice).unwrap();
        self.created_tasks.lock().unwrap().push((
            session_id.to_string(),
            task.model.clone(),
            tool_choice,
        ));
        Ok(json!({ "data": { "id": "task-1", "status": "queued" } }))
    }

    async fn get_task(&self, _session_id: &str, task_id: &str) -> Result<Value, EngineError> {
        self.record("get_task")?;
        Ok(json!({ "data": { "id": task_id, "status": "completed" } }))
    }

    async fn submit_tool_outputs(
        &self,
        _session_id: &str,
        task_id: &str,
        tool_outputs: Value,
    ) -> Result<Value, EngineError> {
        self.record("submit_tool_outputs")?;
        Ok(json!({ "data": { "id": task_id, "toolOutputs": tool_outputs } }))
    }

    async fn list_messages(&self, session_id: &str) -> Result<Value, EngineError> {
        self.record("list_messages")?;
        Ok(json!({ "data": [{ "sessionId": session_id, "content": "hi" }] }))
    }
}

/// Facility search returning a canned outcome.
struct MockSearch {
    outcome: Mutex<Option<Result<Vec<Facility>, SearchError>>>,
}

impl MockSearch {
    fn returning(facilities: Vec<Facility>) -> Self {
        Self {
            outcome: Mutex::new(Some(Ok(facilities))),
        }
    }

    fn failing(error: SearchError) -> Self {
        Self {
            outcome: Mutex::new(Some(Err(error))),
        }
    }
}

#[async_trait]
impl FacilitySearch for MockSearch {
    async fn search(&self, _location: &str) -> Result<Vec<Facility>, SearchError> {
        self.outcome
            .lock()
            .unwrap()
            .take()
            .expect("search called more than once")
    }
}

fn app(engine: Arc<MockEngine>, search: MockSearch) -> Router {
    relay_router(AppState {
        engine,
        facilities: Arc::new(search),
        model: "gemini-2-5-flash".to_string(),
    })
}

fn app_with_engine(engine: Arc<MockEngine>) -> Router {
    app(engine, MockSearch::returning(vec![]))
}

async fn send_json(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

// =============================================================================
// Emergency detection
// =============================================================================

#[tokio::test]
async fn detect_emergency_flags_chest_pain() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine),
        "POST",
        "/detect-emergency",
        Some(json!({ "message": "I have chest pain" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isEmergency": true }));
}

#[tokio::test]
async fn detect_emergency_passes_ordinary_messages() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine),
        "POST",
        "/detect-emergency",
        Some(json!({ "message": "what should I eat for breakfast?" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isEmergency": false }));
}

#[tokio::test]
async fn detect_emergency_treats_missing_message_as_empty() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) =
        send_json(app_with_engine(engine), "POST", "/detect-emergency", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isEmergency"], json!(false));
}

#[tokio::test]
async fn detect_emergency_accepts_a_bodiless_post() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) =
        send_json(app_with_engine(engine), "POST", "/detect-emergency", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "isEmergency": false }));
}

// =============================================================================
// Session and task relay
// =============================================================================

#[tokio::test]
async fn create_session_without_body_uses_default_metadata() {
    let engine = Arc::new(MockEngine::default());
    let (status, _body) = send_json(
        app_with_engine(engine.clone()),
        "POST",
        "/create-session",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sessions = engine.created_sessions.lock().unwrap();
    assert_eq!(*sessions, vec![json!({ "userID": "new-user" })]);
}

#[tokio::test]
async fn create_session_forwards_caller_metadata() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine.clone()),
        "POST",
        "/create-session",
        Some(json!({ "metadata": { "userID": "abc" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "session-1");
    let sessions = engine.created_sessions.lock().unwrap();
    assert_eq!(*sessions, vec![json!({ "userID": "abc" })]);
}

#[tokio::test]
async fn send_and_process_requires_both_fields() {
    for body in [json!({}), json!({ "sessionId": "s-1" }), json!({ "message": "hi" })] {
        let engine = Arc::new(MockEngine::default());
        let (status, response) = send_json(
            app_with_engine(engine.clone()),
            "POST",
            "/send-and-process",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "sessionId and message are required");
        // The upstream engine is never invoked on input errors.
        assert_eq!(engine.call_count(), 0);
    }
}

#[tokio::test]
async fn send_and_process_appends_message_then_creates_task() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine.clone()),
        "POST",
        "/send-and-process",
        Some(json!({ "sessionId": "s-1", "message": "I have a headache" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "task-1");
    assert_eq!(
        *engine.calls.lock().unwrap(),
        vec!["send_message", "create_task"]
    );
}

#[tokio::test]
async fn tool_choice_is_required_for_hospital_requests() {
    for message in ["find a hospital near Ikeja", "is there a CLINIC nearby?"] {
        let engine = Arc::new(MockEngine::default());
        send_json(
            app_with_engine(engine.clone()),
            "POST",
            "/send-and-process",
            Some(json!({ "sessionId": "s-1", "message": message })),
        )
        .await;

        let tasks = engine.created_tasks.lock().unwrap();
        let (session_id, model, tool_choice) = &tasks[0];
        assert_eq!(session_id, "s-1");
        assert_eq!(model, "gemini-2-5-flash");
        assert_eq!(tool_choice, &json!("required"), "message: {message}");
    }
}

#[tokio::test]
async fn tool_choice_is_auto_otherwise() {
    let engine = Arc::new(MockEngine::default());
    send_json(
        app_with_engine(engine.clone()),
        "POST",
        "/send-and-process",
        Some(json!({ "sessionId": "s-1", "message": "I feel tired lately" })),
    )
    .await;

    let tasks = engine.created_tasks.lock().unwrap();
    assert_eq!(tasks[0].2, json!("auto"));
}

#[tokio::test]
async fn send_and_process_maps_engine_failure_to_500() {
    let engine = Arc::new(MockEngine::failing("session expired"));
    let (status, body) = send_json(
        app_with_engine(engine),
        "POST",
        "/send-and-process",
        Some(json!({ "sessionId": "s-1", "message": "hello" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error processing message");
    assert_eq!(body["error"], "session expired");
}

#[tokio::test]
async fn get_task_status_forwards_task() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine),
        "GET",
        "/get-task-status/s-1/t-9",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], "t-9");
}

#[tokio::test]
async fn submit_tool_outputs_requires_all_fields() {
    for body in [
        json!({}),
        json!({ "sessionId": "s-1", "taskId": "t-1" }),
        json!({ "sessionId": "s-1", "toolOutputs": {} }),
    ] {
        let engine = Arc::new(MockEngine::default());
        let (status, response) = send_json(
            app_with_engine(engine.clone()),
            "POST",
            "/submit-tool-outputs",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response["message"],
            "sessionId, taskId, and toolOutputs are required"
        );
        assert_eq!(engine.call_count(), 0);
    }
}

#[tokio::test]
async fn submit_tool_outputs_forwards_submission() {
    let engine = Arc::new(MockEngine::default());
    let outputs = json!({ "call-1": { "isEmergency": false } });
    let (status, body) = send_json(
        app_with_engine(engine),
        "POST",
        "/submit-tool-outputs",
        Some(json!({ "sessionId": "s-1", "taskId": "t-1", "toolOutputs": outputs })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["toolOutputs"]["call-1"]["isEmergency"], json!(false));
}

#[tokio::test]
async fn get_session_messages_forwards_list() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app_with_engine(engine),
        "GET",
        "/get-session-messages/s-1",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["sessionId"], "s-1");
}

// =============================================================================
// Hospital finder
// =============================================================================

#[tokio::test]
async fn find_hospitals_without_location_prompts_for_one() {
    for body in [json!({}), json!({ "location": "" }), json!({ "location": "   " })] {
        let engine = Arc::new(MockEngine::default());
        let (status, response) = send_json(
            app(engine, MockSearch::returning(vec![])),
            "POST",
            "/find-hospitals",
            Some(body),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            response,
            json!({ "hospitals": [], "message": "Please provide your location." })
        );
    }
}

#[tokio::test]
async fn find_hospitals_accepts_a_bodiless_post() {
    let engine = Arc::new(MockEngine::default());
    let (status, response) = send_json(
        app(engine, MockSearch::returning(vec![])),
        "POST",
        "/find-hospitals",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({ "hospitals": [], "message": "Please provide your location." })
    );
}

#[tokio::test]
async fn find_hospitals_caps_results_at_three() {
    let facilities: Vec<Facility> = (1..=7)
        .map(|i| Facility::new(format!("Hospital {i}"), format!("{i} Main St")))
        .collect();
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(engine, MockSearch::returning(facilities)),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Ikeja" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hospitals"].as_array().unwrap().len(), 3);
    assert_eq!(body["count"], 3);
    assert_eq!(body["location"], "Ikeja");
}

#[tokio::test]
async fn find_hospitals_reports_empty_results_without_error() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(engine, MockSearch::returning(vec![])),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Atlantis" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hospitals"], json!([]));
    assert_eq!(
        body["message"],
        "No hospitals found near Atlantis. Try searching \"Lagos\" for a wider area."
    );
}

#[tokio::test]
async fn find_hospitals_maps_timeout_to_friendly_message() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(engine, MockSearch::failing(SearchError::Timeout)),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Ikeja" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Search timed out. Please try again.");
    assert_eq!(body["hospitals"], json!([]));
}

#[tokio::test]
async fn find_hospitals_maps_rate_limit_to_friendly_message() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(engine, MockSearch::failing(SearchError::RateLimited)),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Ikeja" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Too many requests. Please wait a minute and try again."
    );
}

#[tokio::test]
async fn find_hospitals_maps_other_failures_to_generic_message() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(
            engine,
            MockSearch::failing(SearchError::Network("connection refused".to_string())),
        ),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Ikeja" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Having trouble searching for hospitals right now."
    );
}

#[tokio::test]
async fn find_hospitals_missing_api_key_is_a_config_error() {
    let engine = Arc::new(MockEngine::default());
    let (status, body) = send_json(
        app(engine, MockSearch::failing(SearchError::MissingApiKey)),
        "POST",
        "/find-hospitals",
        Some(json!({ "location": "Ikeja" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("missing places API key"));
}
