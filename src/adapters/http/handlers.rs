//! HTTP handlers for the relay endpoints.
//!
//! Each handler is a stateless pass-through: validate presence of required
//! identifiers, make the upstream call, reshape the failure. Domain
//! validation belongs to the engine.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::{is_emergency, tool_choice_for, tool_schema, ASSISTANT_INSTRUCTIONS};
use crate::ports::{EngineError, EngineGateway, FacilitySearch, SearchError, TaskRequest};

use super::dto::{
    ConfigErrorResponse, CreateSessionRequest, DetectEmergencyRequest, DetectEmergencyResponse,
    ErrorResponse, FindHospitalsRequest, FindHospitalsResponse, SendAndProcessRequest,
    SubmitToolOutputsRequest,
};

/// Maximum hospital entries ever returned to the caller.
const MAX_HOSPITALS: usize = 3;

/// Application state for the relay endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Engine gateway (injected)
    pub engine: Arc<dyn EngineGateway>,
    /// Facility search provider (injected)
    pub facilities: Arc<dyn FacilitySearch>,
    /// Model requested on task creation
    pub model: String,
}

fn engine_failure(context: &str, err: EngineError) -> Response {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::upstream(context, err.message)),
    )
        .into_response()
}

/// Create a session on the engine.
///
/// POST /create-session
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Response {
    let metadata = body
        .and_then(|Json(request)| request.metadata)
        .unwrap_or_else(|| json!({ "userID": "new-user" }));

    match state.engine.create_session(metadata).await {
        Ok(session) => {
            tracing::info!(
                session_id = session["data"]["id"].as_str().unwrap_or_default(),
                "session created"
            );
            Json(session).into_response()
        }
        Err(err) => engine_failure("Error creating session", err),
    }
}

/// Append the user's message to the session, then create a task to process
/// it. The returned task is what the frontend polls.
///
/// POST /send-and-process
pub async fn send_and_process(
    State(state): State<AppState>,
    Json(request): Json<SendAndProcessRequest>,
) -> Response {
    let (Some(session_id), Some(message)) = (request.session_id, request.message) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("sessionId and message are required")),
        )
            .into_response();
    };

    if let Err(err) = state.engine.send_message(&session_id, &message).await {
        return engine_failure("Error processing message", err);
    }

    let tool_choice = tool_choice_for(&message);
    tracing::debug!(?tool_choice, "tool choice selected");

    let task = TaskRequest {
        model: state.model.clone(),
        instructions: ASSISTANT_INSTRUCTIONS.to_string(),
        tools: tool_schema(),
        tool_choice,
    };

    match state.engine.create_task(&session_id, task).await {
        Ok(task) => {
            tracing::info!(
                task_id = task["data"]["id"].as_str().unwrap_or_default(),
                "message sent and task created"
            );
            Json(task).into_response()
        }
        Err(err) => engine_failure("Error processing message", err),
    }
}

/// Fetch the current task object.
///
/// GET /get-task-status/:sessionId/:taskId
pub async fn get_task_status(
    State(state): State<AppState>,
    Path((session_id, task_id)): Path<(String, String)>,
) -> Response {
    match state.engine.get_task(&session_id, &task_id).await {
        Ok(task) => Json(task).into_response(),
        Err(err) => engine_failure("Error getting task status", err),
    }
}

/// Submit tool outputs for a pending task.
///
/// POST /submit-tool-outputs
pub async fn submit_tool_outputs(
    State(state): State<AppState>,
    Json(request): Json<SubmitToolOutputsRequest>,
) -> Response {
    let (Some(session_id), Some(task_id), Some(tool_outputs)) =
        (request.session_id, request.task_id, request.tool_outputs)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "sessionId, taskId, and toolOutputs are required",
            )),
        )
            .into_response();
    };

    tracing::debug!(%session_id, %task_id, "submitting tool outputs");

    match state
        .engine
        .submit_tool_outputs(&session_id, &task_id, tool_outputs)
        .await
    {
        Ok(submission) => Json(submission).into_response(),
        Err(err) => engine_failure("Error submitting tool outputs", err),
    }
}

/// List a session's messages.
///
/// GET /get-session-messages/:sessionId
pub async fn get_session_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.engine.list_messages(&session_id).await {
        Ok(messages) => Json(messages).into_response(),
        Err(err) => engine_failure("Error getting session messages", err),
    }
}

/// Screen a message for emergency keywords.
///
/// POST /detect-emergency
///
/// A missing or empty body screens as a non-emergency, not a 4xx.
pub async fn detect_emergency(body: Option<Json<DetectEmergencyRequest>>) -> Response {
    let message = body
        .and_then(|Json(request)| request.message)
        .unwrap_or_default();
    let is_emergency = is_emergency(&message);
    tracing::debug!(is_emergency, "emergency screen");
    Json(DetectEmergencyResponse { is_emergency }).into_response()
}

/// Find up to three hospitals near a free-text location.
///
/// POST /find-hospitals
///
/// Always returns 200 with either a populated or an explanatory empty
/// result, except the commercial strategy's missing-API-key case.
pub async fn find_hospitals(
    State(state): State<AppState>,
    body: Option<Json<FindHospitalsRequest>>,
) -> Response {
    let location = body
        .and_then(|Json(request)| request.location)
        .filter(|l| !l.trim().is_empty());
    let Some(location) = location else {
        return Json(FindHospitalsResponse::empty("Please provide your location.")).into_response();
    };

    match state.facilities.search(&location).await {
        // The provider filters non-health results before returning, so a
        // zero-raw-hit search and a filtered-to-empty one both land here.
        Ok(facilities) if facilities.is_empty() => {
            tracing::debug!(%location, "no hospitals found");
            Json(FindHospitalsResponse::empty(format!(
                "No hospitals found near {location}. Try searching \"Lagos\" for a wider area."
            )))
            .into_response()
        }
        Ok(facilities) => {
            let hospitals: Vec<_> = facilities.into_iter().take(MAX_HOSPITALS).collect();
            tracing::info!(%location, count = hospitals.len(), "returning hospitals");
            Json(FindHospitalsResponse::found(hospitals, location)).into_response()
        }
        Err(SearchError::MissingApiKey) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ConfigErrorResponse {
                error: "Hospital search is not configured: missing places API key.".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, %location, "hospital search failed");
            Json(FindHospitalsResponse::empty(search_failure_message(&err))).into_response()
        }
    }
}

fn search_failure_message(err: &SearchError) -> &'static str {
    match err {
        SearchError::Timeout => "Search timed out. Please try again.",
        SearchError::RateLimited => "Too many requests. Please wait a minute and try again.",
        _ => "Having trouble searching for hospitals right now.",
    }
}
